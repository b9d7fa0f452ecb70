use grid_backdrop::cell::rendered_rect;
use grid_backdrop::layout::{generate, Occupancy};
use grid_backdrop::{Cell, GridConfig, Rect};

fn rects(cells: &[Cell]) -> Vec<Rect> {
    cells.iter().map(rendered_rect).collect()
}

fn assert_disjoint(cells: &[Cell]) {
    let rects = rects(cells);
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn cells_never_overlap() {
    let config = GridConfig::default();
    for seed in 0..8 {
        let mut rng = fastrand::Rng::with_seed(seed);
        for columns in 1..=14 {
            for rows in 1..=14 {
                let cells = generate(columns, rows, &config, &mut rng, 0.0);
                assert_disjoint(&cells);
            }
        }
    }
}

#[test]
fn spans_respect_edges_and_cap() {
    let config = GridConfig::default();
    let mut rng = fastrand::Rng::with_seed(7);
    for columns in 1..=14 {
        for rows in 1..=14 {
            for cell in generate(columns, rows, &config, &mut rng, 0.0) {
                let edge_cols = (columns - cell.start_col).min(3);
                let edge_rows = (rows - cell.start_row).min(3);
                assert_eq!(cell.max_col_span, edge_cols);
                assert_eq!(cell.max_row_span, edge_rows);
                assert!((1..=edge_cols).contains(&cell.target_col_span));
                assert!((1..=edge_rows).contains(&cell.target_row_span));
                assert!(rendered_rect(&cell).fits_within(columns, rows));
            }
        }
    }
}

#[test]
fn regenerating_same_dimensions_keeps_invariant() {
    let config = GridConfig::default();
    let mut rng = fastrand::Rng::with_seed(42);
    let first = generate(9, 11, &config, &mut rng, 0.0);
    let second = generate(9, 11, &config, &mut rng, 0.0);
    assert_disjoint(&first);
    assert_disjoint(&second);
}

#[test]
fn single_row_of_three() {
    let config = GridConfig::default();
    for seed in 0..32 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let cells = generate(3, 1, &config, &mut rng, 0.0);
        assert!(!cells.is_empty() && cells.len() <= 3);

        let mut columns_used = [false; 3];
        let mut coverage = 0;
        for rect in rects(&cells) {
            assert_eq!(rect.rows, 1);
            coverage += rect.cols;
            for col in rect.col..rect.col_end() {
                assert!(!columns_used[col as usize], "column {col} shared");
                columns_used[col as usize] = true;
            }
        }
        assert!(coverage <= 3);
    }
}

#[test]
fn greedy_scan_covers_the_whole_grid() {
    let config = GridConfig::default();
    let mut rng = fastrand::Rng::with_seed(3);
    for (columns, rows) in [(1, 1), (6, 6), (14, 6), (7, 13), (14, 14)] {
        let cells = generate(columns, rows, &config, &mut rng, 0.0);
        let mut occupancy = Occupancy::new(columns, rows);
        let mut area = 0;
        for rect in rects(&cells) {
            occupancy.mark(rect);
            area += rect.cols * rect.rows;
        }
        assert!(occupancy.is_full());
        assert_eq!(area, columns * rows);
    }
}

#[test]
fn anchors_follow_row_major_discovery_order() {
    let config = GridConfig::default();
    let mut rng = fastrand::Rng::with_seed(11);
    let cells = generate(12, 8, &config, &mut rng, 0.0);
    let order: Vec<_> = cells.iter().map(|c| c.start_row * 12 + c.start_col).collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert_eq!((cells[0].start_col, cells[0].start_row), (0, 0));
}

#[test]
fn new_cells_rest_at_their_initial_span() {
    let config = GridConfig::default();
    let mut rng = fastrand::Rng::with_seed(5);
    for cell in generate(10, 10, &config, &mut rng, 1_000.0) {
        assert_eq!(cell.current_col_span, cell.target_col_span as f64);
        assert_eq!(cell.current_row_span, cell.target_row_span as f64);
        assert_eq!(cell.last_retarget_ms, 1_000.0);
        assert!((2000.0..5000.0).contains(&cell.retarget_interval_ms));
        assert!((0.0..std::f64::consts::TAU).contains(&cell.phase));
    }
}

#[test]
fn empty_dimensions_yield_no_cells() {
    let config = GridConfig::default();
    let mut rng = fastrand::Rng::with_seed(0);
    assert!(generate(0, 5, &config, &mut rng, 0.0).is_empty());
    assert!(generate(5, 0, &config, &mut rng, 0.0).is_empty());
}

#[test]
fn occupancy_reports_first_free_row_major() {
    let mut occupancy = Occupancy::new(3, 2);
    assert_eq!(occupancy.first_free(), Some((0, 0)));
    occupancy.mark(Rect::new(0, 0, 2, 2));
    assert_eq!(occupancy.first_free(), Some((2, 0)));
    assert!(occupancy.is_taken(1, 1));
    assert!(occupancy.is_taken(3, 0), "outside the grid counts as taken");
    occupancy.mark(Rect::new(2, 0, 1, 2));
    assert_eq!(occupancy.first_free(), None);
}
