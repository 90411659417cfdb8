//! Canned chart inputs.

use prism_charts::DataPoint;

/// A dense `rows x cols` grid where cell `(r, c)` holds `r * cols + c`.
pub fn grid_points(rows: u32, cols: u32) -> Vec<DataPoint> {
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| DataPoint::new(row, col, (row * cols + col) as f32)))
        .collect()
}

/// A single row whose points arrive out of column order in time.
pub fn timed_row(times: &[f32]) -> Vec<DataPoint> {
    times
        .iter()
        .enumerate()
        .map(|(col, t)| DataPoint::new(0, col as u32, (col + 1) as f32).with_time(*t))
        .collect()
}

/// The `A: 10, B: 20, C: 30` category map.
pub fn abc_categories() -> Vec<(String, f32)> {
    vec![
        ("A".to_string(), 10.0),
        ("B".to_string(), 20.0),
        ("C".to_string(), 30.0),
    ]
}

/// Monthly sales records keyed `Month`, `Team` and `Sales`.
pub const SALES_RECORDS_JSON: &str = r#"[
    {"Month": "Feb", "Team": "North", "Sales": 12.5},
    {"Month": "Jan", "Team": "North", "Sales": 8.0},
    {"Month": "Jan", "Team": "South", "Sales": 4.25},
    {"Month": "Mar", "Team": "South", "Sales": 15.0}
]"#;
