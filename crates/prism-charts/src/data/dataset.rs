//! Grid dataset with running statistics and the sorted time series.

use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `(row, col) -> value` entry, optionally stamped with a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub row: u32,
    pub col: u32,
    pub value: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f32>,
}

impl DataPoint {
    pub fn new(row: u32, col: u32, value: f32) -> Self {
        Self {
            row,
            col,
            value,
            time: None,
        }
    }

    pub fn with_time(mut self, time: f32) -> Self {
        self.time = Some(time);
        self
    }
}

/// A data point placed in the time-ordered series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub row: u32,
    pub col: u32,
    pub value: f32,
    /// Explicit time. Without one this is the earliest time of the dataset,
    /// or the sort key when the dataset carries no times at all.
    pub time_value: f32,
    /// Fallback ordering key: `row * 1000 + col`.
    pub sort_key: u64,
}

impl TimeSeriesPoint {
    fn from_point(point: &DataPoint, earliest: Option<f32>) -> Self {
        let sort_key = point.row as u64 * 1000 + point.col as u64;
        Self {
            row: point.row,
            col: point.col,
            value: point.value,
            time_value: point.time.or(earliest).unwrap_or(sort_key as f32),
            sort_key,
        }
    }
}

/// Running min/max over the three data axes.
///
/// X is the row index, Y the column index and Z the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl AxisBounds {
    pub const EMPTY: Self = Self {
        min_x: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        min_y: f32::INFINITY,
        max_y: f32::NEG_INFINITY,
        min_z: f32::INFINITY,
        max_z: f32::NEG_INFINITY,
    };

    /// Widen the bounds to contain a point.
    pub fn include(&mut self, x: f32, y: f32, z: f32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Normalized grid data: rows of `column -> value` maps plus statistics.
///
/// Rows may hold different column sets. Loading always replaces the whole
/// dataset; a failed load leaves the previous contents untouched.
#[derive(Debug, Clone, Default)]
pub struct ChartDataset {
    rows: BTreeMap<u32, BTreeMap<u32, f32>>,
    bounds: AxisBounds,
    total_count: usize,
    col_count: usize,
    series: Vec<TimeSeriesPoint>,
    time_bearing: bool,
}

impl ChartDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from points in one go.
    pub fn from_points(points: &[DataPoint]) -> ChartResult<Self> {
        let mut dataset = Self::new();
        dataset.load(points)?;
        Ok(dataset)
    }

    /// Replace the dataset with `points`.
    ///
    /// A repeated `(row, col)` overwrites the earlier value. If any point
    /// carries a time, the series is ordered by time, untimed points taking
    /// the earliest time and ties falling back to `row * 1000 + col`.
    /// Otherwise the series is ordered by `row * 1000 + col` alone.
    pub fn load(&mut self, points: &[DataPoint]) -> ChartResult<()> {
        if points.is_empty() {
            tracing::warn!("Ignoring empty data load");
            return Err(ChartError::EmptyInput { what: "data points" });
        }

        self.clear();
        self.time_bearing = points.iter().any(|p| p.time.is_some());

        let mut latest: BTreeMap<(u32, u32), DataPoint> = BTreeMap::new();
        for point in points {
            self.bounds
                .include(point.row as f32, point.col as f32, point.value);

            let row = self.rows.entry(point.row).or_default();
            if row.insert(point.col, point.value).is_none() {
                self.total_count += 1;
            }
            self.col_count = self.col_count.max(row.len());
            latest.insert((point.row, point.col), *point);
        }

        let earliest = latest
            .values()
            .filter_map(|p| p.time)
            .min_by(f32::total_cmp);
        self.series = latest
            .values()
            .map(|p| TimeSeriesPoint::from_point(p, earliest))
            .collect();
        if self.time_bearing {
            self.series.sort_by(|a, b| {
                a.time_value
                    .total_cmp(&b.time_value)
                    .then(a.sort_key.cmp(&b.sort_key))
            });
        } else {
            self.series.sort_by_key(|p| p.sort_key);
        }

        tracing::debug!(
            "Loaded {} cells over {} rows (time series: {})",
            self.total_count,
            self.rows.len(),
            self.time_bearing
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.bounds = AxisBounds::EMPTY;
        self.total_count = 0;
        self.col_count = 0;
        self.series.clear();
        self.time_bearing = false;
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn bounds(&self) -> &AxisBounds {
        &self.bounds
    }

    /// Number of distinct `(row, col)` cells.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Largest column count over all rows.
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Number of populated rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Grid dimensions `(rows, cols)` covering every row and column index.
    pub fn grid_dims(&self) -> (usize, usize) {
        let rows = self
            .rows
            .last_key_value()
            .map_or(0, |(row, _)| (*row as usize).saturating_add(1));
        let cols = self
            .rows
            .values()
            .filter_map(|cols| cols.last_key_value())
            .map(|(col, _)| (*col as usize).saturating_add(1))
            .max()
            .unwrap_or(0);
        (rows, cols)
    }

    /// Number of cells in the dense grid, or `None` if it overflows `usize`.
    pub fn dense_cell_count(&self) -> Option<usize> {
        let (rows, cols) = self.grid_dims();
        rows.checked_mul(cols)
    }

    pub fn value(&self, row: u32, col: u32) -> Option<f32> {
        self.rows.get(&row)?.get(&col).copied()
    }

    pub fn row(&self, row: u32) -> Option<&BTreeMap<u32, f32>> {
        self.rows.get(&row)
    }

    /// Rows in ascending row order.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &BTreeMap<u32, f32>)> {
        self.rows.iter().map(|(row, cols)| (*row, cols))
    }

    /// Every cell as `(row, col, value)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        self.rows
            .iter()
            .flat_map(|(row, cols)| cols.iter().map(move |(col, v)| (*row, *col, *v)))
    }

    /// Whether any loaded point carried an explicit time.
    pub fn is_time_bearing(&self) -> bool {
        self.time_bearing
    }

    /// Points ordered by time (or by the fallback sort key).
    pub fn time_series(&self) -> &[TimeSeriesPoint] {
        &self.series
    }

    /// Length of the series prefix revealed at `fraction` of the build-in.
    pub fn revealed_len(&self, fraction: f32) -> usize {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        ((self.series.len() as f32 * fraction).ceil() as usize).min(self.series.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<DataPoint> {
        vec![
            DataPoint::new(0, 0, 4.0),
            DataPoint::new(0, 1, 8.0),
            DataPoint::new(1, 0, 2.0),
            DataPoint::new(1, 1, 6.0),
            DataPoint::new(1, 2, 1.0),
        ]
    }

    #[test]
    fn test_load_tracks_statistics() {
        let dataset = ChartDataset::from_points(&points()).unwrap();
        let bounds = dataset.bounds();
        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 1.0);
        assert_eq!(bounds.max_y, 2.0);
        assert_eq!(bounds.min_z, 1.0);
        assert_eq!(bounds.max_z, 8.0);
        assert_eq!(dataset.total_count(), 5);
        assert_eq!(dataset.col_count(), 3);
        assert_eq!(dataset.grid_dims(), (2, 3));
    }

    #[test]
    fn test_duplicate_cell_last_write_wins() {
        let dataset = ChartDataset::from_points(&[
            DataPoint::new(2, 3, 1.0),
            DataPoint::new(2, 3, 9.0),
        ])
        .unwrap();
        assert_eq!(dataset.value(2, 3), Some(9.0));
        assert_eq!(dataset.total_count(), 1);
        assert_eq!(dataset.time_series().len(), 1);
    }

    #[test]
    fn test_empty_load_keeps_previous_state() {
        let mut dataset = ChartDataset::from_points(&points()).unwrap();
        assert!(matches!(
            dataset.load(&[]),
            Err(ChartError::EmptyInput { .. })
        ));
        assert_eq!(dataset.total_count(), 5);
    }

    #[test]
    fn test_reload_replaces_data() {
        let mut dataset = ChartDataset::from_points(&points()).unwrap();
        dataset.load(&[DataPoint::new(5, 5, -3.0)]).unwrap();
        assert_eq!(dataset.total_count(), 1);
        assert_eq!(dataset.value(0, 0), None);
        assert_eq!(dataset.bounds().min_x, 5.0);
    }

    #[test]
    fn test_series_sorted_by_fallback_key() {
        let dataset = ChartDataset::from_points(&[
            DataPoint::new(1, 0, 1.0),
            DataPoint::new(0, 2, 1.0),
            DataPoint::new(0, 1, 1.0),
        ])
        .unwrap();
        let keys: Vec<u64> = dataset.time_series().iter().map(|p| p.sort_key).collect();
        assert_eq!(keys, vec![1, 2, 1000]);
        assert!(!dataset.is_time_bearing());
    }

    #[test]
    fn test_series_sorted_by_time() {
        let dataset = ChartDataset::from_points(&[
            DataPoint::new(0, 0, 1.0).with_time(30.0),
            DataPoint::new(0, 1, 2.0).with_time(10.0),
            DataPoint::new(0, 2, 3.0).with_time(20.0),
        ])
        .unwrap();
        let cols: Vec<u32> = dataset.time_series().iter().map(|p| p.col).collect();
        assert_eq!(cols, vec![1, 2, 0]);
        assert!(dataset.is_time_bearing());
    }

    #[test]
    fn test_grid_dims_from_keys() {
        let dataset = ChartDataset::from_points(&[
            DataPoint::new(0, 0, 1.0),
            DataPoint::new(16_777_217, 3, 2.0),
        ])
        .unwrap();
        assert_eq!(dataset.grid_dims(), (16_777_218, 4));
        assert_eq!(dataset.dense_cell_count(), Some(16_777_218 * 4));
        assert_eq!(ChartDataset::new().grid_dims(), (0, 0));
    }

    #[test]
    fn test_untimed_points_sort_first() {
        let dataset = ChartDataset::from_points(&[
            DataPoint::new(0, 0, 1.0).with_time(5.0),
            DataPoint::new(9, 9, 2.0),
            DataPoint::new(0, 1, 3.0).with_time(2.0),
            DataPoint::new(0, 2, 4.0),
        ])
        .unwrap();
        let order: Vec<(u32, u32)> = dataset
            .time_series()
            .iter()
            .map(|p| (p.row, p.col))
            .collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (9, 9), (0, 0)]);
        assert_eq!(dataset.time_series()[1].time_value, 2.0);
    }

    #[test]
    fn test_revealed_len() {
        let dataset = ChartDataset::from_points(&points()).unwrap();
        assert_eq!(dataset.revealed_len(0.0), 0);
        assert_eq!(dataset.revealed_len(0.5), 3);
        assert_eq!(dataset.revealed_len(1.0), 5);
        assert_eq!(dataset.revealed_len(7.0), 5);
    }
}
