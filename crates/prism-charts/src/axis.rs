//! Nice-tick axis labeling and label orientation.
//!
//! This module provides:
//! - [`nice_ticks`] - rounded tick values for a data range
//! - [`AxisLabeler`] - tick or title labels for the row, column and value axes
//! - [`billboard_rotation`] and [`axis_label_side`] - camera-facing label placement

use glam::Vec3;
use prism_core::math::Rotator;

/// Magnitude table searched for the tick step: `1e-6` through `1e19`.
pub const MAGNITUDE_STEPS: [f64; 26] = [
    1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1e-1, 1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10,
    1e11, 1e12, 1e13, 1e14, 1e15, 1e16, 1e17, 1e18, 1e19,
];

/// Tolerance for the tick coverage drift correction.
const DRIFT_TOLERANCE: f64 = 1e-6;

/// Digits of headroom used when rounding tick values.
const ROUNDING_DIGITS: usize = 7;

/// Result of [`nice_ticks`].
#[derive(Debug, Clone, PartialEq)]
pub struct NiceTicks {
    /// Distance between consecutive ticks.
    pub step: f64,
    /// Index into [`MAGNITUDE_STEPS`] of the bracket the raw step fell in.
    pub magnitude: usize,
    /// `count + 1` tick values.
    pub values: Vec<f64>,
}

/// Round `value` at the precision implied by a magnitude index.
///
/// The value is scaled up by powers of ten until it has
/// [`ROUNDING_DIGITS`] digits of headroom, rounded, then scaled back.
fn round_at_magnitude(value: f64, magnitude: usize) -> f64 {
    let shifts = ROUNDING_DIGITS.saturating_sub(magnitude);
    let mut v = value;
    for _ in 0..shifts {
        v *= 10.0;
    }
    v = v.round();
    for _ in 0..shifts {
        v /= 10.0;
    }
    v
}

/// Compute `count + 1` rounded tick values covering `[min, max]`.
///
/// The raw step `(max - min) / count` is bracketed in [`MAGNITUDE_STEPS`]
/// and grown in multiples of the next-lower magnitude until it covers the
/// raw step. The first tick sits at `floor(min / step) * step` and is nudged
/// upward while the last tick falls short of `max`.
///
/// A zero tick count is treated as 1 and an empty or inverted range as
/// `[min, min + 1]`.
pub fn nice_ticks(min: f64, max: f64, count: usize) -> NiceTicks {
    let count = count.max(1);
    let (min, max) = if max > min { (min, max) } else { (min, min + 1.0) };
    let raw = (max - min) / count as f64;

    let last = MAGNITUDE_STEPS.len() - 1;
    let magnitude = if raw > MAGNITUDE_STEPS[last] {
        last - 1
    } else {
        MAGNITUDE_STEPS
            .windows(2)
            .position(|w| w[0] < raw && raw <= w[1])
            .unwrap_or(0)
    };

    let lower = if magnitude == 0 {
        MAGNITUDE_STEPS[0]
    } else {
        MAGNITUDE_STEPS[magnitude - 1]
    };

    let step = if magnitude == 0 {
        MAGNITUDE_STEPS[0]
    } else {
        let base = MAGNITUDE_STEPS[magnitude];
        let mut multiplier = 1.0;
        while base + lower * multiplier < raw - lower * 1e-9 {
            multiplier += 1.0;
        }
        round_at_magnitude(base + lower * multiplier, magnitude)
    };

    let span = step * count as f64;
    let mut first = (min / step).floor() * step;
    while first + span < max && (max - (first + span)).abs() >= DRIFT_TOLERANCE {
        first += lower;
    }

    let mut values = Vec::with_capacity(count + 1);
    let mut value = first;
    for _ in 0..=count {
        value = round_at_magnitude(value, magnitude);
        values.push(value);
        value += step;
    }

    NiceTicks {
        step,
        magnitude,
        values,
    }
}

/// Text for a tick value: integers without decimals, others trimmed.
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.6}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// The three chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartAxis {
    /// Data rows, laid out along world Y.
    Row,
    /// Data columns, laid out along world X.
    Column,
    /// Data values, laid out along world Z.
    Value,
}

impl ChartAxis {
    pub fn direction(self) -> Vec3 {
        match self {
            ChartAxis::Row => Vec3::Y,
            ChartAxis::Column => Vec3::X,
            ChartAxis::Value => Vec3::Z,
        }
    }
}

/// Labels along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    pub axis: ChartAxis,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    /// Unit direction the ticks advance along.
    pub direction: Vec3,
}

/// Produces tick labels for each chart axis.
///
/// Row and column axes show titles when any are set (for example the sorted
/// categories of named-object input); otherwise every axis shows nice ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabeler {
    row_grid_count: usize,
    col_grid_count: usize,
    value_grid_count: usize,
    row_titles: Vec<String>,
    col_titles: Vec<String>,
}

impl Default for AxisLabeler {
    fn default() -> Self {
        Self {
            row_grid_count: 5,
            col_grid_count: 5,
            value_grid_count: 5,
            row_titles: Vec::new(),
            col_titles: Vec::new(),
        }
    }
}

impl AxisLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set grid counts per axis. Each is clamped to at least 1.
    pub fn with_grid_counts(mut self, row: usize, col: usize, value: usize) -> Self {
        self.row_grid_count = row.max(1);
        self.col_grid_count = col.max(1);
        self.value_grid_count = value.max(1);
        self
    }

    pub fn set_titles(&mut self, axis: ChartAxis, titles: Vec<String>) {
        match axis {
            ChartAxis::Row => self.row_titles = titles,
            ChartAxis::Column => self.col_titles = titles,
            ChartAxis::Value => {
                tracing::debug!("Value axis always shows numeric ticks; titles ignored");
            }
        }
    }

    pub fn titles(&self, axis: ChartAxis) -> &[String] {
        match axis {
            ChartAxis::Row => &self.row_titles,
            ChartAxis::Column => &self.col_titles,
            ChartAxis::Value => &[],
        }
    }

    pub fn grid_count(&self, axis: ChartAxis) -> usize {
        match axis {
            ChartAxis::Row => self.row_grid_count,
            ChartAxis::Column => self.col_grid_count,
            ChartAxis::Value => self.value_grid_count,
        }
    }

    /// Labels for one axis over a data range.
    pub fn ticks(&self, axis: ChartAxis, min: f64, max: f64) -> AxisTicks {
        let titles = self.titles(axis);
        if !titles.is_empty() {
            return AxisTicks {
                axis,
                values: (0..titles.len()).map(|i| i as f64).collect(),
                labels: titles.to_vec(),
                direction: axis.direction(),
            };
        }

        let ticks = nice_ticks(min, max, self.grid_count(axis));
        AxisTicks {
            axis,
            labels: ticks.values.iter().map(|v| format_tick(*v)).collect(),
            values: ticks.values,
            direction: axis.direction(),
        }
    }
}

/// Rotation that turns a label to face a camera with rotation `camera`.
pub fn billboard_rotation(camera: Rotator) -> Rotator {
    Rotator::new(-camera.pitch, camera.yaw + 180.0, camera.roll)
}

/// Which edge of the chart box an axis's labels sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    /// The edge at the low end of the perpendicular axis.
    Near,
    /// The edge at the high end of the perpendicular axis.
    Far,
}

/// Label sides for the column axis (along X) and row axis (along Y),
/// chosen so labels sit on the edge facing the camera.
pub fn axis_label_side(camera_position: Vec3, box_center: Vec3) -> (AxisSide, AxisSide) {
    let offset = camera_position - box_center;
    let side = |v: f32| if v < 0.0 { AxisSide::Near } else { AxisSide::Far };
    (side(offset.y), side(offset.x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_to_hundred_in_ten() {
        let ticks = nice_ticks(0.0, 100.0, 10);
        assert_eq!(ticks.step, 10.0);
        assert_eq!(ticks.values.len(), 11);
        assert_eq!(ticks.values[0], 0.0);
        assert_eq!(ticks.values[10], 100.0);
    }

    #[test]
    fn test_small_range_rounds_cleanly() {
        let ticks = nice_ticks(0.0, 1.0, 5);
        assert!((ticks.step - 0.2).abs() < 1e-12);
        assert_eq!(ticks.values, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_degenerate_range() {
        let ticks = nice_ticks(5.0, 5.0, 4);
        assert_eq!(ticks.values.len(), 5);
        assert!(ticks.values[0] <= 5.0);
        assert!(*ticks.values.last().unwrap() >= 6.0 - 1e-9);
    }

    #[test]
    fn test_zero_count_is_one() {
        let ticks = nice_ticks(0.0, 10.0, 0);
        assert_eq!(ticks.values.len(), 2);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(40.0), "40");
        assert_eq!(format_tick(-3.0), "-3");
        assert_eq!(format_tick(0.25), "0.25");
    }

    #[test]
    fn test_titles_override_ticks() {
        let mut labeler = AxisLabeler::new();
        labeler.set_titles(ChartAxis::Row, vec!["Jan".into(), "Feb".into()]);
        let ticks = labeler.ticks(ChartAxis::Row, 0.0, 1.0);
        assert_eq!(ticks.labels, vec!["Jan", "Feb"]);
        assert_eq!(ticks.direction, Vec3::Y);

        let value = labeler.ticks(ChartAxis::Value, 0.0, 50.0);
        assert_eq!(value.labels.len(), 6);
    }

    #[test]
    fn test_grid_counts_clamped() {
        let labeler = AxisLabeler::new().with_grid_counts(0, 3, 0);
        assert_eq!(labeler.grid_count(ChartAxis::Row), 1);
        assert_eq!(labeler.grid_count(ChartAxis::Column), 3);
        assert_eq!(labeler.grid_count(ChartAxis::Value), 1);
    }

    #[test]
    fn test_billboard_rotation() {
        let r = billboard_rotation(Rotator::new(20.0, 45.0, 3.0));
        assert_eq!(r, Rotator::new(-20.0, 225.0, 3.0));
    }

    #[test]
    fn test_axis_label_side() {
        let (col_side, row_side) = axis_label_side(Vec3::new(-100.0, 50.0, 10.0), Vec3::ZERO);
        assert_eq!(col_side, AxisSide::Far);
        assert_eq!(row_side, AxisSide::Near);
    }
}
