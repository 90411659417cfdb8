//! Category values and the prefix sums that turn them into pie angles.

use crate::error::{ChartError, ChartResult};

/// Ordered `category -> value` pairs with accumulated totals.
///
/// `accumulated[i]` is the sum of the first `i + 1` values and the extra
/// last entry repeats the grand total, so the array has `len + 1` entries.
/// Input order is preserved; nothing is sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValues {
    categories: Vec<String>,
    values: Vec<f32>,
    accumulated: Vec<f32>,
    angle_factor: f32,
}

impl CategoryValues {
    pub fn load<I, S>(input: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let (categories, values): (Vec<String>, Vec<f32>) =
            input.into_iter().map(|(c, v)| (c.into(), v)).unzip();

        if values.is_empty() {
            tracing::warn!("Pie load rejected: no categories");
            return Err(ChartError::EmptyInput { what: "categories" });
        }

        let mut accumulated = Vec::with_capacity(values.len() + 1);
        let mut total = 0.0f32;
        for value in &values {
            total += value;
            accumulated.push(total);
        }
        accumulated.push(total);

        if total.is_nan() || total <= 0.0 {
            tracing::warn!("Pie load rejected: category total {} is not positive", total);
            return Err(ChartError::NonPositiveTotal { total });
        }

        Ok(Self {
            categories,
            values,
            accumulated,
            angle_factor: 360.0 / total,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn category(&self, index: usize) -> Option<&str> {
        self.categories.get(index).map(String::as_str)
    }

    pub fn value(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn accumulated(&self) -> &[f32] {
        &self.accumulated
    }

    pub fn total(&self) -> f32 {
        self.accumulated[self.values.len()]
    }

    /// Degrees per unit of value: `360 / total`.
    pub fn angle_factor(&self) -> f32 {
        self.angle_factor
    }

    /// Angular range of a wedge in degrees, before any gap is removed.
    pub fn wedge_range(&self, index: usize) -> Option<(f32, f32)> {
        let end = *self.accumulated.get(index)?;
        if index >= self.values.len() {
            return None;
        }
        let start = if index == 0 {
            0.0
        } else {
            self.accumulated[index - 1]
        };
        Some((start * self.angle_factor, end * self.angle_factor))
    }

    /// Find the wedge whose `[start, end - gap)` range contains `angle`.
    ///
    /// `angle` is normalized to `[0, 360)` first. Angles inside a gap hit
    /// nothing.
    pub fn wedge_at(&self, angle: f32, gap: f32) -> Option<usize> {
        let angle = angle.rem_euclid(360.0);
        let mut start = 0.0f32;
        for (i, acc) in self.accumulated[..self.values.len()].iter().enumerate() {
            let end = acc * self.angle_factor - gap;
            if angle >= start && angle < end {
                return Some(i);
            }
            start = end + gap;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> CategoryValues {
        CategoryValues::load([("A", 10.0), ("B", 20.0), ("C", 30.0)]).unwrap()
    }

    #[test]
    fn test_accumulated_has_trailing_total() {
        let pie = abc();
        assert_eq!(pie.accumulated(), &[10.0, 30.0, 60.0, 60.0]);
        assert_eq!(pie.angle_factor(), 6.0);
        assert_eq!(pie.total(), 60.0);
    }

    #[test]
    fn test_wedge_ranges() {
        let pie = abc();
        assert_eq!(pie.wedge_range(0), Some((0.0, 60.0)));
        assert_eq!(pie.wedge_range(1), Some((60.0, 180.0)));
        assert_eq!(pie.wedge_range(2), Some((180.0, 360.0)));
        assert_eq!(pie.wedge_range(3), None);
    }

    #[test]
    fn test_wedge_at_excludes_gap() {
        let pie = abc();
        assert_eq!(pie.wedge_at(30.0, 0.0), Some(0));
        assert_eq!(pie.wedge_at(60.0, 0.0), Some(1));
        assert_eq!(pie.wedge_at(-10.0, 0.0), Some(2));

        assert_eq!(pie.wedge_at(57.0, 5.0), None);
        assert_eq!(pie.wedge_at(54.0, 5.0), Some(0));
        assert_eq!(pie.wedge_at(176.0, 5.0), None);
    }

    #[test]
    fn test_rejects_non_positive_total() {
        assert!(matches!(
            CategoryValues::load([("A", 5.0), ("B", -5.0)]),
            Err(ChartError::NonPositiveTotal { .. })
        ));
        assert!(matches!(
            CategoryValues::load(Vec::<(String, f32)>::new()),
            Err(ChartError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_preserves_input_order() {
        let pie = CategoryValues::load([("z", 1.0), ("a", 1.0)]).unwrap();
        assert_eq!(pie.categories(), &["z".to_string(), "a".to_string()]);
    }
}
