//! Statistic lines drawn across a chart.

use prism_mesh::LinearColor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatisticKind {
    Mean,
    Median,
    Max,
    Min,
    /// A fixed value supplied by the caller.
    Custom(f32),
}

impl StatisticKind {
    /// Statistic over `values`. `None` when there are no values.
    pub fn compute(self, values: &[f32]) -> Option<f32> {
        if values.is_empty() {
            return None;
        }
        match self {
            StatisticKind::Mean => Some(values.iter().sum::<f32>() / values.len() as f32),
            StatisticKind::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f32::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    Some((sorted[mid - 1] + sorted[mid]) * 0.5)
                } else {
                    Some(sorted[mid])
                }
            }
            StatisticKind::Max => values.iter().copied().reduce(f32::max),
            StatisticKind::Min => values.iter().copied().reduce(f32::min),
            StatisticKind::Custom(value) => Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticalLine {
    pub kind: StatisticKind,
    pub color: LinearColor,
    /// Label template; `{value}` is replaced with the statistic.
    pub label_format: String,
}

impl StatisticalLine {
    pub fn new(kind: StatisticKind) -> Self {
        Self {
            kind,
            color: LinearColor::WHITE,
            label_format: "{value}".to_string(),
        }
    }

    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.label_format = format.into();
        self
    }

    pub fn with_color(mut self, color: LinearColor) -> Self {
        self.color = color;
        self
    }

    pub fn label(&self, value: f32) -> String {
        self.label_format.replace("{value}", &format!("{:.2}", value))
    }

    /// Value and label for a dataset, if it has any values.
    pub fn evaluate(&self, values: &[f32]) -> Option<(f32, String)> {
        let value = self.kind.compute(values)?;
        Some((value, self.label(value)))
    }
}
