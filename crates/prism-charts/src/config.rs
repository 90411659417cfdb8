//! Per-chart-kind configuration with the stock defaults.

use crate::animation::AnimationConfig;
use crate::axis::AxisLabeler;
use crate::highlight::{ReferenceHighlight, ValueTrigger};
use crate::lod::LodConfig;
use crate::statistics::StatisticalLine;
use crate::zaxis::ZAxisConfig;
use prism_mesh::{ColorRamp, LinearColor};

/// Bar chart options.
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    /// Distance between row origins (world Y).
    pub row_spacing: f32,
    /// Distance between column origins (world X).
    pub col_spacing: f32,
    /// Bar extent along Y.
    pub bar_width: f32,
    /// Bar extent along X.
    pub bar_length: f32,
    pub emissive_intensity: f32,
    /// Emissive color of a hovered or selected bar.
    pub hover_color: LinearColor,
    /// Bars are colored by `value / max_value` bucket.
    pub colors: ColorRamp,
    pub z_axis: ZAxisConfig,
    pub reference: ReferenceHighlight,
    pub triggers: Vec<ValueTrigger>,
    pub statistics: Vec<StatisticalLine>,
    pub lod: LodConfig,
    pub axes: AxisLabeler,
    pub animation: AnimationConfig,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            row_spacing: 13.0,
            col_spacing: 13.0,
            bar_width: 10.0,
            bar_length: 10.0,
            emissive_intensity: 10.0,
            hover_color: LinearColor::CYAN,
            colors: ColorRamp::default(),
            z_axis: ZAxisConfig::default(),
            reference: ReferenceHighlight::default(),
            triggers: Vec::new(),
            statistics: Vec::new(),
            lod: LodConfig::default(),
            axes: AxisLabeler::default(),
            animation: AnimationConfig::default(),
        }
    }
}

/// How line chart segments are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Solid connecting boxes.
    #[default]
    Base,
    /// Connecting boxes shaded with a height gradient.
    Gradient,
    /// Connecting boxes drawn translucent.
    Transparent,
    /// A sphere marker per point.
    Point,
}

/// Line chart options.
#[derive(Debug, Clone)]
pub struct LineChartConfig {
    pub row_spacing: f32,
    pub col_spacing: f32,
    /// Segment extent along Y.
    pub line_width: f32,
    pub style: LineStyle,
    pub sphere_radius: f32,
    pub sphere_slices: u32,
    pub sphere_stacks: u32,
    /// Alpha of [`LineStyle::Transparent`] segments.
    pub transparent_alpha: f32,
    pub emissive_intensity: f32,
    pub hover_color: LinearColor,
    /// Row `r` is drawn with `colors[r % len]`.
    pub colors: ColorRamp,
    pub z_axis: ZAxisConfig,
    pub triggers: Vec<ValueTrigger>,
    pub statistics: Vec<StatisticalLine>,
    pub axes: AxisLabeler,
    pub animation: AnimationConfig,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            row_spacing: 13.0,
            col_spacing: 13.0,
            line_width: 10.0,
            style: LineStyle::Base,
            sphere_radius: 10.0,
            sphere_slices: 32,
            sphere_stacks: 16,
            transparent_alpha: 0.5,
            emissive_intensity: 10.0,
            hover_color: LinearColor::CYAN,
            colors: ColorRamp::default(),
            z_axis: ZAxisConfig::default(),
            triggers: Vec::new(),
            statistics: Vec::new(),
            axes: AxisLabeler::default(),
            animation: AnimationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PieStyle {
    #[default]
    Base,
    Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PieShape {
    /// Solid disc.
    #[default]
    Round,
    /// Ring with an inner hole.
    Circular,
    /// Ring whose wedges grow outward with their index.
    Nightingale,
    /// Ring with a gap between wedges.
    SectorGap,
}

/// Where pie labels sit relative to the outer edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPosition {
    Inside,
    #[default]
    Outside,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieLabelConfig {
    pub enabled: bool,
    /// Template with `{category}` and `{value}` placeholders.
    pub format: String,
    pub position: LabelPosition,
    /// Extra radial distance in [`LabelPosition::Outside`] mode.
    pub offset: f32,
    /// Hide every label until its wedge is hovered.
    pub show_on_hover: bool,
    pub leader_line: bool,
}

impl Default for PieLabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            format: "{category}: {value}".to_string(),
            position: LabelPosition::Outside,
            offset: 10.0,
            show_on_hover: false,
            leader_line: true,
        }
    }
}

impl PieLabelConfig {
    pub fn text(&self, category: &str, value: f32) -> String {
        self.format
            .replace("{category}", category)
            .replace("{value}", &format!("{:.2}", value))
    }
}

/// Pie chart options.
#[derive(Debug, Clone)]
pub struct PieChartConfig {
    pub style: PieStyle,
    pub shape: PieShape,
    pub inner_diameter: f32,
    pub outer_diameter: f32,
    pub section_height: f32,
    /// Degrees removed from the end of every wedge in
    /// [`PieShape::SectorGap`].
    pub gap_angle: f32,
    /// Outer growth per wedge index in [`PieShape::Nightingale`].
    pub nightingale_offset: f32,
    /// Extra outer radius of a hovered wedge when `zoom_on_hover` is set.
    pub zoom_offset: f32,
    /// Radial push of a hovered wedge when `pop_on_hover` is set.
    pub pop_offset: f32,
    pub zoom_on_hover: bool,
    pub pop_on_hover: bool,
    pub emissive_intensity: f32,
    pub hover_color: LinearColor,
    /// Wedge `i` uses `colors[i]`, black past the end.
    pub colors: ColorRamp,
    pub labels: PieLabelConfig,
    pub triggers: Vec<ValueTrigger>,
    pub lod: LodConfig,
    pub animation: AnimationConfig,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            style: PieStyle::Base,
            shape: PieShape::Round,
            inner_diameter: 110.0,
            outer_diameter: 185.0,
            section_height: 50.0,
            gap_angle: 5.0,
            nightingale_offset: 10.0,
            zoom_offset: 20.0,
            pop_offset: 0.0,
            zoom_on_hover: true,
            pop_on_hover: false,
            emissive_intensity: 10.0,
            hover_color: LinearColor::CYAN,
            colors: ColorRamp::default(),
            labels: PieLabelConfig::default(),
            triggers: Vec::new(),
            lod: LodConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

/// Effective pie geometry after the shape has switched parts on or off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPieShape {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub gap_angle: f32,
    pub nightingale_offset: f32,
}

impl PieChartConfig {
    pub fn resolved_shape(&self) -> ResolvedPieShape {
        let (inner, gap, nightingale) = match self.shape {
            PieShape::Round => (0.0, 0.0, 0.0),
            PieShape::Circular => (self.inner_diameter, 0.0, 0.0),
            PieShape::Nightingale => (self.inner_diameter, 0.0, self.nightingale_offset),
            PieShape::SectorGap => (self.inner_diameter, self.gap_angle, 0.0),
        };
        ResolvedPieShape {
            inner_radius: inner,
            outer_radius: self.outer_diameter,
            gap_angle: gap,
            nightingale_offset: nightingale,
        }
    }

    /// Pop and zoom growth `(inner, outer)` applied to a hovered wedge.
    pub fn hover_growth(&self) -> (f32, f32) {
        let pop = if self.pop_on_hover { self.pop_offset } else { 0.0 };
        let zoom = if self.zoom_on_hover { self.zoom_offset } else { 0.0 };
        (pop, pop + zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_shapes_resolve() {
        let mut config = PieChartConfig::default();
        let round = config.resolved_shape();
        assert_eq!((round.inner_radius, round.gap_angle), (0.0, 0.0));

        config.shape = PieShape::SectorGap;
        let gap = config.resolved_shape();
        assert_eq!((gap.inner_radius, gap.gap_angle), (110.0, 5.0));
        assert_eq!(gap.nightingale_offset, 0.0);

        config.shape = PieShape::Nightingale;
        assert_eq!(config.resolved_shape().nightingale_offset, 10.0);
    }

    #[test]
    fn test_hover_growth() {
        let mut config = PieChartConfig::default();
        assert_eq!(config.hover_growth(), (0.0, 20.0));
        config.pop_on_hover = true;
        config.pop_offset = 5.0;
        assert_eq!(config.hover_growth(), (5.0, 25.0));
        config.zoom_on_hover = false;
        assert_eq!(config.hover_growth(), (5.0, 5.0));
    }

    #[test]
    fn test_label_text() {
        let labels = PieLabelConfig::default();
        assert_eq!(labels.text("Rent", 1200.0), "Rent: 1200.00");
    }

    #[test]
    fn test_line_defaults() {
        let config = LineChartConfig::default();
        assert_eq!(config.style, LineStyle::Base);
        assert_eq!((config.sphere_slices, config.sphere_stacks), (32, 16));
    }
}
