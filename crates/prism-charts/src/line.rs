//! Line charts: one segment per point, joining it to the next point of its row.

use crate::animation::AnimationConfig;
use crate::axis::{AxisTicks, ChartAxis};
use crate::config::{LineChartConfig, LineStyle};
use crate::data::{ChartDataset, named_objects_to_points};
use crate::error::{ChartError, ChartResult};
use crate::highlight::evaluate_triggers;
use crate::interaction::SelectionUnits;
use crate::renderer::{ChartInput, ChartKind, ChartRenderer, StatisticValue};
use crate::section_state::{SectionLabel, SectionRenderState, prepare_states};
use glam::Vec3;
use prism_core::alloc::HashMap;
use prism_core::profiling::profile_function;
use prism_mesh::{
    BoxSpec, SectionDirtyFlags, SectionMeshStore, SphereSpec, build_box, build_sphere,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct LineSection {
    row: u32,
    col: u32,
    /// Position of the row among populated rows; also its selection unit.
    row_ordinal: usize,
    /// Drawn height at this point.
    height: f32,
    /// Drawn height at the next point of the row (this point for the last).
    next_height: f32,
    /// Position in the time-ordered series.
    rank: usize,
}

impl LineSection {
    fn section_height(&self) -> f32 {
        self.height.max(self.next_height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineChartRenderer {
    config: LineChartConfig,
    dataset: ChartDataset,
    sections: Vec<LineSection>,
    lookup: HashMap<(u32, u32), usize>,
    row_count: usize,
}

impl LineChartRenderer {
    pub fn new(config: LineChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    /// Changes take effect on the next rebuild.
    pub fn config_mut(&mut self) -> &mut LineChartConfig {
        &mut self.config
    }

    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// `(row, col)` of the point a section starts at.
    pub fn section_cell(&self, section: usize) -> Option<(u32, u32)> {
        self.sections.get(section).map(|s| (s.row, s.col))
    }

    fn adjusted(&self, raw: f32) -> f32 {
        let bounds = self.dataset.bounds();
        self.config
            .z_axis
            .adjusted_height(raw, bounds.min_z, bounds.max_z)
    }

    fn collect_sections(&mut self) {
        let ranks: HashMap<(u32, u32), usize> = self
            .dataset
            .time_series()
            .iter()
            .enumerate()
            .map(|(rank, p)| ((p.row, p.col), rank))
            .collect();

        let mut sections = Vec::with_capacity(self.dataset.total_count());
        for (row_ordinal, (row, cols)) in self.dataset.rows().enumerate() {
            let points: Vec<(u32, f32)> = cols.iter().map(|(c, v)| (*c, *v)).collect();
            let last = points.len().saturating_sub(1);
            for (j, (col, value)) in points.iter().enumerate() {
                let next = (j + 1).min(last);
                sections.push(LineSection {
                    row,
                    col: *col,
                    row_ordinal,
                    height: self.adjusted(*value),
                    next_height: self.adjusted(points[next].1),
                    rank: ranks.get(&(row, *col)).copied().unwrap_or(0),
                });
            }
        }

        self.row_count = self.dataset.row_count();
        self.lookup = sections
            .iter()
            .enumerate()
            .map(|(i, s)| ((s.row, s.col), i))
            .collect();
        self.sections = sections;
    }

    fn row_max(&self, row: u32) -> Option<f32> {
        self.dataset.row(row)?.values().copied().reduce(f32::max)
    }
}

impl ChartRenderer for LineChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn animation_config(&self) -> AnimationConfig {
        self.config.animation
    }

    fn load(&mut self, input: ChartInput) -> ChartResult<()> {
        match input {
            ChartInput::Grid(points) => self.dataset.load(&points),
            ChartInput::Records { records, mapping } => {
                let (points, categories) = named_objects_to_points(&records, &mapping)?;
                self.dataset.load(&points)?;
                self.config.axes.set_titles(ChartAxis::Row, categories.rows);
                self.config.axes.set_titles(ChartAxis::Column, categories.cols);
                Ok(())
            }
            other => Err(ChartError::UnsupportedInput {
                chart: ChartKind::Line.name(),
                input: other.shape_name(),
            }),
        }
    }

    fn rebuild(
        &mut self,
        store: &mut SectionMeshStore,
        states: &mut Vec<SectionRenderState>,
    ) -> ChartResult<()> {
        profile_function!();

        self.collect_sections();
        let count = self.sections.len();
        store.prepare(count);
        prepare_states(states, count);

        let config = &self.config;
        for (index, section) in self.sections.iter().enumerate() {
            let mut color = config.colors.cyclic(section.row_ordinal);
            if config.style == LineStyle::Transparent {
                color = color.with_alpha(config.transparent_alpha);
            }
            let origin = Vec3::new(
                section.col as f32 * config.col_spacing,
                section.row as f32 * config.row_spacing,
                0.0,
            );

            if let Some(mesh) = store.section_mut(index) {
                match config.style {
                    LineStyle::Point => build_sphere(
                        mesh,
                        &SphereSpec {
                            center: origin + Vec3::new(0.0, 0.0, section.height),
                            radius: config.sphere_radius,
                            slices: config.sphere_slices,
                            stacks: config.sphere_stacks,
                            color,
                        },
                    ),
                    _ => build_box(
                        mesh,
                        &BoxSpec {
                            position: origin,
                            length: config.col_spacing,
                            width: config.line_width,
                            height: section.height,
                            next_height: section.next_height,
                            color,
                        },
                    ),
                }
            }

            let height = section.section_height();
            let state = &mut states[index];
            state.color = color;
            state.hover_emissive = config.hover_color;
            state.height = height;
            state.gradient = config.style == LineStyle::Gradient;
            state.label = Some(SectionLabel::hidden(
                format!("{}", height.round() as i64),
                origin + Vec3::new(0.0, 0.0, height + 5.0),
            ));
            let rule = self
                .row_max(section.row)
                .and_then(|max| evaluate_triggers(&config.triggers, max));
            state.set_rule(rule, config.emissive_intensity);
        }

        store.backup_vertex_z();
        tracing::debug!(
            "Built line chart: {} rows, {} segments ({:?})",
            self.row_count,
            count,
            config.style
        );
        Ok(())
    }

    /// Scale heights and, for time-bearing data, reveal points in time order.
    fn animate(
        &mut self,
        store: &mut SectionMeshStore,
        states: &mut [SectionRenderState],
        progress: f32,
    ) {
        store.apply_height_scale(progress);
        if !self.dataset.is_time_bearing() {
            return;
        }
        let revealed = self.dataset.revealed_len(progress);
        for (index, section) in self.sections.iter().enumerate() {
            let visible = section.rank < revealed;
            if let Some(state) = states.get_mut(index)
                && state.visible != visible
            {
                state.visible = visible;
                store.mark_dirty(index, SectionDirtyFlags::VISIBILITY);
            }
        }
    }

    fn hit_test(&self, local: Vec3) -> Option<usize> {
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let row = (local.y / self.config.row_spacing).floor() as u32;
        let col = (local.x / self.config.col_spacing).floor() as u32;
        self.lookup.get(&(row, col)).copied()
    }

    fn selection_units(&self) -> SelectionUnits {
        SelectionUnits {
            section_units: self.sections.iter().map(|s| s.row_ordinal).collect(),
            unit_count: self.row_count,
        }
    }

    fn on_highlight(
        &mut self,
        store: &mut SectionMeshStore,
        states: &mut [SectionRenderState],
        section: usize,
        highlighted: bool,
    ) {
        if let Some(state) = states.get_mut(section) {
            state.set_highlighted(highlighted, self.config.emissive_intensity);
            state.set_label_visible(highlighted);
            store.mark_dirty(section, SectionDirtyFlags::MATERIAL);
        }
    }

    fn axis_ticks(&self) -> Vec<AxisTicks> {
        if self.dataset.is_empty() {
            return Vec::new();
        }
        let bounds = self.dataset.bounds();
        let (z_min, z_max) = self.config.z_axis.axis_range(bounds.min_z, bounds.max_z);
        let axes = &self.config.axes;
        vec![
            axes.ticks(ChartAxis::Row, bounds.min_x as f64, bounds.max_x as f64),
            axes.ticks(ChartAxis::Column, bounds.min_y as f64, bounds.max_y as f64),
            axes.ticks(ChartAxis::Value, z_min as f64, z_max as f64),
        ]
    }

    fn statistics(&self) -> Vec<StatisticValue> {
        let values: Vec<f32> = self.dataset.cells().map(|(_, _, v)| v).collect();
        self.config
            .statistics
            .iter()
            .filter_map(|line| {
                let (value, label) = line.evaluate(&values)?;
                Some(StatisticValue {
                    value,
                    height: self.adjusted(value),
                    label,
                    color: line.color,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataPoint;
    use crate::highlight::{Comparison, ValueTrigger};
    use prism_mesh::LinearColor;

    fn two_rows() -> Vec<DataPoint> {
        vec![
            DataPoint::new(0, 0, 10.0),
            DataPoint::new(0, 1, 30.0),
            DataPoint::new(0, 2, 20.0),
            DataPoint::new(1, 0, 5.0),
            DataPoint::new(1, 1, 7.0),
        ]
    }

    fn built(config: LineChartConfig, points: Vec<DataPoint>) -> (LineChartRenderer, SectionMeshStore, Vec<SectionRenderState>) {
        let mut renderer = LineChartRenderer::new(config);
        renderer.load(ChartInput::Grid(points)).unwrap();
        let mut store = SectionMeshStore::new();
        let mut states = Vec::new();
        renderer.rebuild(&mut store, &mut states).unwrap();
        (renderer, store, states)
    }

    #[test]
    fn test_segment_heights_join_next_point() {
        let (renderer, store, states) = built(LineChartConfig::default(), two_rows());
        assert_eq!(renderer.section_count(), 5);
        assert_eq!(store.len(), 6);

        assert_eq!(states[0].height, 30.0);
        assert_eq!(states[1].height, 30.0);
        assert_eq!(states[2].height, 20.0, "last point joins itself");
        assert_eq!(states[0].label.as_ref().unwrap().text, "30");

        let front_top = store.section(0).unwrap().vertices.iter().map(|v| v.z).fold(0.0f32, f32::max);
        assert_eq!(front_top, 30.0);
    }

    #[test]
    fn test_rows_take_cyclic_colors() {
        let (_, _, states) = built(LineChartConfig::default(), two_rows());
        let ramp = LineChartConfig::default().colors;
        assert_eq!(states[0].color, ramp.cyclic(0));
        assert_eq!(states[3].color, ramp.cyclic(1));
    }

    #[test]
    fn test_point_style_builds_spheres() {
        let config = LineChartConfig {
            style: LineStyle::Point,
            sphere_slices: 8,
            sphere_stacks: 4,
            ..Default::default()
        };
        let (_, store, _) = built(config, two_rows());
        assert_eq!(store.section(0).unwrap().vertex_count(), 9 * 5);
        assert_eq!(store.section(0).unwrap().triangle_count(), 8 * 4 * 2);
    }

    #[test]
    fn test_transparent_and_gradient_styles() {
        let config = LineChartConfig {
            style: LineStyle::Transparent,
            ..Default::default()
        };
        let (_, _, states) = built(config, two_rows());
        assert_eq!(states[0].color.a, 0.5);

        let config = LineChartConfig {
            style: LineStyle::Gradient,
            ..Default::default()
        };
        let (_, _, states) = built(config, two_rows());
        assert!(states[1].gradient);
    }

    #[test]
    fn test_hit_test_and_row_units() {
        let (renderer, _, _) = built(LineChartConfig::default(), two_rows());
        assert_eq!(renderer.hit_test(Vec3::new(14.0, 14.0, 0.0)), Some(4));
        assert_eq!(renderer.hit_test(Vec3::new(30.0, 14.0, 0.0)), None);
        let units = renderer.selection_units();
        assert_eq!(units.section_units, vec![0, 0, 0, 1, 1]);
        assert_eq!(units.unit_count, 2);
    }

    #[test]
    fn test_triggers_use_row_max() {
        let config = LineChartConfig {
            triggers: vec![ValueTrigger::compare(Comparison::Greater, 25.0, LinearColor::WHITE)],
            ..Default::default()
        };
        let (_, _, states) = built(config, two_rows());
        assert!(states[..3].iter().all(|s| s.rule_emissive == Some(LinearColor::WHITE)));
        assert!(states[3..5].iter().all(|s| s.rule_emissive.is_none()));
    }

    #[test]
    fn test_time_reveal() {
        let points = vec![
            DataPoint::new(0, 0, 1.0).with_time(3.0),
            DataPoint::new(0, 1, 1.0).with_time(1.0),
            DataPoint::new(0, 2, 1.0).with_time(2.0),
        ];
        let (mut renderer, mut store, mut states) = built(LineChartConfig::default(), points);

        renderer.animate(&mut store, &mut states, 0.5);
        assert!(!states[0].visible);
        assert!(states[1].visible);
        assert!(states[2].visible);

        renderer.animate(&mut store, &mut states, 1.0);
        assert!(states[..3].iter().all(|s| s.visible));
    }
}
