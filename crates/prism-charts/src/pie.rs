//! Pie charts: one wedge per category, repeated for every LOD level.

use crate::animation::AnimationConfig;
use crate::config::{LabelPosition, PieChartConfig, PieStyle};
use crate::data::{CategoryValues, named_objects_to_categories};
use crate::error::{ChartError, ChartResult};
use crate::highlight::evaluate_triggers;
use crate::interaction::SelectionUnits;
use crate::lod::LodTable;
use crate::renderer::{ChartInput, ChartKind, ChartRenderer};
use crate::section_state::{LeaderLine, SectionLabel, SectionRenderState, prepare_states};
use glam::Vec3;
use prism_core::profiling::profile_function;
use prism_mesh::{SectionDirtyFlags, SectionMeshStore, WedgeSpec, build_pie_wedge};

/// Height of pie labels above the top of their wedge.
const LABEL_LIFT: f32 = 50.0;

#[derive(Debug, Clone, Default)]
pub struct PieChartRenderer {
    config: PieChartConfig,
    values: Option<CategoryValues>,
    lod: LodTable,
}

impl PieChartRenderer {
    pub fn new(config: PieChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PieChartConfig {
        &self.config
    }

    /// Changes take effect on the next rebuild.
    pub fn config_mut(&mut self) -> &mut PieChartConfig {
        &mut self.config
    }

    pub fn values(&self) -> Option<&CategoryValues> {
        self.values.as_ref()
    }

    fn load_values(&mut self, pairs: Vec<(String, f32)>) -> ChartResult<()> {
        let (inner, outer) = (self.config.inner_diameter, self.config.outer_diameter);
        if inner > outer {
            tracing::warn!("Pie data rejected: inner diameter {} > outer {}", inner, outer);
            return Err(ChartError::InvalidDiameters { inner, outer });
        }
        self.values = Some(CategoryValues::load(pairs)?);
        Ok(())
    }

    /// Wedge geometry of category `index` at angular step `step`.
    ///
    /// `growth` is the `(inner, outer)` radius growth of a hovered wedge.
    fn wedge_spec(
        &self,
        values: &CategoryValues,
        index: usize,
        step: f32,
        growth: (f32, f32),
    ) -> Option<WedgeSpec> {
        let shape = self.config.resolved_shape();
        let (start, end) = values.wedge_range(index)?;
        Some(WedgeSpec {
            center: Vec3::ZERO,
            start_angle: start,
            end_angle: end - shape.gap_angle,
            inner_radius: shape.inner_radius + growth.0,
            outer_radius: shape.outer_radius + shape.nightingale_offset * index as f32 + growth.1,
            height: self.config.section_height,
            color: self.config.colors.get_or_black(index),
            step,
        })
    }

    fn build_wedge(store: &mut SectionMeshStore, slot: usize, spec: &WedgeSpec) {
        if let Some(section) = store.section_mut(slot)
            && let Err(err) = build_pie_wedge(section, spec)
        {
            tracing::warn!("Pie wedge {} left empty: {}", slot, err);
        }
    }

    fn place_label(&self, values: &CategoryValues, spec: &WedgeSpec, index: usize) -> (SectionLabel, Option<LeaderLine>) {
        let labels = &self.config.labels;
        // Wedges after the first give up the gap on both sides of the anchor.
        let gap = self.config.resolved_shape().gap_angle;
        let (start, end) = values
            .wedge_range(index)
            .map_or((spec.start_angle, spec.end_angle), |(start, end)| {
                let lead = if index > 0 { gap } else { 0.0 };
                (start + lead, end - gap)
            });
        let mid = ((start + end) * 0.5).to_radians();
        let dir = Vec3::new(mid.cos(), mid.sin(), 0.0);
        let radius = match labels.position {
            LabelPosition::Outside => spec.outer_radius + labels.offset,
            LabelPosition::Inside => (spec.inner_radius + spec.outer_radius) * 0.5,
        };
        let position = spec.center + dir * radius + Vec3::new(0.0, 0.0, spec.height + LABEL_LIFT);

        let text = labels.text(
            values.category(index).unwrap_or_default(),
            values.value(index).unwrap_or_default(),
        );
        let label = SectionLabel {
            text,
            position,
            visible: labels.enabled && !labels.show_on_hover,
        };
        let leader = labels.leader_line.then(|| LeaderLine {
            start: spec.center + dir * spec.outer_radius + Vec3::new(0.0, 0.0, spec.height * 0.5),
            end: position,
        });
        (label, leader)
    }
}

impl ChartRenderer for PieChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn animation_config(&self) -> AnimationConfig {
        self.config.animation
    }

    fn load(&mut self, input: ChartInput) -> ChartResult<()> {
        match input {
            ChartInput::Categories(pairs) => self.load_values(pairs),
            ChartInput::Records { records, mapping } => {
                let pairs = named_objects_to_categories(&records, &mapping)?;
                self.load_values(pairs)
            }
            other => Err(ChartError::UnsupportedInput {
                chart: ChartKind::Pie.name(),
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

        let count = self.values.as_ref().map_or(0, CategoryValues::len);
        self.lod.clear();
        if count > 0 {
            for _ in 0..self.config.lod.levels() {
                self.lod.push_band(1, count, 1);
            }
        }

        let total = self.lod.total_sections();
        store.prepare(total);
        prepare_states(states, total);

        let Some(values) = self.values.as_ref() else {
            return Ok(());
        };

        for level in 0..self.lod.levels() {
            let Some(band) = self.lod.band(level).copied() else {
                continue;
            };
            let step = self.config.lod.pie_angle_step(level);
            for index in 0..count {
                let Some(spec) = self.wedge_spec(values, index, step, (0.0, 0.0)) else {
                    continue;
                };
                let slot = band.offset + index;
                Self::build_wedge(store, slot, &spec);

                let (label, leader) = self.place_label(values, &spec, index);
                let state = &mut states[slot];
                state.color = spec.color;
                state.hover_emissive = self.config.hover_color;
                state.height = spec.height;
                state.gradient = self.config.style == PieStyle::Gradient;
                state.label = Some(label);
                state.leader = leader;
                state.visible = self.lod.is_visible(slot);
                let rule = values
                    .value(index)
                    .and_then(|v| evaluate_triggers(&self.config.triggers, v));
                state.set_rule(rule, self.config.emissive_intensity);
            }
        }

        store.backup_vertex_z();
        tracing::debug!(
            "Built pie chart: {} wedges, {} LOD levels, total {}",
            count,
            self.lod.levels(),
            values.total()
        );
        Ok(())
    }

    /// Angle of the point around the pie axis, measured counter-clockwise
    /// from +X, restricted to the ring the wedges can occupy.
    fn hit_test(&self, local: Vec3) -> Option<usize> {
        let values = self.values.as_ref()?;
        let shape = self.config.resolved_shape();
        let radius = local.truncate().length();
        let reach = shape.outer_radius
            + shape.nightingale_offset * values.len().saturating_sub(1) as f32
            + self.config.hover_growth().1;
        if radius < shape.inner_radius || radius > reach {
            return None;
        }
        let angle = local.y.atan2(local.x).to_degrees();
        values.wedge_at(angle, shape.gap_angle)
    }

    fn selection_units(&self) -> SelectionUnits {
        SelectionUnits::identity(self.values.as_ref().map_or(0, CategoryValues::len))
    }

    /// Grow or shrink the wedge and toggle its emissive and label.
    fn on_highlight(
        &mut self,
        store: &mut SectionMeshStore,
        states: &mut [SectionRenderState],
        section: usize,
        highlighted: bool,
    ) {
        let slot = self.display_section(section);
        let growth = self.config.hover_growth();
        if growth != (0.0, 0.0)
            && let Some(values) = self.values.as_ref()
        {
            let step = self.config.lod.pie_angle_step(self.lod.current_level());
            let growth = if highlighted { growth } else { (0.0, 0.0) };
            if let Some(spec) = self.wedge_spec(values, section, step, growth)
                && store.clear_section(slot).is_ok()
            {
                Self::build_wedge(store, slot, &spec);
                if let Some(state) = states.get_mut(slot) {
                    let (label, leader) = self.place_label(values, &spec, section);
                    let visible = state.label.as_ref().is_some_and(|l| l.visible);
                    state.label = Some(SectionLabel { visible, ..label });
                    state.leader = leader;
                }
            }
        }

        let Some(state) = states.get_mut(slot) else {
            return;
        };
        state.set_highlighted(highlighted, self.config.emissive_intensity);
        let labels = &self.config.labels;
        if labels.enabled && labels.show_on_hover {
            state.set_label_visible(highlighted);
        }
        store.mark_dirty(slot, SectionDirtyFlags::MATERIAL);
    }

    fn display_section(&self, section: usize) -> usize {
        self.lod
            .section_index_of_lod(section, self.lod.current_level())
            .unwrap_or(section)
    }

    fn lod(&self) -> Option<&LodTable> {
        Some(&self.lod)
    }

    fn lod_mut(&mut self) -> Option<&mut LodTable> {
        Some(&mut self.lod)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PieShape;
    use crate::lod::LodConfig;

    fn abc() -> ChartInput {
        ChartInput::Categories(vec![
            ("A".to_string(), 10.0),
            ("B".to_string(), 20.0),
            ("C".to_string(), 30.0),
        ])
    }

    fn built(config: PieChartConfig) -> (PieChartRenderer, SectionMeshStore, Vec<SectionRenderState>) {
        let mut renderer = PieChartRenderer::new(config);
        renderer.load(abc()).unwrap();
        let mut store = SectionMeshStore::new();
        let mut states = Vec::new();
        renderer.rebuild(&mut store, &mut states).unwrap();
        (renderer, store, states)
    }

    fn max_radius(store: &SectionMeshStore, slot: usize) -> f32 {
        store
            .section(slot)
            .unwrap()
            .vertices
            .iter()
            .map(|v| v.truncate().length())
            .fold(0.0, f32::max)
    }

    fn single_level() -> PieChartConfig {
        PieChartConfig {
            lod: LodConfig::single(),
            ..Default::default()
        }
    }

    #[test]
    fn test_wedge_partition() {
        let (renderer, _, _) = built(single_level());
        let values = renderer.values().unwrap();
        assert_eq!(values.accumulated(), &[10.0, 30.0, 60.0, 60.0]);
        assert_eq!(values.wedge_range(1), Some((60.0, 180.0)));
    }

    #[test]
    fn test_sections_per_level() {
        let (renderer, store, states) = built(PieChartConfig::default());
        assert_eq!(renderer.lod().unwrap().levels(), 4);
        assert_eq!(store.len(), 4 * 3 + 1);
        assert!(states[..3].iter().all(|s| s.visible));
        assert!(states[3..].iter().all(|s| !s.visible));
        assert!(!store.section(3).unwrap().is_empty(), "coarse levels are built too");
        assert!(store.section(3).unwrap().vertex_count() < store.section(0).unwrap().vertex_count());
    }

    #[test]
    fn test_hit_test_by_angle() {
        let config = PieChartConfig {
            shape: PieShape::Circular,
            ..single_level()
        };
        let (renderer, _, _) = built(config);
        let at = |deg: f32, r: f32| {
            let rad = deg.to_radians();
            renderer.hit_test(Vec3::new(rad.cos() * r, rad.sin() * r, 0.0))
        };
        assert_eq!(at(30.0, 150.0), Some(0));
        assert_eq!(at(120.0, 150.0), Some(1));
        assert_eq!(at(300.0, 150.0), Some(2));
        assert_eq!(at(120.0, 50.0), None, "inside the hole");
        assert_eq!(at(120.0, 500.0), None, "outside the ring");
    }

    #[test]
    fn test_sector_gap_excluded_from_hits() {
        let config = PieChartConfig {
            shape: PieShape::SectorGap,
            ..single_level()
        };
        let (renderer, _, _) = built(config);
        let at = |deg: f32| {
            let rad = deg.to_radians();
            renderer.hit_test(Vec3::new(rad.cos() * 150.0, rad.sin() * 150.0, 0.0))
        };
        assert_eq!(at(170.0), Some(1));
        assert_eq!(at(177.0), None);
        assert_eq!(at(181.0), Some(2));
    }

    #[test]
    fn test_hover_zooms_wedge() {
        let (mut renderer, mut store, mut states) = built(single_level());
        assert!((max_radius(&store, 1) - 185.0).abs() < 1e-3);

        renderer.on_highlight(&mut store, &mut states, 1, true);
        assert!((max_radius(&store, 1) - 205.0).abs() < 1e-3);
        assert!(states[1].highlighted);
        assert_eq!(states[1].emissive_color, PieChartConfig::default().hover_color);

        renderer.on_highlight(&mut store, &mut states, 1, false);
        assert!((max_radius(&store, 1) - 185.0).abs() < 1e-3);
        assert!(!states[1].highlighted);
    }

    #[test]
    fn test_nightingale_grows_by_index() {
        let config = PieChartConfig {
            shape: PieShape::Nightingale,
            zoom_on_hover: false,
            ..single_level()
        };
        let (_, store, _) = built(config);
        assert!((max_radius(&store, 0) - 185.0).abs() < 1e-3);
        assert!((max_radius(&store, 2) - 205.0).abs() < 1e-3);
    }

    #[test]
    fn test_labels_outside_with_leader() {
        let (_, _, states) = built(single_level());
        let label = states[1].label.as_ref().unwrap();
        assert_eq!(label.text, "B: 20.00");
        assert!(label.visible);
        assert!((label.position.truncate().length() - 195.0).abs() < 1e-3);
        assert_eq!(label.position.z, 100.0);
        let leader = states[1].leader.unwrap();
        assert_eq!(leader.start.z, 25.0);
        assert_eq!(leader.end, label.position);
    }

    #[test]
    fn test_gapped_label_angles() {
        let config = PieChartConfig {
            shape: PieShape::SectorGap,
            ..single_level()
        };
        let (_, _, states) = built(config);
        let angle = |i: usize| {
            let p = states[i].label.as_ref().unwrap().position;
            p.y.atan2(p.x).to_degrees().rem_euclid(360.0)
        };
        assert!((angle(0) - 27.5).abs() < 1e-3);
        assert!((angle(1) - 120.0).abs() < 1e-3);
        assert!((angle(2) - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_labels_shown_on_hover() {
        let mut config = single_level();
        config.labels.show_on_hover = true;
        let (mut renderer, mut store, mut states) = built(config);
        assert!(!states[0].label.as_ref().unwrap().visible);
        renderer.on_highlight(&mut store, &mut states, 0, true);
        assert!(states[0].label.as_ref().unwrap().visible);
    }

    #[test]
    fn test_rejects_inverted_diameters() {
        let mut renderer = PieChartRenderer::new(PieChartConfig {
            inner_diameter: 300.0,
            ..Default::default()
        });
        assert!(matches!(
            renderer.load(abc()),
            Err(ChartError::InvalidDiameters { .. })
        ));
        assert!(renderer.values().is_none());
    }

    #[test]
    fn test_zero_total_rejected() {
        let mut renderer = PieChartRenderer::default();
        let input = ChartInput::Categories(vec![("A".to_string(), 0.0)]);
        assert!(matches!(
            renderer.load(input),
            Err(ChartError::NonPositiveTotal { .. })
        ));
    }
}
