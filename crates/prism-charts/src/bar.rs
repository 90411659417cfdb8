//! Bar charts: one box per grid cell, colored by value bucket.

use crate::animation::AnimationConfig;
use crate::axis::{AxisTicks, ChartAxis};
use crate::config::BarChartConfig;
use crate::data::{ChartDataset, named_objects_to_points};
use crate::error::{ChartError, ChartResult};
use crate::gpu::GenerationRequest;
use crate::highlight::rule_color;
use crate::interaction::{GridHitMapper, SelectionUnits};
use crate::lod::{LodTable, reduce_grid};
use crate::renderer::{ChartInput, ChartKind, ChartRenderer, StatisticValue};
use crate::section_state::{SectionLabel, SectionRenderState, prepare_states};
use glam::Vec3;
use prism_core::profiling::profile_function;
use prism_mesh::{BoxSpec, LinearColor, SectionDirtyFlags, SectionMeshStore, build_box};

/// Lift added to every bar so zero values still draw.
const MIN_BAR_HEIGHT: f32 = 0.1;

/// Gap between a bar top and its label.
const LABEL_LIFT: f32 = 5.0;

/// Largest dense grid (`rows * cols`) a bar chart will allocate sections for.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Section `row * cols + col` holds the bar of cell `(row, col)`; cells
/// without data leave their section empty. Coarser LOD bands follow the
/// full-detail band.
#[derive(Debug, Clone, Default)]
pub struct BarChartRenderer {
    config: BarChartConfig,
    dataset: ChartDataset,
    lod: LodTable,
    rows: usize,
    cols: usize,
}

impl BarChartRenderer {
    pub fn new(config: BarChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    /// Changes take effect on the next rebuild.
    pub fn config_mut(&mut self) -> &mut BarChartConfig {
        &mut self.config
    }

    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    /// Grid dimensions of the last rebuild.
    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Drawn height of a raw value.
    pub fn bar_height(&self, raw: f32) -> f32 {
        let bounds = self.dataset.bounds();
        self.config
            .z_axis
            .adjusted_height(raw, bounds.min_z, bounds.max_z)
            + MIN_BAR_HEIGHT
    }

    pub fn bar_color(&self, raw: f32) -> LinearColor {
        self.config.colors.color_for(raw, self.dataset.bounds().max_z)
    }

    /// Reject datasets whose index range spans more than [`MAX_GRID_CELLS`].
    fn check_grid(dataset: &ChartDataset) -> ChartResult<()> {
        let (rows, cols) = dataset.grid_dims();
        match dataset.dense_cell_count() {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
            _ => {
                tracing::warn!(
                    "Rejecting {}x{} bar grid with {} cells",
                    rows,
                    cols,
                    dataset.total_count()
                );
                Err(ChartError::GridTooLarge {
                    rows,
                    cols,
                    limit: MAX_GRID_CELLS,
                })
            }
        }
    }

    fn cell_origin(&self, row: usize, col: usize) -> Vec3 {
        Vec3::new(
            col as f32 * self.config.col_spacing,
            row as f32 * self.config.row_spacing,
            0.0,
        )
    }

    fn build_full_detail(&self, store: &mut SectionMeshStore, states: &mut [SectionRenderState]) {
        let intensity = self.config.emissive_intensity;
        for (row, col, value) in self.dataset.cells() {
            let (row, col) = (row as usize, col as usize);
            let index = row * self.cols + col;
            let height = self.bar_height(value);
            let color = self.bar_color(value);
            let origin = self.cell_origin(row, col);

            if let Some(section) = store.section_mut(index) {
                build_box(
                    section,
                    &BoxSpec::flat(origin, self.config.bar_length, self.config.bar_width, height, color),
                );
            }

            let state = &mut states[index];
            state.color = color;
            state.hover_emissive = self.config.hover_color;
            state.height = height;
            state.label = Some(SectionLabel::hidden(
                format!("{:.2}", value),
                origin
                    + Vec3::new(
                        self.config.bar_length * 0.5,
                        self.config.bar_width * 0.5,
                        height + LABEL_LIFT,
                    ),
            ));
            state.set_rule(
                rule_color(&self.config.reference, &self.config.triggers, value),
                intensity,
            );
        }
    }

    fn build_reduced(&self, store: &mut SectionMeshStore, states: &mut [SectionRenderState]) {
        for level in 1..self.lod.levels() {
            let Some(band) = self.lod.band(level).copied() else {
                continue;
            };
            for cell in reduce_grid(&self.dataset, band.step) {
                let index = band.offset + cell.row * band.cols + cell.col;
                let height = self.bar_height(cell.value);
                let color = self.bar_color(cell.value);
                let origin = self.cell_origin(cell.row * band.step, cell.col * band.step);
                let footprint = band.step as f32;

                if let Some(section) = store.section_mut(index) {
                    build_box(
                        section,
                        &BoxSpec::flat(
                            origin,
                            self.config.bar_length * footprint,
                            self.config.bar_width * footprint,
                            height,
                            color,
                        ),
                    );
                }
                states[index].color = color;
                states[index].height = height;
            }
        }
    }
}

impl ChartRenderer for BarChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn animation_config(&self) -> AnimationConfig {
        self.config.animation
    }

    fn load(&mut self, input: ChartInput) -> ChartResult<()> {
        match input {
            ChartInput::Grid(points) => {
                let dataset = ChartDataset::from_points(&points)?;
                Self::check_grid(&dataset)?;
                self.dataset = dataset;
                Ok(())
            }
            ChartInput::Records { records, mapping } => {
                let (points, categories) = named_objects_to_points(&records, &mapping)?;
                let dataset = ChartDataset::from_points(&points)?;
                Self::check_grid(&dataset)?;
                self.dataset = dataset;
                self.config.axes.set_titles(ChartAxis::Row, categories.rows);
                self.config.axes.set_titles(ChartAxis::Column, categories.cols);
                Ok(())
            }
            other => Err(ChartError::UnsupportedInput {
                chart: ChartKind::Bar.name(),
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

        Self::check_grid(&self.dataset)?;
        let (rows, cols) = self.dataset.grid_dims();
        self.rows = rows;
        self.cols = cols;

        self.lod.clear();
        if rows * cols > 0 {
            for level in 0..self.config.lod.levels() {
                let step = level + 1;
                self.lod.push_band(rows.div_ceil(step), cols.div_ceil(step), step);
            }
        }

        let total = self.lod.total_sections();
        store.prepare(total);
        prepare_states(states, total);

        self.build_full_detail(store, states);
        self.build_reduced(store, states);

        for (index, state) in states.iter_mut().enumerate() {
            state.visible = self.lod.is_visible(index);
        }
        store.backup_vertex_z();

        tracing::debug!(
            "Built bar chart: {}x{} grid, {} cells, {} LOD levels",
            rows,
            cols,
            self.dataset.total_count(),
            self.lod.levels()
        );
        Ok(())
    }

    fn hit_test(&self, local: Vec3) -> Option<usize> {
        let mapper = GridHitMapper {
            row_spacing: self.config.row_spacing,
            col_spacing: self.config.col_spacing,
            col_count: self.cols,
            total_count: self.rows * self.cols,
        };
        let hit = mapper.resolve(local)?;
        self.dataset
            .value(hit.row as u32, hit.col as u32)
            .map(|_| hit.section)
    }

    fn selection_units(&self) -> SelectionUnits {
        SelectionUnits::identity(self.rows * self.cols)
    }

    fn on_highlight(
        &mut self,
        store: &mut SectionMeshStore,
        states: &mut [SectionRenderState],
        section: usize,
        highlighted: bool,
    ) {
        if self.lod.current_level() != 0 {
            return;
        }
        let Some(state) = states.get_mut(section) else {
            return;
        };
        state.set_highlighted(highlighted, self.config.emissive_intensity);
        state.set_label_visible(highlighted);
        store.mark_dirty(section, SectionDirtyFlags::MATERIAL);
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

    fn generation_request(&self) -> Option<GenerationRequest> {
        if self.dataset.is_empty() {
            return None;
        }
        let mut heights = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let height = self
                    .dataset
                    .value(row as u32, col as u32)
                    .map_or(0.0, |v| self.bar_height(v));
                heights.push(height);
            }
        }
        Some(GenerationRequest {
            row_count: self.rows as u32,
            col_count: self.cols as u32,
            cell_width: self.config.bar_length,
            cell_height: self.config.bar_width,
            spacing_x: self.config.col_spacing - self.config.bar_length,
            spacing_y: self.config.row_spacing - self.config.bar_width,
            heights,
        })
    }

    fn axis_ticks(&self) -> Vec<AxisTicks> {
        if self.dataset.is_empty() {
            return Vec::new();
        }
        let bounds = self.dataset.bounds();
        let (z_min, z_max) = self.config.z_axis.axis_range(bounds.min_z, bounds.max_z);
        let axes = &self.config.axes;
        vec![
            axes.ticks(ChartAxis::Row, 0.0, self.rows.saturating_sub(1) as f64),
            axes.ticks(ChartAxis::Column, 0.0, self.cols.saturating_sub(1) as f64),
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
                    height: self.bar_height(value),
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
    use crate::highlight::{Comparison, ReferenceHighlight};
    use crate::lod::LodConfig;

    fn grid_3x4() -> Vec<DataPoint> {
        (0..3)
            .flat_map(|r| (0..4).map(move |c| DataPoint::new(r, c, (r * 4 + c) as f32)))
            .collect()
    }

    fn built(config: BarChartConfig, points: Vec<DataPoint>) -> (BarChartRenderer, SectionMeshStore, Vec<SectionRenderState>) {
        let mut renderer = BarChartRenderer::new(config);
        renderer.load(ChartInput::Grid(points)).unwrap();
        let mut store = SectionMeshStore::new();
        let mut states = Vec::new();
        renderer.rebuild(&mut store, &mut states).unwrap();
        (renderer, store, states)
    }

    fn single_level() -> BarChartConfig {
        BarChartConfig {
            lod: LodConfig::single(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sections_follow_grid() {
        let (_, store, states) = built(single_level(), grid_3x4());
        assert_eq!(store.len(), 13);
        assert_eq!(states.len(), 13);
        assert!(store.sections()[..12].iter().all(|s| s.vertex_count() == 24));
        assert!(store.section(12).unwrap().is_empty());
        assert!(!states[12].visible);
    }

    #[test]
    fn test_bar_height_and_label() {
        let (_, store, states) = built(single_level(), grid_3x4());
        let top = store
            .section(5)
            .unwrap()
            .vertices
            .iter()
            .map(|v| v.z)
            .fold(0.0f32, f32::max);
        assert!((top - 5.1).abs() < 1e-5);

        let label = states[5].label.as_ref().unwrap();
        assert_eq!(label.text, "5.00");
        assert_eq!(label.position, Vec3::new(13.0 + 5.0, 13.0 + 5.0, 5.1 + 5.0));
        assert!(!label.visible);
    }

    #[test]
    fn test_hit_test_grid() {
        let (renderer, _, _) = built(single_level(), grid_3x4());
        assert_eq!(renderer.hit_test(Vec3::new(40.0, 26.0, 0.0)), Some(11));
        assert_eq!(renderer.hit_test(Vec3::new(40.0, 40.0, 0.0)), None);
    }

    #[test]
    fn test_hit_on_empty_cell_is_no_hit() {
        let (renderer, _, _) = built(
            single_level(),
            vec![DataPoint::new(0, 0, 1.0), DataPoint::new(1, 1, 2.0)],
        );
        assert_eq!(renderer.hit_test(Vec3::new(14.0, 1.0, 0.0)), None);
        assert_eq!(renderer.hit_test(Vec3::new(14.0, 14.0, 0.0)), Some(3));
    }

    #[test]
    fn test_reference_highlight_marks_matching_bars() {
        let config = BarChartConfig {
            reference: ReferenceHighlight::new(9.0, Comparison::GreaterOrEqual, LinearColor::WHITE),
            ..single_level()
        };
        let (_, _, states) = built(config, grid_3x4());
        assert_eq!(states[9].rule_emissive, Some(LinearColor::WHITE));
        assert_eq!(states[9].emissive_intensity, 10.0);
        assert_eq!(states[8].rule_emissive, None);
    }

    #[test]
    fn test_lod_bands_and_visibility() {
        let config = BarChartConfig {
            lod: LodConfig::default().with_levels(2),
            ..Default::default()
        };
        let (renderer, store, states) = built(config, grid_3x4());
        let band = *renderer.lod().unwrap().band(1).unwrap();
        assert_eq!((band.offset, band.rows, band.cols), (12, 2, 2));
        assert_eq!(store.len(), 17);
        assert!(states[..12].iter().all(|s| s.visible));
        assert!(states[12..].iter().all(|s| !s.visible));

        // Block (0,0) at step 2 averages values 0, 1, 4, 5.
        let top = store
            .section(12)
            .unwrap()
            .vertices
            .iter()
            .map(|v| v.z)
            .fold(0.0f32, f32::max);
        assert!((top - 2.6).abs() < 1e-5);
    }

    #[test]
    fn test_generation_request_matches_grid() {
        let (renderer, _, _) = built(single_level(), grid_3x4());
        let request = renderer.generation_request().unwrap();
        assert_eq!((request.row_count, request.col_count), (3, 4));
        assert_eq!(request.heights.len(), 12);
        assert!(request.validate().is_ok());
        assert_eq!(request.spacing_x, 3.0);
    }

    #[test]
    fn test_far_apart_cells_rejected_before_allocation() {
        let mut renderer = BarChartRenderer::new(single_level());
        renderer.load(ChartInput::Grid(grid_3x4())).unwrap();

        let err = renderer
            .load(ChartInput::Grid(vec![
                DataPoint::new(0, 0, 1.0),
                DataPoint::new(200_000, 200_000, 2.0),
            ]))
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::GridTooLarge { rows: 200_001, cols: 200_001, .. }
        ));
        assert_eq!(renderer.dataset().total_count(), 12);

        let err = renderer
            .load(ChartInput::Grid(vec![DataPoint::new(u32::MAX, u32::MAX, 1.0)]))
            .unwrap_err();
        assert!(matches!(err, ChartError::GridTooLarge { .. }));
    }

    #[test]
    fn test_sparse_grid_within_limit_builds() {
        let (renderer, store, _) = built(
            single_level(),
            vec![DataPoint::new(0, 0, 1.0), DataPoint::new(2, 500, 2.0)],
        );
        assert_eq!(renderer.grid(), (3, 501));
        assert_eq!(store.len(), 3 * 501 + 1);
        assert_eq!(store.section(2 * 501 + 500).unwrap().vertex_count(), 24);
    }

    #[test]
    fn test_pie_input_rejected() {
        let mut renderer = BarChartRenderer::default();
        assert!(matches!(
            renderer.load(ChartInput::Categories(vec![("a".into(), 1.0)])),
            Err(ChartError::UnsupportedInput { .. })
        ));
    }
}
