//! The capability interface shared by every chart kind.

use crate::animation::AnimationConfig;
use crate::axis::AxisTicks;
use crate::data::{DataPoint, PropertyMapping, Record};
use crate::error::ChartResult;
use crate::gpu::GenerationRequest;
use crate::interaction::SelectionUnits;
use crate::lod::LodTable;
use crate::section_state::SectionRenderState;
use glam::Vec3;
use prism_mesh::{LinearColor, SectionMeshStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Pie => "Pie",
        }
    }
}

/// Decoded input handed to [`ChartRenderer::load`].
#[derive(Debug, Clone)]
pub enum ChartInput {
    /// `(row, col, value[, time])` tuples.
    Grid(Vec<DataPoint>),
    /// Records read through a property mapping.
    Records {
        records: Vec<Record>,
        mapping: PropertyMapping,
    },
    /// Ordered `category -> value` pairs.
    Categories(Vec<(String, f32)>),
}

impl ChartInput {
    pub fn shape_name(&self) -> &'static str {
        match self {
            ChartInput::Grid(_) => "grid",
            ChartInput::Records { .. } => "record",
            ChartInput::Categories(_) => "category",
        }
    }
}

/// A statistic line resolved against the loaded data.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticValue {
    /// Raw statistic value.
    pub value: f32,
    /// Drawn height of the line.
    pub height: f32,
    pub label: String,
    pub color: LinearColor,
}

/// Turns loaded data into mesh sections and resolves hits back to them.
///
/// Implementations own their data and configuration. Section geometry and
/// render state are owned by the caller and passed in, with `states` kept
/// the same length as the store.
pub trait ChartRenderer: Send {
    fn kind(&self) -> ChartKind;

    /// Animation settings the chart was configured with.
    fn animation_config(&self) -> AnimationConfig;

    /// Replace the chart's data. On error the previous data is kept.
    fn load(&mut self, input: ChartInput) -> ChartResult<()>;

    /// Rebuild every section from the loaded data and snapshot vertex Z.
    fn rebuild(
        &mut self,
        store: &mut SectionMeshStore,
        states: &mut Vec<SectionRenderState>,
    ) -> ChartResult<()>;

    /// Apply build-in progress in `[0, 1]`.
    fn animate(
        &mut self,
        store: &mut SectionMeshStore,
        _states: &mut [SectionRenderState],
        progress: f32,
    ) {
        store.apply_height_scale(progress);
    }

    /// Section hit by a point in chart-local space.
    fn hit_test(&self, local: Vec3) -> Option<usize>;

    /// Selection unit of every hoverable section.
    fn selection_units(&self) -> SelectionUnits;

    /// Switch the highlight of a hoverable section.
    fn on_highlight(
        &mut self,
        store: &mut SectionMeshStore,
        states: &mut [SectionRenderState],
        section: usize,
        highlighted: bool,
    );

    /// Store slot of hoverable section `section` at the current LOD level.
    fn display_section(&self, section: usize) -> usize {
        section
    }

    fn lod(&self) -> Option<&LodTable> {
        None
    }

    fn lod_mut(&mut self) -> Option<&mut LodTable> {
        None
    }

    /// Box-grid parameters for GPU generation, for charts that support it.
    fn generation_request(&self) -> Option<GenerationRequest> {
        None
    }

    fn axis_ticks(&self) -> Vec<AxisTicks> {
        Vec::new()
    }

    fn statistics(&self) -> Vec<StatisticValue> {
        Vec::new()
    }
}
