//! The per-chart facade: one renderer plus the state it draws into.

use crate::animation::AnimationController;
use crate::axis::AxisTicks;
use crate::bar::BarChartRenderer;
use crate::config::{BarChartConfig, LineChartConfig, PieChartConfig};
use crate::error::ChartResult;
use crate::gpu::{
    GenerationBackend, GenerationConfig, GenerationResponse, GenerationStatus, GeometryGenerator,
};
use crate::interaction::{HighlightChange, InteractionState};
use crate::line::LineChartRenderer;
use crate::lod::{LodTable, select_level};
use crate::pie::PieChartRenderer;
use crate::renderer::{ChartInput, ChartKind, ChartRenderer, StatisticValue};
use crate::section_state::SectionRenderState;
use glam::Vec3;
use prism_core::profiling::profile_function;
use prism_mesh::{LinearColor, SectionDirtyFlags, SectionMeshStore};

/// One chart instance.
///
/// Owns the renderer, the mesh sections and the render state that mirrors
/// them one-to-one. Drive it with [`tick`](Self::tick) once per frame and
/// feed pointer input through [`pointer_move`](Self::pointer_move) and
/// [`click`](Self::click). Points are in chart-local space.
pub struct Chart {
    renderer: Box<dyn ChartRenderer>,
    store: SectionMeshStore,
    states: Vec<SectionRenderState>,
    animation: AnimationController,
    interaction: InteractionState,
    generator: Option<GeometryGenerator>,
    generated: Option<GenerationResponse>,
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("kind", &self.renderer.kind())
            .field("sections", &self.store.len())
            .field("animation", &self.animation)
            .field("hovered", &self.interaction.hovered())
            .field("generator", &self.generator)
            .finish()
    }
}

impl Chart {
    pub fn new(renderer: Box<dyn ChartRenderer>) -> Self {
        let animation = AnimationController::new(renderer.animation_config());
        Self {
            renderer,
            store: SectionMeshStore::new(),
            states: Vec::new(),
            animation,
            interaction: InteractionState::default(),
            generator: None,
            generated: None,
        }
    }

    pub fn bar(config: BarChartConfig) -> Self {
        Self::new(Box::new(BarChartRenderer::new(config)))
    }

    pub fn line(config: LineChartConfig) -> Self {
        Self::new(Box::new(LineChartRenderer::new(config)))
    }

    pub fn pie(config: PieChartConfig) -> Self {
        Self::new(Box::new(PieChartRenderer::new(config)))
    }

    pub fn kind(&self) -> ChartKind {
        self.renderer.kind()
    }

    pub fn renderer(&self) -> &dyn ChartRenderer {
        self.renderer.as_ref()
    }

    /// Changes take effect on the next [`rebuild`](Self::rebuild).
    pub fn renderer_mut(&mut self) -> &mut dyn ChartRenderer {
        self.renderer.as_mut()
    }

    pub fn store(&self) -> &SectionMeshStore {
        &self.store
    }

    /// Render state, index-aligned with [`store`](Self::store).
    pub fn states(&self) -> &[SectionRenderState] {
        &self.states
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    /// Replace the data and rebuild. On error nothing changes.
    pub fn load(&mut self, input: ChartInput) -> ChartResult<()> {
        self.renderer.load(input)?;
        self.rebuild()
    }

    /// Regenerate every section from the loaded data.
    ///
    /// Hover and selection are forgotten and the build-in animation
    /// starts over.
    pub fn rebuild(&mut self) -> ChartResult<()> {
        profile_function!();

        self.renderer.rebuild(&mut self.store, &mut self.states)?;
        self.interaction.reset(self.renderer.selection_units());
        self.animation.set_config(self.renderer.animation_config());
        self.generated = None;
        if let Some(generator) = &mut self.generator
            && let Some(request) = self.renderer.generation_request()
        {
            generator.set_parameters(request)?;
        }
        tracing::info!(
            "{} chart rebuilt with {} sections",
            self.renderer.kind().name(),
            self.store.len()
        );
        Ok(())
    }

    /// Advance one frame.
    ///
    /// Polls the geometry generator, then steps the build-in animation. A
    /// generation timeout is returned after the animation has been applied.
    pub fn tick(&mut self, dt: f32, visible: bool) -> ChartResult<()> {
        profile_function!();

        let generation = match &mut self.generator {
            Some(generator) => generator.update(),
            None => Ok(None),
        };

        if let Some(progress) = self.animation.step(dt, visible) {
            self.renderer
                .animate(&mut self.store, &mut self.states, progress);
        }

        if let Some(response) = generation? {
            tracing::debug!(
                "Generated geometry ready: {} vertices",
                response.vertices.len()
            );
            self.generated = Some(response);
        }
        Ok(())
    }

    /// Resolve a pointer position. `None` means the cursor left the chart.
    pub fn pointer_move(&mut self, local: Option<Vec3>) {
        let changes = match local {
            Some(point) => {
                let hit = self.renderer.hit_test(point);
                self.interaction.hover(hit)
            }
            None => self.interaction.leave(),
        };
        self.apply(changes);
    }

    /// Toggle the selection of the section under `local`. Returns whether
    /// anything was hit.
    pub fn click(&mut self, local: Vec3) -> bool {
        let Some(section) = self.renderer.hit_test(local) else {
            return false;
        };
        let changes = self.interaction.click(section);
        self.apply(changes);
        true
    }

    fn apply(&mut self, changes: Vec<HighlightChange>) {
        for change in changes {
            self.renderer.on_highlight(
                &mut self.store,
                &mut self.states,
                change.section,
                change.highlighted,
            );
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        self.interaction.hovered()
    }

    pub fn is_pinned(&self, section: usize) -> bool {
        self.interaction.is_pinned(section)
    }

    pub fn is_unit_selected(&self, unit: usize) -> bool {
        self.interaction.is_unit_selected(unit)
    }

    /// Repaint section `index` as drawn at the current LOD level.
    pub fn color_modify(&mut self, index: usize, color: LinearColor) -> ChartResult<()> {
        let slot = self.renderer.display_section(index);
        self.store.recolor_section(slot, color)?;
        if let Some(state) = self.states.get_mut(slot) {
            state.color = color;
        }
        Ok(())
    }

    /// Set the emissive intensity of section `index` directly.
    ///
    /// A positive intensity glows in the section's hover color; zero turns
    /// the glow off.
    pub fn highlight(&mut self, index: usize, intensity: f32) {
        let slot = self.renderer.display_section(index);
        let Some(state) = self.states.get_mut(slot) else {
            return;
        };
        state.emissive_intensity = intensity.max(0.0);
        state.emissive_color = if intensity > 0.0 {
            state.hover_emissive
        } else {
            LinearColor::BLACK
        };
        self.store.mark_dirty(slot, SectionDirtyFlags::MATERIAL);
    }

    pub fn lod_level(&self) -> usize {
        self.renderer.lod().map_or(0, LodTable::current_level)
    }

    /// Switch the visible LOD band. Returns `true` if the level changed.
    ///
    /// The current hover is cleared first, since hover state only follows
    /// the sections of the level it was set on.
    pub fn set_lod_level(&mut self, level: usize) -> bool {
        let Some(lod) = self.renderer.lod() else {
            return false;
        };
        let target = level.min(lod.levels().saturating_sub(1));
        if target == lod.current_level() {
            return false;
        }

        let changes = self.interaction.leave();
        self.apply(changes);

        let Some(lod) = self.renderer.lod_mut() else {
            return false;
        };
        lod.set_level(target);

        if let Some(lod) = self.renderer.lod() {
            for (index, state) in self.states.iter_mut().enumerate() {
                let visible = lod.is_visible(index);
                if state.visible != visible {
                    state.visible = visible;
                    self.store.mark_dirty(index, SectionDirtyFlags::VISIBILITY);
                }
            }
        }
        true
    }

    /// Pick the LOD level for a camera distance.
    pub fn update_lod(&mut self, distance: f32, thresholds: &[f32]) -> bool {
        let levels = self.renderer.lod().map_or(0, LodTable::levels);
        if levels < 2 {
            return false;
        }
        self.set_lod_level(select_level(distance, thresholds, levels))
    }

    /// Hand box-grid generation to `backend`.
    ///
    /// The current data is queued right away when the chart supports it.
    pub fn enable_generation(
        &mut self,
        backend: Box<dyn GenerationBackend>,
        config: GenerationConfig,
    ) -> ChartResult<()> {
        let mut generator = GeometryGenerator::new(backend, config);
        if let Some(request) = self.renderer.generation_request() {
            generator.set_parameters(request)?;
        }
        self.generator = Some(generator);
        Ok(())
    }

    pub fn generation_status(&self) -> Option<GenerationStatus> {
        self.generator.as_ref().map(GeometryGenerator::status)
    }

    /// Resubmit the last generation request after a timeout.
    pub fn retry_generation(&mut self) -> bool {
        self.generator
            .as_mut()
            .is_some_and(GeometryGenerator::retry)
    }

    /// Latest valid generation result.
    pub fn generated(&self) -> Option<&GenerationResponse> {
        self.generated.as_ref()
    }

    pub fn take_generated(&mut self) -> Option<GenerationResponse> {
        self.generated.take()
    }

    pub fn axis_ticks(&self) -> Vec<AxisTicks> {
        self.renderer.axis_ticks()
    }

    pub fn statistics(&self) -> Vec<StatisticValue> {
        self.renderer.statistics()
    }

    /// Drain the sections changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<(usize, SectionDirtyFlags)> {
        self.store.take_dirty()
    }
}
