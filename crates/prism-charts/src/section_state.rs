//! Render state kept in lock-step with the section store.

use glam::Vec3;
use prism_mesh::LinearColor;

/// Floating text attached to a section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLabel {
    pub text: String,
    pub position: Vec3,
    pub visible: bool,
}

impl SectionLabel {
    pub fn hidden(text: impl Into<String>, position: Vec3) -> Self {
        Self {
            text: text.into(),
            position,
            visible: false,
        }
    }
}

/// Line from a pie wedge's edge to its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderLine {
    pub start: Vec3,
    pub end: Vec3,
}

/// Material and label state of one section.
///
/// Index `i` of a chart's state vector always describes section `i` of
/// its [`SectionMeshStore`](prism_mesh::SectionMeshStore), including the
/// trailing reserved slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRenderState {
    pub color: LinearColor,
    /// Emissive color while hovered or selected.
    pub hover_emissive: LinearColor,
    /// Emissive color from a reference highlight or trigger, shown while
    /// not hovered.
    pub rule_emissive: Option<LinearColor>,
    pub emissive_color: LinearColor,
    pub emissive_intensity: f32,
    pub highlighted: bool,
    pub visible: bool,
    /// Drawn height, used for labels and as the animation reference.
    pub height: f32,
    /// Shade with a height gradient instead of a flat color.
    pub gradient: bool,
    pub label: Option<SectionLabel>,
    pub leader: Option<LeaderLine>,
}

impl Default for SectionRenderState {
    fn default() -> Self {
        Self {
            color: LinearColor::WHITE,
            hover_emissive: LinearColor::CYAN,
            rule_emissive: None,
            emissive_color: LinearColor::BLACK,
            emissive_intensity: 0.0,
            highlighted: false,
            visible: true,
            height: 0.0,
            gradient: false,
            label: None,
            leader: None,
        }
    }
}

impl SectionRenderState {
    pub fn new(color: LinearColor) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Apply a rule color, refreshing the emissive state.
    pub fn set_rule(&mut self, color: Option<LinearColor>, intensity: f32) {
        self.rule_emissive = color;
        self.refresh_emissive(intensity);
    }

    /// Switch the hover/selection highlight.
    pub fn set_highlighted(&mut self, highlighted: bool, intensity: f32) {
        self.highlighted = highlighted;
        self.refresh_emissive(intensity);
    }

    fn refresh_emissive(&mut self, intensity: f32) {
        match (self.highlighted, self.rule_emissive) {
            (true, _) => {
                self.emissive_color = self.hover_emissive;
                self.emissive_intensity = intensity;
            }
            (false, Some(rule)) => {
                self.emissive_color = rule;
                self.emissive_intensity = intensity;
            }
            (false, None) => {
                self.emissive_color = LinearColor::BLACK;
                self.emissive_intensity = 0.0;
            }
        }
    }

    pub fn set_label_visible(&mut self, visible: bool) {
        if let Some(label) = &mut self.label {
            label.visible = visible;
        }
    }
}

/// Reset `states` to `count + 1` default entries, matching
/// [`SectionMeshStore::prepare`](prism_mesh::SectionMeshStore::prepare).
pub fn prepare_states(states: &mut Vec<SectionRenderState>, count: usize) {
    states.clear();
    states.resize_with(count + 1, SectionRenderState::default);
    if let Some(reserved) = states.last_mut() {
        reserved.visible = false;
    }
}
