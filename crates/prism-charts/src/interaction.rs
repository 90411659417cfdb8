//! Hover and selection state.
//!
//! Hover is transient and follows the pointer; selection is a persistent
//! per-unit toggle set by click. A unit is a single section for bar and pie
//! charts and a whole row for line charts. Selected (pinned) sections keep
//! their highlight while the pointer moves.

use glam::Vec3;

/// A highlight to switch on or off for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightChange {
    pub section: usize,
    pub highlighted: bool,
}

impl HighlightChange {
    fn on(section: usize) -> Self {
        Self {
            section,
            highlighted: true,
        }
    }

    fn off(section: usize) -> Self {
        Self {
            section,
            highlighted: false,
        }
    }
}

/// Maps sections to their selection unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionUnits {
    /// Unit of each section.
    pub section_units: Vec<usize>,
    pub unit_count: usize,
}

impl SelectionUnits {
    /// One unit per section.
    pub fn identity(count: usize) -> Self {
        Self {
            section_units: (0..count).collect(),
            unit_count: count,
        }
    }
}

/// Grid cell under a chart-local point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridHit {
    pub row: usize,
    pub col: usize,
    pub section: usize,
}

/// Maps chart-local X/Y to a row-major grid section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHitMapper {
    pub row_spacing: f32,
    pub col_spacing: f32,
    pub col_count: usize,
    /// Sections at or past this index are no hit.
    pub total_count: usize,
}

impl GridHitMapper {
    /// `row = floor(y / row_spacing)`, `col = floor(x / col_spacing)`,
    /// `section = row * col_count + col`.
    pub fn resolve(&self, local: Vec3) -> Option<GridHit> {
        if self.row_spacing <= 0.0 || self.col_spacing <= 0.0 || local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let row = (local.y / self.row_spacing).floor() as usize;
        let col = (local.x / self.col_spacing).floor() as usize;
        if col >= self.col_count {
            return None;
        }
        let section = row * self.col_count + col;
        (section < self.total_count).then_some(GridHit { row, col, section })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    hovered: Option<usize>,
    selected: Vec<bool>,
    units: SelectionUnits,
}

impl InteractionState {
    pub fn new(units: SelectionUnits) -> Self {
        let mut state = Self::default();
        state.reset(units);
        state
    }

    /// Forget hover and selection, e.g. after a rebuild.
    pub fn reset(&mut self, units: SelectionUnits) {
        self.hovered = None;
        self.selected = vec![false; units.unit_count];
        self.units = units;
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    fn unit_of(&self, section: usize) -> Option<usize> {
        self.units.section_units.get(section).copied()
    }

    pub fn is_unit_selected(&self, unit: usize) -> bool {
        self.selected.get(unit).copied().unwrap_or(false)
    }

    /// Whether a section belongs to a selected unit.
    pub fn is_pinned(&self, section: usize) -> bool {
        self.unit_of(section)
            .is_some_and(|unit| self.is_unit_selected(unit))
    }

    pub fn selected_units(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(unit, on)| on.then_some(unit))
    }

    /// Resolve a pointer hit.
    ///
    /// `None` (the pointer is over the chart but hits nothing) changes
    /// nothing. Moving onto a pinned section clears the previous hover but
    /// does not take over the pinned highlight.
    pub fn hover(&mut self, hit: Option<usize>) -> Vec<HighlightChange> {
        let Some(section) = hit else {
            return Vec::new();
        };
        if section >= self.units.section_units.len() || self.hovered == Some(section) {
            return Vec::new();
        }

        let mut changes = Vec::with_capacity(2);
        if let Some(previous) = self.hovered
            && !self.is_pinned(previous)
        {
            changes.push(HighlightChange::off(previous));
        }
        if self.is_pinned(section) {
            self.hovered = None;
            return changes;
        }
        changes.push(HighlightChange::on(section));
        self.hovered = Some(section);
        tracing::trace!("Hover moved to section {}", section);
        changes
    }

    /// The pointer left the chart.
    pub fn leave(&mut self) -> Vec<HighlightChange> {
        match self.hovered.take() {
            Some(section) if !self.is_pinned(section) => vec![HighlightChange::off(section)],
            _ => Vec::new(),
        }
    }

    /// Toggle the selection of the unit `section` belongs to.
    ///
    /// Every section of the unit is switched; a deselected section that is
    /// still hovered keeps its highlight.
    pub fn click(&mut self, section: usize) -> Vec<HighlightChange> {
        let Some(unit) = self.unit_of(section) else {
            return Vec::new();
        };
        let Some(selected) = self.selected.get_mut(unit) else {
            return Vec::new();
        };
        *selected = !*selected;
        let now = *selected;
        tracing::debug!("Unit {} selected: {}", unit, now);

        self.units
            .section_units
            .iter()
            .enumerate()
            .filter(|(_, u)| **u == unit)
            .map(|(s, _)| HighlightChange {
                section: s,
                highlighted: now || self.hovered == Some(s),
            })
            .collect()
    }
}
