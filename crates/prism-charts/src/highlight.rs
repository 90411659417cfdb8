//! Value-driven highlighting: a reference comparison and ordered triggers.

use prism_mesh::LinearColor;

/// Tolerance for `Equal` and `NotEqual`.
pub const EQUALITY_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    #[default]
    Greater,
    Less,
    Equal,
    GreaterOrEqual,
    LessOrEqual,
    NotEqual,
}

impl Comparison {
    pub fn holds(self, value: f32, reference: f32) -> bool {
        match self {
            Comparison::Greater => value > reference,
            Comparison::Less => value < reference,
            Comparison::Equal => (value - reference).abs() <= EQUALITY_TOLERANCE,
            Comparison::GreaterOrEqual => value >= reference,
            Comparison::LessOrEqual => value <= reference,
            Comparison::NotEqual => (value - reference).abs() > EQUALITY_TOLERANCE,
        }
    }
}

/// Highlight every section whose raw value compares true against a reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceHighlight {
    pub enabled: bool,
    pub reference: f32,
    pub comparison: Comparison,
    pub color: LinearColor,
}

impl Default for ReferenceHighlight {
    fn default() -> Self {
        Self {
            enabled: false,
            reference: 0.0,
            comparison: Comparison::Greater,
            color: LinearColor::rgb(1.0, 0.2, 0.2),
        }
    }
}

impl ReferenceHighlight {
    pub fn new(reference: f32, comparison: Comparison, color: LinearColor) -> Self {
        Self {
            enabled: true,
            reference,
            comparison,
            color,
        }
    }

    /// Highlight color for `value`, if it matches.
    pub fn color_for(&self, value: f32) -> Option<LinearColor> {
        (self.enabled && self.comparison.holds(value, self.reference)).then_some(self.color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerCondition {
    Compare(Comparison),
    /// `threshold <= v <= upper`.
    InRange,
    NotInRange,
}

/// A value condition that recolors matching sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueTrigger {
    pub condition: TriggerCondition,
    pub threshold: f32,
    /// Upper bound for the range conditions.
    pub upper: f32,
    pub color: LinearColor,
}

impl ValueTrigger {
    pub fn compare(comparison: Comparison, threshold: f32, color: LinearColor) -> Self {
        Self {
            condition: TriggerCondition::Compare(comparison),
            threshold,
            upper: threshold,
            color,
        }
    }

    pub fn in_range(lower: f32, upper: f32, color: LinearColor) -> Self {
        Self {
            condition: TriggerCondition::InRange,
            threshold: lower,
            upper,
            color,
        }
    }

    pub fn not_in_range(lower: f32, upper: f32, color: LinearColor) -> Self {
        Self {
            condition: TriggerCondition::NotInRange,
            ..Self::in_range(lower, upper, color)
        }
    }

    pub fn matches(&self, value: f32) -> bool {
        let inside = value >= self.threshold && value <= self.upper;
        match self.condition {
            TriggerCondition::Compare(cmp) => cmp.holds(value, self.threshold),
            TriggerCondition::InRange => inside,
            TriggerCondition::NotInRange => !inside,
        }
    }
}

/// Color of the first trigger that matches `value`.
pub fn evaluate_triggers(triggers: &[ValueTrigger], value: f32) -> Option<LinearColor> {
    triggers.iter().find(|t| t.matches(value)).map(|t| t.color)
}

/// Rule color for a value: the reference highlight first, then triggers.
pub fn rule_color(
    reference: &ReferenceHighlight,
    triggers: &[ValueTrigger],
    value: f32,
) -> Option<LinearColor> {
    reference
        .color_for(value)
        .or_else(|| evaluate_triggers(triggers, value))
}
