//! Value-axis scaling: where bars start and how tall a value draws.

/// Value-axis options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZAxisConfig {
    /// Measure heights from zero regardless of the data.
    pub force_zero_base: bool,
    /// Base used when neither zero base nor auto adjust applies.
    pub min_z: f32,
    scale: f32,
    /// Derive the base from the data minimum minus a margin.
    pub auto_adjust: bool,
    margin: f32,
}

impl Default for ZAxisConfig {
    fn default() -> Self {
        Self {
            force_zero_base: true,
            min_z: 0.0,
            scale: 1.0,
            auto_adjust: false,
            margin: 0.1,
        }
    }
}

impl ZAxisConfig {
    pub const SCALE_RANGE: (f32, f32) = (0.1, 10.0);
    pub const MARGIN_RANGE: (f32, f32) = (0.0, 0.5);

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Height multiplier, clamped to [`Self::SCALE_RANGE`].
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = if scale.is_nan() {
            1.0
        } else {
            scale.clamp(Self::SCALE_RANGE.0, Self::SCALE_RANGE.1)
        };
        self
    }

    /// Auto-adjust margin as a fraction of the data range, clamped to
    /// [`Self::MARGIN_RANGE`].
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = if margin.is_nan() {
            0.0
        } else {
            margin.clamp(Self::MARGIN_RANGE.0, Self::MARGIN_RANGE.1)
        };
        self
    }

    pub fn with_auto_adjust(mut self, margin: f32) -> Self {
        self.force_zero_base = false;
        self.auto_adjust = true;
        self.with_margin(margin)
    }

    pub fn with_min_z(mut self, min_z: f32) -> Self {
        self.force_zero_base = false;
        self.auto_adjust = false;
        self.min_z = min_z;
        self
    }

    /// Value that maps to height zero.
    pub fn base(&self, data_min: f32, data_max: f32) -> f32 {
        if self.force_zero_base {
            0.0
        } else if self.auto_adjust {
            data_min - (data_max - data_min) * self.margin
        } else {
            self.min_z
        }
    }

    /// Drawn height of a raw value. Values below the base draw flat.
    pub fn adjusted_height(&self, raw: f32, data_min: f32, data_max: f32) -> f32 {
        (raw - self.base(data_min, data_max)).max(0.0) * self.scale
    }

    /// Range the value-axis labels cover.
    pub fn axis_range(&self, data_min: f32, data_max: f32) -> (f32, f32) {
        let base = self.base(data_min, data_max);
        if self.auto_adjust && !self.force_zero_base {
            (base, data_max + (data_max - data_min) * self.margin)
        } else {
            (base, data_max)
        }
    }
}
