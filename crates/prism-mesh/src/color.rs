//! Linear colors and value-to-color ramps.

use bytemuck::{Pod, Zeroable};

/// RGBA color in linear float space.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const CYAN: Self = Self::rgba(0.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Build from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::from_rgba8(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => None,
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between two colors.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Default 11-step diverging ramp (blue to red).
pub const DEFAULT_RAMP_HEX: [&str; 11] = [
    "#313695", "#4575b4", "#74add1", "#abd9e9", "#e0f3f8", "#ffffbf", "#fee090", "#fdae61",
    "#f46d43", "#d73027", "#a50026",
];

/// Ordered list of colors indexed by a normalized value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    colors: Vec<LinearColor>,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::new(
            DEFAULT_RAMP_HEX
                .iter()
                .filter_map(|hex| LinearColor::from_hex(hex))
                .collect(),
        )
    }
}

impl ColorRamp {
    /// Create a ramp. An empty list falls back to a single black entry.
    pub fn new(colors: Vec<LinearColor>) -> Self {
        if colors.is_empty() {
            return Self {
                colors: vec![LinearColor::BLACK],
            };
        }
        Self { colors }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[LinearColor] {
        &self.colors
    }

    /// Bucket index for `value` relative to `max`: `floor(value / max * (n - 1))`.
    ///
    /// Always within `0..n`, including for `value == max`, negative values,
    /// non-finite input and a non-positive `max`.
    pub fn index_for(&self, value: f32, max: f32) -> usize {
        let last = self.colors.len() - 1;
        if max.is_nan() || max <= 0.0 || !value.is_finite() {
            return 0;
        }
        let percentage = value as f64 / max as f64;
        let bucket = (percentage * last as f64).floor();
        if bucket <= 0.0 {
            0
        } else {
            (bucket as usize).min(last)
        }
    }

    /// Color for `value` relative to `max`.
    pub fn color_for(&self, value: f32, max: f32) -> LinearColor {
        self.colors[self.index_for(value, max)]
    }

    /// Color cycling through the ramp by position (`colors[i % n]`).
    pub fn cyclic(&self, i: usize) -> LinearColor {
        self.colors[i % self.colors.len()]
    }

    /// Color at `i`, or black when the ramp is shorter than `i + 1`.
    pub fn get_or_black(&self, i: usize) -> LinearColor {
        self.colors.get(i).copied().unwrap_or(LinearColor::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = LinearColor::from_hex("#ff0080").unwrap();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);

        assert!(LinearColor::from_hex("#fff").is_none());
        assert!(LinearColor::from_hex("#gg0000").is_none());
    }

    #[test]
    fn test_default_ramp_has_eleven_colors() {
        assert_eq!(ColorRamp::default().len(), 11);
    }

    #[test]
    fn test_index_for_is_clamped() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.index_for(0.0, 10.0), 0);
        assert_eq!(ramp.index_for(10.0, 10.0), 10);
        assert_eq!(ramp.index_for(5.0, 10.0), 5);
        // Above max and degenerate input stay inside the ramp.
        assert_eq!(ramp.index_for(11.0, 10.0), 10);
        assert_eq!(ramp.index_for(-3.0, 10.0), 0);
        assert_eq!(ramp.index_for(f32::NAN, 10.0), 0);
        assert_eq!(ramp.index_for(3.0, 0.0), 0);
    }

    #[test]
    fn test_cyclic_and_padding() {
        let ramp = ColorRamp::new(vec![LinearColor::WHITE, LinearColor::CYAN]);
        assert_eq!(ramp.cyclic(3), LinearColor::CYAN);
        assert_eq!(ramp.get_or_black(5), LinearColor::BLACK);
    }
}
