bitflags::bitflags! {
    /// What changed in a section since the renderer last uploaded it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SectionDirtyFlags: u8 {
        /// Section was rebuilt or cleared (requires a full upload).
        const GEOMETRY = 0b0000_0001;
        /// Only vertex Z changed (animation step).
        const HEIGHT = 0b0000_0010;
        /// Material parameters changed (color, emissive).
        const MATERIAL = 0b0000_0100;
        /// Visibility toggled.
        const VISIBILITY = 0b0000_1000;
    }
}

impl SectionDirtyFlags {
    /// Check if vertex data needs to be re-sent.
    pub fn needs_vertex_upload(&self) -> bool {
        self.intersects(Self::GEOMETRY | Self::HEIGHT)
    }

    /// Check if only material parameters changed.
    pub fn is_material_only(&self) -> bool {
        *self == Self::MATERIAL
    }
}
