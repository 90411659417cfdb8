//! Interleaved vertex format for uploading mesh sections.

use bytemuck::{Pod, Zeroable};
use prism_core::math::{PackedVec2, PackedVec3, PackedVec4};

/// One vertex of a [`MeshSection`](crate::MeshSection), interleaved for GPU upload.
///
/// ```text
/// Offset | Field    | Size
/// -------|----------|---------
/// 0      | position | 12 bytes
/// 12     | normal   | 12 bytes
/// 24     | uv       | 8 bytes
/// 32     | tangent  | 16 bytes
/// 48     | color    | 16 bytes
/// Total: 64 bytes
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: PackedVec3,
    pub normal: PackedVec3,
    pub uv: PackedVec2,
    pub tangent: PackedVec4,
    pub color: PackedVec4,
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 64]);

impl MeshVertex {
    /// Stride in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride() {
        assert_eq!(MeshVertex::STRIDE, 64);
    }

    #[test]
    fn test_cast_to_bytes() {
        let vertices = [MeshVertex::default(); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 3 * 64);
    }
}
