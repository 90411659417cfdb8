/// Fast SIMD math from `glam`, used for all CPU-side geometry work.
///
/// ```
/// use prism_core::math::{Vec3, Mat4};
///
/// let corner = Vec3::new(10.0, 0.0, 5.0);
/// let moved = Mat4::from_translation(Vec3::Z).transform_point3(corner);
/// assert_eq!(moved.z, 6.0);
/// ```
pub mod fast {
    pub use glam::*;
}

/// Packed vector types for GPU buffer uploads.
///
/// These are `#[repr(C)]` and [`Pod`](bytemuck::Pod), so interleaved vertex
/// arrays built from them can be cast straight to bytes.
///
/// ```
/// use prism_core::math::{PackedVec3, Vec3};
///
/// let packed: PackedVec3 = Vec3::new(1.0, 2.0, 3.0).into();
/// let bytes: &[u8] = bytemuck::bytes_of(&packed);
/// assert_eq!(bytes.len(), 12);
/// ```
pub mod packed {
    use bytemuck::{Pod, Zeroable};

    /// A 2D vector with guaranteed `#[repr(C)]` layout.
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    /// A 3D vector with guaranteed `#[repr(C)]` layout.
    ///
    /// ```text
    /// Offset | Field | Size
    /// -------|-------|------
    /// 0      | x     | 4 bytes (f32)
    /// 4      | y     | 4 bytes (f32)
    /// 8      | z     | 4 bytes (f32)
    /// Total: 12 bytes
    /// ```
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    /// A 4D vector with guaranteed `#[repr(C)]` layout.
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec4 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
        pub w: f32,
    }

    impl From<glam::Vec2> for Vec2 {
        #[inline]
        fn from(v: glam::Vec2) -> Self {
            Self { x: v.x, y: v.y }
        }
    }

    impl From<glam::Vec3> for Vec3 {
        #[inline]
        fn from(v: glam::Vec3) -> Self {
            Self {
                x: v.x,
                y: v.y,
                z: v.z,
            }
        }
    }

    impl From<glam::Vec4> for Vec4 {
        #[inline]
        fn from(v: glam::Vec4) -> Self {
            Self {
                x: v.x,
                y: v.y,
                z: v.z,
                w: v.w,
            }
        }
    }

    static_assertions::assert_eq_size!(Vec2, [f32; 2]);
    static_assertions::assert_eq_size!(Vec3, [f32; 3]);
    static_assertions::assert_eq_size!(Vec4, [f32; 4]);
}

/// Euler rotation in degrees, matching the camera conventions of host engines
/// (pitch around Y, yaw around Z, roll around X).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Yaw normalized into `[0, 360)`.
    pub fn normalized_yaw(&self) -> f32 {
        self.yaw.rem_euclid(360.0)
    }

    /// Build a quaternion (Z-up: yaw about Z, pitch about Y, roll about X).
    pub fn to_quat(&self) -> fast::Quat {
        fast::Quat::from_euler(
            fast::EulerRot::ZYX,
            self.yaw.to_radians(),
            -self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }
}

pub use fast::*;
pub use packed::{Vec2 as PackedVec2, Vec3 as PackedVec3, Vec4 as PackedVec4};
