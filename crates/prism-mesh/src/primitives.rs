//! Primitive builders that append triangle geometry to a [`MeshSection`].
//!
//! Every builder appends; none of them clear the target section. Triangles are
//! counter-clockwise when viewed from the side their normal points to.

use crate::color::LinearColor;
use crate::error::{MeshError, MeshResult};
use crate::section::MeshSection;
use glam::{Vec2, Vec3, Vec4};
use prism_core::profiling::profile_function;

/// UVs shared by every quad face, in corner order.
const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Append one triangle with three fresh vertices.
///
/// UVs are clamped to `[0, 1]`. Vertices are never shared with previously
/// emitted triangles.
pub fn add_triangle(
    section: &mut MeshSection,
    positions: [Vec3; 3],
    normals: [Vec3; 3],
    uvs: [Vec2; 3],
    tangent: Vec4,
    color: LinearColor,
) {
    for i in 0..3 {
        let index = section.push_vertex(positions[i], normals[i], uvs[i], tangent, color);
        section.indices.push(index);
    }
}

/// Append a quad as triangles `(0, 1, 2)` and `(2, 3, 0)` over four fresh
/// corner vertices sharing one normal.
///
/// Corners must be given counter-clockwise as seen from the `normal` side.
pub fn add_quad(
    section: &mut MeshSection,
    corners: [Vec3; 4],
    normal: Vec3,
    uvs: [Vec2; 4],
    tangent: Vec4,
    color: LinearColor,
) {
    let base = section.vertex_count() as u32;
    for i in 0..4 {
        section.push_vertex(corners[i], normal, uvs[i], tangent, color);
    }
    section
        .indices
        .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
}

/// Quad with the tangent derived from its first edge.
fn face(section: &mut MeshSection, corners: [Vec3; 4], normal: Vec3, color: LinearColor) {
    let tangent = (corners[1] - corners[0]).normalize_or_zero().extend(1.0);
    add_quad(section, corners, normal, QUAD_UVS, tangent, color);
}

/// Parameters for [`build_box`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpec {
    /// Minimum corner of the footprint.
    pub position: Vec3,
    /// Extent along X.
    pub length: f32,
    /// Extent along Y.
    pub width: f32,
    /// Top height at the `x = position.x` edge.
    pub height: f32,
    /// Top height at the `x = position.x + length` edge.
    pub next_height: f32,
    pub color: LinearColor,
}

impl BoxSpec {
    /// An axis-aligned box with a flat top.
    pub fn flat(position: Vec3, length: f32, width: f32, height: f32, color: LinearColor) -> Self {
        Self {
            position,
            length,
            width,
            height,
            next_height: height,
            color,
        }
    }
}

/// Vertices emitted by one [`build_box`] call.
pub const BOX_VERTEX_COUNT: usize = 24;
/// Indices emitted by one [`build_box`] call.
pub const BOX_INDEX_COUNT: usize = 36;

/// Append a six-faced prism.
///
/// The top edge runs from `height` (at the start of the X extent) to
/// `next_height` (at its end), which gives line charts their sloped
/// connecting segments. Each face is an independent quad, so a box always
/// emits [`BOX_VERTEX_COUNT`] vertices and [`BOX_INDEX_COUNT`] indices.
pub fn build_box(section: &mut MeshSection, spec: &BoxSpec) {
    let BoxSpec {
        position: p,
        length: l,
        width: w,
        height: h,
        next_height: nh,
        color,
    } = *spec;

    let b0 = p;
    let b1 = p + Vec3::new(l, 0.0, 0.0);
    let b2 = p + Vec3::new(l, w, 0.0);
    let b3 = p + Vec3::new(0.0, w, 0.0);
    let t0 = p + Vec3::new(0.0, 0.0, h);
    let t1 = p + Vec3::new(l, 0.0, nh);
    let t2 = p + Vec3::new(l, w, nh);
    let t3 = p + Vec3::new(0.0, w, h);

    // Sloped top: the plane normal leans against the rise.
    let up = Vec3::new(-(nh - h) * w, 0.0, l * w)
        .try_normalize()
        .unwrap_or(Vec3::Z);

    section.vertices.reserve(BOX_VERTEX_COUNT);
    section.indices.reserve(BOX_INDEX_COUNT);

    face(section, [b0, b1, t1, t0], Vec3::NEG_Y, color);
    face(section, [b2, b3, t3, t2], Vec3::Y, color);
    face(section, [b3, b0, t0, t3], Vec3::NEG_X, color);
    face(section, [b1, b2, t2, t1], Vec3::X, color);
    face(section, [t0, t1, t2, t3], up, color);
    face(section, [b0, b3, b2, b1], Vec3::NEG_Z, color);
}

/// Parameters for [`build_sphere`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSpec {
    pub center: Vec3,
    pub radius: f32,
    pub slices: u32,
    pub stacks: u32,
    pub color: LinearColor,
}

/// Append a UV sphere.
///
/// `slices` is clamped to at least 3 and `stacks` to at least 2. Rings are
/// not collapsed at the poles: the sphere emits `(slices + 1) * (stacks + 1)`
/// vertices and `slices * stacks * 2` triangles.
pub fn build_sphere(section: &mut MeshSection, spec: &SphereSpec) {
    let slices = spec.slices.max(3);
    let stacks = spec.stacks.max(2);
    let ring = slices + 1;
    let base = section.vertex_count() as u32;

    section.vertices.reserve((ring * (stacks + 1)) as usize);
    section.indices.reserve((slices * stacks * 6) as usize);

    for stack in 0..=stacks {
        let phi = stack as f32 * std::f32::consts::PI / stacks as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for slice in 0..=slices {
            let theta = slice as f32 * std::f32::consts::TAU / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let dir = Vec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi);
            let uv = Vec2::new(slice as f32 / slices as f32, stack as f32 / stacks as f32);
            let tangent = Vec4::new(-sin_theta, cos_theta, 0.0, 1.0);
            section.push_vertex(spec.center + dir * spec.radius, dir, uv, tangent, spec.color);
        }
    }

    for stack in 0..stacks {
        for slice in 0..slices {
            let cur = base + stack * ring + slice;
            let next = cur + ring;
            section
                .indices
                .extend_from_slice(&[cur, next, next + 1, cur, next + 1, cur + 1]);
        }
    }
}

/// Parameters for [`build_pie_wedge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeSpec {
    pub center: Vec3,
    /// Start angle in degrees, counter-clockwise from +X.
    pub start_angle: f32,
    /// End angle in degrees.
    pub end_angle: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub height: f32,
    pub color: LinearColor,
    /// Angular sampling step in degrees (1 for full detail).
    pub step: f32,
}

/// Near/far bottom and top corners of the wedge cross-section at one angle.
struct WedgeCut {
    near_bottom: Vec3,
    near_top: Vec3,
    far_bottom: Vec3,
    far_top: Vec3,
    radial: Vec3,
}

impl WedgeCut {
    fn at(spec: &WedgeSpec, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let radial = Vec3::new(cos, sin, 0.0);
        let lift = Vec3::new(0.0, 0.0, spec.height);
        let near_bottom = spec.center + radial * spec.inner_radius;
        let far_bottom = spec.center + radial * spec.outer_radius;
        Self {
            near_bottom,
            near_top: near_bottom + lift,
            far_bottom,
            far_top: far_bottom + lift,
            radial,
        }
    }
}

/// Number of angular steps [`build_pie_wedge`] takes between two angles.
pub fn wedge_step_count(start_angle: f32, end_angle: f32, step: f32) -> usize {
    let step = if step > 0.0 { step } else { 1.0 };
    ((end_angle - start_angle) / step).ceil().max(0.0) as usize
}

/// Append one pie wedge as a closed solid.
///
/// The sweep walks from `start_angle` to `end_angle` in `step` degree
/// increments, emitting an inner wall, outer wall, top and bottom quad per
/// step, plus a flat cap at each end. Cap normals come from the cross product
/// of the cap's own edges so they stay outward for any sweep.
///
/// Rejects `inner_radius > outer_radius` and `start_angle >= end_angle`
/// without touching the section.
pub fn build_pie_wedge(section: &mut MeshSection, spec: &WedgeSpec) -> MeshResult<()> {
    profile_function!();

    if spec.inner_radius > spec.outer_radius {
        tracing::warn!(
            inner = spec.inner_radius,
            outer = spec.outer_radius,
            "Pie wedge rejected: inner radius exceeds outer radius"
        );
        return Err(MeshError::InvalidRadii {
            inner: spec.inner_radius,
            outer: spec.outer_radius,
        });
    }
    if spec.start_angle >= spec.end_angle {
        tracing::warn!(
            start = spec.start_angle,
            end = spec.end_angle,
            "Pie wedge rejected: empty angular range"
        );
        return Err(MeshError::InvalidAngles {
            start: spec.start_angle,
            end: spec.end_angle,
        });
    }

    let step = if spec.step > 0.0 { spec.step } else { 1.0 };
    let color = spec.color;

    let first = WedgeCut::at(spec, spec.start_angle);
    let start_normal = (first.far_bottom - first.near_bottom)
        .cross(first.near_top - first.near_bottom)
        .normalize_or_zero();
    face(
        section,
        [first.near_bottom, first.far_bottom, first.far_top, first.near_top],
        start_normal,
        color,
    );

    let mut angle = spec.start_angle;
    let mut cut = first;
    while angle < spec.end_angle {
        let next_angle = (angle + step).min(spec.end_angle);
        let next = WedgeCut::at(spec, next_angle);
        let mid = (cut.radial + next.radial).normalize_or_zero();

        face(
            section,
            [next.near_bottom, cut.near_bottom, cut.near_top, next.near_top],
            -mid,
            color,
        );
        face(
            section,
            [cut.far_bottom, next.far_bottom, next.far_top, cut.far_top],
            mid,
            color,
        );
        face(
            section,
            [cut.near_top, cut.far_top, next.far_top, next.near_top],
            Vec3::Z,
            color,
        );
        face(
            section,
            [cut.near_bottom, next.near_bottom, next.far_bottom, cut.far_bottom],
            Vec3::NEG_Z,
            color,
        );

        angle = next_angle;
        cut = next;
    }

    let end_normal = (cut.near_top - cut.near_bottom)
        .cross(cut.far_bottom - cut.near_bottom)
        .normalize_or_zero();
    face(
        section,
        [cut.near_bottom, cut.near_top, cut.far_top, cut.far_bottom],
        end_normal,
        color,
    );

    Ok(())
}
