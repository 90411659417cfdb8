//! A single drawable sub-mesh.

use crate::color::LinearColor;
use crate::vertex::MeshVertex;
use glam::{Vec2, Vec3, Vec4};

/// One independently drawable unit: a bar, a line segment, a marker sphere or
/// a pie wedge.
///
/// All per-vertex arrays are parallel and always have equal length. Indices
/// only reference vertices of this section and form counter-clockwise
/// triangles when viewed from outside the solid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshSection {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub tangents: Vec<Vec4>,
    pub colors: Vec<LinearColor>,
}

impl MeshSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty section with room for `vertices` vertices and `indices` indices.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            tangents: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Empty every array in place, keeping allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.normals.clear();
        self.uvs.clear();
        self.tangents.clear();
        self.colors.clear();
    }

    /// Push one vertex with all of its attributes. Returns its index.
    pub(crate) fn push_vertex(
        &mut self,
        position: Vec3,
        normal: Vec3,
        uv: Vec2,
        tangent: Vec4,
        color: LinearColor,
    ) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.uvs.push(uv.clamp(Vec2::ZERO, Vec2::ONE));
        self.tangents.push(tangent);
        self.colors.push(color);
        index
    }

    /// Append another section, rebasing its indices.
    pub fn append(&mut self, other: &MeshSection) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.tangents.extend_from_slice(&other.tangents);
        self.colors.extend_from_slice(&other.colors);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Overwrite every vertex color.
    pub fn set_color(&mut self, color: LinearColor) {
        self.colors.iter_mut().for_each(|c| *c = color);
    }

    /// Check the section invariants: parallel arrays, whole triangles and
    /// indices inside this section's vertex range.
    pub fn is_consistent(&self) -> bool {
        let n = self.vertices.len();
        self.normals.len() == n
            && self.uvs.len() == n
            && self.tangents.len() == n
            && self.colors.len() == n
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Axis-aligned bounds, or `None` for an empty section.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }

    /// Interleave the parallel arrays into upload-ready vertices.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        (0..self.vertices.len())
            .map(|i| MeshVertex {
                position: self.vertices[i].into(),
                normal: self.normals[i].into(),
                uv: self.uvs[i].into(),
                tangent: self.tangents[i].into(),
                color: Vec4::from_array(self.colors[i].to_array()).into(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section() {
        let section = MeshSection::new();
        assert!(section.is_empty());
        assert_eq!(section.triangle_count(), 0);
        assert!(section.bounds().is_none());
        assert!(section.is_consistent());
    }

    #[test]
    fn test_push_vertex_clamps_uv() {
        let mut section = MeshSection::new();
        section.push_vertex(
            Vec3::ZERO,
            Vec3::Z,
            Vec2::new(-0.5, 1.5),
            Vec4::X,
            LinearColor::WHITE,
        );
        assert_eq!(section.uvs[0], Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut a = MeshSection::new();
        for _ in 0..3 {
            a.push_vertex(Vec3::ZERO, Vec3::Z, Vec2::ZERO, Vec4::X, LinearColor::WHITE);
        }
        a.indices.extend([0, 1, 2]);

        let mut b = a.clone();
        b.append(&a);
        assert_eq!(b.indices, vec![0, 1, 2, 3, 4, 5]);
        assert!(b.is_consistent());
        assert_eq!(b.interleaved().len(), 6);
    }
}
