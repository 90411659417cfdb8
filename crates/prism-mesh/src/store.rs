//! Section storage with the vertex-Z backup used by build-in animation.

use crate::color::LinearColor;
use crate::dirty::SectionDirtyFlags;
use crate::error::{MeshError, MeshResult};
use crate::section::MeshSection;
use prism_core::profiling::profile_function;

/// Lowest height scale applied by [`SectionMeshStore::apply_height_scale`].
///
/// A fully collapsed box has zero-height bounds, so animation starts from a
/// thin sliver instead.
pub const MIN_HEIGHT_SCALE: f32 = 0.1;

/// Owns the mesh sections of one chart.
///
/// After [`prepare`](Self::prepare) the store holds `count + 1` sections:
/// one per data section plus a trailing reserved slot.
#[derive(Debug, Clone, Default)]
pub struct SectionMeshStore {
    sections: Vec<MeshSection>,
    /// Final vertex Z per section, captured once per build cycle.
    z_backup: Vec<Option<Vec<f32>>>,
    backed_up: bool,
    dirty: Vec<SectionDirtyFlags>,
    last_scale: Option<f32>,
}

impl SectionMeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry and allocate `count + 1` empty sections.
    ///
    /// Also forgets the vertex-Z backup, so the next
    /// [`backup_vertex_z`](Self::backup_vertex_z) captures fresh heights.
    pub fn prepare(&mut self, count: usize) {
        self.sections.clear();
        self.sections.resize_with(count + 1, MeshSection::new);
        self.z_backup.clear();
        self.z_backup.resize(count + 1, None);
        self.dirty.clear();
        self.dirty.resize(count + 1, SectionDirtyFlags::GEOMETRY);
        self.backed_up = false;
        self.last_scale = None;
        tracing::debug!("Prepared {} mesh sections", count + 1);
    }

    /// Number of sections, including the reserved slot.
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, index: usize) -> Option<&MeshSection> {
        self.sections.get(index)
    }

    /// Mutable access for (re)building one section. Marks it dirty.
    pub fn section_mut(&mut self, index: usize) -> Option<&mut MeshSection> {
        let section = self.sections.get_mut(index)?;
        self.dirty[index].insert(SectionDirtyFlags::GEOMETRY);
        Some(section)
    }

    pub fn sections(&self) -> &[MeshSection] {
        &self.sections
    }

    /// Empty one section in place, ready to be rewritten without a full rebuild.
    ///
    /// The section's Z backup is dropped; it is captured again from the
    /// rewritten geometry the next time a height scale is applied.
    pub fn clear_section(&mut self, index: usize) -> MeshResult<()> {
        let len = self.sections.len();
        let section = self
            .sections
            .get_mut(index)
            .ok_or(MeshError::SectionOutOfRange { index, len })?;
        section.clear();
        self.z_backup[index] = None;
        self.dirty[index].insert(SectionDirtyFlags::GEOMETRY);
        Ok(())
    }

    /// Replace a section wholesale.
    pub fn replace_section(&mut self, index: usize, section: MeshSection) -> MeshResult<()> {
        self.clear_section(index)?;
        self.sections[index] = section;
        Ok(())
    }

    /// Repaint one section's vertex colors without touching its geometry.
    pub fn recolor_section(&mut self, index: usize, color: LinearColor) -> MeshResult<()> {
        let len = self.sections.len();
        let section = self
            .sections
            .get_mut(index)
            .ok_or(MeshError::SectionOutOfRange { index, len })?;
        section.set_color(color);
        self.dirty[index].insert(SectionDirtyFlags::MATERIAL);
        Ok(())
    }

    /// Snapshot every vertex Z as the final-height reference.
    ///
    /// Only the first call after [`prepare`](Self::prepare) does work;
    /// later calls leave the snapshot untouched.
    pub fn backup_vertex_z(&mut self) {
        if self.backed_up {
            return;
        }
        for (section, backup) in self.sections.iter().zip(self.z_backup.iter_mut()) {
            *backup = Some(section.vertices.iter().map(|v| v.z).collect());
        }
        self.backed_up = true;
    }

    #[inline]
    pub fn has_backup(&self) -> bool {
        self.backed_up
    }

    /// Backed-up Z values of one section.
    pub fn z_backup(&self, index: usize) -> Option<&[f32]> {
        self.z_backup.get(index)?.as_deref()
    }

    /// Set every vertex Z to `backup * scale`, with `scale` clamped to
    /// `[MIN_HEIGHT_SCALE, 1.0]`. Returns the scale actually applied.
    ///
    /// Repeating the previous scale is a no-op.
    pub fn apply_height_scale(&mut self, scale: f32) -> f32 {
        profile_function!();

        let scale = if scale.is_nan() {
            MIN_HEIGHT_SCALE
        } else {
            scale.clamp(MIN_HEIGHT_SCALE, 1.0)
        };

        if !self.backed_up {
            tracing::debug!("Height scale applied before backup; capturing vertex Z now");
            self.backup_vertex_z();
        }
        if self.last_scale == Some(scale) {
            return scale;
        }

        for (index, section) in self.sections.iter_mut().enumerate() {
            let backup = self.z_backup[index].get_or_insert_with(|| {
                section.vertices.iter().map(|v| v.z).collect()
            });
            if backup.len() != section.vertices.len() {
                *backup = section.vertices.iter().map(|v| v.z).collect();
            }
            if section.vertices.is_empty() {
                continue;
            }
            for (vertex, z) in section.vertices.iter_mut().zip(backup.iter()) {
                vertex.z = z * scale;
            }
            self.dirty[index].insert(SectionDirtyFlags::HEIGHT);
        }

        self.last_scale = Some(scale);
        scale
    }

    /// Flag a section as changed.
    pub fn mark_dirty(&mut self, index: usize, flags: SectionDirtyFlags) {
        if let Some(dirty) = self.dirty.get_mut(index) {
            dirty.insert(flags);
        }
    }

    pub fn dirty_flags(&self, index: usize) -> SectionDirtyFlags {
        self.dirty.get(index).copied().unwrap_or_default()
    }

    /// Drain the dirty set: returns every changed section and its flags.
    pub fn take_dirty(&mut self) -> Vec<(usize, SectionDirtyFlags)> {
        self.dirty
            .iter_mut()
            .enumerate()
            .filter(|(_, flags)| !flags.is_empty())
            .map(|(i, flags)| (i, std::mem::take(flags)))
            .collect()
    }

    /// Total vertices over all sections.
    pub fn vertex_count(&self) -> usize {
        self.sections.iter().map(MeshSection::vertex_count).sum()
    }
}
