//! Error types for mesh construction.

use std::fmt;

/// Errors raised while building or addressing mesh sections.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Inner radius is larger than the outer radius of a pie wedge.
    InvalidRadii { inner: f32, outer: f32 },

    /// Start angle is not strictly before the end angle.
    InvalidAngles { start: f32, end: f32 },

    /// A section index past the end of the store.
    SectionOutOfRange { index: usize, len: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::InvalidRadii { inner, outer } => {
                write!(f, "Inner radius {} exceeds outer radius {}", inner, outer)
            }
            MeshError::InvalidAngles { start, end } => {
                write!(f, "Start angle {} must be less than end angle {}", start, end)
            }
            MeshError::SectionOutOfRange { index, len } => {
                write!(f, "Section {} out of range (store holds {})", index, len)
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
