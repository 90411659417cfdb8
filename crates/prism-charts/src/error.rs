//! Error types for chart loading, building and generation.

use prism_mesh::MeshError;
use std::fmt;

/// Errors raised by chart operations.
///
/// None of these are fatal: a failed load leaves the previous dataset in
/// place and a failed build step leaves its section empty.
#[derive(Debug)]
pub enum ChartError {
    /// The input held no data.
    EmptyInput {
        /// What was being loaded.
        what: &'static str,
    },

    /// A grid tuple did not have 3 or 4 elements, or held a bad coordinate.
    MalformedTuple {
        /// Position of the tuple in the input.
        index: usize,
        /// Number of elements found.
        arity: usize,
    },

    /// A record lacks a field named in the property mapping.
    MissingField {
        /// The field name.
        field: String,
        /// Position of the record in the input.
        record: usize,
    },

    /// Pie category values sum to zero or less.
    NonPositiveTotal { total: f32 },

    /// Pie inner diameter exceeds the outer diameter.
    InvalidDiameters { inner: f32, outer: f32 },

    /// JSON decoding failed.
    Json { source: serde_json::Error },

    /// A table column name was not found.
    ColumnNotFound { name: String },

    /// A generation request's height buffer does not match its grid.
    HeightCountMismatch { expected: usize, actual: usize },

    /// A generation request went unanswered for too many frames.
    GenerationTimedOut { request_id: u64, frames: u32 },

    /// The dense section grid spanned by the row and column indices is too
    /// large to allocate.
    GridTooLarge {
        rows: usize,
        cols: usize,
        limit: usize,
    },

    /// The chart kind cannot consume this input shape.
    UnsupportedInput {
        chart: &'static str,
        input: &'static str,
    },

    /// A mesh build step failed.
    Mesh(MeshError),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::EmptyInput { what } => write!(f, "Empty input: no {} to load", what),
            ChartError::MalformedTuple { index, arity } => {
                write!(
                    f,
                    "Malformed tuple at index {}: expected [row, col, value] or [row, col, value, time], found {} elements",
                    index, arity
                )
            }
            ChartError::MissingField { field, record } => {
                write!(f, "Record {} has no field '{}'", record, field)
            }
            ChartError::NonPositiveTotal { total } => {
                write!(f, "Category values must sum to a positive total, got {}", total)
            }
            ChartError::InvalidDiameters { inner, outer } => {
                write!(f, "Inner diameter {} exceeds outer diameter {}", inner, outer)
            }
            ChartError::Json { source } => write!(f, "JSON error: {}", source),
            ChartError::ColumnNotFound { name } => write!(f, "Column not found: {}", name),
            ChartError::HeightCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Generation request expects {} heights, got {}",
                    expected, actual
                )
            }
            ChartError::GenerationTimedOut { request_id, frames } => {
                write!(
                    f,
                    "Generation request {} timed out after {} frames",
                    request_id, frames
                )
            }
            ChartError::GridTooLarge { rows, cols, limit } => {
                write!(
                    f,
                    "Grid of {}x{} cells exceeds the limit of {} cells",
                    rows, cols, limit
                )
            }
            ChartError::UnsupportedInput { chart, input } => {
                write!(f, "{} charts cannot load {} input", chart, input)
            }
            ChartError::Mesh(err) => write!(f, "Mesh error: {}", err),
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChartError::Json { source } => Some(source),
            ChartError::Mesh(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(source: serde_json::Error) -> Self {
        ChartError::Json { source }
    }
}

impl From<MeshError> for ChartError {
    fn from(err: MeshError) -> Self {
        ChartError::Mesh(err)
    }
}

/// Result type alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
