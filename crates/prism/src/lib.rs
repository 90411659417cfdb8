//! Prism - interactive 3D charts
//!
//! Prism turns tabular data into procedurally generated triangle meshes
//! for 3D bar, line and pie charts. It provides:
//!
//! - **Data Model**: grid tuples, named records and category maps, decoded from JSON
//! - **Geometry**: box, sphere and pie wedge sections with an animated height backup
//! - **Interaction**: pointer hit mapping, hover and click-to-pin selection
//! - **Axes**: nice-tick labels and camera-facing label placement
//! - **Generation**: box grids built off the frame loop on a [`TaskPool`]
//!
//! # Quick Start
//!
//! ```
//! use prism::prelude::*;
//!
//! let points = decode_tuples("[[0, 0, 12.0], [0, 1, 30.0], [1, 0, 7.5]]").unwrap();
//! let mut chart = Chart::bar(BarChartConfig::default());
//! chart.load(ChartInput::Grid(points)).unwrap();
//!
//! // Once per frame, with the pointer already in chart-local space
//! chart.tick(1.0 / 60.0, true).unwrap();
//! chart.pointer_move(Some(Vec3::new(15.0, 2.0, 0.0)));
//! assert_eq!(chart.hovered(), Some(1));
//!
//! // Upload whatever changed
//! for (section, flags) in chart.take_dirty() {
//!     let _mesh = chart.store().section(section);
//!     let _ = flags;
//! }
//! ```
//!
//! # Architecture
//!
//! Every chart kind implements [`ChartRenderer`](charts::ChartRenderer).
//! A [`Chart`](charts::Chart) owns one renderer together with the
//! [`SectionMeshStore`](mesh::SectionMeshStore) and the render state that
//! mirrors it, and drives animation, interaction and generation per frame.

pub mod cpu_backend;
pub mod task_pool;

// Re-export sub-crates
pub use prism_charts as charts;
pub use prism_core as core;
pub use prism_core::math;
pub use prism_mesh as mesh;

pub use cpu_backend::CpuBoxBackend;
pub use task_pool::TaskPool;

/// Commonly used types.
pub mod prelude {
    pub use crate::cpu_backend::CpuBoxBackend;
    pub use crate::task_pool::TaskPool;

    pub use prism_charts::{
        AnimationConfig, BarChartConfig, Chart, ChartAxis, ChartError, ChartInput, ChartKind,
        ChartResult, DataPoint, GenerationConfig, GenerationStatus, LineChartConfig, LineStyle,
        PieChartConfig, PieShape, PieStyle, PropertyMapping, decode_categories, decode_records,
        decode_tuples,
    };
    pub use prism_core::math::{Rotator, Vec2, Vec3};
    pub use prism_mesh::{ColorRamp, LinearColor, SectionDirtyFlags};
}
