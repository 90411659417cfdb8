//! Procedural mesh building for 3D charts.
//!
//! Provides the pieces every chart kind draws with:
//! - [`MeshSection`]: one independently drawable sub-mesh
//! - Primitive builders: triangles, quads, boxes, UV spheres and pie wedges
//! - [`SectionMeshStore`]: the section array of a chart, with the vertex-Z
//!   backup used by build-in animation
//! - [`LinearColor`] and [`ColorRamp`] for value-to-color bucketing
//!
//! # Example
//!
//! ```
//! use prism_mesh::*;
//! use glam::Vec3;
//!
//! let mut store = SectionMeshStore::new();
//! store.prepare(1);
//!
//! let section = store.section_mut(0).unwrap();
//! build_box(section, &BoxSpec {
//!     position: Vec3::ZERO,
//!     length: 10.0,
//!     width: 10.0,
//!     height: 40.0,
//!     next_height: 40.0,
//!     color: LinearColor::WHITE,
//! });
//!
//! store.backup_vertex_z();
//! store.apply_height_scale(0.5);
//! ```

mod color;
mod dirty;
mod error;
mod primitives;
mod section;
mod store;
mod vertex;

pub use color::*;
pub use dirty::*;
pub use error::*;
pub use primitives::*;
pub use section::*;
pub use store::*;
pub use vertex::*;
