//! Prism Charts - 3D bar, line and pie charts built from procedural mesh sections.
//!
//! This crate provides:
//! - The chart data model: grid tuples, named records, category values and
//!   tabular conversion
//! - Nice-tick axis labeling and billboard label orientation
//! - Build-in animation and hover/selection interaction
//! - A [`ChartRenderer`] per chart kind that turns data into mesh sections
//! - LOD banding, reference highlights, value triggers and statistic lines
//! - The GPU geometry generation handoff
//! - [`Chart`], which drives one chart per frame
//!
//! # Example
//!
//! ```
//! use prism_charts::*;
//!
//! let mut chart = Chart::bar(BarChartConfig::default());
//! chart
//!     .load(ChartInput::Grid(vec![
//!         DataPoint::new(0, 0, 12.0),
//!         DataPoint::new(0, 1, 30.0),
//!         DataPoint::new(1, 0, 7.5),
//!     ]))
//!     .unwrap();
//!
//! // Once per frame
//! chart.tick(1.0 / 60.0, true).unwrap();
//! chart.pointer_move(Some(glam::Vec3::new(15.0, 2.0, 0.0)));
//! assert_eq!(chart.hovered(), Some(1));
//! ```

// Data
mod data;
mod error;

// Axis and shared chart options
mod axis;
mod config;
mod highlight;
mod statistics;
mod zaxis;

// Per-frame state
mod animation;
mod interaction;
mod lod;
mod section_state;

// Chart kinds
mod bar;
mod line;
mod pie;
mod renderer;

// Generation and facade
mod chart;
mod gpu;

pub use data::*;
pub use error::*;

pub use axis::*;
pub use config::*;
pub use highlight::*;
pub use statistics::*;
pub use zaxis::*;

pub use animation::*;
pub use interaction::*;
pub use lod::*;
pub use section_state::*;

pub use bar::*;
pub use line::*;
pub use pie::*;
pub use renderer::*;

pub use chart::*;
pub use gpu::*;
