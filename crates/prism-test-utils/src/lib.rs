//! Test utilities for Prism charts.
//!
//! This crate provides shared fixtures and a scripted geometry generation
//! backend, so chart tests can exercise the generation handoff without a
//! GPU or a thread pool.
//!
//! # Overview
//!
//! - [`fixtures`] - small grids, category maps and record payloads
//! - `MockGenerationBackend` - a [`GenerationBackend`](prism_charts::GenerationBackend)
//!   that answers on a script and records every call (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use prism_charts::*;
//! use prism_test_utils::{MockGenerationBackend, fixtures};
//!
//! let backend = MockGenerationBackend::deliver_after(2);
//! let mut chart = Chart::bar(BarChartConfig::default());
//! chart.load(ChartInput::Grid(fixtures::grid_points(2, 3))).unwrap();
//! chart
//!     .enable_generation(Box::new(backend.clone()), GenerationConfig::default())
//!     .unwrap();
//!
//! for _ in 0..3 {
//!     chart.tick(1.0 / 60.0, true).unwrap();
//! }
//! assert_eq!(backend.count_submits(), 1);
//! assert!(chart.generated().is_some());
//! # }
//! ```
//!
//! # Design
//!
//! The backend is a cheap handle over shared state. Tests keep one clone
//! for assertions and box the other into the chart.

pub mod fixtures;
#[cfg(feature = "mock")]
pub mod mock_backend;

#[cfg(feature = "mock")]
pub use mock_backend::*;
