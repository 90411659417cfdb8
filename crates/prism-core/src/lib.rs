//! Prism Core
//!
//! Shared building blocks for the Prism chart crates: logging setup, global
//! configuration, math types and profiling hooks.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod math;
pub mod profiling;
