//! Chart data model.
//!
//! Every chart consumes one of three input shapes:
//! - Grid tuples `(row, col, value[, time])`, loaded into a [`ChartDataset`]
//! - Records with configurable field names, indexed through
//!   [`ChartDataset::load_named_objects`]
//! - Ordered `category -> value` pairs, loaded into [`CategoryValues`]
//!
//! [`DataTable`] and the JSON decoders turn already-read text into these
//! shapes. Reading files is left to the caller.

mod category;
mod dataset;
mod json;
mod named;
mod table;

pub use category::*;
pub use dataset::*;
pub use json::*;
pub use named::*;
pub use table::*;
