//! Connectors bridging external resources into pipelines
//!
//! A connector owns a resource lifecycle (open/close) and exposes its
//! contents as a sequence source. The pipeline itself never performs I/O.

pub mod lines;

pub use lines::{with_lines, LineSequence};
