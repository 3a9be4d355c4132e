pub mod collectors;
pub mod connectors;
pub mod error;
pub mod parallel;
pub mod pipeline;
pub mod sequence;

// Re-export the everyday surface at the crate root
pub use error::{PipelineError, PipelineResult};
pub use parallel::{ParallelConfig, ParallelExt};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use sequence::{BoxSequence, Cardinality, Sequence, SequenceExt};
