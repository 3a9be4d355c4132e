//! Lazy pull-based sequences and their combinators
//!
//! This module provides the `Sequence` trait, the combinator structs that
//! wrap an upstream sequence, and the constructor functions. Sequences do
//! no work until pulled; the single-pass `Pipeline` handle built on top of
//! them lives in the `pipeline` module.

pub mod advanced;
pub mod constructors;
pub mod core;

// Re-export core types
pub use self::core::{BoxSequence, Cardinality, Chain, Filter, Map, Sequence, SequenceExt, Skip, Take};

// Re-export constructors
pub use self::constructors::{
    empty, from_iter, generate, once, range, range_closed, unfold, Empty, Generate, Iter, Once,
    Unfold,
};

// Re-export flattening and buffering combinators
pub use self::advanced::{AdvancedSequenceExt, Distinct, FlatMap, Sorted};
