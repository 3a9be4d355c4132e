//! Line-oriented file source with scoped resource release

use crate::error::PipelineResult;
use crate::pipeline::Pipeline;
use crate::sequence::{Cardinality, Sequence};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Sequence of text lines pulled lazily from a buffered reader.
///
/// A read failure mid-traversal is logged and truncates the sequence; the
/// terminal operation observes early exhaustion rather than a fault.
pub struct LineSequence<R> {
    lines: std::io::Lines<R>,
}

impl<R: BufRead> LineSequence<R> {
    pub fn new(reader: R) -> Self {
        LineSequence { lines: reader.lines() }
    }
}

impl<R: BufRead> Sequence for LineSequence<R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match self.lines.next() {
            Some(Ok(line)) => Some(line),
            Some(Err(err)) => {
                warn!("line read failed, truncating sequence: {}", err);
                None
            }
            None => None,
        }
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::Unknown
    }
}

/// Open `path`, hand a pipeline of its lines to `scope_fn`, and release the
/// file handle when the closure returns.
///
/// The file stays open only for the duration of the closure, so the
/// terminal operation consuming the lines must run inside it.
pub fn with_lines<P, R, F>(path: P, scope_fn: F) -> PipelineResult<R>
where
    P: AsRef<Path>,
    F: FnOnce(Pipeline<String>) -> PipelineResult<R>,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    debug!("opened line source {}", path.display());
    let result = scope_fn(Pipeline::from_sequence(LineSequence::new(BufReader::new(file))));
    debug!("released line source {}", path.display());
    result
}
