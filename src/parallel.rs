//! Parallel evaluation of terminal operations
//!
//! The pull contract of a sequence chain is inherently serial, so the
//! source is always drained on the calling thread; only the per-element
//! work fans out across a worker pool. `par_map_collect` stitches results
//! back together in input order. `par_for_each` gives no ordering
//! guarantee for its side effects; callers that need encounter order must
//! use the sequential `for_each`.

use crate::collectors::to_list;
use crate::error::PipelineResult;
use crate::pipeline::Pipeline;
use log::debug;

/// Worker-pool settings for the parallel terminal operations.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig { workers: num_cpus::get() }
    }
}

/// Parallel terminal operations on a pipeline.
pub trait ParallelExt<T> {
    /// Apply `f` to every element with no shared mutable state between
    /// elements, preserving input order in the result.
    fn par_map_collect<U, F>(&mut self, config: ParallelConfig, f: F) -> PipelineResult<Vec<U>>
    where
        U: Send,
        F: Fn(T) -> U + Sync;

    /// Invoke `consumer` on every element; execution order across elements
    /// is unspecified.
    fn par_for_each<F>(&mut self, config: ParallelConfig, consumer: F) -> PipelineResult<()>
    where
        F: Fn(T) + Sync;
}

impl<T: Send + 'static> ParallelExt<T> for Pipeline<T> {
    fn par_map_collect<U, F>(&mut self, config: ParallelConfig, f: F) -> PipelineResult<Vec<U>>
    where
        U: Send,
        F: Fn(T) -> U + Sync,
    {
        let items = self.collect(to_list())?;
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let chunks = split_into_chunks(items, config.workers);
        debug!("parallel map across {} workers", chunks.len());

        let mut results = Vec::new();
        std::thread::scope(|scope| {
            let f = &f;
            let handles: Vec<_> = chunks
                .into_iter()
                .map(|chunk| scope.spawn(move || chunk.into_iter().map(f).collect::<Vec<U>>()))
                .collect();
            for handle in handles {
                match handle.join() {
                    Ok(mapped) => results.extend(mapped),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
        });
        Ok(results)
    }

    fn par_for_each<F>(&mut self, config: ParallelConfig, consumer: F) -> PipelineResult<()>
    where
        F: Fn(T) + Sync,
    {
        let items = self.collect(to_list())?;
        if items.is_empty() {
            return Ok(());
        }
        let chunks = split_into_chunks(items, config.workers);
        debug!("parallel for_each across {} workers", chunks.len());

        std::thread::scope(|scope| {
            let consumer = &consumer;
            let handles: Vec<_> = chunks
                .into_iter()
                .map(|chunk| {
                    scope.spawn(move || {
                        for item in chunk {
                            consumer(item);
                        }
                    })
                })
                .collect();
            for handle in handles {
                if let Err(payload) = handle.join() {
                    std::panic::resume_unwind(payload);
                }
            }
        });
        Ok(())
    }
}

/// Split `items` into at most `workers` contiguous chunks of near-equal
/// size, preserving order across the chunk boundaries.
fn split_into_chunks<T>(items: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    let workers = workers.max(1);
    let chunk_size = items.len().div_ceil(workers);
    let mut iter = items.into_iter();
    let mut chunks = Vec::new();
    loop {
        let chunk: Vec<T> = iter.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }
    chunks
}
