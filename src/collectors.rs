//! Collector factories for the `collect` terminal operation
//!
//! A collector bundles an accumulator supplier, a per-element fold step and
//! a finisher. The fold step is fallible so that strict collectors such as
//! `to_mapping` can reject a violation mid-traversal. A fresh accumulator
//! is created per terminal invocation; collectors themselves hold no state.

use crate::error::{PipelineError, PipelineResult};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::rc::Rc;

/// Reusable accumulation strategy applied by `Pipeline::collect`.
pub struct Collector<T, A, R> {
    pub(crate) supplier: Box<dyn Fn() -> A>,
    pub(crate) fold: Box<dyn Fn(A, T) -> PipelineResult<A>>,
    pub(crate) finisher: Box<dyn Fn(A) -> R>,
}

impl<T, A, R> Collector<T, A, R> {
    pub fn new(
        supplier: impl Fn() -> A + 'static,
        fold: impl Fn(A, T) -> PipelineResult<A> + 'static,
        finisher: impl Fn(A) -> R + 'static,
    ) -> Self {
        Collector {
            supplier: Box::new(supplier),
            fold: Box::new(fold),
            finisher: Box::new(finisher),
        }
    }
}

impl<T, A, R> std::fmt::Debug for Collector<T, A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector").finish_non_exhaustive()
    }
}

/// Builder for custom collectors.
///
/// The supplier and the fold step are mandatory; `build` reports a
/// `MissingFunction` error when either was never supplied.
pub struct CollectorBuilder<T, A> {
    supplier: Option<Box<dyn Fn() -> A>>,
    fold: Option<Box<dyn Fn(A, T) -> PipelineResult<A>>>,
}

impl<T, A> CollectorBuilder<T, A> {
    pub fn new() -> Self {
        CollectorBuilder { supplier: None, fold: None }
    }

    pub fn supplier(mut self, f: impl Fn() -> A + 'static) -> Self {
        self.supplier = Some(Box::new(f));
        self
    }

    pub fn fold(mut self, f: impl Fn(A, T) -> PipelineResult<A> + 'static) -> Self {
        self.fold = Some(Box::new(f));
        self
    }

    /// Build with the identity finisher.
    pub fn build(self) -> PipelineResult<Collector<T, A, A>> {
        self.build_with(|acc| acc)
    }

    /// Build with an explicit finisher transforming the accumulator into
    /// the result type.
    pub fn build_with<R>(
        self,
        finisher: impl Fn(A) -> R + 'static,
    ) -> PipelineResult<Collector<T, A, R>> {
        let supplier = self.supplier.ok_or(PipelineError::MissingFunction("supplier"))?;
        let fold = self.fold.ok_or(PipelineError::MissingFunction("fold"))?;
        Ok(Collector { supplier, fold, finisher: Box::new(finisher) })
    }
}

impl<T, A> Default for CollectorBuilder<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

// ================================
// Container Collectors
// ================================

/// Append every element to a `Vec`, preserving encounter order.
pub fn to_list<T: 'static>() -> Collector<T, Vec<T>, Vec<T>> {
    Collector::new(
        Vec::new,
        |mut acc, item| {
            acc.push(item);
            Ok(acc)
        },
        |acc| acc,
    )
}

/// Collect elements into a `HashSet`, de-duplicating by equality.
pub fn to_set<T>() -> Collector<T, HashSet<T>, HashSet<T>>
where
    T: Eq + Hash + 'static,
{
    Collector::new(
        HashSet::new,
        |mut acc, item| {
            acc.insert(item);
            Ok(acc)
        },
        |acc| acc,
    )
}

/// Build a map from derived keys to derived values.
///
/// Strict on collisions: two elements producing the same key fail the
/// traversal with `DuplicateKey` rather than silently overwriting.
pub fn to_mapping<T, K, V>(
    key_fn: impl Fn(&T) -> K + 'static,
    value_fn: impl Fn(T) -> V + 'static,
) -> Collector<T, HashMap<K, V>, HashMap<K, V>>
where
    K: Eq + Hash + Debug + 'static,
    V: 'static,
{
    Collector::new(
        HashMap::new,
        move |mut acc, item| {
            let key = key_fn(&item);
            if acc.contains_key(&key) {
                return Err(PipelineError::DuplicateKey { key: format!("{:?}", key) });
            }
            acc.insert(key, value_fn(item));
            Ok(acc)
        },
        |acc| acc,
    )
}

// ================================
// Scalar Collectors
// ================================

/// Concatenate the display form of every element with `separator` between
/// consecutive elements.
pub fn joining<T>(separator: &str) -> Collector<T, Vec<String>, String>
where
    T: Display,
{
    let separator = separator.to_string();
    Collector::new(
        Vec::new,
        |mut acc, item: T| {
            acc.push(item.to_string());
            Ok(acc)
        },
        move |acc| acc.join(&separator),
    )
}

/// Count the elements.
pub fn counting<T>() -> Collector<T, usize, usize> {
    Collector::new(|| 0, |acc, _item| Ok(acc + 1), |acc| acc)
}

/// Arithmetic mean of `f` applied to every element.
///
/// Degenerate case: an empty input averages to `0.0`.
pub fn averaging<T>(f: impl Fn(&T) -> f64 + 'static) -> Collector<T, (f64, usize), f64> {
    Collector::new(
        || (0.0, 0),
        move |(sum, n), item| Ok((sum + f(&item), n + 1)),
        |(sum, n)| if n == 0 { 0.0 } else { sum / n as f64 },
    )
}

/// Track the minimal element under `compare`; ties keep the first seen.
pub fn min_by<T>(
    compare: impl Fn(&T, &T) -> Ordering + 'static,
) -> Collector<T, Option<T>, Option<T>> {
    Collector::new(
        || None,
        move |best, item| {
            Ok(match best {
                None => Some(item),
                Some(current) => {
                    if compare(&item, &current) == Ordering::Less {
                        Some(item)
                    } else {
                        Some(current)
                    }
                }
            })
        },
        |best| best,
    )
}

/// Track the maximal element under `compare`; ties keep the first seen.
pub fn max_by<T>(
    compare: impl Fn(&T, &T) -> Ordering + 'static,
) -> Collector<T, Option<T>, Option<T>> {
    Collector::new(
        || None,
        move |best, item| {
            Ok(match best {
                None => Some(item),
                Some(current) => {
                    if compare(&item, &current) == Ordering::Greater {
                        Some(item)
                    } else {
                        Some(current)
                    }
                }
            })
        },
        |best| best,
    )
}

/// Count, sum and extrema of an integer projection of the elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub count: usize,
    pub sum: i64,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl SummaryStats {
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Summary statistics over `f` applied to every element.
pub fn summarizing<T>(f: impl Fn(&T) -> i64 + 'static) -> Collector<T, SummaryStats, SummaryStats> {
    Collector::new(
        SummaryStats::default,
        move |mut acc, item| {
            let value = f(&item);
            acc.count += 1;
            acc.sum += value;
            acc.min = Some(acc.min.map_or(value, |m| m.min(value)));
            acc.max = Some(acc.max.map_or(value, |m| m.max(value)));
            Ok(acc)
        },
        |acc| acc,
    )
}

// ================================
// Grouping Collectors
// ================================

/// Partition elements into buckets by derived key, folding each bucket with
/// `downstream`. Iteration order over the keys is unspecified.
pub fn grouping_by<T, K, A, R>(
    key_fn: impl Fn(&T) -> K + 'static,
    downstream: Collector<T, A, R>,
) -> Collector<T, HashMap<K, A>, HashMap<K, R>>
where
    T: 'static,
    K: Eq + Hash + 'static,
    A: 'static,
    R: 'static,
{
    let downstream = Rc::new(downstream);
    let fold_downstream = Rc::clone(&downstream);
    Collector::new(
        HashMap::new,
        move |mut acc: HashMap<K, A>, item| {
            let key = key_fn(&item);
            let bucket = match acc.remove(&key) {
                Some(existing) => existing,
                None => (fold_downstream.supplier)(),
            };
            let bucket = (fold_downstream.fold)(bucket, item)?;
            acc.insert(key, bucket);
            Ok(acc)
        },
        move |acc| {
            acc.into_iter()
                .map(|(key, bucket)| (key, (downstream.finisher)(bucket)))
                .collect()
        },
    )
}

/// The two buckets produced by `partitioning_by`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<T> {
    pub matched: Vec<T>,
    pub unmatched: Vec<T>,
}

/// Split elements into exactly two buckets by `predicate`; either bucket
/// may be empty.
pub fn partitioning_by<T>(
    predicate: impl Fn(&T) -> bool + 'static,
) -> Collector<T, Partition<T>, Partition<T>> {
    Collector::new(
        || Partition { matched: Vec::new(), unmatched: Vec::new() },
        move |mut acc, item| {
            if predicate(&item) {
                acc.matched.push(item);
            } else {
                acc.unmatched.push(item);
            }
            Ok(acc)
        },
        |acc| acc,
    )
}
