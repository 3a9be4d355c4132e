//! Single-pass pipeline handles over lazy sequences
//!
//! A `Pipeline` owns a boxed sequence chain and drives it exactly once when
//! a terminal operation is invoked. Intermediate operations wrap the chain
//! without traversing it; structural errors detected while chaining (such
//! as sorting an unbounded source) poison the handle and are surfaced by
//! the terminal operation that eventually consumes it.

use crate::collectors::Collector;
use crate::error::{PipelineError, PipelineResult};
use crate::sequence::{
    empty, from_iter, generate, once, range, range_closed, unfold, AdvancedSequenceExt,
    BoxSequence, Cardinality, Chain, Sequence, SequenceExt,
};
use std::cmp::Ordering;

enum PipelineState<T> {
    Live(BoxSequence<T>),
    Poisoned(PipelineError),
    Consumed,
}

/// A lazily-evaluated, single-consumer, single-pass sequence pipeline.
///
/// Construction and chaining never pull an element; traversal happens when
/// one of the terminal operations runs, and it runs at most once per
/// handle. A second terminal call on the same handle fails with
/// [`PipelineError::Reused`].
///
/// # Examples
///
/// ```
/// use seqpipe::collectors;
/// use seqpipe::pipeline::Pipeline;
///
/// let even_squares = Pipeline::from_iter(1..=6)
///     .map(|n| n * n)
///     .filter(|n| n % 2 == 0)
///     .collect(collectors::to_list())
///     .unwrap();
/// assert_eq!(even_squares, vec![4, 16, 36]);
/// ```
///
/// Short-circuiting terminals bound the work drawn from infinite sources:
///
/// ```
/// use seqpipe::pipeline::Pipeline;
///
/// let mut naturals = 0;
/// let found = Pipeline::generate(move || {
///     naturals += 1;
///     naturals
/// })
/// .any_match(|n| n % 7 == 0)
/// .unwrap();
/// assert!(found);
/// ```
pub struct Pipeline<T> {
    state: PipelineState<T>,
}

impl<T: 'static> Pipeline<T> {
    // ================================
    // Construction
    // ================================

    /// Pipeline with no elements.
    pub fn empty() -> Self {
        Self::from_sequence(empty())
    }

    /// Pipeline emitting a single element.
    pub fn once(value: T) -> Self {
        Self::from_sequence(once(value))
    }

    /// Pipeline over a fixed in-memory container, preserving its order.
    pub fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_sequence(from_iter(items))
    }

    /// Infinite pipeline invoking `f` for every element pulled.
    ///
    /// Bound it with [`limit`](Self::limit) or a short-circuiting terminal;
    /// draining terminals such as `count` never return on it.
    pub fn generate<F>(f: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::from_sequence(generate(f))
    }

    /// Pipeline from a seed and a step function, ending when the step
    /// function returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqpipe::collectors;
    /// use seqpipe::pipeline::Pipeline;
    ///
    /// let fibonacci = Pipeline::unfold((0u64, 1u64), |(a, b)| Some((a, (b, a + b))))
    ///     .limit(10)
    ///     .collect(collectors::to_list())
    ///     .unwrap();
    /// assert_eq!(fibonacci, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    /// ```
    pub fn unfold<St, F>(init: St, f: F) -> Self
    where
        St: 'static,
        F: FnMut(St) -> Option<(T, St)> + 'static,
    {
        Self::from_sequence(unfold(init, f))
    }

    /// Elements of `first`, exhausted before `second` begins.
    pub fn concat(first: Pipeline<T>, second: Pipeline<T>) -> Self {
        let first = match first.state {
            PipelineState::Live(seq) => seq,
            PipelineState::Poisoned(err) => return Self::poisoned(err),
            PipelineState::Consumed => return Self::poisoned(PipelineError::Reused),
        };
        let second = match second.state {
            PipelineState::Live(seq) => seq,
            PipelineState::Poisoned(err) => return Self::poisoned(err),
            PipelineState::Consumed => return Self::poisoned(PipelineError::Reused),
        };
        Self::from_sequence(Chain { first, second, first_done: false })
    }

    /// Incremental element-by-element construction.
    pub fn builder() -> PipelineBuilder<T> {
        PipelineBuilder { items: Vec::new() }
    }

    /// Wrap an arbitrary sequence, e.g. one backed by an external resource.
    pub fn from_sequence(seq: impl Sequence<Item = T> + 'static) -> Self {
        Pipeline { state: PipelineState::Live(Box::new(seq)) }
    }

    fn poisoned(err: PipelineError) -> Self {
        Pipeline { state: PipelineState::Poisoned(err) }
    }

    fn stage<U: 'static>(self, wrap: impl FnOnce(BoxSequence<T>) -> BoxSequence<U>) -> Pipeline<U> {
        match self.state {
            PipelineState::Live(seq) => Pipeline { state: PipelineState::Live(wrap(seq)) },
            PipelineState::Poisoned(err) => Pipeline::poisoned(err),
            PipelineState::Consumed => Pipeline::poisoned(PipelineError::Reused),
        }
    }

    fn consume(&mut self) -> PipelineResult<BoxSequence<T>> {
        match std::mem::replace(&mut self.state, PipelineState::Consumed) {
            PipelineState::Live(seq) => Ok(seq),
            PipelineState::Poisoned(err) => Err(err),
            PipelineState::Consumed => Err(PipelineError::Reused),
        }
    }

    // ================================
    // Intermediate Operations
    // ================================

    /// Transform each element with `f`.
    pub fn map<U, F>(self, f: F) -> Pipeline<U>
    where
        U: 'static,
        F: FnMut(T) -> U + 'static,
    {
        self.stage(|seq| Box::new(seq.map(f)))
    }

    /// Keep only elements satisfying `predicate`, preserving relative order.
    pub fn filter<F>(self, predicate: F) -> Pipeline<T>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        self.stage(|seq| Box::new(seq.filter(predicate)))
    }

    /// Map each element to a sub-sequence and concatenate the sub-sequences
    /// in input order.
    pub fn flat_map<U, I, F>(self, mut f: F) -> Pipeline<U>
    where
        U: 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: FnMut(T) -> I + 'static,
    {
        self.stage(|seq| Box::new(seq.flat_map(move |item| from_iter(f(item)))))
    }

    /// Suppress elements equal to one seen earlier.
    ///
    /// Remembers a clone of every distinct element for the rest of the
    /// traversal; on an infinite source that memory grows without limit.
    pub fn distinct(self) -> Pipeline<T>
    where
        T: Eq + std::hash::Hash + Clone,
    {
        self.stage(|seq| Box::new(seq.distinct()))
    }

    /// Replay the elements in natural order.
    ///
    /// Buffers the entire upstream before emitting anything, so the
    /// upstream must be finite; a source known to be unbounded poisons the
    /// pipeline with [`PipelineError::UnboundedSort`] right here.
    pub fn sorted(self) -> Pipeline<T>
    where
        T: Ord,
    {
        self.sorted_by(|a, b| a.cmp(b))
    }

    /// Replay the elements in the order defined by `compare`.
    pub fn sorted_by<F>(self, compare: F) -> Pipeline<T>
    where
        F: FnMut(&T, &T) -> Ordering + 'static,
    {
        match self.state {
            PipelineState::Live(seq) => {
                if seq.cardinality() == Cardinality::Infinite {
                    Pipeline::poisoned(PipelineError::UnboundedSort)
                } else {
                    Pipeline { state: PipelineState::Live(Box::new(seq.sorted_by(compare))) }
                }
            }
            PipelineState::Poisoned(err) => Pipeline::poisoned(err),
            PipelineState::Consumed => Pipeline::poisoned(PipelineError::Reused),
        }
    }

    /// Stop after at most `n` elements; `limit(0)` is empty and never pulls
    /// upstream.
    pub fn limit(self, n: usize) -> Pipeline<T> {
        self.stage(|seq| Box::new(seq.take(n)))
    }

    /// Discard the first `n` elements, then pass the rest through.
    pub fn skip(self, n: usize) -> Pipeline<T> {
        self.stage(|seq| Box::new(seq.skip(n)))
    }

    // ================================
    // Terminal Operations
    // ================================

    /// Number of elements surviving all upstream stages.
    ///
    /// Never returns on an infinite source that is not bounded by `limit`.
    pub fn count(&mut self) -> PipelineResult<usize> {
        let mut seq = self.consume()?;
        let mut n = 0;
        while seq.next().is_some() {
            n += 1;
        }
        Ok(n)
    }

    /// `true` as soon as any element matches; `false` on exhaustion.
    /// Empty pipelines yield `false`.
    pub fn any_match<F>(&mut self, mut predicate: F) -> PipelineResult<bool>
    where
        F: FnMut(&T) -> bool,
    {
        let mut seq = self.consume()?;
        while let Some(item) = seq.next() {
            if predicate(&item) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// `false` as soon as any element fails the predicate; `true` on
    /// exhaustion. Empty pipelines yield `true`.
    pub fn all_match<F>(&mut self, mut predicate: F) -> PipelineResult<bool>
    where
        F: FnMut(&T) -> bool,
    {
        let mut seq = self.consume()?;
        while let Some(item) = seq.next() {
            if !predicate(&item) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Logical negation of [`any_match`](Self::any_match), with the same
    /// short-circuit behavior. Empty pipelines yield `true`.
    pub fn none_match<F>(&mut self, predicate: F) -> PipelineResult<bool>
    where
        F: FnMut(&T) -> bool,
    {
        self.any_match(predicate).map(|matched| !matched)
    }

    /// First element, pulling exactly one; `None` when empty.
    pub fn find_first(&mut self) -> PipelineResult<Option<T>> {
        let mut seq = self.consume()?;
        Ok(seq.next())
    }

    /// Left-to-right fold starting from the first element; `None` when
    /// empty.
    pub fn reduce<F>(&mut self, mut op: F) -> PipelineResult<Option<T>>
    where
        F: FnMut(T, T) -> T,
    {
        let mut seq = self.consume()?;
        let mut acc = match seq.next() {
            Some(first) => first,
            None => return Ok(None),
        };
        while let Some(item) = seq.next() {
            acc = op(acc, item);
        }
        Ok(Some(acc))
    }

    /// Left-to-right fold from `identity`; the identity itself when empty.
    pub fn fold<A, F>(&mut self, identity: A, mut op: F) -> PipelineResult<A>
    where
        F: FnMut(A, T) -> A,
    {
        let mut seq = self.consume()?;
        let mut acc = identity;
        while let Some(item) = seq.next() {
            acc = op(acc, item);
        }
        Ok(acc)
    }

    /// Minimal element by natural order; `None` when empty.
    pub fn min(&mut self) -> PipelineResult<Option<T>>
    where
        T: Ord,
    {
        self.min_by(|a, b| a.cmp(b))
    }

    /// Maximal element by natural order; `None` when empty.
    pub fn max(&mut self) -> PipelineResult<Option<T>>
    where
        T: Ord,
    {
        self.max_by(|a, b| a.cmp(b))
    }

    /// Minimal element under `compare`; ties keep the first encountered.
    pub fn min_by<F>(&mut self, mut compare: F) -> PipelineResult<Option<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut seq = self.consume()?;
        let mut best: Option<T> = None;
        while let Some(item) = seq.next() {
            best = Some(match best {
                None => item,
                Some(current) => {
                    if compare(&item, &current) == Ordering::Less {
                        item
                    } else {
                        current
                    }
                }
            });
        }
        Ok(best)
    }

    /// Maximal element under `compare`; ties keep the first encountered.
    pub fn max_by<F>(&mut self, mut compare: F) -> PipelineResult<Option<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut seq = self.consume()?;
        let mut best: Option<T> = None;
        while let Some(item) = seq.next() {
            best = Some(match best {
                None => item,
                Some(current) => {
                    if compare(&item, &current) == Ordering::Greater {
                        item
                    } else {
                        current
                    }
                }
            });
        }
        Ok(best)
    }

    /// Invoke `consumer` on every element in encounter order.
    pub fn for_each<F>(&mut self, mut consumer: F) -> PipelineResult<()>
    where
        F: FnMut(T),
    {
        let mut seq = self.consume()?;
        while let Some(item) = seq.next() {
            consumer(item);
        }
        Ok(())
    }

    /// Fold every element into the collector's accumulator, then apply its
    /// finisher.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqpipe::collectors;
    /// use seqpipe::pipeline::Pipeline;
    ///
    /// let by_parity = Pipeline::from_iter([1, 2, 3, 4, 5])
    ///     .collect(collectors::grouping_by(
    ///         |n| if n % 2 == 0 { "even" } else { "odd" },
    ///         collectors::to_list(),
    ///     ))
    ///     .unwrap();
    /// assert_eq!(by_parity[&"odd"], vec![1, 3, 5]);
    /// assert_eq!(by_parity[&"even"], vec![2, 4]);
    /// ```
    pub fn collect<A, R>(&mut self, collector: Collector<T, A, R>) -> PipelineResult<R> {
        let mut seq = self.consume()?;
        let mut acc = (collector.supplier)();
        while let Some(item) = seq.next() {
            acc = (collector.fold)(acc, item)?;
        }
        Ok((collector.finisher)(acc))
    }
}

impl Pipeline<i64> {
    /// Integer pipeline over `start..end` (upper bound excluded).
    pub fn range(start: i64, end: i64) -> Self {
        Self::from_sequence(range(start, end))
    }

    /// Integer pipeline over `start..=end` (upper bound included).
    pub fn range_closed(start: i64, end: i64) -> Self {
        Self::from_sequence(range_closed(start, end))
    }
}

/// Element-by-element builder for a finite pipeline.
pub struct PipelineBuilder<T> {
    items: Vec<T>,
}

impl<T: 'static> PipelineBuilder<T> {
    pub fn add(mut self, value: T) -> Self {
        self.items.push(value);
        self
    }

    pub fn build(self) -> Pipeline<T> {
        Pipeline::from_iter(self.items)
    }
}
