use alloc::vec::Vec;
use core::convert::Infallible;

use crate::{Run, Sink};

/// Drops all runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropSink;

impl<T> Sink<T> for DropSink {
    type Error = Infallible;

    #[inline]
    fn send(&mut self, _run: Run<T>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Records every delivered run.
#[derive(Debug, Clone)]
pub struct CollectSink<T> {
    runs: Vec<Run<T>>,
}

impl<T> Default for CollectSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CollectSink<T> {
    /// Create a new collecting sink.
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Runs in delivery order.
    pub fn runs(&self) -> &[Run<T>] {
        &self.runs
    }

    /// Every delivered item, flattened across runs.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.runs.iter().flat_map(Run::items)
    }

    /// Number of runs received so far.
    pub fn calls(&self) -> usize {
        self.runs.len()
    }

    /// Take collected runs, leaving an empty Vec.
    pub fn take(&mut self) -> Vec<Run<T>> {
        core::mem::take(&mut self.runs)
    }

    /// Consume sink and return collected runs.
    pub fn into_runs(self) -> Vec<Run<T>> {
        self.runs
    }

    /// Consume sink and return every item in delivery order.
    pub fn into_items(self) -> Vec<T> {
        self.runs.into_iter().flat_map(Run::into_items).collect()
    }
}

impl<T> Sink<T> for CollectSink<T> {
    type Error = Infallible;

    #[inline]
    fn send(&mut self, run: Run<T>) -> Result<(), Self::Error> {
        self.runs.push(run);
        Ok(())
    }
}

/// Calls a closure with `(start, items)` for each run.
#[derive(Debug)]
pub struct FnSink<F>(pub F);

impl<F> FnSink<F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }

    /// Consume the sink and return the closure.
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<T, E, F> Sink<T> for FnSink<F>
where
    F: FnMut(u64, Vec<T>) -> Result<(), E>,
{
    type Error = E;

    #[inline]
    fn send(&mut self, run: Run<T>) -> Result<(), Self::Error> {
        let (start, items) = run.into_parts();
        (self.0)(start, items)
    }
}

/// Create a sink from a closure.
pub fn sink<T, E, F>(f: F) -> impl Sink<T, Error = E>
where
    F: FnMut(u64, Vec<T>) -> Result<(), E>,
{
    FnSink(f)
}
