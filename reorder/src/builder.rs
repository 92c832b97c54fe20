//! Configuration and builder for [`SequenceBuffer`].

use core::marker::PhantomData;

use runsink::{DropSink, Sink};

use crate::SequenceBuffer;

/// Window value that disables the bound.
pub const UNBOUNDED: usize = 0;

/// Window used when none is configured.
pub const DEFAULT_MAX_WINDOW: usize = 1024;

/// Plain settings for a [`SequenceBuffer`].
///
/// `max_window` bounds the slot store length: the furthest position that
/// can be buffered is `next_seq + max_window - 1`. [`UNBOUNDED`] (zero)
/// lifts the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReorderConfig {
    /// Maximum slot store length, or [`UNBOUNDED`].
    pub max_window: usize,
    /// Position of the first expected item.
    pub start_seq: u64,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WINDOW)
    }
}

impl ReorderConfig {
    /// Settings with the given window, starting at position 0.
    pub const fn new(max_window: usize) -> Self {
        Self {
            max_window,
            start_seq: 0,
        }
    }

    /// Settings without a window bound.
    pub const fn unbounded() -> Self {
        Self::new(UNBOUNDED)
    }

    /// Same settings, starting at `start_seq`.
    #[must_use]
    pub const fn with_start_seq(mut self, start_seq: u64) -> Self {
        self.start_seq = start_seq;
        self
    }

    /// Whether `max_window` is enforced.
    pub const fn is_bounded(&self) -> bool {
        self.max_window != UNBOUNDED
    }
}

/// Builder for constructing a [`SequenceBuffer`].
///
/// Created via [`SequenceBuffer::builder()`]. Configure options with chained
/// methods, then call [`.build()`](Self::build).
///
/// # Example
///
/// ```
/// use reorder::{CollectSink, SequenceBuffer};
///
/// // Default: window of 1024, runs dropped
/// let buf = SequenceBuffer::<u64, _>::builder().build();
/// assert_eq!(buf.max_window(), 1024);
///
/// let mut buf = SequenceBuffer::builder()
///     .max_window(16)
///     .start_seq(100)
///     .sink(CollectSink::new())
///     .build();
/// buf.add(100, "first").unwrap();
/// assert_eq!(buf.sink().runs()[0].start(), 100);
/// ```
pub struct SequenceBufferBuilder<T, S = DropSink> {
    config: ReorderConfig,
    sink: S,
    _marker: PhantomData<T>,
}

impl<T> SequenceBufferBuilder<T, DropSink> {
    pub(crate) fn new() -> Self {
        Self {
            config: ReorderConfig::default(),
            sink: DropSink,
            _marker: PhantomData,
        }
    }
}

impl<T, S: Sink<T>> SequenceBufferBuilder<T, S> {
    /// Set the sink that receives flushed runs.
    pub fn sink<S2: Sink<T>>(self, sink: S2) -> SequenceBufferBuilder<T, S2> {
        SequenceBufferBuilder {
            config: self.config,
            sink,
            _marker: PhantomData,
        }
    }

    /// Bound the slot store to `max_window` entries. Zero lifts the bound.
    #[must_use]
    pub fn max_window(mut self, max_window: usize) -> Self {
        self.config.max_window = max_window;
        self
    }

    /// Lift the window bound.
    #[must_use]
    pub fn unbounded(self) -> Self {
        self.max_window(UNBOUNDED)
    }

    /// Expect `start_seq` as the first position instead of 0.
    #[must_use]
    pub fn start_seq(mut self, start_seq: u64) -> Self {
        self.config.start_seq = start_seq;
        self
    }

    /// Replace all settings at once.
    #[must_use]
    pub fn config(mut self, config: ReorderConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the [`SequenceBuffer`].
    pub fn build(self) -> SequenceBuffer<T, S> {
        SequenceBuffer::with_config(self.config, self.sink)
    }
}
