//! Bounded reordering buffer.
//!
//! `SequenceBuffer` accepts items tagged with a sequence position in any
//! order and hands them to a [`Sink`] as gap-free [`Run`]s, each as soon as
//! it becomes contiguous with everything delivered before it.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use runsink::{Run, Sink};
use snafu::ensure;

use crate::builder::{ReorderConfig, SequenceBufferBuilder, UNBOUNDED};
use crate::error::{DuplicateSnafu, ReorderError, SequenceFault, StaleSnafu};
use crate::slot::{Slot, grow};

/// Reorders sequenced items into contiguous runs.
///
/// Fast path: the item for `next_seq` arrives, and it plus every buffered
/// successor directly behind it go to the sink in one call. Slow path: an
/// item ahead of the cursor waits in the slot store at
/// `offset = seq - next_seq` until its predecessors arrive.
///
/// # Window
///
/// The slot store never grows past `max_window` entries. An item that would
/// need a longer store is refused with [`ReorderError::WindowExceeded`] and
/// dropped. A position that never arrives holds back everything after it;
/// nothing is skipped or expired.
///
/// # Single writer
///
/// `add` takes `&mut self`. Producers on several threads must funnel through
/// one owner (a channel into a single task, or an external mutex).
///
/// # Example
///
/// ```
/// use reorder::{CollectSink, SequenceBuffer};
///
/// let mut buf = SequenceBuffer::new(10, CollectSink::new());
/// buf.add(2, 'c').unwrap();
/// buf.add(1, 'b').unwrap();
/// assert_eq!(buf.sink().calls(), 0);
///
/// buf.add(0, 'a').unwrap();
/// let run = &buf.sink().runs()[0];
/// assert_eq!((run.start(), run.items()), (0, &['a', 'b', 'c'][..]));
/// assert_eq!(buf.next_seq(), 3);
/// ```
#[derive(Debug)]
pub struct SequenceBuffer<T, S> {
    next_seq: u64,
    pending: VecDeque<Slot<T>>,
    max_window: usize,
    sink: S,
}

impl<T> SequenceBuffer<T, runsink::DropSink> {
    /// Start building a buffer.
    pub fn builder() -> SequenceBufferBuilder<T, runsink::DropSink> {
        SequenceBufferBuilder::new()
    }
}

impl<T, S> SequenceBuffer<T, S> {
    /// Create a buffer expecting position 0 first.
    ///
    /// `max_window` bounds the slot store length; zero means unbounded.
    pub fn new(max_window: usize, sink: S) -> Self {
        Self::with_config(ReorderConfig::new(max_window), sink)
    }

    /// Create a buffer from settings.
    pub fn with_config(config: ReorderConfig, sink: S) -> Self {
        Self {
            next_seq: config.start_seq,
            pending: VecDeque::new(),
            max_window: config.max_window,
            sink,
        }
    }

    /// Lowest position not yet delivered.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Current slot store length, gaps included.
    pub fn window_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of items waiting for predecessors.
    pub fn buffered(&self) -> usize {
        self.pending.iter().filter(|slot| slot.is_occupied()).count()
    }

    /// Whether nothing is waiting.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Configured window bound; zero when unbounded.
    pub fn max_window(&self) -> usize {
        self.max_window
    }

    /// Settings equivalent to this buffer's current state.
    pub fn config(&self) -> ReorderConfig {
        ReorderConfig::new(self.max_window).with_start_seq(self.next_seq)
    }

    /// Reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the buffer and return the sink.
    ///
    /// Buffered items are dropped. Call [`drain_pending()`](Self::drain_pending)
    /// first to keep them.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Remove every buffered item, returning each with its position.
    ///
    /// Nothing is delivered and the cursor stays put; the gaps that held the
    /// items back are still gaps. Use at end of stream to recover what the
    /// missing positions stranded.
    pub fn drain_pending(&mut self) -> Vec<(u64, T)> {
        let base = self.next_seq;
        let drained: Vec<(u64, T)> = core::mem::take(&mut self.pending)
            .into_iter()
            .zip(base..)
            .filter_map(|(slot, seq)| slot.into_occupied().map(|item| (seq, item)))
            .collect();
        if !drained.is_empty() {
            tracing::debug!(
                count = drained.len(),
                next_seq = base,
                "drained buffered items without delivery"
            );
        }
        drained
    }

    fn check(&self, seq: u64) -> Result<u64, SequenceFault> {
        ensure!(
            seq >= self.next_seq,
            StaleSnafu {
                seq,
                next_seq: self.next_seq,
            }
        );
        let offset = seq - self.next_seq;
        let occupied = usize::try_from(offset)
            .ok()
            .and_then(|offset| self.pending.get(offset))
            .is_some_and(Slot::is_occupied);
        ensure!(!occupied, DuplicateSnafu { seq });
        Ok(offset)
    }

    fn window_allows(&self, required: usize) -> bool {
        self.max_window == UNBOUNDED || required <= self.max_window
    }

    // An unbounded window can ask for more slots than the allocator will give.
    fn reserve(&mut self, required: usize) -> bool {
        let extra = required.saturating_sub(self.pending.len());
        self.pending.try_reserve(extra).is_ok()
    }
}

impl<T, S: Sink<T>> SequenceBuffer<T, S> {
    /// Add the item for position `seq`.
    ///
    /// Returns `Ok(())` whether or not a run was flushed.
    ///
    /// # Errors
    ///
    /// - [`ReorderError::WindowExceeded`] if buffering the item would grow
    ///   the slot store past `max_window`, or past what can be allocated.
    ///   The item is dropped and nothing changes.
    /// - [`ReorderError::Sink`] if the sink refused the run this item
    ///   completed. The cursor has already moved past that run.
    ///
    /// # Panics
    ///
    /// Panics with a [`SequenceFault`] message if `seq` was already delivered
    /// or is already buffered. Use [`try_add`](Self::try_add) to receive the
    /// fault as a value.
    ///
    /// Positions do not wrap: delivering `u64::MAX` itself overflows the
    /// cursor, which panics in debug builds.
    #[track_caller]
    pub fn add(&mut self, seq: u64, item: T) -> Result<(), ReorderError<S::Error>> {
        let offset = match self.check(seq) {
            Ok(offset) => offset,
            Err(fault) => fault.raise(),
        };
        self.place(seq, offset, item)
    }

    /// Like [`add`](Self::add), but stale and duplicate positions come back as
    /// [`ReorderError::Fault`] instead of panicking.
    ///
    /// # Errors
    ///
    /// Everything [`add`](Self::add) returns, plus [`ReorderError::Fault`].
    /// A fault leaves the buffer unchanged.
    pub fn try_add(&mut self, seq: u64, item: T) -> Result<(), ReorderError<S::Error>> {
        let offset = self.check(seq)?;
        self.place(seq, offset, item)
    }

    fn place(&mut self, seq: u64, offset: u64, item: T) -> Result<(), ReorderError<S::Error>> {
        if offset == 0 {
            return self.flush_from(item);
        }

        let required = usize::try_from(offset)
            .ok()
            .and_then(|offset| offset.checked_add(1))
            .filter(|&required| self.window_allows(required))
            .filter(|&required| self.reserve(required));
        let Some(required) = required else {
            tracing::debug!(
                seq,
                next_seq = self.next_seq,
                max_window = self.max_window,
                "reorder window exceeded, item dropped"
            );
            return Err(ReorderError::WindowExceeded {
                seq,
                next_seq: self.next_seq,
                max_window: self.max_window,
            });
        };

        if required > self.pending.len() {
            self.pending = grow(required, core::mem::take(&mut self.pending));
        }
        self.pending[required - 1] = Slot::Occupied(item);
        tracing::trace!(
            seq,
            offset,
            window = self.pending.len(),
            "buffered out-of-order item"
        );
        Ok(())
    }

    // `head` is the item for `next_seq`; slot 0 is empty or absent.
    fn flush_from(&mut self, head: T) -> Result<(), ReorderError<S::Error>> {
        let tail = self
            .pending
            .iter()
            .skip(1)
            .take_while(|slot| slot.is_occupied())
            .count();
        let consumed = self.pending.len().min(tail + 1);

        let mut items = Vec::with_capacity(tail + 1);
        items.push(head);
        items.extend(
            self.pending
                .drain(..consumed)
                .skip(1)
                .filter_map(Slot::into_occupied),
        );

        let start = self.next_seq;
        let len = items.len();
        debug_assert!(
            start.checked_add(len as u64).is_some(),
            "cursor overflow: run of {len} starting at {start} passes u64::MAX"
        );
        self.next_seq = start.wrapping_add(len as u64);
        tracing::trace!(start, len, "flushing contiguous run");

        self.sink.send(Run::new(start, items)).map_err(|source| {
            tracing::warn!(start, len, "sink refused run, cursor already advanced");
            ReorderError::Sink { start, len, source }
        })
    }
}
