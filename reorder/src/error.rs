//! Errors raised by [`SequenceBuffer`](crate::SequenceBuffer).

use core::fmt;

use snafu::Snafu;

/// A broken producer contract.
///
/// Accepting the item would silently break the ordering guarantee, so this
/// is not something the buffer recovers from. [`SequenceBuffer::add`]
/// panics with the fault's message; [`SequenceBuffer::try_add`] hands it
/// back as [`ReorderError::Fault`] instead.
///
/// [`SequenceBuffer::add`]: crate::SequenceBuffer::add
/// [`SequenceBuffer::try_add`]: crate::SequenceBuffer::try_add
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SequenceFault {
    /// The position is below the cursor and was already delivered.
    #[snafu(display("stale sequence {seq}: positions below {next_seq} are already delivered"))]
    Stale {
        /// Offending position.
        seq: u64,
        /// Cursor at the time of the call.
        next_seq: u64,
    },

    /// The position already holds a buffered item.
    #[snafu(display("duplicate sequence {seq}: position is already buffered"))]
    Duplicate {
        /// Offending position.
        seq: u64,
    },
}

impl SequenceFault {
    /// Position that triggered the fault.
    pub fn seq(&self) -> u64 {
        match *self {
            Self::Stale { seq, .. } | Self::Duplicate { seq } => seq,
        }
    }

    /// Abort the caller with this fault.
    #[track_caller]
    pub fn raise(self) -> ! {
        tracing::error!(fault = %self, "sequence contract violated");
        panic!("{self}")
    }
}

/// Error returned by [`SequenceBuffer::add`](crate::SequenceBuffer::add).
///
/// Generic over the sink's error type `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderError<E> {
    /// Storing the item would stretch the window past its bound.
    ///
    /// The item was dropped and the buffer is unchanged.
    WindowExceeded {
        /// Rejected position.
        seq: u64,
        /// Cursor at the time of the call.
        next_seq: u64,
        /// Configured bound on the slot store length.
        max_window: usize,
    },

    /// The sink refused a run.
    ///
    /// The cursor already moved past the run; it will not be offered again.
    Sink {
        /// First position of the refused run.
        start: u64,
        /// Number of items in the refused run.
        len: usize,
        /// The sink's own error.
        source: E,
    },

    /// A stale or duplicate position, returned only by
    /// [`try_add`](crate::SequenceBuffer::try_add).
    Fault(SequenceFault),
}

impl<E> ReorderError<E> {
    /// Whether the item was rejected for lack of window space.
    pub fn is_window_exceeded(&self) -> bool {
        matches!(self, Self::WindowExceeded { .. })
    }

    /// The sink's error, if the sink caused this.
    pub fn sink_error(&self) -> Option<&E> {
        match self {
            Self::Sink { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Consume and return the sink's error, if the sink caused this.
    pub fn into_sink_error(self) -> Option<E> {
        match self {
            Self::Sink { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl<E> From<SequenceFault> for ReorderError<E> {
    fn from(fault: SequenceFault) -> Self {
        Self::Fault(fault)
    }
}

impl<E: fmt::Display> fmt::Display for ReorderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowExceeded {
                seq,
                next_seq,
                max_window,
            } => write!(
                f,
                "sequence {seq} is {} past cursor {next_seq}, beyond the reorder window of {max_window}",
                seq - next_seq
            ),
            Self::Sink { start, len, source } => {
                write!(f, "sink refused run of {len} starting at {start}: {source}")
            }
            Self::Fault(fault) => write!(f, "{fault}"),
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for ReorderError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Sink { source, .. } => Some(source),
            Self::Fault(fault) => Some(fault),
            Self::WindowExceeded { .. } => None,
        }
    }
}
