//! Reorder out-of-order results into gap-free runs.
//!
//! Re-exports the [`SequenceBuffer`] and its sinks, plus the `capture`
//! crate for collecting process output when the `capture` feature is on.

#![cfg_attr(not(feature = "std"), no_std)]

pub use reorder::*;

#[cfg(feature = "capture")]
pub use capture;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CollectSink, DropSink, FnSink, ReorderConfig, ReorderError, Run, SequenceBuffer,
        SequenceFault, Sink, sink,
    };

    #[cfg(feature = "std")]
    pub use crate::{AckChannelSink, ChannelSink};
}
