//! Bounded reordering buffer.
//!
//! Items arrive tagged with a sequence position, in any order. A
//! [`SequenceBuffer`] holds the ones that arrive early and passes each
//! gap-free [`Run`] to a [`Sink`] the moment it completes, in strictly
//! increasing position order.
//!
//! # Features
//!
//! - `std` (default): channel and mutex sinks, `std` support in dependencies
//! - `serde`: `Serialize`/`Deserialize` for [`ReorderConfig`]
//! - (none): `no_std` + `alloc`

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod buffer;
mod builder;
mod error;
mod slot;

#[cfg(test)]
mod tests;

pub use buffer::SequenceBuffer;
pub use builder::{DEFAULT_MAX_WINDOW, ReorderConfig, SequenceBufferBuilder, UNBOUNDED};
pub use error::{ReorderError, SequenceFault};
pub use slot::{Slot, grow};

pub use runsink::{CollectSink, DropSink, FnSink, Run, Sink, sink};
#[cfg(feature = "std")]
pub use runsink::{Ack, AckChannelSink, AckError, ChannelSink, Delivery, MutexSinkError};
