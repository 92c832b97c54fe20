//! Line-buffered capture of stdout and stderr.
//!
//! A [`Capture`] hands out one [`LineWriter`] per stream. Each writer holds
//! back text until it sees a newline, then publishes everything up to the
//! last newline as one [`Block`]. Blocks from both streams land in a single
//! list in the order they completed, so the interleaving of a child
//! process's output survives approximately.

#![warn(missing_docs)]

mod block;
mod capture;
mod error;


pub use block::{Block, Stream};
pub use capture::{Capture, LineWriter};
pub use error::CaptureError;
