//! Consumers for contiguous runs of sequenced items.
//!
//! A [`Sink`] receives each [`Run`] synchronously and reports success or
//! failure back to whoever produced the run. Nothing here buffers or retries.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod impls;
mod run;
mod traits;

#[cfg(test)]
mod tests;

pub use impls::*;
pub use run::Run;
pub use traits::Sink;
