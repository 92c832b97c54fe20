//! Error types for running a captured command.

use std::io;

use snafu::Snafu;

use crate::Stream;

/// Error from [`Capture::run`](crate::Capture::run).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CaptureError {
    /// The command could not be started.
    #[snafu(display("failed to spawn command"))]
    Spawn {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The child was spawned without a pipe for a stream.
    #[snafu(display("child has no {stream} pipe"))]
    MissingPipe {
        /// Stream without a pipe.
        stream: Stream,
    },

    /// Reading a stream's pipe failed.
    #[snafu(display("failed to read child {stream}"))]
    Read {
        /// Stream being read.
        stream: Stream,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Waiting for the child to exit failed.
    #[snafu(display("failed to wait for child"))]
    Wait {
        /// Underlying I/O error.
        source: io::Error,
    },
}
