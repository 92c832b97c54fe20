use std::io::{self, Write};
use std::mem;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use snafu::{OptionExt, ResultExt};

use crate::error::{MissingPipeSnafu, ReadSnafu, SpawnSnafu, WaitSnafu};
use crate::{Block, CaptureError, Stream};

/// Collects stdout and stderr text as ordered [`Block`]s.
///
/// Cloning yields another handle to the same capture.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use capture::Capture;
///
/// let capture = Capture::new();
/// let mut out = capture.stdout_writer();
/// let mut err = capture.stderr_writer();
///
/// write!(out, "one\ntw").unwrap();
/// write!(err, "oops\n").unwrap();
/// write!(out, "o\n").unwrap();
///
/// assert_eq!(capture.combined(), b"one\noops\ntwo\n");
/// assert_eq!(capture.stdout(), b"one\ntwo\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Capture {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    blocks: Mutex<Vec<Block>>,
    stdout: Mutex<Vec<u8>>,
    stderr: Mutex<Vec<u8>>,
}

impl Shared {
    fn pending(&self, stream: Stream) -> MutexGuard<'_, Vec<u8>> {
        match stream {
            Stream::Stdout => lock(&self.stdout),
            Stream::Stderr => lock(&self.stderr),
        }
    }

    fn push(&self, block: Block) {
        lock(&self.blocks).push(block);
    }

    fn flush(&self, stream: Stream) {
        let mut pending = self.pending(stream);
        if !pending.is_empty() {
            let data = mem::take(&mut *pending);
            self.push(Block {
                stream,
                data,
                partial: true,
            });
        }
    }
}

// Writers never panic while holding a lock, but a poisoned capture is still
// readable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Capture {
    /// Create an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `cmd` to completion with both streams captured.
    ///
    /// Stdout and stderr are replaced with pipes and drained on their own
    /// threads. Partial lines are flushed once the child exits.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError`] if the child cannot be spawned, a pipe cannot
    /// be read, or waiting for the child fails. A non-zero exit is not an
    /// error; inspect the returned [`ExitStatus`].
    pub fn run(cmd: &mut Command) -> Result<(Self, ExitStatus), CaptureError> {
        let mut child = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context(SpawnSnafu)?;
        tracing::debug!(pid = child.id(), "spawned captured command");

        let capture = Self::new();
        if let Err(e) = capture.drain(&mut child) {
            reap(&mut child);
            return Err(e);
        }

        let status = child.wait().context(WaitSnafu)?;
        capture.flush();
        tracing::debug!(%status, blocks = capture.len(), "captured command exited");
        Ok((capture, status))
    }

    // Copies both pipes into this capture until the child closes them.
    pub(crate) fn drain(&self, child: &mut Child) -> Result<(), CaptureError> {
        let mut stdout = child.stdout.take().context(MissingPipeSnafu {
            stream: Stream::Stdout,
        })?;
        let mut stderr = child.stderr.take().context(MissingPipeSnafu {
            stream: Stream::Stderr,
        })?;

        let (out, err) = thread::scope(|scope| {
            let mut out_writer = self.stdout_writer();
            let mut err_writer = self.stderr_writer();
            let out = scope.spawn(move || io::copy(&mut stdout, &mut out_writer));
            let err = scope.spawn(move || io::copy(&mut stderr, &mut err_writer));
            (join(out), join(err))
        });
        out.context(ReadSnafu {
            stream: Stream::Stdout,
        })?;
        err.context(ReadSnafu {
            stream: Stream::Stderr,
        })?;
        Ok(())
    }

    /// Writer that captures stdout text.
    pub fn stdout_writer(&self) -> LineWriter {
        self.writer(Stream::Stdout)
    }

    /// Writer that captures stderr text.
    pub fn stderr_writer(&self) -> LineWriter {
        self.writer(Stream::Stderr)
    }

    /// Writer that captures text for `stream`.
    pub fn writer(&self, stream: Stream) -> LineWriter {
        LineWriter {
            stream,
            shared: Arc::clone(&self.shared),
        }
    }

    /// All text written to stdout so far.
    ///
    /// Partial lines are excluded until [`flush`](Self::flush) is called.
    pub fn stdout(&self) -> Vec<u8> {
        self.stream_data(Stream::Stdout)
    }

    /// All text written to stderr so far.
    ///
    /// Partial lines are excluded until [`flush`](Self::flush) is called.
    pub fn stderr(&self) -> Vec<u8> {
        self.stream_data(Stream::Stderr)
    }

    /// Text from both streams in completion order.
    ///
    /// A newline is added after any partial block so flushed fragments
    /// from different streams never run together.
    pub fn combined(&self) -> Vec<u8> {
        let blocks = lock(&self.shared.blocks);
        let mut result = Vec::new();
        for block in blocks.iter() {
            result.extend_from_slice(&block.data);
            if result.last() != Some(&b'\n') {
                result.push(b'\n');
            }
        }
        result
    }

    /// Snapshot of every block completed so far.
    pub fn blocks(&self) -> Vec<Block> {
        lock(&self.shared.blocks).clone()
    }

    /// Number of blocks completed so far.
    pub fn len(&self) -> usize {
        lock(&self.shared.blocks).len()
    }

    /// Whether no block has completed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Publish any partial lines as partial blocks, stdout first.
    pub fn flush(&self) {
        self.shared.flush(Stream::Stdout);
        self.shared.flush(Stream::Stderr);
    }

    fn stream_data(&self, stream: Stream) -> Vec<u8> {
        lock(&self.shared.blocks)
            .iter()
            .filter(|block| block.stream == stream)
            .flat_map(|block| block.data.iter().copied())
            .collect()
    }
}

// Kill and collect a child whose output can no longer be read.
pub(crate) fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!(pid = child.id(), error = %e, "kill after capture failure");
    }
    let _ = child.wait();
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}

/// Line-buffered [`Write`] for one stream of a [`Capture`].
///
/// Safe to share between threads through clones; each stream's buffer has
/// its own lock. [`Write::flush`] does not publish partial lines; use
/// [`Capture::flush`].
#[derive(Debug, Clone)]
pub struct LineWriter {
    stream: Stream,
    shared: Arc<Shared>,
}

impl LineWriter {
    /// Stream this writer feeds.
    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut pending = self.shared.pending(self.stream);
        pending.extend_from_slice(buf);
        if let Some(last_newline) = pending.iter().rposition(|&b| b == b'\n') {
            let rest = pending.split_off(last_newline + 1);
            let data = mem::replace(&mut *pending, rest);
            self.shared.push(Block {
                stream: self.stream,
                data,
                partial: false,
            });
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
