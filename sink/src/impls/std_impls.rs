use std::sync::mpsc;

use crate::{Run, Sink};

/// Forwards runs into an unbounded channel.
///
/// The send completes as soon as the run is queued; the receiver's
/// processing is not awaited. Use [`AckChannelSink`] when the producer must
/// learn the outcome.
#[derive(Debug, Clone)]
pub struct ChannelSink<T> {
    sender: mpsc::Sender<Run<T>>,
}

impl<T> ChannelSink<T> {
    /// Create a new channel sink from a sender.
    pub fn new(sender: mpsc::Sender<Run<T>>) -> Self {
        Self { sender }
    }

    /// Get a reference to the underlying sender.
    pub fn sender(&self) -> &mpsc::Sender<Run<T>> {
        &self.sender
    }

    /// Consume the sink and return the sender.
    pub fn into_sender(self) -> mpsc::Sender<Run<T>> {
        self.sender
    }
}

impl<T> Sink<T> for ChannelSink<T> {
    type Error = mpsc::SendError<Run<T>>;

    #[inline]
    fn send(&mut self, run: Run<T>) -> Result<(), Self::Error> {
        self.sender.send(run)
    }
}

/// A run in flight to the receiving side of an [`AckChannelSink`].
///
/// The receiver must answer with [`ack`](Self::ack) (or through the
/// [`Ack`] half from [`into_parts`](Self::into_parts)). Dropping it
/// unanswered fails the sender with [`AckError::Unacknowledged`].
#[derive(Debug)]
pub struct Delivery<T, E> {
    run: Run<T>,
    reply: Ack<E>,
}

impl<T, E> Delivery<T, E> {
    /// The delivered run.
    pub fn run(&self) -> &Run<T> {
        &self.run
    }

    /// Answer the sender.
    pub fn ack(self, result: Result<(), E>) {
        self.reply.send(result);
    }

    /// Split into the run and the reply handle.
    pub fn into_parts(self) -> (Run<T>, Ack<E>) {
        (self.run, self.reply)
    }
}

/// Reply handle for a [`Delivery`].
#[derive(Debug)]
pub struct Ack<E> {
    reply: mpsc::SyncSender<Result<(), E>>,
}

impl<E> Ack<E> {
    /// Report the outcome of processing the run.
    pub fn send(self, result: Result<(), E>) {
        // The sender blocks on this reply; it only disappears if its thread died.
        let _ = self.reply.send(result);
    }
}

/// Channel sink that waits for the receiver to acknowledge each run.
///
/// `send()` blocks until the receiving side answers the [`Delivery`], so the
/// receiver's verdict becomes the result of the send.
///
/// # Example
///
/// ```
/// use std::sync::mpsc;
/// use std::thread;
/// use runsink::{AckChannelSink, Run, Sink};
///
/// let (tx, rx) = mpsc::channel();
/// let mut sink = AckChannelSink::<u32, &str>::new(tx);
///
/// let worker = thread::spawn(move || {
///     for delivery in rx {
///         let ok = delivery.run().start() == 0;
///         delivery.ack(if ok { Ok(()) } else { Err("late") });
///     }
/// });
///
/// assert!(sink.send(Run::new(0, vec![1, 2])).is_ok());
/// assert!(sink.send(Run::new(2, vec![3])).is_err());
/// drop(sink);
/// worker.join().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AckChannelSink<T, E> {
    sender: mpsc::Sender<Delivery<T, E>>,
}

impl<T, E> AckChannelSink<T, E> {
    /// Create a new acknowledging sink from a sender.
    pub fn new(sender: mpsc::Sender<Delivery<T, E>>) -> Self {
        Self { sender }
    }

    /// Consume the sink and return the sender.
    pub fn into_sender(self) -> mpsc::Sender<Delivery<T, E>> {
        self.sender
    }
}

impl<T, E> Sink<T> for AckChannelSink<T, E> {
    type Error = AckError<E>;

    fn send(&mut self, run: Run<T>) -> Result<(), Self::Error> {
        let (reply, answer) = mpsc::sync_channel(1);
        self.sender
            .send(Delivery {
                run,
                reply: Ack { reply },
            })
            .map_err(|_| AckError::Disconnected)?;
        match answer.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(AckError::Rejected(e)),
            Err(_) => Err(AckError::Unacknowledged),
        }
    }
}

/// Error from an [`AckChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AckError<E> {
    /// The receiving side of the channel is gone.
    Disconnected,
    /// The delivery was dropped without an answer.
    Unacknowledged,
    /// The receiver refused the run.
    Rejected(E),
}

impl<E: core::fmt::Display> core::fmt::Display for AckError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "receiver disconnected"),
            Self::Unacknowledged => write!(f, "delivery dropped without acknowledgement"),
            Self::Rejected(e) => write!(f, "run rejected: {e}"),
        }
    }
}

impl<E: core::fmt::Debug + core::fmt::Display> core::error::Error for AckError<E> {}

/// Error from an `Arc<Mutex<S>>` sink.
///
/// Wraps either the inner sink's error or a mutex poison error.
#[derive(Debug)]
pub enum MutexSinkError<E> {
    /// The inner sink returned an error.
    Sink(E),
    /// The mutex was poisoned by a panicked thread.
    Poisoned,
}

impl<E: core::fmt::Display> core::fmt::Display for MutexSinkError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Sink(e) => write!(f, "{e}"),
            Self::Poisoned => write!(f, "mutex poisoned"),
        }
    }
}

impl<E: core::fmt::Debug + core::fmt::Display> core::error::Error for MutexSinkError<E> {}

/// Shared sink behind an external lock.
///
/// Several sequence buffers (or other producers) can hand runs to one
/// consumer; each `send` holds the lock for the duration of the inner call.
impl<T, S: Sink<T>> Sink<T> for std::sync::Arc<std::sync::Mutex<S>> {
    type Error = MutexSinkError<S::Error>;

    #[inline]
    fn send(&mut self, run: Run<T>) -> Result<(), Self::Error> {
        self.lock()
            .map_err(|_| MutexSinkError::Poisoned)?
            .send(run)
            .map_err(MutexSinkError::Sink)
    }
}
