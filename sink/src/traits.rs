use alloc::boxed::Box;

use crate::Run;

/// Consumes contiguous runs.
pub trait Sink<T> {
    /// The error type returned when a run is refused.
    type Error;

    /// Consume one run.
    ///
    /// Called synchronously by the producer of the run. The result goes
    /// straight back to that producer; the run is not offered again.
    ///
    /// # Errors
    /// Returns an error if the run could not be consumed.
    fn send(&mut self, run: Run<T>) -> Result<(), Self::Error>;
}

impl<T, S: Sink<T> + ?Sized> Sink<T> for &mut S {
    type Error = S::Error;

    #[inline]
    fn send(&mut self, run: Run<T>) -> Result<(), Self::Error> {
        (**self).send(run)
    }
}

impl<T, S: Sink<T> + ?Sized> Sink<T> for Box<S> {
    type Error = S::Error;

    #[inline]
    fn send(&mut self, run: Run<T>) -> Result<(), Self::Error> {
        (**self).send(run)
    }
}
