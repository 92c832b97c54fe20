use core::error::Error;
use std::format;
use std::io;

use crate::{ReorderError, SequenceFault};

#[test]
fn window_exceeded_display() {
    let err: ReorderError<io::Error> = ReorderError::WindowExceeded {
        seq: 12,
        next_seq: 2,
        max_window: 8,
    };
    assert_eq!(
        format!("{err}"),
        "sequence 12 is 10 past cursor 2, beyond the reorder window of 8"
    );
    assert!(err.source().is_none());
}

#[test]
fn sink_error_is_source() {
    let err = ReorderError::Sink {
        start: 4,
        len: 3,
        source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
    };
    assert_eq!(
        format!("{err}"),
        "sink refused run of 3 starting at 4: pipe closed"
    );
    let source = err.source().unwrap();
    assert_eq!(format!("{source}"), "pipe closed");
}

#[test]
fn fault_is_source_and_display() {
    let err: ReorderError<io::Error> = SequenceFault::Stale { seq: 1, next_seq: 5 }.into();
    assert_eq!(
        format!("{err}"),
        "stale sequence 1: positions below 5 are already delivered"
    );
    assert!(err.source().unwrap().is::<SequenceFault>());
    assert!(err.sink_error().is_none());
}
