extern crate std;



use alloc::boxed::Box;
use core::convert::Infallible;
use std::{vec, vec::Vec};

use crate::{CollectSink, DropSink, FnSink, Run, Sink, sink};

#[test]
fn drop_sink_accepts_runs() {
    let mut s = DropSink;
    assert!(s.send(Run::new(0, vec![1, 2, 3])).is_ok());
    assert!(s.send(Run::new(3, vec![4])).is_ok());
}

#[test]
fn collect_sink_records_runs_in_order() {
    let mut s = CollectSink::new();
    let _ = s.send(Run::new(0, vec!["a"]));
    let _ = s.send(Run::new(1, vec!["b", "c"]));

    assert_eq!(s.calls(), 2);
    assert_eq!(s.runs()[0], Run::new(0, vec!["a"]));
    assert_eq!(s.runs()[1].start(), 1);
    assert_eq!(s.items().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn collect_sink_take_resets() {
    let mut s = CollectSink::new();
    let _ = s.send(Run::new(0, vec![1]));
    let taken = s.take();
    assert_eq!(taken.len(), 1);
    assert_eq!(s.calls(), 0);

    let _ = s.send(Run::new(1, vec![2, 3]));
    assert_eq!(s.into_items(), vec![2, 3]);
}

#[test]
fn fn_sink_receives_start_and_items() {
    let mut seen = Vec::new();
    {
        let mut s = FnSink::new(|start: u64, items: Vec<i32>| {
            seen.push((start, items));
            Ok::<(), Infallible>(())
        });
        let _ = s.send(Run::new(0, vec![1]));
        let _ = s.send(Run::new(1, vec![2, 3]));
    }
    assert_eq!(seen, vec![(0, vec![1]), (1, vec![2, 3])]);
}

#[test]
fn fn_sink_propagates_error() {
    let mut s = sink(|start: u64, _items: Vec<u8>| {
        if start == 0 { Err("refused") } else { Ok(()) }
    });
    assert_eq!(s.send(Run::new(0, vec![1])), Err("refused"));
    assert_eq!(s.send(Run::new(1, vec![2])), Ok(()));
}

#[test]
fn mut_ref_sink_forwards() {
    fn deliver<S: Sink<i32>>(mut s: S) {
        let _ = s.send(Run::new(0, vec![7]));
    }

    let mut inner = CollectSink::new();
    deliver(&mut inner);
    deliver(&mut inner);
    assert_eq!(inner.calls(), 2);
    assert_eq!(inner.into_items(), vec![7, 7]);
}

#[test]
fn boxed_sink_forwards() {
    let mut boxed: Box<dyn Sink<u32, Error = Infallible>> = Box::new(DropSink);
    assert!(boxed.send(Run::new(0, vec![1])).is_ok());

    let mut collect = Box::new(CollectSink::new());
    let _ = collect.send(Run::new(5, vec![1, 2]));
    assert_eq!(collect.runs()[0].end(), 7);
}
