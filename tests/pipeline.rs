//! End-to-end: captured output blocks, processed out of order, reassembled
//! through a `SequenceBuffer`.

use std::io::Write;
use std::sync::mpsc;
use std::thread;

use inorder::capture::{Block, Capture};
use inorder::{AckChannelSink, CollectSink, ReorderError, SequenceBuffer};

fn captured() -> Capture {
    let capture = Capture::new();
    let mut out = capture.stdout_writer();
    let mut err = capture.stderr_writer();
    for i in 0..40 {
        if i % 3 == 0 {
            writeln!(err, "warning {i}").unwrap();
        } else {
            write!(out, "line {i}").unwrap();
            writeln!(out).unwrap();
        }
    }
    write!(out, "no newline").unwrap();
    capture.flush();
    capture
}

fn reassemble(runs: impl IntoIterator<Item = Block>) -> Vec<u8> {
    let mut out = Vec::new();
    for block in runs {
        out.extend_from_slice(&block.data);
        if out.last() != Some(&b'\n') {
            out.push(b'\n');
        }
    }
    out
}

/// Deterministic permutation of `0..n`.
fn scrambled(n: u64) -> Vec<u64> {
    let mut order: Vec<u64> = (0..n).collect();
    let mut state = 0x2545_f491_u64;
    for i in (1..order.len()).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        order.swap(i, (state % (i as u64 + 1)) as usize);
    }
    order
}

#[test]
fn shuffled_blocks_reassemble_in_capture_order() {
    let capture = captured();
    let blocks = capture.blocks();
    let n = blocks.len() as u64;

    let mut buf = SequenceBuffer::new(0, CollectSink::new());
    for seq in scrambled(n) {
        buf.add(seq, blocks[seq as usize].clone()).unwrap();
    }

    assert_eq!(buf.next_seq(), n);
    assert!(buf.is_idle());
    let sink = buf.into_sink();
    let mut expected = 0;
    for run in sink.runs() {
        assert_eq!(run.start(), expected);
        expected = run.end();
    }
    assert_eq!(reassemble(sink.into_items()), capture.combined());
}

#[test]
fn bounded_window_refuses_then_accepts_after_progress() {
    let capture = captured();
    let blocks = capture.blocks();
    let n = blocks.len() as u64;

    let mut buf = SequenceBuffer::new(4, CollectSink::new());
    let mut deferred = Vec::new();
    for seq in (0..n).rev() {
        match buf.add(seq, blocks[seq as usize].clone()) {
            Ok(()) => {}
            Err(e) if e.is_window_exceeded() => deferred.push(seq),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert!(buf.window_len() <= 4);

    // retry refused items in ascending order; each either flushes or fits
    deferred.sort_unstable();
    for seq in deferred {
        if seq >= buf.next_seq() {
            buf.add(seq, blocks[seq as usize].clone()).unwrap();
        }
    }
    assert_eq!(buf.next_seq(), n);
    assert_eq!(reassemble(buf.into_sink().into_items()), capture.combined());
}

#[test]
fn workers_feed_acknowledged_consumer() {
    let capture = captured();
    let blocks = capture.blocks();
    let n = blocks.len() as u64;

    let (results_tx, results_rx) = mpsc::channel::<(u64, Block)>();
    let (deliveries_tx, deliveries) = mpsc::channel();
    let sink = AckChannelSink::<Block, String>::new(deliveries_tx);

    let consumer = thread::spawn(move || {
        let mut out = Vec::new();
        let mut next = 0;
        for delivery in deliveries {
            let (run, ack) = delivery.into_parts();
            assert_eq!(run.start(), next);
            next = run.end();
            out.extend(run);
            ack.send(Ok(()));
        }
        out
    });

    thread::scope(|scope| {
        for worker in 0..4u64 {
            let tx = results_tx.clone();
            let blocks = &blocks;
            scope.spawn(move || {
                for seq in scrambled(n).into_iter().filter(|s| s % 4 == worker) {
                    tx.send((seq, blocks[seq as usize].clone())).unwrap();
                }
            });
        }
    });
    drop(results_tx);

    let mut buf = SequenceBuffer::new(0, sink);
    for (seq, block) in results_rx {
        buf.add(seq, block).unwrap();
    }
    assert_eq!(buf.next_seq(), n);
    drop(buf);

    let out = consumer.join().unwrap();
    assert_eq!(reassemble(out), capture.combined());
}

#[test]
fn rejected_run_surfaces_as_sink_error() {
    let (deliveries_tx, deliveries) = mpsc::channel();
    let sink = AckChannelSink::<u32, String>::new(deliveries_tx);
    let consumer = thread::spawn(move || {
        for delivery in deliveries {
            let verdict = if delivery.run().start() == 0 {
                Ok(())
            } else {
                Err("disk full".to_string())
            };
            delivery.ack(verdict);
        }
    });

    let mut buf = SequenceBuffer::new(8, sink);
    buf.add(0, 0).unwrap();
    buf.add(2, 2).unwrap();
    let err = buf.add(1, 1).unwrap_err();
    assert!(matches!(err, ReorderError::Sink { start: 1, len: 2, .. }));
    assert_eq!(buf.next_seq(), 3);

    drop(buf);
    consumer.join().unwrap();
}
