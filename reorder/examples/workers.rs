//! Worker threads finish out of order; one owner restores the order.
//!
//! Producers never touch the buffer. They send `(seq, result)` over a
//! channel and the receiving thread is the single writer calling `add`.
//!
//! Run with: RUST_LOG=trace cargo run -p reorder --example workers

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reorder::{ChannelSink, Run, SequenceBuffer};

const WORKERS: u64 = 4;
const JOBS: u64 = 24;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .without_time()
        .init();

    let (results_tx, results_rx) = mpsc::channel::<(u64, u64)>();
    let (runs_tx, runs_rx) = mpsc::channel::<Run<u64>>();

    let workers: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let tx = results_tx.clone();
            thread::spawn(move || {
                for job in (worker..JOBS).step_by(WORKERS as usize) {
                    // uneven work so completions interleave
                    thread::sleep(Duration::from_millis((JOBS - job) % 5));
                    tx.send((job, job * job)).expect("collector hung up");
                }
            })
        })
        .collect();
    drop(results_tx);

    let collector = thread::spawn(move || {
        let mut buf = SequenceBuffer::new(JOBS as usize, ChannelSink::new(runs_tx));
        for (seq, square) in results_rx {
            if let Err(err) = buf.add(seq, square) {
                tracing::warn!("dropping result {seq}: {err}");
            }
        }
        let stranded = buf.drain_pending();
        if !stranded.is_empty() {
            tracing::warn!("{} results never became contiguous", stranded.len());
        }
    });

    for run in runs_rx {
        println!("positions {}..{}: {:?}", run.start(), run.end(), run.items());
    }

    for worker in workers {
        worker.join().expect("worker panicked");
    }
    collector.join().expect("collector panicked");
}
