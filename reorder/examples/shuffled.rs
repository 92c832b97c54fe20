//! Shuffled positions flushed as contiguous runs.
//!
//! Run with: cargo run -p reorder --example shuffled

use std::convert::Infallible;

use reorder::{FnSink, SequenceBuffer};

fn main() {
    let values: [u64; 20] = [8, 2, 18, 0, 5, 7, 1, 16, 13, 4, 9, 12, 14, 10, 19, 11, 6, 3, 17, 15];
    println!("Source values: {values:?}");

    let sink = FnSink::new(|start: u64, items: Vec<u64>| {
        println!("Write start={start}  items={items:?}");
        Ok::<(), Infallible>(())
    });
    // Zero window: unbounded, every arrival fits.
    let mut buf = SequenceBuffer::new(0, sink);

    // The position doubles as the item here; any payload works.
    for n in values {
        if let Err(err) = buf.add(n, n) {
            eprintln!("add failed: {err}");
        }
    }
}
