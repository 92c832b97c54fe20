//! Print a command's output line by line, marking the stream of each line.
//!
//! Run with: cargo run -p capture --example prefixed

use std::process::Command;

use capture::{Capture, Stream};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (capture, status) = Capture::run(Command::new("sh").args([
        "-c",
        "echo stdout1 && sleep 1 && echo stderr1 >&2 && echo stdout2 && echo stderr2 >&2",
    ]))?;

    // "-" for stdout lines, "!" for stderr lines
    for block in capture.blocks() {
        let prefix = match block.stream {
            Stream::Stdout => "-",
            Stream::Stderr => "!",
        };
        for line in block.lines() {
            println!("{prefix} {}", String::from_utf8_lossy(line));
        }
    }
    println!("exit: {status}");
    Ok(())
}
