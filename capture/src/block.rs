use core::fmt;

/// Which output stream a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// A chunk of text written to one stream.
///
/// Ends with a newline (and may span several lines) unless `partial` is set,
/// which only happens for text collected by [`Capture::flush`].
///
/// [`Capture::flush`]: crate::Capture::flush
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Source stream.
    pub stream: Stream,
    /// Raw bytes, newline included.
    pub data: Vec<u8>,
    /// Set when the text had no terminating newline.
    pub partial: bool,
}

impl Block {
    /// Lines of the block without their newline terminators.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data
            .split_inclusive(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\n").unwrap_or(line))
    }
}
