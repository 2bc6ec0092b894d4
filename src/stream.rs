use crate::completer::{self, Logger};
use crate::options::Options;
use crate::scanner::{self, Frame};

/// Incremental completer for payloads that arrive in chunks.
///
/// Each `push` appends the chunk to an internal buffer and advances the
/// scanner over only the new bytes, keeping the frame stack between calls, so
/// feeding n chunks scans the input once. Snapshots re-run only the
/// completion step over the buffered text.
pub struct StreamCompleter {
    opts: Options,
    buf: String,
    scan_pos: usize,
    stack: Vec<Frame>,
}

impl StreamCompleter {
    pub fn new(opts: Options) -> Self {
        Self {
            opts,
            buf: String::new(),
            scan_pos: 0,
            stack: Vec::new(),
        }
    }

    /// Append a chunk and return the completion of everything buffered so far.
    pub fn push(&mut self, chunk: &str) -> String {
        self.buf.push_str(chunk);
        scanner::scan_into(&self.buf, self.scan_pos, &mut self.stack);
        self.scan_pos = self.buf.len();
        self.snapshot()
    }

    /// Completion of the current buffer, without consuming it.
    pub fn snapshot(&self) -> String {
        completer::complete(&self.buf, &self.stack, &self.opts, &mut Logger::disabled())
    }

    /// The raw text buffered so far.
    pub fn buffered(&self) -> &str {
        &self.buf
    }

    /// Consume the completer, yielding the raw buffer.
    pub fn into_inner(self) -> String {
        self.buf
    }
}
