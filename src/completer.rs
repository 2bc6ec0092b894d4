use crate::options::Options;
use crate::scanner::Frame;
use memchr::{memrchr, memrchr2};

/// One patch applied while completing a truncated input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompletionLogEntry {
    /// Byte position in the original input the patch applies at.
    pub position: usize,
    pub message: &'static str,
    /// Snippet of the input around `position`.
    pub context: String,
}

#[derive(Default)]
pub(crate) struct Logger {
    enable: bool,
    window: usize,
    entries: Vec<CompletionLogEntry>,
}

impl Logger {
    pub(crate) fn new(opts: &Options) -> Self {
        Self {
            enable: opts.logging,
            window: opts.log_context_window,
            entries: Vec::new(),
        }
    }

    pub(crate) fn disabled() -> Self {
        Self::default()
    }

    pub(crate) fn into_entries(self) -> Vec<CompletionLogEntry> {
        self.entries
    }

    #[inline]
    fn log(&mut self, input: &str, position: usize, message: &'static str) {
        if self.enable {
            self.entries.push(CompletionLogEntry {
                position,
                message,
                context: snippet(input, position, self.window),
            });
        }
    }
}

/// Window of `win` bytes on each side of `pos`, widened to char boundaries.
fn snippet(s: &str, pos: usize, win: usize) -> String {
    let pos = pos.min(s.len());
    let mut start = pos.saturating_sub(win);
    while start > 0 && !s.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (pos + win).min(s.len());
    while end < s.len() && !s.is_char_boundary(end) {
        end += 1;
    }
    s[start..end].to_string()
}

/// Patch the in-flight token at the tail of `input` and close every still-open
/// container, innermost first. An empty stack means the input had no open
/// containers and is returned unchanged.
///
/// `stack` must be the scanner's output for `input`; the backward delimiter
/// scans below rely on the scanner invariant that an `ObjectValue`/`ArrayValue`
/// top never leaves an unterminated string literal in the trailing fragment.
pub(crate) fn complete(
    input: &str,
    stack: &[Frame],
    opts: &Options,
    log: &mut Logger,
) -> String {
    let Some(&last) = stack.last() else {
        return input.to_string();
    };

    let marker = opts.marker.as_str();
    let mut out = String::with_capacity(input.len() + 4 * marker.len() + stack.len() + 8);
    out.push_str(input);
    patch_tail(&mut out, input, last, marker, log);

    let before_closers = out.len();
    for frame in stack.iter().rev() {
        match frame {
            Frame::Object => out.push('}'),
            Frame::Array => out.push(']'),
            _ => {}
        }
    }
    if out.len() > before_closers {
        log.log(input, input.len(), "closed open containers");
    }
    out
}

fn patch_tail(out: &mut String, input: &str, last: Frame, marker: &str, log: &mut Logger) {
    let end = input.len();
    match last {
        Frame::Object => {
            push_pair(out, marker);
            log.log(input, end, "inserted placeholder pair into open object");
        }
        Frame::ObjectKey => {
            out.push(':');
            push_value(out, marker);
            log.log(input, end, "inserted placeholder value after key");
        }
        Frame::ObjectKeyString => {
            out.push_str(marker);
            out.push_str("\":");
            push_value(out, marker);
            log.log(input, end, "closed unterminated key string");
        }
        Frame::ObjectValue => match memrchr(b':', out.as_bytes()) {
            Some(colon) => {
                if is_keyword(&out[colon + 1..]) {
                    out.push(',');
                    push_pair(out, marker);
                    log.log(input, end, "kept literal, appended placeholder pair");
                } else {
                    out.truncate(colon + 1);
                    push_value(out, marker);
                    log.log(input, colon + 1, "replaced partial value with placeholder");
                }
            }
            // Unreachable for scanner-produced stacks; stay total.
            None => push_value(out, marker),
        },
        Frame::ObjectValueString => {
            out.push_str(marker);
            out.push('"');
            log.log(input, end, "closed unterminated string value");
        }
        Frame::ObjectValueDone => {
            out.push(',');
            push_pair(out, marker);
            log.log(input, end, "appended placeholder pair after completed pair");
        }
        Frame::Array => {
            push_value(out, marker);
            log.log(input, end, "inserted placeholder element into open array");
        }
        Frame::ArrayValue => match memrchr2(b',', b'[', out.as_bytes()) {
            Some(delim) => {
                if is_keyword(&out[delim + 1..]) {
                    out.push(',');
                    push_value(out, marker);
                    log.log(input, end, "kept literal, appended placeholder element");
                } else {
                    out.truncate(delim + 1);
                    push_value(out, marker);
                    log.log(input, delim + 1, "replaced partial element with placeholder");
                }
            }
            None => push_value(out, marker),
        },
        Frame::ArrayValueString => {
            out.push_str(marker);
            out.push('"');
            log.log(input, end, "closed unterminated string element");
        }
        Frame::ArrayValueDone => {
            out.push(',');
            push_value(out, marker);
            log.log(input, end, "appended placeholder element after completed element");
        }
    }
}

/// Only the three JSON keyword literals survive truncation verbatim. Partial
/// numbers are discarded rather than validated against the number grammar.
#[inline]
fn is_keyword(fragment: &str) -> bool {
    matches!(fragment.trim(), "true" | "false" | "null")
}

#[inline]
fn push_value(out: &mut String, marker: &str) {
    out.push('"');
    out.push_str(marker);
    out.push('"');
}

#[inline]
fn push_pair(out: &mut String, marker: &str) {
    push_value(out, marker);
    out.push(':');
    push_value(out, marker);
}
