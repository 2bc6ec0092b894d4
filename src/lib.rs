pub mod cli;
mod completer;
pub mod error;
pub mod options;
mod scanner;
pub mod stream;

pub use completer::CompletionLogEntry;
pub use error::CompleteError;
pub use options::Options;
pub use stream::StreamCompleter;

use completer::Logger;
use std::io::Write;

/// Complete a truncated JSON string into a syntactically valid one, using the
/// default options: the cut-off token is patched with the `"~~"` placeholder
/// and every still-open container is closed.
///
/// Total and pure: any input yields an output, and input with no open
/// containers is returned unchanged. The result is best effort — callers that
/// need a guarantee should parse it (or use `complete_to_value`).
pub fn complete_json(input: &str) -> String {
    complete_to_string(input, &Options::default())
}

/// Complete a truncated JSON string with explicit options.
pub fn complete_to_string(input: &str, opts: &Options) -> String {
    let stack = scanner::scan(input);
    completer::complete(input, &stack, opts, &mut Logger::disabled())
}

/// Complete a truncated JSON string and return both the result and a log of
/// the patches applied. The log is empty unless `opts.logging` is set.
pub fn complete_to_string_with_log(
    input: &str,
    opts: &Options,
) -> (String, Vec<CompletionLogEntry>) {
    let stack = scanner::scan(input);
    let mut log = Logger::new(opts);
    let out = completer::complete(input, &stack, opts, &mut log);
    (out, log.into_entries())
}

/// Complete a truncated JSON string and write the result into an `io::Write`.
pub fn complete_to_writer<W: Write>(
    input: &str,
    opts: &Options,
    writer: &mut W,
) -> Result<(), CompleteError> {
    let s = complete_to_string(input, opts);
    writer.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(feature = "serde")]
/// Complete and then parse into `serde_json::Value`.
///
/// This is the one entry point that detects residual invalidity: completion
/// cannot fix every malformed input, and here a leftover parse failure
/// surfaces as `CompleteError::StillInvalid` instead of silently passing
/// through.
pub fn complete_to_value(
    input: &str,
    opts: &Options,
) -> Result<serde_json::Value, CompleteError> {
    let s = complete_to_string(input, opts);
    let v = serde_json::from_str(&s)?;
    Ok(v)
}

#[cfg(test)]
mod tests;
