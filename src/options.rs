#[derive(Clone, Debug)]
pub struct Options {
    /// Placeholder text inserted in place of values lost to truncation.
    /// Must not contain `"` or `\`, or the completed output will not parse.
    pub marker: String,
    /// Enable completion logging. Use `complete_to_string_with_log` to
    /// retrieve the entries.
    pub logging: bool,
    /// Context window size used when building log context snippets.
    /// Controls how many bytes are captured on both sides of the position.
    pub log_context_window: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            marker: "~~".to_string(),
            logging: false,
            log_context_window: 10,
        }
    }
}
