#[derive(Clone, Debug)]
pub struct Options {
    /// Wrap paths and number/boolean values in ANSI color sequences.
    /// Purely cosmetic: the tab separator, string/null values and the
    /// returned pagination signals are never affected.
    pub colorize: bool,
    /// Read buffer capacity for the tokenizer, in bytes.
    pub read_buffer: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            colorize: false,
            read_buffer: 64 * 1024,
        }
    }
}
