//! Options controlling how softmap source text is read.

/// Columns a tabulator advances the column counter by, unless configured otherwise.
pub const DEFAULT_TAB_WIDTH: u32 = 4;

/// Configuration for lexing and parsing a softmap document.
///
/// The defaults read the whole text starting at line 1, column 1. A window and a start
/// position are useful when the softmap text is embedded in a larger file and diagnostics
/// should point into that file.
///
/// # Example
///
/// ```rust
/// use softmap::source::ParseOptions;
///
/// // Parse only codepoints 10..200 of a larger file, which start on line 4, column 1
/// let options = ParseOptions::new().with_window(10, 200).with_start(4, 1);
/// assert_eq!(options.start_line, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// `[start, end)` codepoint window of the text to read. `None` reads everything.
    pub window: Option<(usize, usize)>,
    /// Line number assigned to the first codepoint of the window.
    pub start_line: u32,
    /// Column number assigned to the first codepoint of the window.
    pub start_column: u32,
    /// Columns a tabulator advances the column counter by.
    pub tab_width: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            window: None,
            start_line: 1,
            start_column: 1,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl ParseOptions {
    /// Creates options that read the whole text from line 1, column 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts reading to the `[start, end)` codepoint window.
    #[must_use]
    pub fn with_window(mut self, start: usize, end: usize) -> Self {
        self.window = Some((start, end));
        self
    }

    /// Sets the line and column assigned to the first codepoint read.
    #[must_use]
    pub fn with_start(mut self, line: u32, column: u32) -> Self {
        self.start_line = line;
        self.start_column = column;
        self
    }

    /// Sets the tabulator width.
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: u32) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Resolves the codepoint window into a byte range of `source`.
    ///
    /// Bounds past the end of the text are clamped, as is a start past the end.
    #[must_use]
    pub fn byte_range(&self, source: &str) -> (usize, usize) {
        let Some((start, end)) = self.window else {
            return (0, source.len());
        };

        let byte_of = |codepoint: usize| {
            source
                .char_indices()
                .nth(codepoint)
                .map_or(source.len(), |(offset, _)| offset)
        };

        let end = byte_of(end);
        (byte_of(start).min(end), end)
    }
}
