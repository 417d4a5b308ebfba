//! Knobs for the CommonMark parts of the output.
//!
//! The dialect extensions (styled spans, image attribute blocks, task items,
//! underline) have a fixed shape and are not configurable.

/// Rendering options shared by all rules of a [`super::Converter`].
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownOptions {
    /// Marker used for unordered list items.
    pub bullet_marker: char,
    pub strong_delimiter: String,
    pub em_delimiter: String,
    /// Opening fence for code blocks; its first character is the fence
    /// character and its length the minimum fence size.
    pub fence: String,
    /// Horizontal rule line.
    pub hr: String,
    /// Emitted before the newline of a hard break.
    pub line_break: String,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            bullet_marker: '-',
            strong_delimiter: "**".to_string(),
            em_delimiter: "_".to_string(),
            fence: "```".to_string(),
            hr: "* * *".to_string(),
            line_break: "  ".to_string(),
        }
    }
}

impl MarkdownOptions {
    pub(crate) fn fence_char(&self) -> char {
        self.fence.chars().next().unwrap_or('`')
    }

    pub(crate) fn fence_size(&self) -> usize {
        self.fence.chars().count().max(3)
    }
}
