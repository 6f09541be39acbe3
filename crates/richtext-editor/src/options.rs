//! Configuration options for tree conversion

/// Options for converting an editing-surface tree to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Keep bold/italic/underline/strike flags on the text inside a link.
    /// When off, a link's text is always emitted as a plain run.
    pub link_marks: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { link_marks: true }
    }
}

impl ConvertOptions {
    pub fn with_link_marks(mut self, keep: bool) -> Self {
        self.link_marks = keep;
        self
    }
}
