//! Character-indexed view of a text with precomputed categories.

use crate::domain::category::{Category, Classifier};
use crate::domain::span::Span;

/// Text split into characters, each paired with its category.
///
/// Offsets everywhere in the pipeline are character offsets into this buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
    categories: Vec<Category>,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self::with_classifier(text, &Classifier::default())
    }

    pub fn with_classifier(text: &str, classifier: &Classifier) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let categories = chars.iter().map(|ch| classifier.classify(*ch)).collect();
        Self { chars, categories }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn category(&self, pos: usize) -> Option<Category> {
        self.categories.get(pos).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Text covered by `span`, `None` when the span reaches past the end.
    pub fn slice(&self, span: Span) -> Option<String> {
        self.chars
            .get(span.location..span.end())
            .map(|chars| chars.iter().collect())
    }

    /// Text in `[start, end)` with both bounds clamped to the buffer.
    pub fn slice_clamped(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Character offset of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<Span> {
        let needle: Vec<char> = needle.chars().collect();
        if needle.is_empty() || needle.len() > self.len() {
            return None;
        }
        self.chars
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
            .map(|location| Span::new(location, needle.len()))
    }
}
