//! Locating text that has the same shape as a delimiter pattern.

use crate::app::buffer::TextBuffer;
use crate::app::pattern::DelimiterPattern;
use crate::domain::category::{Category, absorbs};
use crate::domain::span::Span;

/// Find the first substring at or after `start` whose categories follow `pattern`.
///
/// An empty pattern matches the zero-width span at `start`. Runs are consumed greedily with the
/// same absorption rules used to build patterns. When the text ends while only whitespace or
/// newline categories remain unmatched, the match is accepted up to the end of the text.
pub fn find_match(buffer: &TextBuffer, start: usize, pattern: &DelimiterPattern) -> Option<Span> {
    let required = pattern.categories();
    if required.is_empty() {
        return Some(Span::new(start, 0));
    }

    (start..buffer.len()).find_map(|candidate| probe(buffer, candidate, required))
}

/// Convenience wrapper classifying `text` with the default tables.
pub fn find_delimiter_match(text: &str, start: usize, pattern: &DelimiterPattern) -> Option<Span> {
    find_match(&TextBuffer::new(text), start, pattern)
}

fn probe(buffer: &TextBuffer, candidate: usize, required: &[Category]) -> Option<Span> {
    let len = buffer.len();
    let mut pos = candidate;
    let mut satisfied = 0;

    while satisfied < required.len() && pos < len {
        let needed = required[satisfied];

        while pos > candidate && pos < len && skips_exception(buffer, pos) {
            pos += 1;
        }
        if pos >= len {
            break;
        }

        if buffer.category(pos) != Some(needed) {
            return None;
        }
        pos += 1;

        let mut last_valid = needed;
        while let Some(category) = buffer.category(pos) {
            if category == needed {
                last_valid = category;
            } else if !absorbs(last_valid, category) {
                break;
            }
            pos += 1;
        }

        satisfied += 1;
    }

    let complete = satisfied == required.len()
        || (pos >= len && required[satisfied..].iter().all(Category::is_optional_at_end));

    complete.then(|| Span::from_bounds(candidate, pos))
}

/// Whether the character at `pos` folds into the run of the character before it.
fn skips_exception(buffer: &TextBuffer, pos: usize) -> bool {
    match (buffer.category(pos - 1), buffer.category(pos)) {
        (Some(prev), Some(current)) => absorbs(prev, current),
        _ => false,
    }
}
