//! Folding ordered highlights into title/body records.

use crate::app::buffer::TextBuffer;
use crate::domain::model::{HighlightSet, ItemRecord, Role};
use crate::domain::span::Span;

/// Walk highlights by position and pair titles with bodies.
///
/// A record is closed whenever a second span of a role it already holds arrives. Spans that
/// reach past the end of the text are skipped.
pub fn reduce(buffer: &TextBuffer, highlights: &HighlightSet) -> Vec<ItemRecord> {
    let mut items = Vec::new();
    let mut pending = ItemRecord::default();

    for highlight in highlights.ordered() {
        let Some(content) = buffer.slice(highlight.span) else {
            tracing::warn!(
                span = %highlight.span,
                len = buffer.len(),
                "highlight outside text; skipping"
            );
            continue;
        };

        let slot = match highlight.role {
            Role::Title => &pending.title,
            Role::Body => &pending.body,
        };
        if slot.is_some() {
            items.push(std::mem::take(&mut pending));
        }

        match highlight.role {
            Role::Title => pending.title = Some(content),
            Role::Body => pending.body = Some(content),
        }
    }

    if !pending.is_empty() {
        items.push(pending);
    }
    items
}

/// Reduce role-tagged spans over `text` into item records.
pub fn reduce_to_items(text: &str, title_spans: &[Span], body_spans: &[Span]) -> Vec<ItemRecord> {
    let highlights = HighlightSet::new(title_spans.to_vec(), body_spans.to_vec());
    reduce(&TextBuffer::new(text), &highlights)
}
