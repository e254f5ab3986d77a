//! Keeping user highlights consistent while the text is edited.

use crate::domain::model::Role;
use crate::domain::span::{Span, remove_conflicting};

/// Insert `span` under `role`, dropping every highlight of either role it overlaps.
///
/// Empty spans are ignored. Returns the new `(titles, bodies)`.
pub fn add_highlight(
    role: Role,
    span: Span,
    title_spans: &[Span],
    body_spans: &[Span],
) -> (Vec<Span>, Vec<Span>) {
    if span.is_empty() {
        return (title_spans.to_vec(), body_spans.to_vec());
    }

    let (mut titles, mut bodies) = remove_conflicting(&span, title_spans, body_spans);
    match role {
        Role::Title => titles.push(span),
        Role::Body => bodies.push(span),
    }
    (titles, bodies)
}

/// A replacement of the previously selected range with `inserted` characters.
///
/// Typing with nothing selected is a replacement of an empty range; deleting a selection
/// inserts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    pub removed: Span,
    pub inserted: usize,
}

impl TextEdit {
    pub const fn insert(at: usize, inserted: usize) -> Self {
        Self {
            removed: Span::new(at, 0),
            inserted,
        }
    }

    pub const fn delete(removed: Span) -> Self {
        Self {
            removed,
            inserted: 0,
        }
    }

    pub const fn replace(removed: Span, inserted: usize) -> Self {
        Self { removed, inserted }
    }

    fn shift(&self, offset: usize) -> usize {
        offset - self.removed.length + self.inserted
    }

    fn map_start(&self, start: usize) -> usize {
        let (from, to) = (self.removed.location, self.removed.end());
        if start < from {
            start
        } else if start >= to {
            self.shift(start)
        } else {
            from + self.inserted
        }
    }

    fn map_end(&self, end: usize) -> usize {
        let (from, to) = (self.removed.location, self.removed.end());
        if end < from {
            end
        } else if end >= to {
            self.shift(end)
        } else {
            from
        }
    }

    /// Where `span` lands after the edit, `None` when nothing of it survives.
    pub fn apply(&self, span: &Span) -> Option<Span> {
        let start = self.map_start(span.location);
        let end = self.map_end(span.end());
        (end > start).then(|| Span::from_bounds(start, end))
    }
}

/// Move, grow or shrink every span to follow an edit.
///
/// Text typed at a span's end extends it; text typed at its start pushes it right. Spans
/// whose text was deleted entirely are dropped.
pub fn adjust_for_edit(spans: &[Span], edit: &TextEdit) -> Vec<Span> {
    spans.iter().filter_map(|span| edit.apply(span)).collect()
}

/// Index of the highlight the cursor sits in, counting both edges as inside.
///
/// When highlights touch, the later one wins.
pub fn highlight_at(spans: &[Span], cursor: usize) -> Option<usize> {
    spans.iter().rposition(|span| span.contains_cursor(cursor))
}

/// Drop highlights that reach past a text of `len` characters.
pub fn prune_out_of_bounds(spans: &[Span], len: usize) -> Vec<Span> {
    spans
        .iter()
        .copied()
        .filter(|span| span.end() <= len && !span.is_empty())
        .collect()
}
