//! Edit session state: the text plus both highlight collections.

use serde::{Deserialize, Serialize};

use crate::app::autofill::{AutoFillReport, AutoFiller};
use crate::app::buffer::TextBuffer;
use crate::app::highlights::{self, TextEdit};
use crate::app::reduce::reduce;
use crate::domain::errors::ParseError;
use crate::domain::model::{HighlightSet, ItemRecord, Role};
use crate::domain::span::Span;

/// Copy of the session state, restorable after an auto-fill.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub text: String,
    pub title_spans: Vec<Span>,
    pub body_spans: Vec<Span>,
}

/// Owns the text under edit and the user's highlights.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    text: String,
    len: usize,
    title_spans: Vec<Span>,
    body_spans: Vec<Span>,
    before_auto_fill: Option<SessionSnapshot>,
}

impl EditSession {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            len,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn title_spans(&self) -> &[Span] {
        &self.title_spans
    }

    pub fn body_spans(&self) -> &[Span] {
        &self.body_spans
    }

    pub fn spans(&self, role: Role) -> &[Span] {
        match role {
            Role::Title => &self.title_spans,
            Role::Body => &self.body_spans,
        }
    }

    /// Highlight `span` as `role`, replacing anything it overlaps.
    ///
    /// Returns `false` for empty selections or selections past the end of the text.
    pub fn add_highlight(&mut self, role: Role, span: Span) -> bool {
        if span.is_empty() || span.end() > self.len {
            tracing::debug!(%span, len = self.len, "ignoring highlight request");
            return false;
        }
        let (titles, bodies) =
            highlights::add_highlight(role, span, &self.title_spans, &self.body_spans);
        self.title_spans = titles;
        self.body_spans = bodies;
        true
    }

    /// Remove the `role` highlight under the cursor, if any.
    pub fn remove_highlight_at(&mut self, role: Role, cursor: usize) -> bool {
        let spans = match role {
            Role::Title => &mut self.title_spans,
            Role::Body => &mut self.body_spans,
        };
        match highlights::highlight_at(spans, cursor) {
            Some(index) => {
                spans.remove(index);
                true
            }
            None => false,
        }
    }

    /// The role and span of the highlight under the cursor. Titles win over bodies.
    pub fn highlight_at(&self, cursor: usize) -> Option<(Role, Span)> {
        [Role::Title, Role::Body].into_iter().find_map(|role| {
            let spans = self.spans(role);
            highlights::highlight_at(spans, cursor).map(|index| (role, spans[index]))
        })
    }

    /// Replace the text after `edit` and move every highlight with it.
    pub fn apply_edit(&mut self, edit: TextEdit, new_text: impl Into<String>) {
        self.text = new_text.into();
        self.len = self.text.chars().count();
        self.title_spans = highlights::prune_out_of_bounds(
            &highlights::adjust_for_edit(&self.title_spans, &edit),
            self.len,
        );
        self.body_spans = highlights::prune_out_of_bounds(
            &highlights::adjust_for_edit(&self.body_spans, &edit),
            self.len,
        );
    }

    /// Run auto-fill on the current state.
    ///
    /// On success the result replaces the session state and the previous state is kept
    /// for [`EditSession::revert_auto_fill`]. On failure nothing changes.
    pub fn auto_fill(&mut self, filler: &AutoFiller) -> Result<AutoFillReport, ParseError> {
        let result = filler.run(&self.text, &self.title_spans, &self.body_spans)?;
        let previous = self.snapshot();
        self.restore(SessionSnapshot {
            text: result.text,
            title_spans: result.title_spans,
            body_spans: result.body_spans,
        });
        self.before_auto_fill = Some(previous);
        Ok(result.report)
    }

    /// Undo the most recent auto-fill. Returns `false` when there is nothing to undo.
    pub fn revert_auto_fill(&mut self) -> bool {
        match self.before_auto_fill.take() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn is_auto_filled(&self) -> bool {
        self.before_auto_fill.is_some()
    }

    pub fn items(&self) -> Vec<ItemRecord> {
        let highlights = HighlightSet::new(self.title_spans.clone(), self.body_spans.clone());
        reduce(&TextBuffer::new(&self.text), &highlights)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            text: self.text.clone(),
            title_spans: self.title_spans.clone(),
            body_spans: self.body_spans.clone(),
        }
    }

    fn restore(&mut self, snapshot: SessionSnapshot) {
        self.len = snapshot.text.chars().count();
        self.text = snapshot.text;
        self.title_spans = snapshot.title_spans;
        self.body_spans = snapshot.body_spans;
    }
}
