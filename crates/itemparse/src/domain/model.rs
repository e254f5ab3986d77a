//! Domain models for highlights and parsed items.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::span::Span;

/// Which half of an item a highlight marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Title,
    Body,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Title => "title",
            Role::Body => "body",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub span: Span,
    pub role: Role,
}

impl Highlight {
    pub const fn new(span: Span, role: Role) -> Self {
        Self { span, role }
    }
}

/// Role-partitioned highlights plus their merged, position-sorted order.
///
/// `ordered` is derived; every constructor rebuilds it from the role collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    title_spans: Vec<Span>,
    body_spans: Vec<Span>,
    ordered: Vec<Highlight>,
}

impl HighlightSet {
    /// Sort both role collections by location and merge them.
    pub fn new(mut title_spans: Vec<Span>, mut body_spans: Vec<Span>) -> Self {
        title_spans.retain(|span| !span.is_empty());
        body_spans.retain(|span| !span.is_empty());
        title_spans.sort_by_key(|span| span.location);
        body_spans.sort_by_key(|span| span.location);

        // Titles go first so the stable sort puts them ahead of bodies at equal locations.
        let mut ordered: Vec<Highlight> = title_spans
            .iter()
            .map(|span| Highlight::new(*span, Role::Title))
            .chain(
                body_spans
                    .iter()
                    .map(|span| Highlight::new(*span, Role::Body)),
            )
            .collect();
        ordered.sort_by_key(|highlight| highlight.span.location);

        Self {
            title_spans,
            body_spans,
            ordered,
        }
    }

    /// Redistribute a list of highlights into role collections.
    pub fn from_highlights(highlights: impl IntoIterator<Item = Highlight>) -> Self {
        let mut titles = Vec::new();
        let mut bodies = Vec::new();
        for highlight in highlights {
            match highlight.role {
                Role::Title => titles.push(highlight.span),
                Role::Body => bodies.push(highlight.span),
            }
        }
        Self::new(titles, bodies)
    }

    pub fn title_spans(&self) -> &[Span] {
        &self.title_spans
    }

    pub fn body_spans(&self) -> &[Span] {
        &self.body_spans
    }

    pub fn ordered(&self) -> &[Highlight] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Span>, Vec<Span>) {
        (self.title_spans, self.body_spans)
    }
}

/// One parsed title/body pair handed to list storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl ItemRecord {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }
}
