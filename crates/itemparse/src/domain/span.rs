//! Half-open character ranges over a text buffer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::SpanSpecError;

/// A half-open interval `[location, location + length)` of character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub location: usize,
    pub length: usize,
}

impl Span {
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// Build a span from `[start, end)`. Returns an empty span at `start` when `end < start`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            location: start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset.
    pub const fn end(&self) -> usize {
        self.location + self.length
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Three-way overlap comparison.
    ///
    /// Returns `0` when the spans merely touch, the number of shared characters when their
    /// interiors intersect, and `-1` when they are apart. Callers test `> 0` for a real
    /// conflict.
    pub fn overlap_amount(&self, other: &Span) -> isize {
        if self.end() == other.location || other.end() == self.location {
            return 0;
        }

        let shared = self
            .end()
            .min(other.end())
            .saturating_sub(self.location.max(other.location));

        if shared > 0 { shared as isize } else { -1 }
    }

    /// Shared part of both spans, `None` when they do not intersect.
    pub fn intersection(&self, other: &Span) -> Option<Span> {
        let start = self.location.max(other.location);
        let end = self.end().min(other.end());
        (end > start).then(|| Span::from_bounds(start, end))
    }

    /// Whether a cursor sits inside the span or on either edge.
    pub fn contains_cursor(&self, cursor: usize) -> bool {
        self.location <= cursor && cursor <= self.end()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.location, self.length)
    }
}

/// Parses the `LOCATION:LENGTH` form used on the command line.
impl FromStr for Span {
    type Err = SpanSpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || SpanSpecError::Malformed(value.to_string());
        let (location, length) = value.trim().split_once(':').ok_or_else(malformed)?;
        let location = location.trim().parse().map_err(|_| malformed())?;
        let length: usize = length.trim().parse().map_err(|_| malformed())?;
        if length == 0 {
            return Err(SpanSpecError::Empty(value.to_string()));
        }
        Ok(Span::new(location, length))
    }
}

/// Drop every span that truly overlaps `new_span` from both role collections.
///
/// Spans that only touch `new_span` are kept. The inputs are left untouched; filtered copies
/// are returned as `(titles, bodies)`.
pub fn remove_conflicting(
    new_span: &Span,
    title_spans: &[Span],
    body_spans: &[Span],
) -> (Vec<Span>, Vec<Span>) {
    let keep = |spans: &[Span]| -> Vec<Span> {
        spans
            .iter()
            .copied()
            .filter(|existing| existing.overlap_amount(new_span) <= 0)
            .collect()
    };
    (keep(title_spans), keep(body_spans))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_distinguishes_touching_overlapping_and_apart() {
        let a = Span::new(0, 5);
        assert_eq!(a.overlap_amount(&Span::new(5, 3)), 0);
        assert_eq!(a.overlap_amount(&Span::new(3, 5)), 2);
        assert_eq!(a.overlap_amount(&Span::new(10, 2)), -1);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Span::new(2, 6);
        let b = Span::new(4, 10);
        assert_eq!(a.overlap_amount(&b), b.overlap_amount(&a));
        assert_eq!(a.overlap_amount(&b), 4);
    }

    #[test]
    fn contained_span_overlaps_by_its_length() {
        let outer = Span::new(0, 20);
        let inner = Span::new(5, 3);
        assert_eq!(outer.overlap_amount(&inner), 3);
    }

    #[test]
    fn remove_conflicting_keeps_touching_spans() {
        let titles = vec![Span::new(0, 5), Span::new(20, 4)];
        let bodies = vec![Span::new(5, 5), Span::new(12, 6)];

        let (titles, bodies) = remove_conflicting(&Span::new(10, 12), &titles, &bodies);

        assert_eq!(titles, vec![Span::new(0, 5)]);
        assert_eq!(bodies, vec![Span::new(5, 5)]);
    }

    #[test]
    fn intersection_of_disjoint_spans_is_none() {
        assert_eq!(Span::new(0, 3).intersection(&Span::new(3, 3)), None);
        assert_eq!(
            Span::new(0, 5).intersection(&Span::new(3, 10)),
            Some(Span::new(3, 2))
        );
    }

    #[test]
    fn cursor_on_either_edge_is_inside() {
        let span = Span::new(4, 3);
        assert!(span.contains_cursor(4));
        assert!(span.contains_cursor(7));
        assert!(!span.contains_cursor(8));
        assert!(!span.contains_cursor(3));
    }

    #[test]
    fn parses_location_length_pairs() {
        assert_eq!("7:3".parse::<Span>(), Ok(Span::new(7, 3)));
        assert_eq!(
            "7".parse::<Span>(),
            Err(SpanSpecError::Malformed("7".into()))
        );
        assert_eq!("7:0".parse::<Span>(), Err(SpanSpecError::Empty("7:0".into())));
        assert!("a:b".parse::<Span>().is_err());
    }
}
