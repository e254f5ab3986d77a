//! Per-line whitespace trimming with span remapping.

use crate::domain::span::Span;

/// Trimmed text together with the highlights mapped into its coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trimmed {
    pub text: String,
    pub title_spans: Vec<Span>,
    pub body_spans: Vec<Span>,
}

/// Where a line sat before trimming and where its kept part sits afterwards.
#[derive(Debug, Clone, Copy)]
struct LineMap {
    original: Span,
    leading: usize,
    trailing: usize,
    trimmed_start: usize,
}

impl LineMap {
    /// Kept part of the line, in original coordinates.
    fn kept(&self) -> (usize, usize) {
        let start = self.original.location + self.leading;
        let end = self.original.end().saturating_sub(self.trailing);
        (start, end)
    }

    fn map(&self, span: &Span) -> Option<Span> {
        let piece = span.intersection(&self.original)?;
        let (kept_start, kept_end) = self.kept();
        let start = piece.location.max(kept_start);
        let end = piece.end().min(kept_end);
        (end > start).then(|| {
            Span::from_bounds(
                start - kept_start + self.trimmed_start,
                end - kept_start + self.trimmed_start,
            )
        })
    }
}

fn is_blank(ch: &char) -> bool {
    matches!(ch, ' ' | '\t')
}

/// Strip spaces and tabs from both ends of every line and remap spans.
///
/// Newlines are kept. A span crossing lines comes back as one span per line it still covers;
/// spans that only covered stripped whitespace or newlines disappear.
pub fn trim_text(text: &str, title_spans: &[Span], body_spans: &[Span]) -> Trimmed {
    let mut trimmed = String::with_capacity(text.len());
    let mut lines = Vec::new();
    let mut original_start = 0;
    let mut trimmed_start = 0;

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            trimmed.push('\n');
            trimmed_start += 1;
        }

        let chars: Vec<char> = line.chars().collect();
        let leading = chars.iter().take_while(|ch| is_blank(ch)).count();
        let trailing = if leading == chars.len() {
            0
        } else {
            chars.iter().rev().take_while(|ch| is_blank(ch)).count()
        };
        let kept = &chars[leading..chars.len() - trailing];
        trimmed.extend(kept);

        lines.push(LineMap {
            original: Span::new(original_start, chars.len()),
            leading,
            trailing,
            trimmed_start,
        });

        original_start += chars.len() + 1;
        trimmed_start += kept.len();
    }

    let remap = |spans: &[Span]| -> Vec<Span> {
        spans
            .iter()
            .flat_map(|span| lines.iter().filter_map(move |line| line.map(span)))
            .collect()
    };

    Trimmed {
        title_spans: remap(title_spans),
        body_spans: remap(body_spans),
        text: trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(trimmed: &Trimmed, spans: &[Span]) -> Vec<String> {
        let chars: Vec<char> = trimmed.text.chars().collect();
        spans
            .iter()
            .map(|span| chars[span.location..span.end()].iter().collect())
            .collect()
    }

    #[test]
    fn strips_line_edges_and_keeps_newlines() {
        let result = trim_text("  Apple:\t a fruit \t\n\tCarrot  ", &[], &[]);
        assert_eq!(result.text, "Apple:\t a fruit\nCarrot");
    }

    #[test]
    fn whitespace_only_lines_collapse() {
        let result = trim_text("one\n   \t \ntwo", &[], &[]);
        assert_eq!(result.text, "one\n\ntwo");
    }

    #[test]
    fn spans_follow_their_text() {
        let text = "   Apple: a fruit\n  Carrot";
        let result = trim_text(text, &[Span::new(3, 5), Span::new(20, 6)], &[Span::new(10, 7)]);

        assert_eq!(result.text, "Apple: a fruit\nCarrot");
        assert_eq!(texts(&result, &result.title_spans), vec!["Apple", "Carrot"]);
        assert_eq!(texts(&result, &result.body_spans), vec!["a fruit"]);
    }

    #[test]
    fn span_over_stripped_edges_is_clipped() {
        let result = trim_text("  word  ", &[Span::new(0, 8)], &[Span::new(6, 2)]);
        assert_eq!(result.title_spans, vec![Span::new(0, 4)]);
        assert!(result.body_spans.is_empty());
    }

    #[test]
    fn span_crossing_lines_splits_per_line() {
        let text = "alpha  \n  beta\ngamma";
        let result = trim_text(text, &[Span::new(2, 10)], &[]);

        assert_eq!(result.text, "alpha\nbeta\ngamma");
        assert_eq!(result.title_spans, vec![Span::new(2, 3), Span::new(6, 2)]);
        assert_eq!(texts(&result, &result.title_spans), vec!["pha", "be"]);
    }

    #[test]
    fn trimming_is_idempotent() {
        let text = " \tfirst line  \n\n  second\t\n third ";
        let titles = [Span::new(2, 6), Span::new(17, 6)];
        let bodies = [Span::new(9, 10)];

        let once = trim_text(text, &titles, &bodies);
        let twice = trim_text(&once.text, &once.title_spans, &once.body_spans);
        assert_eq!(once, twice);
    }

    #[test]
    fn already_trimmed_text_is_unchanged() {
        let text = "Apple: a fruit\nCarrot: a vegetable";
        let titles = [Span::new(0, 5), Span::new(15, 6)];
        let bodies = [Span::new(7, 7), Span::new(23, 11)];

        let result = trim_text(text, &titles, &bodies);
        assert_eq!(result.text, text);
        assert_eq!(result.title_spans, titles);
        assert_eq!(result.body_spans, bodies);
    }
}
