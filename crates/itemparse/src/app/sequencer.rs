//! Re-walking a buffer with delimiter patterns learned from example highlights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::buffer::TextBuffer;
use crate::app::matcher::find_match;
use crate::app::pattern::DelimiterPattern;
use crate::domain::category::{Category, Classifier};
use crate::domain::errors::ParseError;
use crate::domain::model::{Highlight, HighlightSet, Role};
use crate::domain::span::Span;

/// How to pick the last-to-first delimiter when no example pair shows that transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapFallback {
    /// Use the separator-like text after the last example, then the first delimiter.
    #[default]
    Infer,
    /// Reuse the first derived delimiter, or an empty one.
    FirstDelimiter,
    /// Fail the parse.
    Strict,
}

impl WrapFallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapFallback::Infer => "infer",
            WrapFallback::FirstDelimiter => "first-delimiter",
            WrapFallback::Strict => "strict",
        }
    }
}

impl fmt::Display for WrapFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapFallback {
    type Err = WrapFallbackParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "infer" | "trailing-gap" => Ok(WrapFallback::Infer),
            "first-delimiter" | "first" => Ok(WrapFallback::FirstDelimiter),
            "strict" | "fail" => Ok(WrapFallback::Strict),
            other => Err(WrapFallbackParseError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Error returned when parsing a [`WrapFallback`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum WrapFallbackParseError {
    #[error("unknown wrap fallback policy '{0}'")]
    UnknownPolicy(String),
}

/// Where the wrap-around delimiter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapSource {
    /// Cloned from the example pair at this index.
    Transition { pair: usize },
    /// Built from the text following the last example.
    TrailingGap,
    /// Reused the first derived delimiter.
    FirstDelimiter,
    /// Nothing to reuse; the empty delimiter.
    Empty,
}

impl WrapSource {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, WrapSource::Transition { .. })
    }
}

/// Diagnostics for one sequencing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    /// `None` when a single example made pattern derivation unnecessary.
    pub wrap: Option<WrapSource>,
    pub patterns: usize,
    pub emitted: usize,
    /// Every delimiter matched zero-width at the same position; the rest became one span.
    pub stalled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequenced {
    pub highlights: HighlightSet,
    pub report: SequenceReport,
}

/// Derives delimiter patterns from ordered examples and partitions the whole buffer.
#[derive(Debug, Clone)]
pub struct HighlightSequencer<'a> {
    buffer: &'a TextBuffer,
    classifier: Classifier,
    wrap_fallback: WrapFallback,
}

impl<'a> HighlightSequencer<'a> {
    pub fn new(buffer: &'a TextBuffer) -> Self {
        Self {
            buffer,
            classifier: Classifier::default(),
            wrap_fallback: WrapFallback::default(),
        }
    }

    /// Classifier used for patterns; should match the one `buffer` was built with.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_wrap_fallback(mut self, policy: WrapFallback) -> Self {
        self.wrap_fallback = policy;
        self
    }

    /// Partition the buffer into highlights following the cyclic order of `examples`.
    pub fn sequence(&self, examples: &HighlightSet) -> Result<Sequenced, ParseError> {
        let ordered = examples.ordered();
        let Some(first) = ordered.first() else {
            return Err(ParseError::DegenerateParse);
        };

        if ordered.len() == 1 {
            let len = self.buffer.len();
            let rest = (len > 0).then(|| Highlight::new(Span::from_bounds(0, len), first.role));
            let report = SequenceReport {
                emitted: usize::from(rest.is_some()),
                ..SequenceReport::default()
            };
            return finish(HighlightSet::from_highlights(rest), report);
        }

        let mut delimiters = self.pair_delimiters(ordered);
        let (wrap, source) = self.wrap_delimiter(ordered, &delimiters)?;
        delimiters.push(wrap);

        let (emitted, stalled) = self.rescan(ordered, &delimiters);
        let report = SequenceReport {
            wrap: Some(source),
            patterns: delimiters.len(),
            emitted: emitted.len(),
            stalled,
        };
        finish(HighlightSet::from_highlights(emitted), report)
    }

    fn pattern(&self, separator: String) -> DelimiterPattern {
        DelimiterPattern::with_classifier(separator, &self.classifier)
    }

    /// One pattern per consecutive pair; overlapping pairs get an empty separator.
    fn pair_delimiters(&self, ordered: &[Highlight]) -> Vec<DelimiterPattern> {
        ordered
            .windows(2)
            .map(|pair| {
                let separator = self
                    .buffer
                    .slice_clamped(pair[0].span.end(), pair[1].span.location);
                let pattern = self.pattern(separator);
                tracing::debug!(
                    separator = ?pattern.separator(),
                    categories = ?pattern.categories(),
                    "derived delimiter"
                );
                pattern
            })
            .collect()
    }

    fn wrap_delimiter(
        &self,
        ordered: &[Highlight],
        delimiters: &[DelimiterPattern],
    ) -> Result<(DelimiterPattern, WrapSource), ParseError> {
        let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
            return Err(ParseError::DegenerateParse);
        };
        let wanted = (last.role, first.role);

        if let Some(pair) = ordered
            .windows(2)
            .position(|pair| (pair[0].role, pair[1].role) == wanted)
        {
            let separator = delimiters[pair].separator().to_owned();
            return Ok((self.pattern(separator), WrapSource::Transition { pair }));
        }

        let (from, to) = wanted;
        let fallback = match self.wrap_fallback {
            WrapFallback::Strict => {
                return Err(ParseError::WrapDelimiterUnavailable { from, to });
            }
            WrapFallback::Infer => self
                .trailing_gap(last)
                .map(|gap| (self.pattern(gap), WrapSource::TrailingGap))
                .unwrap_or_else(|| first_or_empty(self, delimiters)),
            WrapFallback::FirstDelimiter => first_or_empty(self, delimiters),
        };

        tracing::warn!(
            %from,
            %to,
            source = ?fallback.1,
            separator = ?fallback.0.separator(),
            "no example shows the wrap-around transition; using fallback delimiter"
        );
        Ok(fallback)
    }

    /// Separator-like text right after the last example, if any.
    ///
    /// Stops at the first letter, digit or unclassified character so the next item keeps it.
    fn trailing_gap(&self, last: &Highlight) -> Option<String> {
        let start = last.span.end();
        let mut end = start;
        while let Some(category) = self.buffer.category(end) {
            if matches!(category, Category::LetterOrDigit | Category::Other) {
                break;
            }
            end += 1;
        }
        (end > start).then(|| self.buffer.slice_clamped(start, end))
    }

    /// Walk the buffer applying delimiters and roles cyclically.
    ///
    /// `h_index` and `d_index` advance together every step, each modulo its own collection.
    fn rescan(
        &self,
        ordered: &[Highlight],
        delimiters: &[DelimiterPattern],
    ) -> (Vec<Highlight>, bool) {
        let len = self.buffer.len();
        let mut emitted = Vec::new();
        let mut pos = 0;
        let mut h_index = 0;
        let mut d_index = 0;
        let mut idle_steps = 0;

        while pos < len {
            let role = ordered[h_index].role;

            if idle_steps >= delimiters.len() {
                tracing::warn!(pos, %role, "no delimiter advances the scan; taking the rest");
                emitted.push(Highlight::new(Span::from_bounds(pos, len), role));
                return (emitted, true);
            }

            match find_match(self.buffer, pos, &delimiters[d_index]) {
                Some(found) => {
                    if found.location > pos {
                        emitted.push(emit(pos, found.location, role));
                    }
                    idle_steps = if found.end() > pos { 0 } else { idle_steps + 1 };
                    pos = found.end().max(pos);
                }
                None => {
                    emitted.push(emit(pos, len, role));
                    pos = len;
                }
            }

            h_index = (h_index + 1) % ordered.len();
            d_index = (d_index + 1) % delimiters.len();
        }

        (emitted, false)
    }
}

fn emit(start: usize, end: usize, role: Role) -> Highlight {
    let highlight = Highlight::new(Span::from_bounds(start, end), role);
    tracing::debug!(span = %highlight.span, %role, "emitted highlight");
    highlight
}

fn first_or_empty(
    sequencer: &HighlightSequencer<'_>,
    delimiters: &[DelimiterPattern],
) -> (DelimiterPattern, WrapSource) {
    match delimiters.first() {
        Some(first) => (
            sequencer.pattern(first.separator().to_owned()),
            WrapSource::FirstDelimiter,
        ),
        None => (sequencer.pattern(String::new()), WrapSource::Empty),
    }
}

fn finish(highlights: HighlightSet, report: SequenceReport) -> Result<Sequenced, ParseError> {
    if highlights.is_empty() {
        return Err(ParseError::DegenerateParse);
    }
    Ok(Sequenced { highlights, report })
}
