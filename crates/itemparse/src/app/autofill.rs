//! Auto-fill: trim the text, learn delimiters from the examples, and partition everything.

use crate::app::buffer::TextBuffer;
use crate::app::highlights::prune_out_of_bounds;
use crate::app::reduce::reduce;
use crate::app::sequencer::{HighlightSequencer, SequenceReport, WrapFallback, WrapSource};
use crate::app::trim::trim_text;
use crate::domain::category::Classifier;
use crate::domain::errors::ParseError;
use crate::domain::model::{HighlightSet, ItemRecord};
use crate::domain::span::Span;
use crate::infra::config::Config;

/// Runtime options controlling auto-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoFillOptions {
    pub trim_lines: bool,
    pub wrap_fallback: WrapFallback,
    pub classifier: Classifier,
}

impl Default for AutoFillOptions {
    fn default() -> Self {
        Self {
            trim_lines: true,
            wrap_fallback: WrapFallback::default(),
            classifier: Classifier::default(),
        }
    }
}

impl AutoFillOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        let wrap_fallback = config
            .parser
            .wrap_fallback()
            .parse()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "falling back to the default wrap policy");
                WrapFallback::default()
            });
        Self {
            trim_lines: config.parser.trim_lines(),
            wrap_fallback,
            classifier: Classifier::new(config.classifier.extended_letters()),
        }
    }
}

/// Diagnostics for one auto-fill run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoFillReport {
    /// Characters stripped by line trimming.
    pub trimmed_chars: usize,
    pub sequence: SequenceReport,
}

impl AutoFillReport {
    pub fn wrap(&self) -> Option<WrapSource> {
        self.sequence.wrap
    }
}

/// The replacement state produced by a successful auto-fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoFill {
    pub text: String,
    pub title_spans: Vec<Span>,
    pub body_spans: Vec<Span>,
    pub report: AutoFillReport,
}

impl AutoFill {
    pub fn items(&self) -> Vec<ItemRecord> {
        let highlights = HighlightSet::new(self.title_spans.clone(), self.body_spans.clone());
        reduce(&TextBuffer::new(&self.text), &highlights)
    }
}

/// Runs the auto-fill pipeline with fixed options.
#[derive(Debug, Clone, Default)]
pub struct AutoFiller {
    options: AutoFillOptions,
}

impl AutoFiller {
    pub fn new(options: AutoFillOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AutoFillOptions {
        &self.options
    }

    /// Derive a full highlight partition of `text` from the example spans.
    ///
    /// Nothing is mutated; on success the caller swaps its text and highlights for the
    /// returned ones.
    pub fn run(
        &self,
        text: &str,
        title_spans: &[Span],
        body_spans: &[Span],
    ) -> Result<AutoFill, ParseError> {
        let original_len = text.chars().count();
        let (text, titles, bodies) = if self.options.trim_lines {
            let trimmed = trim_text(text, title_spans, body_spans);
            (trimmed.text, trimmed.title_spans, trimmed.body_spans)
        } else {
            (
                text.to_owned(),
                prune_out_of_bounds(title_spans, original_len),
                prune_out_of_bounds(body_spans, original_len),
            )
        };

        let buffer = TextBuffer::with_classifier(&text, &self.options.classifier);
        let examples = HighlightSet::new(titles, bodies);
        tracing::debug!(
            examples = examples.len(),
            chars = buffer.len(),
            "running auto-fill"
        );

        let sequenced = HighlightSequencer::new(&buffer)
            .with_classifier(self.options.classifier)
            .with_wrap_fallback(self.options.wrap_fallback)
            .sequence(&examples)
            .inspect_err(|err| tracing::debug!(error = %err, "auto-fill not applicable"))?;

        let report = AutoFillReport {
            trimmed_chars: original_len - buffer.len(),
            sequence: sequenced.report,
        };
        let (title_spans, body_spans) = sequenced.highlights.into_parts();
        tracing::debug!(
            titles = title_spans.len(),
            bodies = body_spans.len(),
            "auto-fill complete"
        );

        Ok(AutoFill {
            text,
            title_spans,
            body_spans,
            report,
        })
    }
}

/// Auto-fill with default options.
pub fn run_auto_fill(
    text: &str,
    title_spans: &[Span],
    body_spans: &[Span],
) -> Result<AutoFill, ParseError> {
    AutoFiller::default().run(text, title_spans, body_spans)
}
