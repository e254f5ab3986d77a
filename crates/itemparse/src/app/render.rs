//! Rendering parsed items and highlights for output.

use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::app::buffer::TextBuffer;
use crate::domain::model::{HighlightSet, ItemRecord, Role};
use crate::infra::config::Config;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human readable text.
    Plain,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" | "txt" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(OutputFormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// What the renderer prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum Emit {
    /// Title/body records.
    Items,
    /// Every highlight with its offsets, in text order.
    Highlights,
}

impl Emit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emit::Items => "items",
            Emit::Highlights => "highlights",
        }
    }
}

impl FromStr for Emit {
    type Err = OutputFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "items" | "records" => Ok(Emit::Items),
            "highlights" | "spans" => Ok(Emit::Highlights),
            other => Err(OutputFormatParseError::UnknownEmit(other.to_string())),
        }
    }
}

/// Error returned when parsing an output setting fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum OutputFormatParseError {
    #[error("unknown output format '{0}'")]
    UnknownFormat(String),
    #[error("unknown emit target '{0}'")]
    UnknownEmit(String),
}

/// Runtime options controlling rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub emit: Emit,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            emit: Emit::Items,
        }
    }
}

impl RenderOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        let format = <OutputFormat as FromStr>::from_str(config.output.format())
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "using plain output");
                OutputFormat::Plain
            });
        let emit = <Emit as FromStr>::from_str(config.output.emit()).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "emitting items");
            Emit::Items
        });
        Self { format, emit }
    }
}

#[derive(Debug, Serialize)]
struct HighlightRow {
    role: Role,
    location: usize,
    length: usize,
    text: String,
}

/// Render `highlights` over `text` according to `options`.
pub fn render(text: &str, highlights: &HighlightSet, options: &RenderOptions) -> Result<String> {
    let buffer = TextBuffer::new(text);
    match options.emit {
        Emit::Items => {
            let items = crate::app::reduce::reduce(&buffer, highlights);
            render_items(&items, options.format)
        }
        Emit::Highlights => render_highlights(&buffer, highlights, options.format),
    }
}

/// Render item records.
///
/// Plain output prints one `title:`/`body:` line per present field, records separated by a
/// blank line. Continuation lines of multi-line values are indented by two spaces.
pub fn render_items(items: &[ItemRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(items).context("failed to serialize items")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Plain => {
            let blocks: Vec<String> = items
                .iter()
                .map(|item| {
                    let mut block = String::new();
                    if let Some(title) = &item.title {
                        push_field(&mut block, Role::Title, title);
                    }
                    if let Some(body) = &item.body {
                        push_field(&mut block, Role::Body, body);
                    }
                    block
                })
                .collect();
            Ok(blocks.join("\n"))
        }
    }
}

fn push_field(out: &mut String, role: Role, value: &str) {
    let mut lines = value.split('\n');
    let first = lines.next().unwrap_or_default();
    let _ = writeln!(out, "{role}: {first}");
    for line in lines {
        let _ = writeln!(out, "  {line}");
    }
}

fn render_highlights(
    buffer: &TextBuffer,
    highlights: &HighlightSet,
    format: OutputFormat,
) -> Result<String> {
    let rows: Vec<HighlightRow> = highlights
        .ordered()
        .iter()
        .filter_map(|highlight| {
            buffer.slice(highlight.span).map(|text| HighlightRow {
                role: highlight.role,
                location: highlight.span.location,
                length: highlight.span.length,
                text,
            })
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&rows).context("failed to serialize highlights")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Plain => {
            let mut out = String::new();
            for row in &rows {
                let span = format!("{}:{}", row.location, row.length);
                let _ = writeln!(out, "{:<5} {:<7} {:?}", row.role.as_str(), span, row.text);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::span::Span;

    fn scenario() -> (&'static str, HighlightSet) {
        (
            "Apple: a fruit\nCarrot: a vegetable\nfrom the ground",
            HighlightSet::new(
                vec![Span::new(0, 5), Span::new(15, 6)],
                vec![Span::new(7, 7), Span::new(23, 27)],
            ),
        )
    }

    #[test]
    fn parses_formats_and_aliases() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("txt".parse::<OutputFormat>(), Ok(OutputFormat::Plain));
        assert_eq!("spans".parse::<Emit>(), Ok(Emit::Highlights));
        assert_eq!(
            "yaml".parse::<OutputFormat>(),
            Err(OutputFormatParseError::UnknownFormat("yaml".into()))
        );
    }

    #[test]
    fn plain_items() {
        let (text, highlights) = scenario();
        let rendered = render(text, &highlights, &RenderOptions::default()).unwrap();
        insta::assert_snapshot!(rendered, @r"
title: Apple
body: a fruit

title: Carrot
body: a vegetable
  from the ground
");
    }

    #[test]
    fn plain_highlights() {
        let (text, highlights) = scenario();
        let options = RenderOptions {
            emit: Emit::Highlights,
            ..RenderOptions::default()
        };
        let rendered = render(text, &highlights, &options).unwrap();
        insta::assert_snapshot!(rendered, @r#"
title 0:5     "Apple"
body  7:7     "a fruit"
title 15:6    "Carrot"
body  23:27   "a vegetable\nfrom the ground"
"#);
    }

    #[test]
    fn json_items_keep_missing_fields_as_null() {
        let items = vec![ItemRecord {
            title: Some("Only".into()),
            body: None,
        }];
        let rendered = render_items(&items, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["title"], "Only");
        assert!(value[0]["body"].is_null());
    }

    #[test]
    fn options_follow_config() {
        let config: Config =
            toml::from_str("[output]\nformat = \"json\"\nemit = \"highlights\"\n").unwrap();
        assert_eq!(
            RenderOptions::from_config(&config),
            RenderOptions {
                format: OutputFormat::Json,
                emit: Emit::Highlights,
            }
        );
    }
}
