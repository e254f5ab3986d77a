//! `itemparse` command: read text, apply example highlights, print items.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::app::autofill::{AutoFillOptions, AutoFiller};
use crate::app::buffer::TextBuffer;
use crate::app::render::{self, Emit, OutputFormat, RenderOptions};
use crate::app::session::EditSession;
use crate::domain::model::{HighlightSet, Role};
use crate::domain::span::Span;
use crate::infra::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "itemparse",
    author,
    version,
    about = "Split text into title/body items from a few example highlights"
)]
pub struct Cli {
    /// Input file; `-` or nothing reads stdin.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Example title span as LOCATION:LENGTH in characters.
    #[arg(long = "title", value_name = "LOC:LEN")]
    pub titles: Vec<Span>,

    /// Example body span as LOCATION:LENGTH in characters.
    #[arg(long = "body", value_name = "LOC:LEN")]
    pub bodies: Vec<Span>,

    /// Use the first occurrence of TEXT as an example title.
    #[arg(long = "title-text", value_name = "TEXT")]
    pub title_texts: Vec<String>,

    /// Use the first occurrence of TEXT as an example body.
    #[arg(long = "body-text", value_name = "TEXT")]
    pub body_texts: Vec<String>,

    /// Reduce the given highlights without deriving the rest.
    #[arg(long)]
    pub no_auto_fill: bool,

    /// What to print.
    #[arg(long, value_enum)]
    pub emit: Option<Emit>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Extra config file layered over user and workspace config.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let rendered = self.execute()?;
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(rendered.as_bytes())
            .context("failed to write output")?;
        Ok(())
    }

    /// Everything `run` does except writing to stdout.
    pub fn execute(&self) -> Result<String> {
        let config = Config::load_with_extra(self.config.as_deref())?;
        self.execute_with(&config)
    }

    /// Parse and render the input with an already loaded configuration.
    pub fn execute_with(&self, config: &Config) -> Result<String> {
        let text = read_input(self.input.as_deref())?;
        let mut session = EditSession::new(text);

        for (role, span) in self.examples(session.text())? {
            if !session.add_highlight(role, span) {
                bail!(
                    "{role} span {span} is outside the input ({} characters)",
                    session.text().chars().count()
                );
            }
        }

        if !self.no_auto_fill {
            let filler = AutoFiller::new(AutoFillOptions::from_config(config));
            let report = session
                .auto_fill(&filler)
                .context("could not derive items from the examples")?;
            tracing::info!(
                patterns = report.sequence.patterns,
                emitted = report.sequence.emitted,
                stalled = report.sequence.stalled,
                "auto-fill finished"
            );
        }

        let mut options = RenderOptions::from_config(config);
        if let Some(format) = self.format {
            options.format = format;
        }
        if let Some(emit) = self.emit {
            options.emit = emit;
        }

        let highlights = HighlightSet::new(
            session.title_spans().to_vec(),
            session.body_spans().to_vec(),
        );
        render::render(session.text(), &highlights, &options)
    }

    /// Example highlights in argument order: explicit spans first, then text lookups.
    fn examples(&self, text: &str) -> Result<Vec<(Role, Span)>> {
        let mut examples: Vec<(Role, Span)> = self
            .titles
            .iter()
            .map(|span| (Role::Title, *span))
            .chain(self.bodies.iter().map(|span| (Role::Body, *span)))
            .collect();

        let buffer = TextBuffer::new(text);
        let lookups = self
            .title_texts
            .iter()
            .map(|needle| (Role::Title, needle))
            .chain(self.body_texts.iter().map(|needle| (Role::Body, needle)));
        for (role, needle) in lookups {
            let span = buffer
                .find(needle)
                .with_context(|| format!("{role} text {needle:?} not found in the input"))?;
            examples.push((role, span));
        }
        Ok(examples)
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
