//! Split pasted text into title/body items by generalising a few example highlights.

pub mod app;
pub mod domain;
pub mod infra;
pub mod ui;

pub use app::autofill::{AutoFill, AutoFillOptions, AutoFillReport, AutoFiller, run_auto_fill};
pub use app::highlights::{TextEdit, add_highlight};
pub use app::matcher::find_delimiter_match;
pub use app::pattern::{DelimiterPattern, build_pattern};
pub use app::reduce::reduce_to_items;
pub use app::session::EditSession;
pub use domain::category::{Category, classify};
pub use domain::errors::ParseError;
pub use domain::model::{ItemRecord, Role};
pub use domain::span::Span;

pub fn init() {
    infra::logging::init();
}
