//! Application layer: matching, sequencing and reduction over a text buffer.

pub mod autofill;
pub mod buffer;
pub mod highlights;
pub mod matcher;
pub mod pattern;
pub mod reduce;
pub mod render;
pub mod sequencer;
pub mod session;
pub mod trim;
