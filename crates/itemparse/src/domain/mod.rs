//! Plain value types shared by the parsing pipeline.

pub mod category;
pub mod errors;
pub mod model;
pub mod span;
