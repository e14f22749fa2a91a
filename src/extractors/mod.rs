//! Request extractors.

mod json;
mod path;

pub use json::BodyJson;
pub use path::PathId;
