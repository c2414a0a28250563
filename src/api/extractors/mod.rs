//! Custom request extractors.

mod params;
mod validated_json;

pub use params::{ValidPath, ValidQuery};
pub use validated_json::ValidatedJson;
