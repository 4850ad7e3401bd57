//! Request extractors that reject with the JSON error envelope.

pub mod pagination;
pub mod uuid_path;
pub mod validated_json;

pub use pagination::{PageQuery, SortOrder};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
