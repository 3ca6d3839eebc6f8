//! Extractors that reject with [`AppError`](crate::errors::AppError) so every
//! bad request gets the same JSON error body.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
