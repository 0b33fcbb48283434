//! Request extractors whose rejections are [`crate::error::AppError`]s.

pub mod form;
pub mod json;

pub use form::{FormData, FormFields, ImageUpload};
pub use json::JsonBody;
