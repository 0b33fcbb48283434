//! Response bodies. Every body carries a human-readable `message`, except list endpoints
//! which return bare JSON arrays.

use crate::models::UserProfile;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize)]
pub struct LoginBody {
    pub message: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct FieldUpdatedBody {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBody {
    pub message: String,
    pub id: i64,
    /// Present for inventory items (null without an image), omitted for suppliers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<Option<String>>,
}

pub fn message(text: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: text.into(),
        }),
    )
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

pub fn created(
    text: impl Into<String>,
    id: i64,
    image_path: Option<Option<String>>,
) -> (StatusCode, Json<CreatedBody>) {
    (
        StatusCode::OK,
        Json(CreatedBody {
            message: text.into(),
            id,
            image_path,
        }),
    )
}
