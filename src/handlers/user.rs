//! Profile endpoints under `/user`.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::FieldUpdatedBody;
use crate::service::{UpdateFieldRequest, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// PUT /user/update/:id with `{field, value}`.
pub async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateFieldRequest>,
) -> Result<impl IntoResponse, AppError> {
    let field = UserService::update_field(state.store.as_ref(), parse_id(&id), body).await?;
    Ok(Json(FieldUpdatedBody {
        success: true,
        message: format!("{} updated successfully", field.column()),
    }))
}

/// GET /user/by-userid/:userid
pub async fn by_userid(
    State(state): State<AppState>,
    Path(userid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::by_userid(state.store.as_ref(), &userid).await?;
    Ok(Json(user))
}
