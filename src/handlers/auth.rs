//! Signup, login and admin approval endpoints under `/auth`.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{message, success_many, LoginBody};
use crate::service::{LoginRequest, SignupRequest, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    UserService::signup(state.store.as_ref(), body).await?;
    Ok(message("Signup successful. Await admin approval."))
}

/// POST /auth/login. The returned user is the client's only session state.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::login(state.store.as_ref(), body).await?;
    Ok(Json(LoginBody {
        message: "Login successful".into(),
        user,
    }))
}

/// GET /auth/pending
pub async fn pending(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = UserService::list_pending(state.store.as_ref()).await?;
    Ok(success_many(users))
}

/// PUT /auth/approve/:id
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    UserService::approve(state.store.as_ref(), parse_id(&id)).await?;
    Ok(message("User approved successfully"))
}

/// DELETE /auth/reject/:id
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    UserService::reject(state.store.as_ref(), parse_id(&id)).await?;
    Ok(message("User rejected and removed"))
}
