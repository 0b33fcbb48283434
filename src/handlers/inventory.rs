//! Inventory endpoints. Create and update take multipart (with optional `image`) or JSON.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::FormData;
use crate::response::{created, message, success_many};
use crate::service::InventoryService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

/// GET /inventory
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = InventoryService::list(state.store.as_ref()).await?;
    Ok(success_many(items))
}

/// POST /inventory/create
pub async fn create(
    State(state): State<AppState>,
    form: FormData,
) -> Result<impl IntoResponse, AppError> {
    let item = InventoryService::create(state.store.as_ref(), &state.uploads, &form).await?;
    Ok(created(
        "Item created successfully",
        item.item_id,
        Some(item.image_path),
    ))
}

/// PUT /inventory/:itemId
pub async fn update(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    form: FormData,
) -> Result<impl IntoResponse, AppError> {
    InventoryService::update(state.store.as_ref(), &state.uploads, parse_id(&item_id), &form)
        .await?;
    Ok(message("Item updated successfully"))
}

/// DELETE /inventory/:itemId
pub async fn delete(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    InventoryService::delete(state.store.as_ref(), &state.uploads, parse_id(&item_id)).await?;
    Ok(message("Item deleted"))
}
