//! Supplier endpoints, shaped like the inventory ones.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::FormData;
use crate::response::{created, message, success_many};
use crate::service::SupplierService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

/// GET /suppliers
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let suppliers = SupplierService::list(state.store.as_ref()).await?;
    Ok(success_many(suppliers))
}

/// POST /suppliers/create
pub async fn create(
    State(state): State<AppState>,
    form: FormData,
) -> Result<impl IntoResponse, AppError> {
    let supplier = SupplierService::create(state.store.as_ref(), &form.fields).await?;
    Ok(created(
        "Supplier created successfully",
        supplier.supplier_id,
        None,
    ))
}

/// PUT /suppliers/:supplierId
pub async fn update(
    State(state): State<AppState>,
    Path(supplier_id): Path<String>,
    form: FormData,
) -> Result<impl IntoResponse, AppError> {
    SupplierService::update(state.store.as_ref(), parse_id(&supplier_id), &form.fields).await?;
    Ok(message("Supplier updated successfully"))
}

/// DELETE /suppliers/:supplierId
pub async fn delete(
    State(state): State<AppState>,
    Path(supplier_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    SupplierService::delete(state.store.as_ref(), parse_id(&supplier_id)).await?;
    Ok(message("Supplier deleted successfully"))
}
