//! Suppliers: list, create, update, delete. Deleting a supplier leaves inventory rows alone.

use super::validation::RequestValidator;
use crate::error::AppError;
use crate::extractors::FormFields;
use crate::models::{Supplier, SupplierChanges};
use crate::store::Store;

fn supplier_not_found() -> AppError {
    AppError::NotFound("Supplier not found".into())
}

pub struct SupplierService;

impl SupplierService {
    pub async fn list(store: &dyn Store) -> Result<Vec<Supplier>, AppError> {
        Ok(store.list_suppliers().await?)
    }

    /// Address and email default to the empty string.
    pub async fn create(store: &dyn Store, fields: &FormFields) -> Result<Supplier, AppError> {
        RequestValidator::require_present(
            fields,
            &["supplierId", "supplierName", "contact"],
            "SupplierId, Name and Contact are required",
        )?;
        let supplier = Supplier {
            supplier_id: RequestValidator::non_negative_integer(fields, "supplierId")?,
            supplier_name: RequestValidator::required_text(fields, "supplierName")?,
            contact: RequestValidator::required_text(fields, "contact")?,
            address: Some(fields.text("address").unwrap_or_default()),
            email: Some(fields.text("email").unwrap_or_default()),
        };
        store.insert_supplier(&supplier).await?;
        tracing::info!(supplier_id = supplier.supplier_id, "supplier created");
        Ok(supplier)
    }

    /// Overwrite every column; absent address or email is stored as null.
    pub async fn update(
        store: &dyn Store,
        supplier_id: Option<i64>,
        fields: &FormFields,
    ) -> Result<(), AppError> {
        RequestValidator::require_present(
            fields,
            &["supplierName", "contact"],
            "Name and Contact are required",
        )?;
        let changes = SupplierChanges {
            supplier_name: RequestValidator::required_text(fields, "supplierName")?,
            contact: RequestValidator::required_text(fields, "contact")?,
            address: fields.text("address"),
            email: fields.text("email"),
        };
        let supplier_id = supplier_id.ok_or_else(supplier_not_found)?;
        if !store.update_supplier(supplier_id, &changes).await? {
            return Err(supplier_not_found());
        }
        tracing::info!(supplier_id, "supplier updated");
        Ok(())
    }

    pub async fn delete(store: &dyn Store, supplier_id: Option<i64>) -> Result<(), AppError> {
        let supplier_id = supplier_id.ok_or_else(supplier_not_found)?;
        if !store.delete_supplier(supplier_id).await? {
            return Err(supplier_not_found());
        }
        tracing::info!(supplier_id, "supplier deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::{json, Value};

    fn fields(v: Value) -> FormFields {
        match v {
            Value::Object(map) => map.into_iter().collect(),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn create_defaults_optional_fields_to_empty() {
        let store = MemoryStore::new();
        let supplier = SupplierService::create(
            &store,
            &fields(json!({ "supplierId": 1, "supplierName": "Acme", "contact": "555" })),
        )
        .await
        .unwrap();
        assert_eq!(supplier.address.as_deref(), Some(""));
        assert_eq!(supplier.email.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn create_requires_id_name_and_contact() {
        let store = MemoryStore::new();
        let err = SupplierService::create(&store, &fields(json!({ "supplierName": "Acme" })))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "SupplierId, Name and Contact are required");
    }

    #[tokio::test]
    async fn duplicate_supplier_id_conflicts() {
        let store = MemoryStore::new();
        let body = fields(json!({ "supplierId": 1, "supplierName": "Acme", "contact": "555" }));
        SupplierService::create(&store, &body).await.unwrap();
        let err = SupplierService::create(&store, &body).await.unwrap_err();
        assert_eq!(err.to_string(), "Supplier ID already exists");
    }

    #[tokio::test]
    async fn delete_of_missing_supplier_is_not_found() {
        let store = MemoryStore::new();
        let err = SupplierService::delete(&store, Some(999)).await.unwrap_err();
        assert_eq!(err.to_string(), "Supplier not found");
    }
}
