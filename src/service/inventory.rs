//! Inventory items: list, create with optional image, update, delete.

use super::validation::RequestValidator;
use crate::error::AppError;
use crate::extractors::{FormData, ImageUpload};
use crate::models::{InventoryItem, ItemChanges};
use crate::store::Store;
use crate::uploads::UploadStore;

const CREATE_FIELDS: [&str; 6] = [
    "itemId",
    "itemName",
    "itemQuantity",
    "itemCost",
    "supplierName",
    "supplierId",
];

fn item_not_found() -> AppError {
    AppError::NotFound("Item not found".into())
}

async fn store_image(
    uploads: &UploadStore,
    image: Option<&ImageUpload>,
) -> Result<Option<String>, AppError> {
    match image {
        Some(img) => Ok(Some(uploads.save(&img.file_name, &img.bytes).await?)),
        None => Ok(None),
    }
}

pub struct InventoryService;

impl InventoryService {
    pub async fn list(store: &dyn Store) -> Result<Vec<InventoryItem>, AppError> {
        Ok(store.list_items().await?)
    }

    /// Validate, write the image (if any), then insert. A failed insert leaves the image on disk.
    pub async fn create(
        store: &dyn Store,
        uploads: &UploadStore,
        form: &FormData,
    ) -> Result<InventoryItem, AppError> {
        let fields = &form.fields;
        RequestValidator::require_item_fields(fields, &CREATE_FIELDS)?;
        let mut item = InventoryItem {
            item_id: RequestValidator::non_negative_integer(fields, "itemId")?,
            item_name: RequestValidator::required_text(fields, "itemName")?,
            item_quantity: RequestValidator::non_negative_integer(fields, "itemQuantity")?,
            item_cost: RequestValidator::non_negative_number(fields, "itemCost")?,
            supplier_name: RequestValidator::required_text(fields, "supplierName")?,
            supplier_id: RequestValidator::non_negative_integer(fields, "supplierId")?,
            image_path: None,
        };
        // Numeric strings like "0" pass the presence check but still count as missing.
        if item.item_id == 0 || item.item_quantity == 0 || item.item_cost == 0.0 || item.supplier_id == 0
        {
            return Err(AppError::Validation("All fields are required".into()));
        }
        item.image_path = store_image(uploads, form.image.as_ref()).await?;
        store.insert_item(&item).await?;
        tracing::info!(item_id = item.item_id, image = ?item.image_path, "item created");
        Ok(item)
    }

    /// Replace name, quantity, cost and supplier name. The image path only changes when a new
    /// image is supplied; the previous file is not removed.
    pub async fn update(
        store: &dyn Store,
        uploads: &UploadStore,
        item_id: Option<i64>,
        form: &FormData,
    ) -> Result<(), AppError> {
        let fields = &form.fields;
        let mut changes = ItemChanges {
            item_name: RequestValidator::required_text(fields, "itemName")?,
            item_quantity: RequestValidator::non_negative_integer(fields, "itemQuantity")?,
            item_cost: RequestValidator::non_negative_number(fields, "itemCost")?,
            supplier_name: RequestValidator::required_text(fields, "supplierName")?,
            image_path: None,
        };
        let item_id = item_id.ok_or_else(item_not_found)?;
        changes.image_path = store_image(uploads, form.image.as_ref()).await?;
        if !store.update_item(item_id, &changes).await? {
            return Err(item_not_found());
        }
        tracing::info!(item_id, new_image = changes.image_path.is_some(), "item updated");
        Ok(())
    }

    /// Delete the row, then its image. Image removal failures are logged only.
    pub async fn delete(
        store: &dyn Store,
        uploads: &UploadStore,
        item_id: Option<i64>,
    ) -> Result<(), AppError> {
        let item_id = item_id.ok_or_else(item_not_found)?;
        let removed = store.delete_item(item_id).await?.ok_or_else(item_not_found)?;
        if let Some(path) = removed.image_path.as_deref() {
            if let Err(e) = uploads.remove(path).await {
                tracing::warn!(item_id, path, error = %e, "could not remove item image");
            }
        }
        tracing::info!(item_id, "item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::FormFields;
    use crate::store::MemoryStore;
    use serde_json::{json, Value};

    fn form(v: Value, image: Option<ImageUpload>) -> FormData {
        let fields: FormFields = match v {
            Value::Object(map) => map.into_iter().collect(),
            _ => unreachable!(),
        };
        FormData { fields, image }
    }

    fn widget() -> Value {
        json!({
            "itemId": 10,
            "itemName": "Widget",
            "itemQuantity": 5,
            "itemCost": 2.5,
            "supplierName": "Acme",
            "supplierId": 1
        })
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_as_missing() {
        let store = MemoryStore::new();
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path());
        for quantity in [json!(0), json!("0")] {
            let mut body = widget();
            body["itemQuantity"] = quantity;
            let err = InventoryService::create(&store, &uploads, &form(body, None))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "All fields are required");
        }
        assert!(store.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_without_image_preserves_stored_path() {
        let store = MemoryStore::new();
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path());
        let image = ImageUpload {
            file_name: "w.png".into(),
            bytes: b"png".to_vec(),
        };
        let created = InventoryService::create(&store, &uploads, &form(widget(), Some(image)))
            .await
            .unwrap();
        let original_path = created.image_path.clone().unwrap();

        let update = json!({
            "itemName": "Widget v2",
            "itemQuantity": "0",
            "itemCost": "3",
            "supplierName": "Acme"
        });
        InventoryService::update(&store, &uploads, Some(10), &form(update, None))
            .await
            .unwrap();
        let items = store.list_items().await.unwrap();
        assert_eq!(items[0].item_name, "Widget v2");
        assert_eq!(items[0].item_quantity, 0);
        assert_eq!(items[0].image_path.as_deref(), Some(original_path.as_str()));
    }

    #[tokio::test]
    async fn update_of_missing_item_is_not_found() {
        let store = MemoryStore::new();
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path());
        let update = json!({
            "itemName": "Ghost",
            "itemQuantity": 1,
            "itemCost": 1,
            "supplierName": "Acme"
        });
        let err = InventoryService::update(&store, &uploads, Some(99), &form(update, None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Item not found");
    }

    #[tokio::test]
    async fn delete_removes_row_and_image() {
        let store = MemoryStore::new();
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path());
        let image = ImageUpload {
            file_name: "w.png".into(),
            bytes: b"png".to_vec(),
        };
        InventoryService::create(&store, &uploads, &form(widget(), Some(image)))
            .await
            .unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        InventoryService::delete(&store, &uploads, Some(10)).await.unwrap();
        assert!(store.list_items().await.unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let err = InventoryService::delete(&store, &uploads, Some(10)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
