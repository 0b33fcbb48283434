//! Persistence seam: user, inventory and supplier rows.
//!
//! Writes are atomic per row only. Update and delete report whether a row matched
//! instead of failing, so callers decide how to surface a missing key.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};

use crate::error::StoreError;
use crate::models::{
    InventoryItem, ItemChanges, NewUser, Supplier, SupplierChanges, User, UserField,
};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert a user and return its generated id. Duplicate `userid` is a conflict.
    async fn insert_user(&self, user: NewUser) -> Result<i64, StoreError>;
    async fn find_user_by_userid(&self, userid: &str) -> Result<Option<User>, StoreError>;
    async fn list_pending_users(&self) -> Result<Vec<User>, StoreError>;
    async fn approve_user(&self, id: i64) -> Result<bool, StoreError>;
    async fn delete_user(&self, id: i64) -> Result<bool, StoreError>;
    async fn update_user_field(
        &self,
        id: i64,
        field: UserField,
        value: Option<&str>,
    ) -> Result<bool, StoreError>;
    async fn admin_exists(&self) -> Result<bool, StoreError>;

    async fn list_items(&self) -> Result<Vec<InventoryItem>, StoreError>;
    async fn insert_item(&self, item: &InventoryItem) -> Result<(), StoreError>;
    async fn update_item(&self, item_id: i64, changes: &ItemChanges) -> Result<bool, StoreError>;
    /// Delete by id, returning the removed row so its image can be cleaned up.
    async fn delete_item(&self, item_id: i64) -> Result<Option<InventoryItem>, StoreError>;

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, StoreError>;
    async fn insert_supplier(&self, supplier: &Supplier) -> Result<(), StoreError>;
    async fn update_supplier(
        &self,
        supplier_id: i64,
        changes: &SupplierChanges,
    ) -> Result<bool, StoreError>;
    async fn delete_supplier(&self, supplier_id: i64) -> Result<bool, StoreError>;
}
