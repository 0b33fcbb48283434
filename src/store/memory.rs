//! In-process store with the same semantics as [`super::PgStore`]. Backs the test suite and
//! `DATABASE_URL=memory` runs; nothing survives a restart.

use super::Store;
use crate::error::StoreError;
use crate::models::{
    InventoryItem, ItemChanges, NewUser, Role, Supplier, SupplierChanges, User, UserField,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    next_user_id: i64,
    users: BTreeMap<i64, User>,
    items: BTreeMap<i64, InventoryItem>,
    suppliers: BTreeMap<i64, Supplier>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }

    async fn insert_user(&self, user: NewUser) -> Result<i64, StoreError> {
        let mut t = self.lock()?;
        if t.users.values().any(|u| u.userid == user.userid) {
            return Err(StoreError::Conflict("User ID"));
        }
        t.next_user_id += 1;
        let id = t.next_user_id;
        t.users.insert(
            id,
            User {
                id,
                name: user.name,
                userid: user.userid,
                password: user.password,
                email: user.email,
                contact: user.contact,
                approved: user.approved,
                role: user.role,
            },
        );
        Ok(id)
    }

    async fn find_user_by_userid(&self, userid: &str) -> Result<Option<User>, StoreError> {
        let t = self.lock()?;
        Ok(t.users.values().find(|u| u.userid == userid).cloned())
    }

    async fn list_pending_users(&self) -> Result<Vec<User>, StoreError> {
        let t = self.lock()?;
        Ok(t.users.values().filter(|u| !u.approved).cloned().collect())
    }

    async fn approve_user(&self, id: i64) -> Result<bool, StoreError> {
        let mut t = self.lock()?;
        Ok(match t.users.get_mut(&id) {
            Some(user) => {
                user.approved = true;
                true
            }
            None => false,
        })
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.lock()?.users.remove(&id).is_some())
    }

    async fn update_user_field(
        &self,
        id: i64,
        field: UserField,
        value: Option<&str>,
    ) -> Result<bool, StoreError> {
        let mut t = self.lock()?;
        let Some(user) = t.users.get_mut(&id) else {
            return Ok(false);
        };
        let value = value.map(str::to_string);
        match field {
            UserField::Name => user.name = value,
            UserField::Email => user.email = value,
            UserField::Contact => user.contact = value,
        }
        Ok(true)
    }

    async fn admin_exists(&self) -> Result<bool, StoreError> {
        let t = self.lock()?;
        Ok(t.users.values().any(|u| u.role == Role::Admin))
    }

    async fn list_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(self.lock()?.items.values().cloned().collect())
    }

    async fn insert_item(&self, item: &InventoryItem) -> Result<(), StoreError> {
        let mut t = self.lock()?;
        if t.items.contains_key(&item.item_id) {
            return Err(StoreError::Conflict("Item ID"));
        }
        t.items.insert(item.item_id, item.clone());
        Ok(())
    }

    async fn update_item(&self, item_id: i64, changes: &ItemChanges) -> Result<bool, StoreError> {
        let mut t = self.lock()?;
        let Some(item) = t.items.get_mut(&item_id) else {
            return Ok(false);
        };
        item.item_name = changes.item_name.clone();
        item.item_quantity = changes.item_quantity;
        item.item_cost = changes.item_cost;
        item.supplier_name = changes.supplier_name.clone();
        if let Some(path) = &changes.image_path {
            item.image_path = Some(path.clone());
        }
        Ok(true)
    }

    async fn delete_item(&self, item_id: i64) -> Result<Option<InventoryItem>, StoreError> {
        Ok(self.lock()?.items.remove(&item_id))
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, StoreError> {
        Ok(self.lock()?.suppliers.values().cloned().collect())
    }

    async fn insert_supplier(&self, supplier: &Supplier) -> Result<(), StoreError> {
        let mut t = self.lock()?;
        if t.suppliers.contains_key(&supplier.supplier_id) {
            return Err(StoreError::Conflict("Supplier ID"));
        }
        t.suppliers.insert(supplier.supplier_id, supplier.clone());
        Ok(())
    }

    async fn update_supplier(
        &self,
        supplier_id: i64,
        changes: &SupplierChanges,
    ) -> Result<bool, StoreError> {
        let mut t = self.lock()?;
        let Some(supplier) = t.suppliers.get_mut(&supplier_id) else {
            return Ok(false);
        };
        supplier.supplier_name = changes.supplier_name.clone();
        supplier.contact = changes.contact.clone();
        supplier.address = changes.address.clone();
        supplier.email = changes.email.clone();
        Ok(true)
    }

    async fn delete_supplier(&self, supplier_id: i64) -> Result<bool, StoreError> {
        Ok(self.lock()?.suppliers.remove(&supplier_id).is_some())
    }
}
