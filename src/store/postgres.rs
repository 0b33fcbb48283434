//! PostgreSQL store. Tables are created on startup when missing; there are no migrations.

use super::Store;
use crate::error::StoreError;
use crate::models::{
    InventoryItem, ItemChanges, NewUser, Role, Supplier, SupplierChanges, User, UserField,
};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{ConnectOptions, FromRow, Row};
use std::str::FromStr;

const USERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT,
        userid TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        email TEXT,
        contact TEXT,
        approved BOOLEAN NOT NULL DEFAULT FALSE,
        role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'admin'))
    )
"#;

// supplier_id is a plain column: no foreign key to suppliers.
const INVENTORY_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS inventory (
        item_id BIGINT PRIMARY KEY,
        item_name TEXT NOT NULL,
        item_quantity BIGINT NOT NULL,
        item_cost DOUBLE PRECISION NOT NULL,
        supplier_name TEXT NOT NULL,
        supplier_id BIGINT NOT NULL,
        image_path TEXT
    )
"#;

const SUPPLIERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        supplier_id BIGINT PRIMARY KEY,
        supplier_name TEXT NOT NULL,
        contact TEXT NOT NULL,
        address TEXT,
        email TEXT
    )
"#;

const USER_COLUMNS: &str = "id, name, userid, password, email, contact, approved, role";
const ITEM_COLUMNS: &str =
    "item_id, item_name, item_quantity, item_cost, supplier_name, supplier_id, image_path";
const SUPPLIER_COLUMNS: &str = "supplier_id, supplier_name, contact, address, email";

/// Create the `users`, `inventory` and `suppliers` tables if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), StoreError> {
    for (table, ddl) in [
        ("users", USERS_DDL),
        ("inventory", INVENTORY_DDL),
        ("suppliers", SUPPLIERS_DDL),
    ] {
        sqlx::query(ddl).execute(pool).await?;
        tracing::info!(table, "table ready");
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| sqlx::Error::Configuration("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Map a unique violation to [`StoreError::Conflict`] naming `key`; anything else stays a db error.
fn conflict_or_db(e: sqlx::Error, key: &'static str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(key),
        _ => StoreError::Db(e),
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        Ok(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            userid: row.try_get("userid")?,
            password: row.try_get("password")?,
            email: row.try_get("email")?,
            contact: row.try_get("contact")?,
            approved: row.try_get("approved")?,
            role: Role::from_str(&role).map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".into(),
                source: e.into(),
            })?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for InventoryItem {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(InventoryItem {
            item_id: row.try_get("item_id")?,
            item_name: row.try_get("item_name")?,
            item_quantity: row.try_get("item_quantity")?,
            item_cost: row.try_get("item_cost")?,
            supplier_name: row.try_get("supplier_name")?,
            supplier_id: row.try_get("supplier_id")?,
            image_path: row.try_get("image_path")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Supplier {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Supplier {
            supplier_id: row.try_get("supplier_id")?,
            supplier_name: row.try_get("supplier_name")?,
            contact: row.try_get("contact")?,
            address: row.try_get("address")?,
            email: row.try_get("email")?,
        })
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, user: NewUser) -> Result<i64, StoreError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (name, userid, password, email, contact, approved, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.userid)
        .bind(&user.password)
        .bind(&user.email)
        .bind(&user.contact)
        .bind(user.approved)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, "User ID"))?;
        Ok(id)
    }

    async fn find_user_by_userid(&self, userid: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE userid = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(userid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_pending_users(&self) -> Result<Vec<User>, StoreError> {
        let sql = format!(
            "SELECT {} FROM users WHERE approved = FALSE ORDER BY id",
            USER_COLUMNS
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn approve_user(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE users SET approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_user_field(
        &self,
        id: i64,
        field: UserField,
        value: Option<&str>,
    ) -> Result<bool, StoreError> {
        // Column name comes from the UserField allow-list, never from the request.
        let sql = format!("UPDATE users SET {} = $1 WHERE id = $2", field.column());
        let result = sqlx::query(&sql)
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn admin_exists(&self) -> Result<bool, StoreError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE role = 'admin')")
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn list_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let sql = format!("SELECT {} FROM inventory ORDER BY item_id", ITEM_COLUMNS);
        let items = sqlx::query_as::<_, InventoryItem>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn insert_item(&self, item: &InventoryItem) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO inventory ({}) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            ITEM_COLUMNS
        );
        sqlx::query(&sql)
            .bind(item.item_id)
            .bind(&item.item_name)
            .bind(item.item_quantity)
            .bind(item.item_cost)
            .bind(&item.supplier_name)
            .bind(item.supplier_id)
            .bind(&item.image_path)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_or_db(e, "Item ID"))?;
        Ok(())
    }

    async fn update_item(&self, item_id: i64, changes: &ItemChanges) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET item_name = $1,
                item_quantity = $2,
                item_cost = $3,
                supplier_name = $4,
                image_path = COALESCE($5, image_path)
            WHERE item_id = $6
            "#,
        )
        .bind(&changes.item_name)
        .bind(changes.item_quantity)
        .bind(changes.item_cost)
        .bind(&changes.supplier_name)
        .bind(&changes.image_path)
        .bind(item_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_item(&self, item_id: i64) -> Result<Option<InventoryItem>, StoreError> {
        let sql = format!(
            "DELETE FROM inventory WHERE item_id = $1 RETURNING {}",
            ITEM_COLUMNS
        );
        let item = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, StoreError> {
        let sql = format!(
            "SELECT {} FROM suppliers ORDER BY supplier_id",
            SUPPLIER_COLUMNS
        );
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(suppliers)
    }

    async fn insert_supplier(&self, supplier: &Supplier) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO suppliers ({}) VALUES ($1, $2, $3, $4, $5)",
            SUPPLIER_COLUMNS
        );
        sqlx::query(&sql)
            .bind(supplier.supplier_id)
            .bind(&supplier.supplier_name)
            .bind(&supplier.contact)
            .bind(&supplier.address)
            .bind(&supplier.email)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_or_db(e, "Supplier ID"))?;
        Ok(())
    }

    async fn update_supplier(
        &self,
        supplier_id: i64,
        changes: &SupplierChanges,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE suppliers
            SET supplier_name = $1, contact = $2, address = $3, email = $4
            WHERE supplier_id = $5
            "#,
        )
        .bind(&changes.supplier_name)
        .bind(&changes.contact)
        .bind(&changes.address)
        .bind(&changes.email)
        .bind(supplier_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_supplier(&self, supplier_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM suppliers WHERE supplier_id = $1")
            .bind(supplier_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
