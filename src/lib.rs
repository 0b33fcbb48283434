//! Inventory admin backend: user signup with admin approval, inventory items with
//! optional images, and suppliers, served as a JSON REST API.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod uploads;

pub use config::{AdminSeed, AppConfig};
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{api_routes, app, common_routes, common_routes_with_ready};
pub use service::{InventoryService, SupplierService, UserService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, MemoryStore, PgStore, Store};
pub use uploads::UploadStore;
