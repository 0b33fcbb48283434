//! Request-level operations over a [`crate::store::Store`]. Validation runs before any store access.

mod inventory;
pub mod password;
mod suppliers;
mod users;
mod validation;

pub use inventory::InventoryService;
pub use suppliers::SupplierService;
pub use users::{LoginRequest, SignupRequest, UpdateFieldRequest, UserService};
pub use validation::RequestValidator;
