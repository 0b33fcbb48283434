//! Shared application state for all routes. Holds no request data between calls.

use crate::store::Store;
use crate::uploads::UploadStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, uploads: UploadStore) -> Self {
        AppState { store, uploads }
    }
}
