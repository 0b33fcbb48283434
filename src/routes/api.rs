//! `/auth`, `/user`, `/inventory` and `/suppliers` routes.

use crate::handlers::{auth, inventory, supplier, user};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/pending", get(auth::pending))
        .route("/auth/approve/:id", put(auth::approve))
        .route("/auth/reject/:id", delete(auth::reject))
        .route("/user/update/:id", put(user::update_field))
        .route("/user/by-userid/:userid", get(user::by_userid))
        .route("/inventory", get(inventory::list))
        .route("/inventory/create", post(inventory::create))
        .route(
            "/inventory/:item_id",
            put(inventory::update).delete(inventory::delete),
        )
        .route("/suppliers", get(supplier::list))
        .route("/suppliers/create", post(supplier::create))
        .route(
            "/suppliers/:supplier_id",
            put(supplier::update).delete(supplier::delete),
        )
        // Size is capped by the outer RequestBodyLimitLayer instead.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
