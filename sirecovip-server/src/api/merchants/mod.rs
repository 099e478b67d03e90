//! Merchant API Module

mod form;
mod handler;

pub use form::{MerchantForm, MerchantInsert, MerchantUpdate, UploadedFile};

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Merchant router (all routes behind the auth middleware)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/merchants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
