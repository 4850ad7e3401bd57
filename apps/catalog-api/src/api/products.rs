//! Products API routes

use axum::Router;
use domain_products::{handlers, PgProductRepository, ProductService};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    handlers::router(ProductService::new(repository))
}
