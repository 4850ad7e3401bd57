//! API routes module

pub mod health;
pub mod materials;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes served under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/materials", materials::router(state))
}
