//! Materials API routes

use axum::Router;
use domain_materials::{handlers, MaterialService, PgMaterialRepository};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgMaterialRepository::new(state.db.clone());
    handlers::router(MaterialService::new(repository))
}
