//! Readiness endpoint; `/health` comes from `axum_helpers::health_router`

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::postgres::check_health;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> Response {
    let primary: HealthCheckFuture<'_> = Box::pin(async {
        check_health(state.db.writer())
            .await
            .map_err(|e| e.to_string())
    });
    let replica: HealthCheckFuture<'_> = Box::pin(async {
        check_health(state.db.reader())
            .await
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("primary", primary), ("replica", replica)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
