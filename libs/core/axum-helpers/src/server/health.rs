use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::{BoxFuture, join_all};
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A named dependency probe for the readiness endpoint
pub type HealthCheckFuture<'a> = BoxFuture<'a, Result<(), String>>;

/// Runs every probe concurrently.
///
/// 200 with `{"status": "ready", "<name>": "connected", ...}` when all pass,
/// 503 with the failing probes marked `disconnected` otherwise.
///
/// ```ignore
/// run_health_checks(vec![
///     ("primary", Box::pin(async { check_health(db.writer()).await.map_err(|e| e.to_string()) })),
///     ("replica", Box::pin(async { check_health(db.reader()).await.map_err(|e| e.to_string()) })),
/// ])
/// .await
/// ```
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> Response {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(probes).await;

    let mut body = Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        let state = match result {
            Ok(()) => "connected",
            Err(e) => {
                tracing::error!(check = name, error = %e, "Readiness check failed");
                all_healthy = false;
                "disconnected"
            }
        };
        body.insert(name.to_string(), json!(state));
    }

    let (status, label) = if all_healthy {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    };
    body.insert("status".to_string(), json!(label));

    (status, Json(Value::Object(body))).into_response()
}

/// Liveness: 200 whenever the process can answer.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// `/health` route carrying the binary's name and version
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
