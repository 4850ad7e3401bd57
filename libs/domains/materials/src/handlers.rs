use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, PageQuery, ValidatedJson, client_ip,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use tracing::instrument;
use utoipa::OpenApi;

use crate::error::MaterialResult;
use crate::models::{MaterialResponse, PayloadMaterial};
use crate::repository::MaterialRepository;
use crate::service::MaterialService;

pub const TAG: &str = "materials";

/// OpenAPI documentation for Materials API
#[derive(OpenApi)]
#[openapi(
    paths(list_materials, create_material),
    components(
        schemas(PayloadMaterial, MaterialResponse),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Catalog materials")
    )
)]
pub struct ApiDoc;

pub fn router<R: MaterialRepository + 'static>(service: MaterialService<R>) -> Router {
    Router::new()
        .route("/", get(list_materials).post(create_material))
        .with_state(Arc::new(service))
}

/// List materials, newest or oldest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of materials", body = Vec<MaterialResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service))]
async fn list_materials<R: MaterialRepository>(
    State(service): State<Arc<MaterialService<R>>>,
    page: PageQuery,
) -> MaterialResult<Json<Vec<MaterialResponse>>> {
    let materials = service.list(&page).await?;
    Ok(Json(materials.into_iter().map(Into::into).collect()))
}

/// Create a material
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = PayloadMaterial,
    responses(
        (status = 201, description = "Material created", body = MaterialResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip_all)]
async fn create_material<R: MaterialRepository>(
    State(service): State<Arc<MaterialService<R>>>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<PayloadMaterial>,
) -> MaterialResult<impl IntoResponse> {
    let material = service.create(payload).await?;

    AuditEvent::new(None, "material.create", AuditOutcome::Success)
        .with_resource("material", material.material_id)
        .with_ip(client_ip(&headers))
        .log();

    Ok((StatusCode::CREATED, Json(MaterialResponse::from(material))))
}
