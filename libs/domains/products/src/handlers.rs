use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, PageQuery, UuidPath, ValidatedJson, client_ip,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    PayloadProduct, PayloadProductAndVariant, PayloadVariant, ProductAndVariantResponse,
    ProductResponse, ProductWithVariantsResponse, VariantResponse, VariantStatus,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        soft_delete_product,
        hard_delete_product,
        add_variant,
    ),
    components(
        schemas(
            PayloadProduct,
            PayloadProductAndVariant,
            PayloadVariant,
            ProductResponse,
            VariantResponse,
            VariantStatus,
            ProductAndVariantResponse,
            ProductWithVariantsResponse,
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Products, variants and images")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product).put(update_product))
        .route("/soft/{id}", delete(soft_delete_product))
        .route("/hard/{id}", delete(hard_delete_product))
        .route("/add-variant/{id}", post(add_variant))
        .with_state(shared_service)
}

/// List products, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of products", body = Vec<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service))]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    page: PageQuery,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.list(&page).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Create a product with its first variant and images
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = PayloadProductAndVariant,
    responses(
        (status = 201, description = "Product created", body = ProductAndVariantResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %payload.user_id))]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<PayloadProductAndVariant>,
) -> ProductResult<impl IntoResponse> {
    let created = service.create_with_variant(payload).await?;

    AuditEvent::new(
        Some(created.product.user_id),
        "product.create",
        AuditOutcome::Success,
    )
    .with_resource("product", created.product.product_id)
    .with_ip(client_ip(&headers))
    .with_details(json!({
        "product_name": created.product.product_name,
        "brand_id": created.product.brand_id,
        "variant_id": created.variant.variant_id,
        "images": created.variant.images.len(),
    }))
    .log();

    Ok((
        StatusCode::CREATED,
        Json(ProductAndVariantResponse::from(created)),
    ))
}

/// Get a product with all of its variants and their images
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductWithVariantsResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service))]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductWithVariantsResponse>> {
    let product = service.get_with_variants(id).await?;
    Ok(Json(product.into()))
}

/// Update a product's name and brand
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = PayloadProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service, headers, payload))]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<PayloadProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let actor = payload.user_id;
    let product = service.update(id, payload).await?;

    AuditEvent::new(Some(actor), "product.update", AuditOutcome::Success)
        .with_resource("product", id)
        .with_ip(client_ip(&headers))
        .with_details(json!({
            "product_name": product.product_name,
            "brand_id": product.brand_id,
        }))
        .log();

    Ok(Json(product.into()))
}

/// Soft-delete a product
#[utoipa::path(
    delete,
    path = "/soft/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = PayloadProduct,
    responses(
        (status = 200, description = "Product marked deleted", body = ProductResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service, headers, payload))]
async fn soft_delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<PayloadProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let actor = payload.user_id;
    let product = service.soft_delete(id, payload).await?;

    AuditEvent::new(Some(actor), "product.soft_delete", AuditOutcome::Success)
        .with_resource("product", id)
        .with_ip(client_ip(&headers))
        .log();

    Ok(Json(product.into()))
}

/// Permanently delete a product, its variants and their images
#[utoipa::path(
    delete,
    path = "/hard/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = PayloadProduct,
    responses(
        (status = 204, description = "Product removed"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service, headers, payload))]
async fn hard_delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<PayloadProduct>,
) -> ProductResult<impl IntoResponse> {
    let actor = payload.user_id;
    service.hard_delete(id, payload).await?;

    AuditEvent::new(Some(actor), "product.hard_delete", AuditOutcome::Success)
        .with_resource("product", id)
        .with_ip(client_ip(&headers))
        .log();

    Ok(StatusCode::NO_CONTENT)
}

/// Add a variant (with images) to an existing product
#[utoipa::path(
    post,
    path = "/add-variant/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = PayloadVariant,
    responses(
        (status = 201, description = "Variant created", body = VariantResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service, headers, payload))]
async fn add_variant<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<PayloadVariant>,
) -> ProductResult<impl IntoResponse> {
    let variant = service.add_variant(id, payload).await?;

    AuditEvent::new(None, "product.add_variant", AuditOutcome::Success)
        .with_resource("product", id)
        .with_ip(client_ip(&headers))
        .with_details(json!({ "variant_id": variant.variant_id }))
        .log();

    Ok((StatusCode::CREATED, Json(VariantResponse::from(variant))))
}
