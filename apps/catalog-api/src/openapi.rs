//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog: products with variants and images, and materials",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::handlers::ApiDoc),
        (path = "/api/materials", api = domain_materials::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
