//! Products Domain
//!
//! Products, their variants and each variant's images, persisted and read
//! back as one aggregate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit records
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, state checks (soft delete, existence)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Transactional writes across products/variants/images
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, payloads, response projections
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::ReadWriteDb;
//! use domain_products::{handlers, PgProductRepository, ProductService};
//!
//! # fn example(db: ReadWriteDb) {
//! let repository = PgProductRepository::new(db);
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{
    Image, PayloadProduct, PayloadProductAndVariant, PayloadVariant, Product, ProductAndVariant,
    ProductAndVariantResponse, ProductListQuery, ProductResponse, ProductSortField,
    ProductWithVariants, ProductWithVariantsResponse, Variant, VariantResponse, VariantStatus,
};
pub use postgres::PgProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
