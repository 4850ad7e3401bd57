//! Materials Domain
//!
//! Catalog materials: create and paginated listing.
//!
//! ```rust,no_run
//! use database::ReadWriteDb;
//! use domain_materials::{handlers, MaterialService, PgMaterialRepository};
//!
//! # fn example(db: ReadWriteDb) {
//! let service = MaterialService::new(PgMaterialRepository::new(db));
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

pub use error::{MaterialError, MaterialResult};
pub use models::{Material, MaterialListQuery, MaterialResponse, PayloadMaterial};
pub use postgres::PgMaterialRepository;
pub use repository::MaterialRepository;
pub use service::MaterialService;
