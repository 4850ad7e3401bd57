//! Sea-ORM entities for the `products`, `variants` and `images` tables.

pub mod image;
pub mod product;
pub mod variant;
