use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductAndVariant, ProductListQuery, ProductWithVariants, Variant};

/// Storage for the product aggregate.
///
/// Implementations never retry: a failure is logged where it happens and
/// returned as one of the [`ProductError`](crate::ProductError) kinds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Existence probe by primary key
    async fn exists(&self, id: Uuid) -> ProductResult<bool>;

    /// Inserts the product, its variant and the variant's images in one
    /// transaction. Fails with `Conflict` when the product id is taken.
    async fn create_with_variant(
        &self,
        aggregate: ProductAndVariant,
    ) -> ProductResult<ProductAndVariant>;

    /// Inserts a variant and its images for an existing product
    async fn add_variant(&self, variant: Variant) -> ProductResult<Variant>;

    /// One page of products
    async fn list(&self, query: ProductListQuery) -> ProductResult<Vec<Product>>;

    /// `NotFound` when no row matches
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Product>;

    /// The product, its variants and each variant's images
    async fn find_with_variants(&self, id: Uuid) -> ProductResult<ProductWithVariants>;

    /// Persists the mutable fields of `product`, guarded by `product.version`.
    ///
    /// Returns the product with its new version. `NotFound` when the row is
    /// gone, `Conflict` when another writer got there first.
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Removes the product row; variants and images go with it
    async fn hard_delete(&self, id: Uuid) -> ProductResult<()>;
}
