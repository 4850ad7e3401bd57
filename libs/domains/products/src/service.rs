use axum_helpers::PageQuery;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    PayloadProduct, PayloadProductAndVariant, PayloadVariant, Product, ProductAndVariant,
    ProductListQuery, ProductWithVariants, Variant,
};
use crate::repository::ProductRepository;

/// Service layer for the product aggregate
///
/// Payloads are validated here, before anything reaches the repository.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a product together with its first variant and that variant's images
    #[instrument(skip_all, fields(user_id = %payload.user_id))]
    pub async fn create_with_variant(
        &self,
        payload: PayloadProductAndVariant,
    ) -> ProductResult<ProductAndVariant> {
        payload.validate()?;

        let aggregate = ProductAndVariant::from_payload(payload);
        self.repository.create_with_variant(aggregate).await
    }

    /// Add a variant to a product that is not soft-deleted
    #[instrument(skip(self, payload))]
    pub async fn add_variant(
        &self,
        product_id: Uuid,
        payload: PayloadVariant,
    ) -> ProductResult<Variant> {
        payload.validate()?;

        let product = self.repository.find_by_id(product_id).await?;
        if product.is_deleted() {
            return Err(ProductError::Conflict(format!(
                "Product {product_id} is deleted"
            )));
        }

        let variant = Variant::from_payload(payload, product_id, product.user_id);
        self.repository.add_variant(variant).await
    }

    /// One page of products, ordered by the requested column
    #[instrument(skip_all)]
    pub async fn list(&self, page: &PageQuery) -> ProductResult<Vec<Product>> {
        let query = ProductListQuery::try_from(page)?;
        self.repository.list(query).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> ProductResult<Product> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_with_variants(&self, id: Uuid) -> ProductResult<ProductWithVariants> {
        self.repository.find_with_variants(id).await
    }

    /// Rename or re-brand a product
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: Uuid, payload: PayloadProduct) -> ProductResult<Product> {
        payload.validate()?;

        let mut product = self.repository.find_by_id(id).await?;
        if product.is_deleted() {
            return Err(ProductError::Conflict(format!("Product {id} is deleted")));
        }

        product.apply_update(payload)?;
        self.repository.update(product).await
    }

    /// Mark a product deleted; a second call is a conflict
    #[instrument(skip(self, payload))]
    pub async fn soft_delete(&self, id: Uuid, payload: PayloadProduct) -> ProductResult<Product> {
        payload.validate()?;

        let mut product = self.repository.find_by_id(id).await?;
        product.soft_delete(payload.user_id)?;
        self.repository.update(product).await
    }

    /// Remove a product row along with its variants and images
    #[instrument(skip(self, payload))]
    pub async fn hard_delete(&self, id: Uuid, payload: PayloadProduct) -> ProductResult<()> {
        payload.validate()?;

        self.repository.find_by_id(id).await?;
        self.repository.hard_delete(id).await
    }
}
