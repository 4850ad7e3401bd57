use async_trait::async_trait;
use axum_helpers::SortOrder;
use database::ReadWriteDb;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    entity::{image, product, variant},
    error::{ProductError, ProductResult},
    models::{Image, Product, ProductAndVariant, ProductListQuery, ProductWithVariants, Variant},
    repository::ProductRepository,
};

/// Logs a store failure against the product it concerns and converts it.
fn db_failure(context: &'static str, product_id: Uuid) -> impl FnOnce(DbErr) -> ProductError {
    move |err| {
        error!(%product_id, error = %err, "{context}");
        ProductError::from(err)
    }
}

/// Relational implementation over a read/write connection pair.
///
/// Single-row and aggregate reads use the read connection. Writes, and the
/// existence probes that guard them, use the primary.
#[derive(Clone)]
pub struct PgProductRepository {
    db: ReadWriteDb,
}

impl PgProductRepository {
    pub fn new(db: ReadWriteDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        let count = product::Entity::find_by_id(id)
            .count(self.db.writer())
            .await
            .map_err(db_failure("Failed to probe product", id))?;

        Ok(count > 0)
    }

    async fn create_with_variant(
        &self,
        aggregate: ProductAndVariant,
    ) -> ProductResult<ProductAndVariant> {
        let product_id = aggregate.product.product_id;

        if self.exists(product_id).await? {
            warn!(%product_id, "Product already exists");
            return Err(ProductError::Conflict(format!(
                "Product {product_id} already exists"
            )));
        }

        let product = product::ActiveModel::from(&aggregate.product);
        let variant = variant::ActiveModel::from(&aggregate.variant);
        let images: Vec<image::ActiveModel> =
            aggregate.variant.images.iter().map(Into::into).collect();

        self.db
            .with_transaction(move |txn| {
                Box::pin(async move {
                    product::Entity::insert(product)
                        .exec_without_returning(txn)
                        .await
                        .map_err(db_failure("Failed to insert product", product_id))?;

                    variant::Entity::insert(variant)
                        .exec_without_returning(txn)
                        .await
                        .map_err(db_failure("Failed to insert variant", product_id))?;

                    for image in images {
                        image::Entity::insert(image)
                            .exec_without_returning(txn)
                            .await
                            .map_err(db_failure("Failed to insert image", product_id))?;
                    }

                    Ok::<_, ProductError>(())
                })
            })
            .await?;

        info!(
            %product_id,
            variant_id = %aggregate.variant.variant_id,
            images = aggregate.variant.images.len(),
            "Created product with variant"
        );
        Ok(aggregate)
    }

    async fn add_variant(&self, variant: Variant) -> ProductResult<Variant> {
        let product_id = variant.product_id;
        let model = variant::ActiveModel::from(&variant);
        let images: Vec<image::ActiveModel> = variant.images.iter().map(Into::into).collect();

        self.db
            .with_transaction(move |txn| {
                Box::pin(async move {
                    variant::Entity::insert(model)
                        .exec_without_returning(txn)
                        .await
                        .map_err(db_failure("Failed to insert variant", product_id))?;

                    for image in images {
                        image::Entity::insert(image)
                            .exec_without_returning(txn)
                            .await
                            .map_err(db_failure("Failed to insert image", product_id))?;
                    }

                    Ok::<_, ProductError>(())
                })
            })
            .await?;

        info!(%product_id, variant_id = %variant.variant_id, "Added variant");
        Ok(variant)
    }

    async fn list(&self, query: ProductListQuery) -> ProductResult<Vec<Product>> {
        let order = match query.sort {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let models = product::Entity::find()
            .order_by(query.field.column(), order)
            .order_by_asc(product::Column::ProductId)
            .limit(query.limit)
            .offset(query.offset)
            .all(self.db.reader())
            .await
            .map_err(|e| {
                error!(error = %e, field = %query.field, "Failed to list products");
                ProductError::from(e)
            })?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Product> {
        product::Entity::find_by_id(id)
            .one(self.db.reader())
            .await
            .map_err(db_failure("Failed to load product", id))?
            .map(Into::into)
            .ok_or_else(|| {
                debug!(product_id = %id, "Product not found");
                ProductError::NotFound(id)
            })
    }

    async fn find_with_variants(&self, id: Uuid) -> ProductResult<ProductWithVariants> {
        let product = self.find_by_id(id).await?;

        let variants = variant::Entity::find()
            .filter(variant::Column::ProductId.eq(id))
            .order_by_asc(variant::Column::CreatedAt)
            .order_by_asc(variant::Column::VariantId)
            .all(self.db.reader())
            .await
            .map_err(db_failure("Failed to load variants", id))?;

        let variant_ids: Vec<Uuid> = variants.iter().map(|v| v.variant_id).collect();
        let mut images_by_variant: HashMap<Uuid, Vec<Image>> = HashMap::new();

        if !variant_ids.is_empty() {
            let images = image::Entity::find()
                .filter(image::Column::VariantId.is_in(variant_ids))
                .order_by_asc(image::Column::Position)
                .order_by_asc(image::Column::ImageId)
                .all(self.db.reader())
                .await
                .map_err(db_failure("Failed to load images", id))?;

            for image in images {
                images_by_variant
                    .entry(image.variant_id)
                    .or_default()
                    .push(image.into());
            }
        }

        let variants = variants
            .into_iter()
            .map(|model| {
                let mut variant = Variant::from(model);
                variant.images = images_by_variant
                    .remove(&variant.variant_id)
                    .unwrap_or_default();
                variant
            })
            .collect();

        Ok(ProductWithVariants { product, variants })
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let id = product.product_id;

        if !self.exists(id).await? {
            return Err(ProductError::NotFound(id));
        }

        let expected_version = product.version;
        let mut updated = product;
        updated.version = expected_version + 1;

        let mut changes = product::ActiveModel::from(&updated);
        changes.product_id = NotSet;
        changes.user_id = NotSet;
        changes.created_at = NotSet;
        changes.created_by = NotSet;

        // Variants carry the product's audit trail.
        let variant_audit = variant::ActiveModel {
            updated_at: Set(updated.updated_at.map(Into::into)),
            updated_by: Set(updated.updated_by),
            deleted_at: Set(updated.deleted_at.map(Into::into)),
            deleted_by: Set(updated.deleted_by),
            ..Default::default()
        };

        self.db
            .with_transaction(move |txn| {
                Box::pin(async move {
                    let result = product::Entity::update_many()
                        .set(changes)
                        .filter(product::Column::ProductId.eq(id))
                        .filter(product::Column::Version.eq(expected_version))
                        .exec(txn)
                        .await
                        .map_err(db_failure("Failed to update product", id))?;

                    if result.rows_affected == 0 {
                        warn!(product_id = %id, expected_version, "Product changed concurrently");
                        return Err(ProductError::Conflict(format!(
                            "Product {id} was modified by another request"
                        )));
                    }

                    variant::Entity::update_many()
                        .set(variant_audit)
                        .filter(variant::Column::ProductId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(db_failure("Failed to update variants", id))?;

                    Ok(())
                })
            })
            .await?;

        info!(product_id = %id, version = updated.version, "Updated product");
        Ok(updated)
    }

    async fn hard_delete(&self, id: Uuid) -> ProductResult<()> {
        let rows_affected = self
            .db
            .with_transaction(move |txn| {
                Box::pin(async move {
                    let result = product::Entity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .map_err(db_failure("Failed to delete product", id))?;
                    Ok::<_, ProductError>(result.rows_affected)
                })
            })
            .await?;

        if rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        info!(product_id = %id, "Hard deleted product");
        Ok(())
    }
}
