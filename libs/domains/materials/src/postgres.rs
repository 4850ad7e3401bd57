use async_trait::async_trait;
use axum_helpers::SortOrder;
use database::ReadWriteDb;
use sea_orm::{EntityTrait, Order, QueryOrder, QuerySelect};
use tracing::{error, info};

use crate::{
    entity,
    error::{MaterialError, MaterialResult},
    models::{Material, MaterialListQuery},
    repository::MaterialRepository,
};

#[derive(Clone)]
pub struct PgMaterialRepository {
    db: ReadWriteDb,
}

impl PgMaterialRepository {
    pub fn new(db: ReadWriteDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaterialRepository for PgMaterialRepository {
    async fn create(&self, material: Material) -> MaterialResult<Material> {
        let material_id = material.material_id;
        let model = entity::ActiveModel::from(&material);

        self.db
            .with_transaction(move |txn| {
                Box::pin(async move {
                    entity::Entity::insert(model)
                        .exec_without_returning(txn)
                        .await
                        .map_err(|e| {
                            error!(%material_id, error = %e, "Failed to insert material");
                            MaterialError::from(e)
                        })?;
                    Ok::<_, MaterialError>(())
                })
            })
            .await?;

        info!(%material_id, "Created material");
        Ok(material)
    }

    async fn list(&self, query: MaterialListQuery) -> MaterialResult<Vec<Material>> {
        let order = match query.sort {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let models = entity::Entity::find()
            .order_by(entity::Column::CreatedAt, order)
            .order_by_asc(entity::Column::MaterialId)
            .limit(query.limit)
            .offset(query.offset)
            .all(self.db.reader())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list materials");
                MaterialError::from(e)
            })?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
