use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Variant, VariantStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "variants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub variant_name: String,
    pub price: f64,
    pub status: VariantStatus,
    pub quantity: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::ProductId",
        on_delete = "Cascade"
    )]
    Product,
    #[sea_orm(has_many = "super::image::Entity")]
    Images,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Images are loaded separately and attached by the repository.
impl From<Model> for Variant {
    fn from(model: Model) -> Self {
        Self {
            variant_id: model.variant_id,
            product_id: model.product_id,
            variant_name: model.variant_name,
            price: model.price,
            status: model.status,
            quantity: model.quantity,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
            deleted_at: model.deleted_at.map(Into::into),
            created_by: model.created_by,
            updated_by: model.updated_by,
            deleted_by: model.deleted_by,
            images: Vec::new(),
        }
    }
}

impl From<&Variant> for ActiveModel {
    fn from(variant: &Variant) -> Self {
        ActiveModel {
            variant_id: Set(variant.variant_id),
            product_id: Set(variant.product_id),
            variant_name: Set(variant.variant_name.clone()),
            price: Set(variant.price),
            status: Set(variant.status),
            quantity: Set(variant.quantity),
            created_at: Set(variant.created_at.into()),
            updated_at: Set(variant.updated_at.map(Into::into)),
            deleted_at: Set(variant.deleted_at.map(Into::into)),
            created_by: Set(variant.created_by),
            updated_by: Set(variant.updated_by),
            deleted_by: Set(variant.deleted_by),
        }
    }
}
