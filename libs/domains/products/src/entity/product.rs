use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Product;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub brand_id: Uuid,
    pub product_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub deleted_by: Option<Uuid>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::variant::Entity")]
    Variants,
}

impl Related<super::variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            product_id: model.product_id,
            user_id: model.user_id,
            brand_id: model.brand_id,
            product_name: model.product_name,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
            deleted_at: model.deleted_at.map(Into::into),
            created_by: model.created_by,
            updated_by: model.updated_by,
            deleted_by: model.deleted_by,
            version: model.version,
        }
    }
}

impl From<&Product> for ActiveModel {
    fn from(product: &Product) -> Self {
        ActiveModel {
            product_id: Set(product.product_id),
            user_id: Set(product.user_id),
            brand_id: Set(product.brand_id),
            product_name: Set(product.product_name.clone()),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.map(Into::into)),
            deleted_at: Set(product.deleted_at.map(Into::into)),
            created_by: Set(product.created_by),
            updated_by: Set(product.updated_by),
            deleted_by: Set(product.deleted_by),
            version: Set(product.version),
        }
    }
}
