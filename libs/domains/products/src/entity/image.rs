use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Image;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub image_id: Uuid,
    pub variant_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::variant::Entity",
        from = "Column::VariantId",
        to = "super::variant::Column::VariantId",
        on_delete = "Cascade"
    )]
    Variant,
}

impl Related<super::variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Image {
    fn from(model: Model) -> Self {
        Self {
            image_id: model.image_id,
            variant_id: model.variant_id,
            image_url: model.image_url,
            position: model.position,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
            created_by: model.created_by,
            updated_by: model.updated_by,
        }
    }
}

impl From<&Image> for ActiveModel {
    fn from(image: &Image) -> Self {
        ActiveModel {
            image_id: Set(image.image_id),
            variant_id: Set(image.variant_id),
            image_url: Set(image.image_url.clone()),
            position: Set(image.position),
            created_at: Set(image.created_at.into()),
            updated_at: Set(image.updated_at.map(Into::into)),
            created_by: Set(image.created_by),
            updated_by: Set(image.updated_by),
        }
    }
}
