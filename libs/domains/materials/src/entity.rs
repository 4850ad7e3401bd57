use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Material;

/// Sea-ORM Entity for the materials table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub material_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Material {
    fn from(model: Model) -> Self {
        Self {
            material_id: model.material_id,
            title: model.title,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
        }
    }
}

impl From<&Material> for ActiveModel {
    fn from(material: &Material) -> Self {
        ActiveModel {
            material_id: Set(material.material_id),
            title: Set(material.title.clone()),
            description: Set(material.description.clone()),
            created_at: Set(material.created_at.into()),
            updated_at: Set(material.updated_at.map(Into::into)),
        }
    }
}
