use axum_helpers::{PageQuery, SortOrder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{MaterialError, MaterialResult};

/// Material record
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub material_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Material {
    pub fn from_payload(payload: PayloadMaterial) -> Self {
        Self {
            material_id: Uuid::new_v4(),
            title: payload.title,
            description: payload.description,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMaterial {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    pub material_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Material> for MaterialResponse {
    fn from(m: Material) -> Self {
        Self {
            material_id: m.material_id,
            title: m.title,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Materials are always ordered by creation time; only direction and bounds vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialListQuery {
    pub sort: SortOrder,
    pub limit: u64,
    pub offset: u64,
}

impl TryFrom<&PageQuery> for MaterialListQuery {
    type Error = MaterialError;

    fn try_from(page: &PageQuery) -> MaterialResult<Self> {
        page.validate()?;

        if let Some(field) = page.field().filter(|f| *f != "created_at") {
            return Err(MaterialError::Validation(format!(
                "materials can only be sorted by created_at, not '{field}'"
            )));
        }

        Ok(Self {
            sort: page.sort,
            limit: page.limit,
            offset: page.offset(),
        })
    }
}
