use axum_helpers::PageQuery;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::MaterialResult;
use crate::models::{Material, MaterialListQuery, PayloadMaterial};
use crate::repository::MaterialRepository;

/// Service layer for Material business logic
#[derive(Clone)]
pub struct MaterialService<R: MaterialRepository> {
    repository: Arc<R>,
}

impl<R: MaterialRepository> MaterialService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip_all)]
    pub async fn create(&self, payload: PayloadMaterial) -> MaterialResult<Material> {
        payload.validate()?;
        self.repository.create(Material::from_payload(payload)).await
    }

    #[instrument(skip_all)]
    pub async fn list(&self, page: &PageQuery) -> MaterialResult<Vec<Material>> {
        let query = MaterialListQuery::try_from(page)?;
        self.repository.list(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaterialError;
    use crate::repository::MockMaterialRepository;
    use axum_helpers::SortOrder;

    #[tokio::test]
    async fn test_create_validates_before_repository() {
        let service = MaterialService::new(MockMaterialRepository::new());

        let err = service
            .create(PayloadMaterial {
                title: String::new(),
                description: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MaterialError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let mut repo = MockMaterialRepository::new();
        repo.expect_create()
            .withf(|m| !m.material_id.is_nil() && m.title == "Leather")
            .times(1)
            .returning(Ok);

        let service = MaterialService::new(repo);
        let material = service
            .create(PayloadMaterial {
                title: "Leather".to_string(),
                description: "Full grain".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(material.description, "Full grain");
    }

    #[tokio::test]
    async fn test_list_passes_bounds() {
        let mut repo = MockMaterialRepository::new();
        repo.expect_list()
            .withf(|q| q.limit == 5 && q.offset == 10 && q.sort == SortOrder::Desc)
            .returning(|_| Ok(vec![]));

        let service = MaterialService::new(repo);
        let mut page = PageQuery::new(3, 5);
        page.sort = SortOrder::Desc;
        assert!(service.list(&page).await.unwrap().is_empty());
    }
}
