use async_trait::async_trait;

use crate::error::MaterialResult;
use crate::models::{Material, MaterialListQuery};

/// Repository trait for Material persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// Insert a new material
    async fn create(&self, material: Material) -> MaterialResult<Material>;

    /// One page of materials ordered by creation time
    async fn list(&self, query: MaterialListQuery) -> MaterialResult<Vec<Material>>;
}
