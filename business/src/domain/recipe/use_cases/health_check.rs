use async_trait::async_trait;

use crate::domain::recipe::source::CatalogHealth;

#[async_trait]
pub trait CheckRecipeSourcesHealthUseCase: Send + Sync {
    async fn execute(&self) -> CatalogHealth;
}
