use async_trait::async_trait;

use crate::domain::recipe::source::SourceMetadata;

#[async_trait]
pub trait ListRecipeSourcesUseCase: Send + Sync {
    async fn execute(&self) -> Vec<SourceMetadata>;
}
