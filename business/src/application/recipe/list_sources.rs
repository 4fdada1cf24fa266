use std::sync::Arc;

use async_trait::async_trait;

use crate::application::recipe::orchestrator::RecipeOrchestrator;
use crate::domain::logger::Logger;
use crate::domain::recipe::source::SourceMetadata;
use crate::domain::recipe::use_cases::list_sources::ListRecipeSourcesUseCase;

pub struct ListRecipeSourcesUseCaseImpl {
    pub orchestrator: Arc<RecipeOrchestrator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListRecipeSourcesUseCase for ListRecipeSourcesUseCaseImpl {
    async fn execute(&self) -> Vec<SourceMetadata> {
        self.logger.debug("Listing recipe sources");
        self.orchestrator.get_sources().await
    }
}
