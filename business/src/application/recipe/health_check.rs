use std::sync::Arc;

use async_trait::async_trait;

use crate::application::recipe::orchestrator::RecipeOrchestrator;
use crate::domain::logger::Logger;
use crate::domain::recipe::source::CatalogHealth;
use crate::domain::recipe::use_cases::health_check::CheckRecipeSourcesHealthUseCase;

pub struct CheckRecipeSourcesHealthUseCaseImpl {
    pub orchestrator: Arc<RecipeOrchestrator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CheckRecipeSourcesHealthUseCase for CheckRecipeSourcesHealthUseCaseImpl {
    async fn execute(&self) -> CatalogHealth {
        let health = self.orchestrator.health_check().await;
        if health.healthy {
            self.logger.debug("All recipe sources healthy");
        } else {
            let unhealthy: Vec<&str> = health
                .sources
                .iter()
                .filter(|report| !report.health.healthy)
                .map(|report| report.metadata.id.as_str())
                .collect();
            self.logger.warn(&format!(
                "Recipe catalog degraded; unhealthy sources: {}",
                unhealthy.join(", ")
            ));
        }
        health
    }
}
