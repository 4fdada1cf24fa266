use std::sync::Arc;

use async_trait::async_trait;

use crate::application::recipe::orchestrator::RecipeOrchestrator;
use crate::domain::logger::Logger;
use crate::domain::recipe::errors::RecipeError;
use crate::domain::recipe::model::Recipe;
use crate::domain::recipe::use_cases::search::{SearchRecipesParams, SearchRecipesUseCase};

pub struct SearchRecipesUseCaseImpl {
    pub orchestrator: Arc<RecipeOrchestrator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SearchRecipesUseCase for SearchRecipesUseCaseImpl {
    async fn execute(&self, params: SearchRecipesParams) -> Result<Vec<Recipe>, RecipeError> {
        let query = params.query.trim();
        if query.is_empty() {
            return Err(RecipeError::QueryEmpty);
        }

        self.logger.info(&format!("Searching recipes for: {}", query));
        let recipes = self.orchestrator.search(query, &params.filters).await;
        self.logger
            .info(&format!("Found {} recipes for: {}", recipes.len(), query));

        Ok(recipes)
    }
}
