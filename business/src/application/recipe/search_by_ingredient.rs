use std::sync::Arc;

use async_trait::async_trait;

use crate::application::recipe::orchestrator::RecipeOrchestrator;
use crate::domain::logger::Logger;
use crate::domain::recipe::errors::RecipeError;
use crate::domain::recipe::model::Recipe;
use crate::domain::recipe::use_cases::search_by_ingredient::{
    SearchRecipesByIngredientParams, SearchRecipesByIngredientUseCase,
};

pub struct SearchRecipesByIngredientUseCaseImpl {
    pub orchestrator: Arc<RecipeOrchestrator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SearchRecipesByIngredientUseCase for SearchRecipesByIngredientUseCaseImpl {
    async fn execute(
        &self,
        params: SearchRecipesByIngredientParams,
    ) -> Result<Vec<Recipe>, RecipeError> {
        let ingredient = params.ingredient.trim();
        if ingredient.is_empty() {
            return Err(RecipeError::QueryEmpty);
        }

        self.logger
            .info(&format!("Searching recipes by ingredient: {}", ingredient));
        let recipes = self
            .orchestrator
            .get_recipes_by_ingredient(ingredient, &params.filters)
            .await;
        self.logger.info(&format!(
            "Found {} recipes using: {}",
            recipes.len(),
            ingredient
        ));

        Ok(recipes)
    }
}
