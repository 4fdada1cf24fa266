use async_trait::async_trait;

use crate::domain::recipe::errors::RecipeError;
use crate::domain::recipe::filters::RecipeFilters;
use crate::domain::recipe::model::Recipe;

pub struct SearchRecipesByIngredientParams {
    pub ingredient: String,
    pub filters: RecipeFilters,
}

#[async_trait]
pub trait SearchRecipesByIngredientUseCase: Send + Sync {
    async fn execute(
        &self,
        params: SearchRecipesByIngredientParams,
    ) -> Result<Vec<Recipe>, RecipeError>;
}
