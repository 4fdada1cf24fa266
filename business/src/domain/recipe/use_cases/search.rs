use async_trait::async_trait;

use crate::domain::recipe::errors::RecipeError;
use crate::domain::recipe::filters::RecipeFilters;
use crate::domain::recipe::model::Recipe;

pub struct SearchRecipesParams {
    pub query: String,
    pub filters: RecipeFilters,
}

#[async_trait]
pub trait SearchRecipesUseCase: Send + Sync {
    async fn execute(&self, params: SearchRecipesParams) -> Result<Vec<Recipe>, RecipeError>;
}
