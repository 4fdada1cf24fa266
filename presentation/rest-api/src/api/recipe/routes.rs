use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};

use business::domain::recipe::use_cases::get_by_id::{GetRecipeByIdParams, GetRecipeByIdUseCase};
use business::domain::recipe::use_cases::list_sources::ListRecipeSourcesUseCase;
use business::domain::recipe::use_cases::search::{SearchRecipesParams, SearchRecipesUseCase};
use business::domain::recipe::use_cases::search_by_ingredient::{
    SearchRecipesByIngredientParams, SearchRecipesByIngredientUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::recipe::dto::{
    DifficultyDto, FilterQuery, LanguageDto, RecipeResponse, SourceMetadataResponse,
};
use crate::api::tags::ApiTags;

pub struct RecipeApi {
    get_by_id_use_case: Arc<dyn GetRecipeByIdUseCase>,
    search_use_case: Arc<dyn SearchRecipesUseCase>,
    search_by_ingredient_use_case: Arc<dyn SearchRecipesByIngredientUseCase>,
    list_sources_use_case: Arc<dyn ListRecipeSourcesUseCase>,
}

impl RecipeApi {
    pub fn new(
        get_by_id_use_case: Arc<dyn GetRecipeByIdUseCase>,
        search_use_case: Arc<dyn SearchRecipesUseCase>,
        search_by_ingredient_use_case: Arc<dyn SearchRecipesByIngredientUseCase>,
        list_sources_use_case: Arc<dyn ListRecipeSourcesUseCase>,
    ) -> Self {
        Self {
            get_by_id_use_case,
            search_use_case,
            search_by_ingredient_use_case,
            list_sources_use_case,
        }
    }
}

/// Recipe catalog API
///
/// Read-only endpoints over every configured recipe source.
#[OpenApi]
impl RecipeApi {
    /// Search recipes
    ///
    /// Free-text search. Results from higher-priority sources come first and
    /// duplicate titles are removed.
    #[allow(clippy::too_many_arguments)]
    #[oai(path = "/recipes/search", method = "get", tag = "ApiTags::Recipes")]
    async fn search_recipes(
        &self,
        /// Search text
        q: Query<Option<String>>,
        language: Query<Option<LanguageDto>>,
        difficulty: Query<Option<DifficultyDto>>,
        /// Maximum cook time in minutes, inclusive
        #[oai(name = "maxTime")]
        max_time: Query<Option<u32>>,
        /// Restrict to one source
        #[oai(name = "sourceId")]
        source_id: Query<Option<String>>,
        /// Page size (default 10, at most 50)
        limit: Query<Option<u32>>,
        offset: Query<Option<u32>>,
    ) -> ListRecipesResponse {
        let params = SearchRecipesParams {
            query: q.0.unwrap_or_default(),
            filters: FilterQuery {
                language: language.0,
                difficulty: difficulty.0,
                max_time: max_time.0,
                source_id: source_id.0,
                limit: limit.0,
                offset: offset.0,
            }
            .into(),
        };

        match self.search_use_case.execute(params).await {
            Ok(recipes) => ListRecipesResponse::Ok(Json(
                recipes.into_iter().map(|r| r.into()).collect(),
            )),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ListRecipesResponse::BadRequest(json)
            }
        }
    }

    /// Search recipes by ingredient
    #[allow(clippy::too_many_arguments)]
    #[oai(path = "/recipes/by-ingredient", method = "get", tag = "ApiTags::Recipes")]
    async fn search_recipes_by_ingredient(
        &self,
        /// Ingredient name
        ingredient: Query<Option<String>>,
        language: Query<Option<LanguageDto>>,
        difficulty: Query<Option<DifficultyDto>>,
        #[oai(name = "maxTime")] max_time: Query<Option<u32>>,
        #[oai(name = "sourceId")] source_id: Query<Option<String>>,
        limit: Query<Option<u32>>,
        offset: Query<Option<u32>>,
    ) -> ListRecipesResponse {
        let params = SearchRecipesByIngredientParams {
            ingredient: ingredient.0.unwrap_or_default(),
            filters: FilterQuery {
                language: language.0,
                difficulty: difficulty.0,
                max_time: max_time.0,
                source_id: source_id.0,
                limit: limit.0,
                offset: offset.0,
            }
            .into(),
        };

        match self.search_by_ingredient_use_case.execute(params).await {
            Ok(recipes) => ListRecipesResponse::Ok(Json(
                recipes.into_iter().map(|r| r.into()).collect(),
            )),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ListRecipesResponse::BadRequest(json)
            }
        }
    }

    /// List recipe sources
    ///
    /// Every configured source in priority order, disabled ones included.
    #[oai(path = "/recipes/sources", method = "get", tag = "ApiTags::Recipes")]
    async fn list_sources(&self) -> Json<Vec<SourceMetadataResponse>> {
        let sources = self.list_sources_use_case.execute().await;
        Json(sources.into_iter().map(|s| s.into()).collect())
    }

    /// Get a recipe by ID
    ///
    /// Accepts a source identifier or the store's human-readable alias.
    #[oai(path = "/recipes/:id", method = "get", tag = "ApiTags::Recipes")]
    async fn get_recipe_by_id(&self, id: Path<String>) -> GetRecipeByIdResponse {
        match self
            .get_by_id_use_case
            .execute(GetRecipeByIdParams { id: id.0 })
            .await
        {
            Ok(recipe) => GetRecipeByIdResponse::Ok(Json(recipe.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetRecipeByIdResponse::NotFound(json),
                    _ => GetRecipeByIdResponse::ServiceUnavailable(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ListRecipesResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<RecipeResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetRecipeByIdResponse {
    #[oai(status = 200)]
    Ok(Json<RecipeResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 503)]
    ServiceUnavailable(Json<ErrorResponse>),
}
