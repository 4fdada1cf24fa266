use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::recipe::errors::RecipeError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for RecipeError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            RecipeError::NotFound => (StatusCode::NOT_FOUND, "NotFound", "recipe.not_found"),
            RecipeError::QueryEmpty => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "recipe.query_empty",
            ),
            // Only raised while mapping source data.
            RecipeError::TitleEmpty => (
                StatusCode::SERVICE_UNAVAILABLE,
                "InvalidRecipe",
                "recipe.title_empty",
            ),
            RecipeError::IngredientOrder => (
                StatusCode::SERVICE_UNAVAILABLE,
                "InvalidRecipe",
                "recipe.ingredient_order",
            ),
            RecipeError::SourceUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SourceUnavailable",
                "recipe.source_unavailable",
            ),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}
