use crate::domain::errors::RepositoryError;

/// Failures a recipe source can report.
///
/// Whether a caller ever sees one of these depends on the source's
/// [`FailurePolicy`](super::source::FailurePolicy).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecipeSourceError {
    #[error("recipe_source.unavailable")]
    Unavailable,
    #[error("recipe_source.timeout")]
    Timeout,
    #[error("recipe_source.quota_exceeded")]
    QuotaExceeded,
    #[error("recipe_source.auth_invalid")]
    AuthInvalid,
    #[error("recipe_source.invalid_response")]
    InvalidResponse,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RecipeSourceError {
    /// Quota and credential failures need an operator, not a retry.
    pub fn is_quota_or_auth(&self) -> bool {
        matches!(
            self,
            RecipeSourceError::QuotaExceeded | RecipeSourceError::AuthInvalid
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("recipe.not_found")]
    NotFound,
    #[error("recipe.query_empty")]
    QueryEmpty,
    #[error("recipe.title_empty")]
    TitleEmpty,
    #[error("recipe.ingredient_order")]
    IngredientOrder,
    #[error("recipe.source_unavailable")]
    SourceUnavailable(#[from] RecipeSourceError),
}
