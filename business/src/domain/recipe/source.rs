use async_trait::async_trait;
use serde::Serialize;

use crate::domain::logger::Logger;

use super::errors::RecipeSourceError;
use super::filters::RecipeFilters;
use super::model::Recipe;

/// Identity and routing attributes of a recipe source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceMetadata {
    pub id: String,
    pub name: String,
    /// Lower value is queried earlier.
    pub priority: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceHealth {
    pub healthy: bool,
    pub message: String,
}

impl SourceHealth {
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            healthy: true,
            message: message.into(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
        }
    }
}

/// Health of one source together with its metadata at check time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceHealthReport {
    pub metadata: SourceMetadata,
    pub health: SourceHealth,
}

/// Aggregated health across all configured sources, enabled or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogHealth {
    pub healthy: bool,
    pub sources: Vec<SourceHealthReport>,
}

/// What a source does with its own read failures.
///
/// The authoritative store propagates them so the caller sees the fault;
/// best-effort enrichment sources swallow them and answer empty/not-found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    Propagate,
    Swallow,
}

impl FailurePolicy {
    /// Applies the policy to the outcome of one source operation.
    ///
    /// `Swallow` logs the failure (quota and credential problems at error
    /// level so they stand out) and returns the empty value for `T`.
    pub fn settle<T: Default>(
        self,
        result: Result<T, RecipeSourceError>,
        source_id: &str,
        logger: &dyn Logger,
    ) -> Result<T, RecipeSourceError> {
        match (self, result) {
            (_, Ok(value)) => Ok(value),
            (FailurePolicy::Propagate, Err(err)) => Err(err),
            (FailurePolicy::Swallow, Err(err)) => {
                if err.is_quota_or_auth() {
                    logger.error(&format!(
                        "Source {} rejected the request ({}); check API key and quota",
                        source_id, err
                    ));
                } else {
                    logger.warn(&format!(
                        "Source {} failed ({}); returning empty result",
                        source_id, err
                    ));
                }
                Ok(T::default())
            }
        }
    }
}

/// Capability interface every recipe backend implements.
///
/// Sources share no state with each other. Each one declares its own
/// [`FailurePolicy`]; the trait promises nothing beyond the return shapes.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// `Ok(None)` when the id is unknown to this source.
    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, RecipeSourceError>;

    async fn search(
        &self,
        query: &str,
        filters: &RecipeFilters,
    ) -> Result<Vec<Recipe>, RecipeSourceError>;

    async fn get_recipes_by_ingredient(
        &self,
        ingredient: &str,
        filters: &RecipeFilters,
    ) -> Result<Vec<Recipe>, RecipeSourceError>;

    fn source_info(&self) -> SourceMetadata;

    fn failure_policy(&self) -> FailurePolicy;

    async fn health_check(&self) -> SourceHealth;
}
