use std::sync::Arc;

use async_trait::async_trait;

use crate::application::recipe::orchestrator::RecipeOrchestrator;
use crate::domain::logger::Logger;
use crate::domain::recipe::errors::RecipeError;
use crate::domain::recipe::model::Recipe;
use crate::domain::recipe::use_cases::get_by_id::{GetRecipeByIdParams, GetRecipeByIdUseCase};

pub struct GetRecipeByIdUseCaseImpl {
    pub orchestrator: Arc<RecipeOrchestrator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetRecipeByIdUseCase for GetRecipeByIdUseCaseImpl {
    async fn execute(&self, params: GetRecipeByIdParams) -> Result<Recipe, RecipeError> {
        let id = params.id.trim();
        self.logger.info(&format!("Fetching recipe by id: {}", id));

        if id.is_empty() {
            return Err(RecipeError::NotFound);
        }

        self.orchestrator
            .get_recipe(id)
            .await?
            .ok_or(RecipeError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::recipe::orchestrator::OrchestratorConfig;
    use crate::application::recipe::test_support::{mock_logger, recipe, source};
    use crate::domain::recipe::errors::RecipeSourceError;

    async fn use_case_with(sources: Vec<crate::application::recipe::test_support::MockSource>) -> GetRecipeByIdUseCaseImpl {
        let orchestrator = RecipeOrchestrator::new(OrchestratorConfig::default(), mock_logger());
        for source in sources {
            orchestrator.add_source(Arc::new(source)).await;
        }
        GetRecipeByIdUseCaseImpl {
            orchestrator: Arc::new(orchestrator),
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_return_recipe_when_found() {
        let mut store = source("database", 1, true);
        store
            .expect_get_recipe()
            .withf(|id| id == "frikadeller")
            .returning(|_| Ok(Some(recipe("db-1", "Frikadeller", "database"))));
        let use_case = use_case_with(vec![store]).await;

        let result = use_case
            .execute(GetRecipeByIdParams {
                id: " frikadeller ".to_string(),
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().title, "Frikadeller");
    }

    #[tokio::test]
    async fn should_return_not_found_when_no_source_has_recipe() {
        let mut store = source("database", 1, true);
        store.expect_get_recipe().returning(|_| Ok(None));
        let use_case = use_case_with(vec![store]).await;

        let result = use_case
            .execute(GetRecipeByIdParams {
                id: "missing".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), RecipeError::NotFound));
    }

    #[tokio::test]
    async fn should_surface_store_failure() {
        let mut store = source("database", 1, true);
        store
            .expect_get_recipe()
            .returning(|_| Err(RecipeSourceError::Unavailable));
        let use_case = use_case_with(vec![store]).await;

        let result = use_case
            .execute(GetRecipeByIdParams {
                id: "db-1".to_string(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            RecipeError::SourceUnavailable(RecipeSourceError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn should_not_query_sources_for_blank_id() {
        let mut store = source("database", 1, true);
        store.expect_get_recipe().never();
        let use_case = use_case_with(vec![store]).await;

        let result = use_case
            .execute(GetRecipeByIdParams {
                id: "  ".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), RecipeError::NotFound));
    }
}
