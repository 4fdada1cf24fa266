use std::sync::Arc;

use logger::TracingLogger;
use persistence::recipe::source::PostgresRecipeSource;
use spoonacular::client::SpoonacularClient;
use spoonacular::recipe_source::SpoonacularRecipeSource;

use business::application::recipe::get_by_id::GetRecipeByIdUseCaseImpl;
use business::application::recipe::health_check::CheckRecipeSourcesHealthUseCaseImpl;
use business::application::recipe::list_sources::ListRecipeSourcesUseCaseImpl;
use business::application::recipe::orchestrator::RecipeOrchestrator;
use business::application::recipe::search::SearchRecipesUseCaseImpl;
use business::application::recipe::search_by_ingredient::SearchRecipesByIngredientUseCaseImpl;
use business::domain::logger::Logger;

use crate::config::{catalog_config::CatalogConfig, spoonacular_config::SpoonacularConfig};

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub recipe_api: crate::api::recipe::routes::RecipeApi,
}

impl DependencyContainer {
    pub async fn new(
        pool: sqlx::PgPool,
        catalog: &CatalogConfig,
        spoonacular: &SpoonacularConfig,
    ) -> anyhow::Result<Self> {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("recipes"));

        // Recipe sources
        let store = Arc::new(PostgresRecipeSource::new(
            pool,
            catalog.db_priority,
            Arc::new(TracingLogger::new("recipe-store")),
        ));
        let spoonacular_source = Arc::new(SpoonacularRecipeSource::new(
            SpoonacularClient::with_base_url(
                spoonacular.api_key.clone(),
                spoonacular.base_url.clone(),
            ),
            spoonacular.settings(),
            Arc::new(TracingLogger::new("spoonacular")),
        ));
        if spoonacular.api_key.trim().is_empty() {
            logger.warn("SPOONACULAR_API_KEY not set; Spoonacular source registered disabled");
        }

        let orchestrator = Arc::new(RecipeOrchestrator::new(
            catalog.orchestrator.clone(),
            Arc::new(TracingLogger::new("orchestrator")),
        ));
        orchestrator.add_source(store).await;
        orchestrator.add_source(spoonacular_source).await;

        // Recipe use cases
        let get_by_id_use_case = Arc::new(GetRecipeByIdUseCaseImpl {
            orchestrator: orchestrator.clone(),
            logger: logger.clone(),
        });
        let search_use_case = Arc::new(SearchRecipesUseCaseImpl {
            orchestrator: orchestrator.clone(),
            logger: logger.clone(),
        });
        let search_by_ingredient_use_case = Arc::new(SearchRecipesByIngredientUseCaseImpl {
            orchestrator: orchestrator.clone(),
            logger: logger.clone(),
        });
        let list_sources_use_case = Arc::new(ListRecipeSourcesUseCaseImpl {
            orchestrator: orchestrator.clone(),
            logger: logger.clone(),
        });
        let health_use_case = Arc::new(CheckRecipeSourcesHealthUseCaseImpl {
            orchestrator,
            logger,
        });

        let health_api = crate::api::health::routes::Api::new(health_use_case);
        let recipe_api = crate::api::recipe::routes::RecipeApi::new(
            get_by_id_use_case,
            search_use_case,
            search_by_ingredient_use_case,
            list_sources_use_case,
        );

        Ok(Self {
            health_api,
            recipe_api,
        })
    }
}
