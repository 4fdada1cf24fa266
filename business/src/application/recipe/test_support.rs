//! Mocks and fixtures shared by the recipe application tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use crate::domain::logger::Logger;
use crate::domain::recipe::errors::RecipeSourceError;
use crate::domain::recipe::filters::RecipeFilters;
use crate::domain::recipe::model::{NewRecipeProps, Recipe, RecipeIngredient};
use crate::domain::recipe::source::{FailurePolicy, RecipeSource, SourceHealth, SourceMetadata};
use crate::domain::recipe::value_objects::Language;

mock! {
    pub Source {}

    #[async_trait]
    impl RecipeSource for Source {
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
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

/// A mocked source answering `source_info` with the given id and priority.
/// Its name is `"<id> source"`.
pub fn source(id: &str, priority: u32, enabled: bool) -> MockSource {
    let metadata = SourceMetadata {
        id: id.to_string(),
        name: format!("{} source", id),
        priority,
        enabled,
    };
    let mut mock = MockSource::new();
    mock.expect_source_info()
        .returning(move || metadata.clone());
    mock.expect_failure_policy()
        .returning(|| FailurePolicy::Propagate);
    mock
}

pub fn unhealthy() -> SourceHealth {
    SourceHealth::unhealthy("recipe_source.unavailable")
}

pub fn recipe(id: &str, title: &str, source_id: &str) -> Recipe {
    Recipe::new(NewRecipeProps {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        image_url: None,
        cook_time_minutes: Some(20),
        servings: Some(2),
        difficulty: None,
        language: Language::Da,
        source_id: source_id.to_string(),
        source_name: format!("{} source", source_id),
        ingredients: vec![RecipeIngredient {
            name: "salt".to_string(),
            quantity: None,
            order: 1,
        }],
        instructions: None,
        tags: None,
        nutrition_data: None,
        url: None,
    })
    .unwrap()
}
