use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use business::domain::logger::Logger;
use business::domain::recipe::errors::{RecipeError, RecipeSourceError};
use business::domain::recipe::filters::RecipeFilters;
use business::domain::recipe::model::{NewRecipeProps, Recipe, RecipeIngredient};
use business::domain::recipe::source::{
    FailurePolicy, RecipeSource, SourceHealth, SourceMetadata,
};
use business::domain::recipe::value_objects::{Difficulty, Language};
use business::domain::shared::cache::{CacheConfig, ResponseCache, cache_key};

use crate::client::SpoonacularClient;
use crate::query::clean_query;
use crate::schema::{ComplexSearchResponse, IngredientLine, IngredientMatch, RecipeInformation};

pub const SOURCE_ID: &str = "spoonacular";
pub const SOURCE_NAME: &str = "Spoonacular";
/// Prepended to upstream ids so they cannot collide with other sources.
pub const ID_PREFIX: &str = "spoonacular-";

pub const DEFAULT_PRIORITY: u32 = 2;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 500;

// Largest page findByIngredients and complexSearch accept.
const MAX_UPSTREAM_PAGE: u32 = 100;

static HTML_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());
static HTML_BREAK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*(?:br\s*/?|/p|/li|/ol|/ul)\s*>").ok());

#[derive(Debug, Clone, Copy)]
pub struct SpoonacularSettings {
    pub priority: u32,
    pub cache: CacheConfig,
}

impl Default for SpoonacularSettings {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            cache: CacheConfig::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_MAX_ENTRIES),
        }
    }
}

#[derive(Debug, Clone)]
enum CachedRecipes {
    One(Recipe),
    Many(Vec<Recipe>),
}

/// Best-effort recipe source over the quota-limited Spoonacular API.
///
/// Every failure is logged and answered with an empty result. Successful
/// upstream responses are cached for a day to conserve quota.
pub struct SpoonacularRecipeSource {
    client: SpoonacularClient,
    cache: ResponseCache<CachedRecipes>,
    priority: u32,
    logger: Arc<dyn Logger>,
}

impl SpoonacularRecipeSource {
    pub fn new(
        client: SpoonacularClient,
        settings: SpoonacularSettings,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            client,
            cache: ResponseCache::new(settings.cache),
            priority: settings.priority,
            logger,
        }
    }

    /// Upstream numeric id behind a namespaced id, if it is one of ours.
    pub fn upstream_id(id: &str) -> Option<u64> {
        id.trim().strip_prefix(ID_PREFIX)?.parse().ok()
    }

    /// Upstream recipes are English only; a Danish or foreign-source filter
    /// can never match.
    fn excluded_by(&self, filters: &RecipeFilters) -> bool {
        !self.client.has_api_key()
            || filters.language == Some(Language::Da)
            || !filters.allows_source(SOURCE_ID)
    }

    async fn fetch_recipe(&self, upstream_id: u64) -> Result<Option<Recipe>, RecipeSourceError> {
        let key = cache_key("get_recipe", &upstream_id);
        if let Some(CachedRecipes::One(recipe)) = self.cache.get(&key).await {
            self.logger
                .debug(&format!("Spoonacular cache hit for recipe {}", upstream_id));
            return Ok(Some(recipe));
        }

        self.logger
            .debug(&format!("Fetching Spoonacular recipe {}", upstream_id));
        let info: Option<RecipeInformation> = self
            .client
            .get_json(
                &self.client.recipe_information_url(upstream_id),
                &[("includeNutrition", "true".to_string())],
            )
            .await?;

        let recipe = info
            .map(normalize_information)
            .transpose()
            .map_err(|err| {
                self.logger.warn(&format!(
                    "Spoonacular recipe {} is not a valid recipe: {}",
                    upstream_id, err
                ));
                RecipeSourceError::InvalidResponse
            })?;
        if let Some(recipe) = &recipe {
            self.cache
                .insert(key, CachedRecipes::One(recipe.clone()))
                .await;
        }
        Ok(recipe)
    }

    async fn fetch_search(
        &self,
        query: &str,
        filters: &RecipeFilters,
    ) -> Result<Vec<Recipe>, RecipeSourceError> {
        let number = filters.limit().min(MAX_UPSTREAM_PAGE);
        let offset = filters.offset();
        let key = cache_key("search", &(query, filters.max_time, number, offset));

        let recipes = match self.cache.get(&key).await {
            Some(CachedRecipes::Many(recipes)) => {
                self.logger
                    .debug(&format!("Spoonacular cache hit for search '{}'", query));
                recipes
            }
            _ => {
                let mut params = vec![
                    ("query", query.to_string()),
                    ("number", number.to_string()),
                    ("offset", offset.to_string()),
                    ("addRecipeInformation", "true".to_string()),
                    ("fillIngredients", "true".to_string()),
                    ("addRecipeNutrition", "true".to_string()),
                ];
                if let Some(max_time) = filters.max_time {
                    params.push(("maxReadyTime", max_time.to_string()));
                }

                self.logger
                    .debug(&format!("Searching Spoonacular for '{}'", query));
                let response: Option<ComplexSearchResponse> = self
                    .client
                    .get_json(&self.client.complex_search_url(), &params)
                    .await?;
                let recipes: Vec<Recipe> = response
                    .map(|response| response.results)
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|info| self.keep_valid(normalize_information(info)))
                    .collect();
                self.cache
                    .insert(key, CachedRecipes::Many(recipes.clone()))
                    .await;
                recipes
            }
        };

        Ok(recipes
            .into_iter()
            .filter(|recipe| filters.matches(recipe))
            .collect())
    }

    async fn fetch_by_ingredient(
        &self,
        ingredient: &str,
        filters: &RecipeFilters,
    ) -> Result<Vec<Recipe>, RecipeSourceError> {
        // No offset upstream, so over-fetch and skip locally.
        let offset = filters.offset() as usize;
        let number = filters
            .limit()
            .saturating_add(filters.offset())
            .min(MAX_UPSTREAM_PAGE);
        let key = cache_key("get_recipes_by_ingredient", &(ingredient, number));

        let recipes = match self.cache.get(&key).await {
            Some(CachedRecipes::Many(recipes)) => {
                self.logger.debug(&format!(
                    "Spoonacular cache hit for ingredient '{}'",
                    ingredient
                ));
                recipes
            }
            _ => {
                let params = [
                    ("ingredients", ingredient.to_string()),
                    ("number", number.to_string()),
                    ("ranking", "1".to_string()),
                    ("ignorePantry", "true".to_string()),
                ];

                self.logger.debug(&format!(
                    "Searching Spoonacular by ingredient '{}'",
                    ingredient
                ));
                let matches: Option<Vec<IngredientMatch>> = self
                    .client
                    .get_json(&self.client.find_by_ingredients_url(), &params)
                    .await?;
                let recipes: Vec<Recipe> = matches
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|found| self.keep_valid(normalize_match(found)))
                    .collect();
                self.cache
                    .insert(key, CachedRecipes::Many(recipes.clone()))
                    .await;
                recipes
            }
        };

        Ok(recipes
            .into_iter()
            .skip(offset)
            .filter(|recipe| filters.matches(recipe))
            .take(filters.limit() as usize)
            .collect())
    }

    /// Drops an upstream item that does not form a valid recipe.
    fn keep_valid(&self, recipe: Result<Recipe, RecipeError>) -> Option<Recipe> {
        recipe
            .inspect_err(|err| {
                self.logger
                    .warn(&format!("Skipping invalid Spoonacular recipe: {}", err))
            })
            .ok()
    }
}

#[async_trait]
impl RecipeSource for SpoonacularRecipeSource {
    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, RecipeSourceError> {
        let Some(upstream_id) = Self::upstream_id(id) else {
            return Ok(None);
        };
        if !self.client.has_api_key() {
            return Ok(None);
        }

        let result = self.fetch_recipe(upstream_id).await;
        self.failure_policy()
            .settle(result, SOURCE_ID, self.logger.as_ref())
    }

    async fn search(
        &self,
        query: &str,
        filters: &RecipeFilters,
    ) -> Result<Vec<Recipe>, RecipeSourceError> {
        let cleaned = clean_query(query);
        if cleaned.is_empty() || self.excluded_by(filters) {
            return Ok(vec![]);
        }

        let result = self.fetch_search(&cleaned, filters).await;
        self.failure_policy()
            .settle(result, SOURCE_ID, self.logger.as_ref())
    }

    async fn get_recipes_by_ingredient(
        &self,
        ingredient: &str,
        filters: &RecipeFilters,
    ) -> Result<Vec<Recipe>, RecipeSourceError> {
        let cleaned = clean_query(ingredient);
        if cleaned.is_empty() || self.excluded_by(filters) {
            return Ok(vec![]);
        }

        let result = self.fetch_by_ingredient(&cleaned, filters).await;
        self.failure_policy()
            .settle(result, SOURCE_ID, self.logger.as_ref())
    }

    fn source_info(&self) -> SourceMetadata {
        SourceMetadata {
            id: SOURCE_ID.to_string(),
            name: SOURCE_NAME.to_string(),
            priority: self.priority,
            enabled: self.client.has_api_key(),
        }
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Swallow
    }

    /// Spends no quota: only checks that a key is configured.
    async fn health_check(&self) -> SourceHealth {
        if !self.client.has_api_key() {
            return SourceHealth::unhealthy("Spoonacular API key not configured");
        }
        let cached = self.cache.len().await;
        SourceHealth::healthy(format!(
            "Spoonacular API key configured; {} cached responses",
            cached
        ))
    }
}

fn namespaced_id(upstream_id: u64) -> String {
    format!("{}{}", ID_PREFIX, upstream_id)
}

fn normalize_information(info: RecipeInformation) -> Result<Recipe, RecipeError> {
    let instructions = analyzed_steps(&info).or_else(|| {
        info.instructions
            .as_deref()
            .and_then(html_instruction_steps)
    });

    let mut tags = Vec::new();
    let mut seen = HashSet::new();
    for tag in info
        .cuisines
        .into_iter()
        .chain(info.dish_types)
        .chain(info.diets)
    {
        if seen.insert(tag.to_lowercase()) {
            tags.push(tag);
        }
    }

    Recipe::new(NewRecipeProps {
        id: namespaced_id(info.id),
        title: info.title.trim().to_string(),
        description: info.summary.as_deref().and_then(strip_html),
        image_url: info.image,
        cook_time_minutes: info.ready_in_minutes,
        servings: info.servings,
        difficulty: info.ready_in_minutes.map(Difficulty::from_total_minutes),
        language: Language::En,
        source_id: SOURCE_ID.to_string(),
        source_name: SOURCE_NAME.to_string(),
        ingredients: number_ingredients(info.extended_ingredients),
        instructions,
        tags: if tags.is_empty() { None } else { Some(tags) },
        nutrition_data: info.nutrition,
        url: info.source_url.or(info.spoonacular_source_url),
    })
}

fn normalize_match(found: IngredientMatch) -> Result<Recipe, RecipeError> {
    let mut lines = found.used_ingredients;
    lines.extend(found.missed_ingredients);

    Recipe::new(NewRecipeProps {
        id: namespaced_id(found.id),
        title: found.title.trim().to_string(),
        description: None,
        image_url: found.image,
        cook_time_minutes: None,
        servings: None,
        difficulty: None,
        language: Language::En,
        source_id: SOURCE_ID.to_string(),
        source_name: SOURCE_NAME.to_string(),
        ingredients: number_ingredients(lines),
        instructions: None,
        tags: None,
        nutrition_data: None,
        url: None,
    })
}

fn number_ingredients(lines: Vec<IngredientLine>) -> Vec<RecipeIngredient> {
    lines
        .into_iter()
        .filter(|line| !line.name.trim().is_empty())
        .enumerate()
        .map(|(index, line)| RecipeIngredient {
            quantity: format_quantity(line.amount, line.unit.as_deref()),
            name: line.name.trim().to_string(),
            order: index as u32 + 1,
        })
        .collect()
}

/// Renders an amount with at most two decimals. Amounts that round to zero
/// are dropped like missing ones.
fn format_quantity(amount: Option<f64>, unit: Option<&str>) -> Option<String> {
    let amount = amount.filter(|amount| amount.is_finite() && *amount > 0.0)?;
    let amount = if amount.fract() == 0.0 {
        format!("{}", amount as u64)
    } else {
        format!("{:.2}", amount)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    };
    if amount == "0" {
        return None;
    }
    match unit.map(str::trim).filter(|unit| !unit.is_empty()) {
        Some(unit) => Some(format!("{} {}", amount, unit)),
        None => Some(amount),
    }
}

fn analyzed_steps(info: &RecipeInformation) -> Option<Vec<String>> {
    let steps: Vec<String> = info
        .analyzed_instructions
        .iter()
        .flat_map(|instruction| instruction.steps.iter())
        .map(|step| step.step.trim().to_string())
        .filter(|step| !step.is_empty())
        .collect();
    if steps.is_empty() { None } else { Some(steps) }
}

fn html_instruction_steps(html: &str) -> Option<Vec<String>> {
    let with_breaks = match HTML_BREAK.as_ref() {
        Some(regex) => regex.replace_all(html, "\n").into_owned(),
        None => html.to_string(),
    };
    let steps: Vec<String> = with_breaks
        .lines()
        .filter_map(strip_html)
        .collect();
    if steps.is_empty() { None } else { Some(steps) }
}

fn strip_html(html: &str) -> Option<String> {
    let text = match HTML_TAG.as_ref() {
        Some(regex) => regex.replace_all(html, "").into_owned(),
        None => html.to_string(),
    };
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() { None } else { Some(text) }
}
