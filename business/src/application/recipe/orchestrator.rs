use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::domain::logger::Logger;
use crate::domain::recipe::errors::RecipeSourceError;
use crate::domain::recipe::filters::RecipeFilters;
use crate::domain::recipe::model::Recipe;
use crate::domain::recipe::source::{
    CatalogHealth, RecipeSource, SourceHealthReport, SourceMetadata,
};
use crate::domain::shared::cache::{CacheConfig, ResponseCache, cache_key};

pub const DEFAULT_MIN_RESULTS_BEFORE_FALLBACK: usize = 3;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;

/// How `search` and `get_recipes_by_ingredient` walk past the first source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackStrategy {
    /// Stop once the accumulated results reach the fallback threshold.
    #[default]
    Threshold,
    /// Always query every enabled source.
    QueryAll,
}

impl std::str::FromStr for FallbackStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "threshold" => Ok(FallbackStrategy::Threshold),
            "query_all" | "query-all" | "all" => Ok(FallbackStrategy::QueryAll),
            _ => Err(format!("Invalid fallback strategy: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub min_results_before_fallback: usize,
    pub fallback_strategy: FallbackStrategy,
    pub cache: CacheConfig,
    /// When set, `health_check` demotes unhealthy sources and restores them
    /// once they recover. A source disabled by configuration stays disabled.
    /// Off by default.
    pub disable_unhealthy_sources: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            min_results_before_fallback: DEFAULT_MIN_RESULTS_BEFORE_FALLBACK,
            fallback_strategy: FallbackStrategy::default(),
            cache: CacheConfig::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_MAX_ENTRIES),
            disable_unhealthy_sources: false,
        }
    }
}

/// Payload stored in the orchestrator's result cache.
#[derive(Debug, Clone)]
pub enum CachedLookup {
    Recipe(Recipe),
    Recipes(Vec<Recipe>),
}

#[derive(Debug, Clone, Copy)]
enum ListOperation {
    Search,
    ByIngredient,
}

impl ListOperation {
    fn as_str(self) -> &'static str {
        match self {
            ListOperation::Search => "search",
            ListOperation::ByIngredient => "get_recipes_by_ingredient",
        }
    }
}

struct RegisteredSource {
    source: Arc<dyn RecipeSource>,
    enabled_override: Option<bool>,
    demoted: bool,
}

impl RegisteredSource {
    fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            enabled_override: None,
            demoted: false,
        }
    }

    /// Enabled flag as configured, ignoring health demotion.
    fn configured_enabled(&self) -> bool {
        self.enabled_override
            .unwrap_or_else(|| self.source.source_info().enabled)
    }

    fn metadata(&self) -> SourceMetadata {
        let mut metadata = self.source.source_info();
        if let Some(enabled) = self.enabled_override {
            metadata.enabled = enabled;
        }
        metadata.enabled &= !self.demoted;
        metadata
    }
}

/// Composes recipe sources behind one contract.
///
/// Sources are kept sorted by ascending priority and queried one after the
/// other, never concurrently, so a satisfied primary spares the costlier
/// secondaries. Results from `search`-style operations are grouped by
/// source priority, deduplicated by case-folded title and cached for a
/// short TTL.
///
/// Two callers missing the cache for the same key at the same time both
/// query the sources; there is no single-flight suppression.
pub struct RecipeOrchestrator {
    sources: RwLock<Vec<RegisteredSource>>,
    cache: ResponseCache<CachedLookup>,
    config: OrchestratorConfig,
    logger: Arc<dyn Logger>,
}

impl RecipeOrchestrator {
    pub fn new(config: OrchestratorConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            sources: RwLock::new(Vec::new()),
            cache: ResponseCache::new(config.cache),
            config,
            logger,
        }
    }

    /// Registers a source, replacing any source with the same id, and
    /// re-sorts by priority.
    pub async fn add_source(&self, source: Arc<dyn RecipeSource>) {
        let info = source.source_info();
        {
            let mut sources = self.sources.write().await;
            sources.retain(|registered| registered.source.source_info().id != info.id);
            sources.push(RegisteredSource::new(source));
            sources.sort_by_key(|registered| registered.source.source_info().priority);
        }
        self.cache.clear().await;
        self.logger.info(&format!(
            "Registered recipe source {} ({}) with priority {}",
            info.id, info.name, info.priority
        ));
    }

    /// Returns false when no source has the given id.
    pub async fn remove_source(&self, source_id: &str) -> bool {
        let removed = {
            let mut sources = self.sources.write().await;
            let before = sources.len();
            sources.retain(|registered| registered.source.source_info().id != source_id);
            before != sources.len()
        };
        if removed {
            self.cache.clear().await;
            self.logger
                .info(&format!("Removed recipe source {}", source_id));
        }
        removed
    }

    /// Overrides the enabled flag a source reports about itself. Also lifts
    /// any health demotion until the next health check.
    ///
    /// Returns false when no source has the given id.
    pub async fn set_source_enabled(&self, source_id: &str, enabled: bool) -> bool {
        let found = {
            let mut sources = self.sources.write().await;
            match sources
                .iter_mut()
                .find(|registered| registered.source.source_info().id == source_id)
            {
                Some(registered) => {
                    registered.enabled_override = Some(enabled);
                    registered.demoted = false;
                    true
                }
                None => false,
            }
        };
        if found {
            self.cache.clear().await;
            self.logger.info(&format!(
                "Recipe source {} {}",
                source_id,
                if enabled { "enabled" } else { "disabled" }
            ));
        }
        found
    }

    /// Metadata of every configured source, disabled ones included.
    pub async fn get_sources(&self) -> Vec<SourceMetadata> {
        self.sources
            .read()
            .await
            .iter()
            .map(RegisteredSource::metadata)
            .collect()
    }

    /// Looks the id up source by source, in priority order, returning the
    /// first hit.
    ///
    /// Each source's failure policy is applied to its answer: a `Swallow`
    /// source that fails counts as a miss, a `Propagate` source's error is
    /// returned without asking lower-priority sources.
    pub async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, RecipeSourceError> {
        let key = cache_key("get_recipe", id);
        if let Some(CachedLookup::Recipe(recipe)) = self.cache.get(&key).await {
            self.logger
                .debug(&format!("Cache hit for recipe {}", id));
            return Ok(Some(recipe));
        }

        for (metadata, source) in self.enabled_sources().await {
            let found = source
                .failure_policy()
                .settle(source.get_recipe(id).await, &metadata.id, self.logger.as_ref())
                .map_err(|err| {
                    self.logger.error(&format!(
                        "Recipe source {} failed to look up {}: {}",
                        metadata.id, id, err
                    ));
                    err
                })?;

            if let Some(recipe) = found {
                self.logger.debug(&format!(
                    "Recipe {} found in source {}",
                    id, metadata.id
                ));
                self.cache
                    .insert(key, CachedLookup::Recipe(recipe.clone()))
                    .await;
                return Ok(Some(recipe));
            }
        }

        self.logger
            .debug(&format!("Recipe {} not found in any source", id));
        Ok(None)
    }

    /// Free-text search across sources. Never fails; a failing source only
    /// loses its contribution.
    pub async fn search(&self, query: &str, filters: &RecipeFilters) -> Vec<Recipe> {
        self.aggregate(ListOperation::Search, query, filters).await
    }

    /// Ingredient search across sources, with the same fallback rules as
    /// [`RecipeOrchestrator::search`].
    pub async fn get_recipes_by_ingredient(
        &self,
        ingredient: &str,
        filters: &RecipeFilters,
    ) -> Vec<Recipe> {
        self.aggregate(ListOperation::ByIngredient, ingredient, filters)
            .await
    }

    /// Checks every configured source, disabled ones included.
    ///
    /// Overall health is the AND of every source's health.
    pub async fn health_check(&self) -> CatalogHealth {
        let snapshot: Vec<(SourceMetadata, Arc<dyn RecipeSource>)> = self
            .sources
            .read()
            .await
            .iter()
            .map(|registered| (registered.metadata(), registered.source.clone()))
            .collect();

        let mut reports = Vec::with_capacity(snapshot.len());
        for (metadata, source) in snapshot {
            let health = source.health_check().await;
            if !health.healthy {
                self.logger.warn(&format!(
                    "Recipe source {} is unhealthy: {}",
                    metadata.id, health.message
                ));
            }
            reports.push(SourceHealthReport { metadata, health });
        }

        if self.config.disable_unhealthy_sources {
            self.apply_health(&reports).await;
        }

        CatalogHealth {
            healthy: reports.iter().all(|report| report.health.healthy),
            sources: reports,
        }
    }

    /// Demotes unhealthy sources and restores recovered ones. Only the
    /// demotion flag is touched; configured enabled flags are left alone.
    async fn apply_health(&self, reports: &[SourceHealthReport]) {
        let mut changed = false;
        {
            let mut sources = self.sources.write().await;
            for report in reports {
                let Some(registered) = sources
                    .iter_mut()
                    .find(|registered| registered.source.source_info().id == report.metadata.id)
                else {
                    continue;
                };
                let demote = !report.health.healthy;
                if registered.demoted == demote {
                    continue;
                }
                registered.demoted = demote;
                if registered.configured_enabled() {
                    changed = true;
                    self.logger.warn(&format!(
                        "Recipe source {} {} after health check",
                        report.metadata.id,
                        if demote { "demoted" } else { "restored" }
                    ));
                }
            }
        }
        if changed {
            self.cache.clear().await;
        }
    }

    async fn enabled_sources(&self) -> Vec<(SourceMetadata, Arc<dyn RecipeSource>)> {
        self.sources
            .read()
            .await
            .iter()
            .map(|registered| (registered.metadata(), registered.source.clone()))
            .filter(|(metadata, _)| metadata.enabled)
            .collect()
    }

    async fn aggregate(
        &self,
        operation: ListOperation,
        term: &str,
        filters: &RecipeFilters,
    ) -> Vec<Recipe> {
        let key = cache_key(operation.as_str(), &(term, filters));
        if let Some(CachedLookup::Recipes(recipes)) = self.cache.get(&key).await {
            self.logger.debug(&format!(
                "Cache hit for {} '{}'",
                operation.as_str(),
                term
            ));
            return recipes;
        }

        let sources: Vec<_> = self
            .enabled_sources()
            .await
            .into_iter()
            .filter(|(metadata, _)| filters.allows_source(&metadata.id))
            .collect();

        let mut accumulated = Vec::new();
        for (index, (metadata, source)) in sources.iter().enumerate() {
            if index > 0 && self.has_enough(accumulated.len()) {
                self.logger.debug(&format!(
                    "{} results reached the fallback threshold; skipping remaining sources",
                    accumulated.len()
                ));
                break;
            }

            let result = match operation {
                ListOperation::Search => source.search(term, filters).await,
                ListOperation::ByIngredient => {
                    source.get_recipes_by_ingredient(term, filters).await
                }
            };

            match result {
                Ok(recipes) => {
                    self.logger.debug(&format!(
                        "Source {} returned {} recipes for {} '{}'",
                        metadata.id,
                        recipes.len(),
                        operation.as_str(),
                        term
                    ));
                    accumulated.extend(recipes);
                }
                Err(err) => {
                    self.logger.warn(&format!(
                        "Source {} failed during {} '{}': {}; continuing with next source",
                        metadata.id,
                        operation.as_str(),
                        term,
                        err
                    ));
                }
            }
        }

        let mut recipes = dedupe_by_title(accumulated);
        recipes.truncate(filters.limit() as usize);

        if !recipes.is_empty() {
            self.cache
                .insert(key, CachedLookup::Recipes(recipes.clone()))
                .await;
        }
        recipes
    }

    fn has_enough(&self, count: usize) -> bool {
        match self.config.fallback_strategy {
            FallbackStrategy::QueryAll => false,
            FallbackStrategy::Threshold => count >= self.config.min_results_before_fallback,
        }
    }
}

/// Drops every recipe whose case-folded title was already seen, keeping
/// the earliest occurrence and the original order.
pub fn dedupe_by_title(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|recipe| seen.insert(recipe.dedup_key()))
        .collect()
}
