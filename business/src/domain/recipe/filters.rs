use serde::Serialize;

use super::model::Recipe;
use super::value_objects::{Difficulty, Language};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

/// Optional predicates applied to a recipe lookup, combined with AND.
///
/// Use [`RecipeFilters::limit`] and [`RecipeFilters::offset`] rather than the
/// raw fields; they apply the defaults and the hard ceiling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeFilters {
    pub language: Option<Language>,
    pub difficulty: Option<Difficulty>,
    /// Inclusive upper bound on cook time, in minutes.
    pub max_time: Option<u32>,
    pub source_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RecipeFilters {
    /// Page size: 10 when absent or zero, never more than 50.
    pub fn limit(&self) -> u32 {
        match self.limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(limit) => limit.min(MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    /// True when the filters do not exclude the given source.
    pub fn allows_source(&self, source_id: &str) -> bool {
        self.source_id.as_deref().is_none_or(|id| id == source_id)
    }

    /// Evaluates every set predicate against an already-built recipe.
    ///
    /// A recipe without a cook time never satisfies `max_time`.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.language.is_some_and(|language| language != recipe.language) {
            return false;
        }
        if self
            .difficulty
            .is_some_and(|difficulty| recipe.difficulty != Some(difficulty))
        {
            return false;
        }
        if let Some(max_time) = self.max_time {
            match recipe.cook_time_minutes {
                Some(minutes) if minutes <= max_time => {}
                _ => return false,
            }
        }
        self.allows_source(&recipe.source_id)
    }
}
