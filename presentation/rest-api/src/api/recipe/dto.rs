use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use business::domain::recipe::filters::RecipeFilters;
use business::domain::recipe::model::{Recipe, RecipeIngredient};
use business::domain::recipe::source::SourceMetadata;
use business::domain::recipe::value_objects::{Difficulty, Language};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Enum)]
pub enum DifficultyDto {
    #[oai(rename = "EASY")]
    Easy,
    #[oai(rename = "MEDIUM")]
    Medium,
    #[oai(rename = "HARD")]
    Hard,
}

impl From<Difficulty> for DifficultyDto {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => DifficultyDto::Easy,
            Difficulty::Medium => DifficultyDto::Medium,
            Difficulty::Hard => DifficultyDto::Hard,
        }
    }
}

impl From<DifficultyDto> for Difficulty {
    fn from(dto: DifficultyDto) -> Self {
        match dto {
            DifficultyDto::Easy => Difficulty::Easy,
            DifficultyDto::Medium => Difficulty::Medium,
            DifficultyDto::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Enum)]
pub enum LanguageDto {
    #[oai(rename = "da")]
    Da,
    #[oai(rename = "en")]
    En,
}

impl From<Language> for LanguageDto {
    fn from(language: Language) -> Self {
        match language {
            Language::Da => LanguageDto::Da,
            Language::En => LanguageDto::En,
        }
    }
}

impl From<LanguageDto> for Language {
    fn from(dto: LanguageDto) -> Self {
        match dto {
            LanguageDto::Da => Language::Da,
            LanguageDto::En => Language::En,
        }
    }
}

/// Query-string filters shared by the list endpoints.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    pub language: Option<LanguageDto>,
    pub difficulty: Option<DifficultyDto>,
    pub max_time: Option<u32>,
    pub source_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<FilterQuery> for RecipeFilters {
    fn from(query: FilterQuery) -> Self {
        RecipeFilters {
            language: query.language.map(Into::into),
            difficulty: query.difficulty.map(Into::into),
            max_time: query.max_time,
            source_id: query.source_id.filter(|id| !id.trim().is_empty()),
            limit: query.limit,
            offset: query.offset,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct RecipeIngredientResponse {
    /// Ingredient name
    pub name: String,
    /// Free-text quantity, e.g. "500 g"
    #[oai(skip_serializing_if_is_none)]
    pub quantity: Option<String>,
    /// Display position, ascending
    pub order: u32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(ingredient: RecipeIngredient) -> Self {
        Self {
            name: ingredient.name,
            quantity: ingredient.quantity,
            order: ingredient.order,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct RecipeResponse {
    /// Identifier, unique within the source
    pub id: String,
    pub title: String,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub cook_time_minutes: Option<u32>,
    #[oai(skip_serializing_if_is_none)]
    pub servings: Option<u32>,
    #[oai(skip_serializing_if_is_none)]
    pub difficulty: Option<DifficultyDto>,
    pub language: LanguageDto,
    /// Source that produced the recipe
    pub source_id: String,
    pub source_name: String,
    pub ingredients: Vec<RecipeIngredientResponse>,
    /// Ordered preparation steps
    #[oai(skip_serializing_if_is_none)]
    pub instructions: Option<Vec<String>>,
    #[oai(skip_serializing_if_is_none)]
    pub tags: Option<Vec<String>>,
    /// Nutrition facts as supplied by the source
    #[oai(skip_serializing_if_is_none)]
    pub nutrition_data: Option<serde_json::Value>,
    #[oai(skip_serializing_if_is_none)]
    pub url: Option<String>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            image_url: recipe.image_url,
            cook_time_minutes: recipe.cook_time_minutes,
            servings: recipe.servings,
            difficulty: recipe.difficulty.map(|d| d.into()),
            language: recipe.language.into(),
            source_id: recipe.source_id,
            source_name: recipe.source_name,
            ingredients: recipe.ingredients.into_iter().map(|i| i.into()).collect(),
            instructions: recipe.instructions,
            tags: recipe.tags,
            nutrition_data: recipe.nutrition_data,
            url: recipe.url,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct SourceMetadataResponse {
    pub id: String,
    pub name: String,
    /// Lower value is queried earlier
    pub priority: u32,
    pub enabled: bool,
}

impl From<SourceMetadata> for SourceMetadataResponse {
    fn from(metadata: SourceMetadata) -> Self {
        Self {
            id: metadata.id,
            name: metadata.name,
            priority: metadata.priority,
            enabled: metadata.enabled,
        }
    }
}
