use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::recipe::model::{NewRecipeProps, Recipe, RecipeIngredient};
use business::domain::recipe::source::SourceMetadata;
use business::domain::recipe::value_objects::{Difficulty, Language};

#[derive(Debug, FromRow)]
pub struct RecipeEntity {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub language: String,
    pub instructions: Option<String>,
    pub tags: Option<Vec<String>>,
    pub nutrition_data: Option<serde_json::Value>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct IngredientEntity {
    pub recipe_id: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub position: i32,
}

impl IngredientEntity {
    fn into_domain(self) -> Option<RecipeIngredient> {
        Some(RecipeIngredient {
            order: u32::try_from(self.position).ok()?,
            name: self.name,
            quantity: self.quantity.filter(|q| !q.trim().is_empty()),
        })
    }
}

impl RecipeEntity {
    /// Maps a row plus its ingredient rows into a recipe attributed to
    /// `source`.
    ///
    /// An unknown language, a blank title or a repeated ingredient position
    /// is a mapping error; an unknown difficulty is dropped.
    pub fn into_domain(
        self,
        mut ingredients: Vec<IngredientEntity>,
        source: &SourceMetadata,
    ) -> Result<Recipe, RepositoryError> {
        let language = self
            .language
            .parse::<Language>()
            .map_err(|_| RepositoryError::mapping())?;
        ingredients.sort_by_key(|ingredient| ingredient.position);

        Recipe::new(NewRecipeProps {
            id: self.id.to_string(),
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            cook_time_minutes: self.cook_time_minutes.and_then(|m| u32::try_from(m).ok()),
            servings: self.servings.and_then(|s| u32::try_from(s).ok()),
            difficulty: self.difficulty.and_then(|d| d.parse::<Difficulty>().ok()),
            language,
            source_id: source.id.clone(),
            source_name: source.name.clone(),
            ingredients: ingredients
                .into_iter()
                .filter_map(IngredientEntity::into_domain)
                .collect(),
            instructions: self.instructions.as_deref().and_then(split_instructions),
            tags: self.tags.filter(|tags| !tags.is_empty()),
            nutrition_data: self.nutrition_data,
            url: self.url,
        })
        .map_err(|_| RepositoryError::mapping())
    }
}

/// Splits a stored instruction blob into steps, one per non-empty line,
/// with leading numbering like `"1."` or `"2)"` removed. A marker must be
/// followed by whitespace or end the line, so `"1.5 liter"` is kept whole.
pub fn split_instructions(blob: &str) -> Option<Vec<String>> {
    let steps: Vec<String> = blob
        .lines()
        .map(strip_step_number)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect();

    if steps.is_empty() { None } else { Some(steps) }
}

fn strip_step_number(line: &str) -> &str {
    let line = line.trim();
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix(['.', ')']) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            rest.trim_start()
        }
        _ => line,
    }
}
