use super::errors::RecipeError;
use super::value_objects::{Difficulty, Language};

/// One ingredient line. `order` defines the display sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: Option<String>,
    pub order: u32,
}

/// Standardized recipe shape produced by every recipe source.
///
/// `id` is only unique within the namespace of `source_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub language: Language,
    pub source_id: String,
    pub source_name: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub nutrition_data: Option<serde_json::Value>,
    pub url: Option<String>,
}

pub struct NewRecipeProps {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub language: Language,
    pub source_id: String,
    pub source_name: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub nutrition_data: Option<serde_json::Value>,
    pub url: Option<String>,
}

impl Recipe {
    /// Builds a recipe, rejecting a blank title or ingredient orders that
    /// are not strictly increasing. Every source maps its data through here.
    pub fn new(props: NewRecipeProps) -> Result<Self, RecipeError> {
        if props.title.trim().is_empty() {
            return Err(RecipeError::TitleEmpty);
        }

        let ascending = props
            .ingredients
            .windows(2)
            .all(|pair| pair[0].order < pair[1].order);
        if !ascending {
            return Err(RecipeError::IngredientOrder);
        }

        Ok(Self {
            id: props.id,
            title: props.title,
            description: props.description,
            image_url: props.image_url,
            cook_time_minutes: props.cook_time_minutes,
            servings: props.servings,
            difficulty: props.difficulty,
            language: props.language,
            source_id: props.source_id,
            source_name: props.source_name,
            ingredients: props.ingredients,
            instructions: props.instructions,
            tags: props.tags,
            nutrition_data: props.nutrition_data,
            url: props.url,
        })
    }

    /// Key used to detect the same recipe coming from different sources.
    pub fn dedup_key(&self) -> String {
        self.title.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, order: u32) -> RecipeIngredient {
        RecipeIngredient {
            name: name.to_string(),
            quantity: None,
            order,
        }
    }

    fn props(title: &str, ingredients: Vec<RecipeIngredient>) -> NewRecipeProps {
        NewRecipeProps {
            id: "db-1".to_string(),
            title: title.to_string(),
            description: None,
            image_url: None,
            cook_time_minutes: Some(25),
            servings: Some(4),
            difficulty: Some(Difficulty::Easy),
            language: Language::Da,
            source_id: "database".to_string(),
            source_name: "Recipe database".to_string(),
            ingredients,
            instructions: None,
            tags: None,
            nutrition_data: None,
            url: None,
        }
    }

    #[test]
    fn should_create_recipe_when_ingredients_are_ascending() {
        let recipe = Recipe::new(props(
            "Frikadeller",
            vec![ingredient("hakket svinekød", 1), ingredient("løg", 2)],
        ))
        .unwrap();

        assert_eq!(recipe.title, "Frikadeller");
        assert_eq!(recipe.ingredients.len(), 2);
    }

    #[test]
    fn should_reject_recipe_when_title_is_blank() {
        let result = Recipe::new(props("   ", vec![]));

        assert!(matches!(result, Err(RecipeError::TitleEmpty)));
    }

    #[test]
    fn should_reject_recipe_when_ingredient_order_repeats() {
        let result = Recipe::new(props(
            "Pasta",
            vec![ingredient("pasta", 1), ingredient("salt", 1)],
        ));

        assert!(matches!(result, Err(RecipeError::IngredientOrder)));
    }

    #[test]
    fn should_reject_recipe_when_ingredients_are_out_of_order() {
        let result = Recipe::new(props(
            "Pasta",
            vec![ingredient("salt", 3), ingredient("pasta", 1)],
        ));

        assert!(matches!(result, Err(RecipeError::IngredientOrder)));
    }

    #[test]
    fn should_case_fold_title_for_dedup_key() {
        let recipe = Recipe::new(props("Spaghetti Carbonara", vec![])).unwrap();

        assert_eq!(recipe.dedup_key(), "spaghetti carbonara");
    }
}
