//! Wire shapes of the Spoonacular endpoints this crate calls. Only the
//! fields that feed the recipe model are declared.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
    pub spoonacular_source_url: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
    /// Free-form HTML, used when no analyzed steps exist.
    pub instructions: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    pub nutrition: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstructionStep {
    pub step: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexSearchResponse {
    #[serde(default)]
    pub results: Vec<RecipeInformation>,
    pub total_results: Option<u32>,
}

/// One entry of the `findByIngredients` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientMatch {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    #[serde(default)]
    pub used_ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub missed_ingredients: Vec<IngredientLine>,
}
