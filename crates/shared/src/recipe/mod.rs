use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MacroProfile {
    HighProteinLowCarb,
    KidFriendlyBalanced,
    #[default]
    Balanced,
}

/// A single ingredient line of a recipe.
///
/// `category` is free text ("produce", "meat", ...); `None` means uncategorized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            category: category.map(str::to_owned),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub order: u32,
    pub instruction: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub servings: u32,
    pub macro_profile: MacroProfile,
    pub meal_type: String,
    pub prep_time_min: u32,
    pub cook_time_min: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    /// Prep plus cook time, capped at `u32::MAX`.
    pub fn total_time_min(&self) -> u32 {
        self.prep_time_min.saturating_add(self.cook_time_min)
    }

    /// Steps ordered by their `order` field, whatever order they were listed in.
    pub fn ordered_steps(&self) -> Vec<&RecipeStep> {
        let mut steps: Vec<&RecipeStep> = self.steps.iter().collect();
        steps.sort_by_key(|step| step.order);
        steps
    }
}
