use std::str::FromStr;

use dinnerplan_shared::{
    Audience, DayOfWeek, Ingredient, MacroProfile, PlannedMeal, Recipe, RecipeStep, WeeklyPlan,
};
use serde::Deserialize;
use serde_json::Value;
use time::Date;

use crate::PlanError;

#[derive(Deserialize)]
struct RawPlan {
    #[serde(default)]
    meals: Vec<RawMeal>,
}

#[derive(Deserialize)]
struct RawMeal {
    day: String,
    #[serde(default)]
    audience: Option<String>,
    #[serde(default)]
    meal_type: Option<String>,
    recipe: RawRecipe,
}

#[derive(Deserialize)]
struct RawRecipe {
    title: String,
    description: String,
    servings: RawNumber,
    #[serde(default)]
    macro_profile: Option<String>,
    #[serde(default)]
    meal_type: Option<String>,
    prep_time_min: RawNumber,
    cook_time_min: RawNumber,
    ingredients: Vec<RawIngredient>,
    steps: Vec<RawStep>,
}

#[derive(Deserialize)]
struct RawIngredient {
    name: String,
    quantity: RawNumber,
    unit: String,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Deserialize)]
struct RawStep {
    order: RawNumber,
    instruction: String,
}

/// Numbers sometimes arrive quoted ("1.5").
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn to_f64(&self, field: &'static str) -> Result<f64, PlanError> {
        let value = match self {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(s) => s.trim().parse::<f64>().ok(),
        };

        value
            .filter(|n| n.is_finite())
            .ok_or_else(|| PlanError::InvalidNumber {
                field,
                value: self.to_string(),
            })
    }

    /// Whole count; fractional parts are dropped.
    fn to_u32(&self, field: &'static str) -> Result<u32, PlanError> {
        let value = self.to_f64(field)?;
        if value < 0.0 || value > f64::from(u32::MAX) {
            return Err(PlanError::InvalidNumber {
                field,
                value: self.to_string(),
            });
        }
        Ok(value as u32)
    }
}

impl std::fmt::Display for RawNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawNumber::Number(n) => write!(f, "{n}"),
            RawNumber::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Convert parsed plan JSON into a [`WeeklyPlan`] for `week_of`
///
/// A missing `meals` key yields an empty plan. Structural checks (all seven
/// days present) are left to [`crate::validate_plan`].
pub fn parse_weekly_plan(data: Value, week_of: Date) -> Result<WeeklyPlan, PlanError> {
    let raw: RawPlan = serde_json::from_value(data).map_err(PlanError::Shape)?;

    let meals = raw
        .meals
        .into_iter()
        .map(parse_meal)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WeeklyPlan::new(meals, week_of))
}

fn parse_meal(raw: RawMeal) -> Result<PlannedMeal, PlanError> {
    let day = DayOfWeek::from_str(raw.day.trim()).map_err(|_| PlanError::UnknownDay(raw.day))?;

    let audience = raw
        .audience
        .as_deref()
        .and_then(|a| Audience::from_str(a.trim()).ok())
        .unwrap_or_default();

    let recipe = raw.recipe;
    let meal_type = normalize_meal_type(
        [recipe.meal_type.as_deref(), raw.meal_type.as_deref()]
            .into_iter()
            .flatten()
            .find(|m| !m.is_empty())
            .unwrap_or("balanced"),
    );

    let ingredients = recipe
        .ingredients
        .into_iter()
        .map(|ing| {
            Ok(Ingredient {
                quantity: ing.quantity.to_f64("quantity")?,
                name: ing.name,
                unit: ing.unit,
                category: ing.category,
            })
        })
        .collect::<Result<Vec<_>, PlanError>>()?;

    let steps = recipe
        .steps
        .into_iter()
        .map(|step| {
            Ok(RecipeStep {
                order: step.order.to_u32("order")?,
                instruction: step.instruction,
            })
        })
        .collect::<Result<Vec<_>, PlanError>>()?;

    let recipe = Recipe {
        servings: recipe.servings.to_u32("servings")?,
        macro_profile: macro_profile_from(recipe.macro_profile.as_deref()),
        meal_type: meal_type.clone(),
        prep_time_min: recipe.prep_time_min.to_u32("prep_time_min")?,
        cook_time_min: recipe.cook_time_min.to_u32("cook_time_min")?,
        title: recipe.title,
        description: recipe.description,
        ingredients,
        steps,
    };

    Ok(PlannedMeal {
        day,
        audience,
        meal_type,
        recipe,
    })
}

/// Loose mapping: producers invent their own profile names.
fn macro_profile_from(value: Option<&str>) -> MacroProfile {
    let value = value.unwrap_or_default().to_lowercase();

    if value.contains("high_protein") || value.contains("low_carb") {
        MacroProfile::HighProteinLowCarb
    } else if value.contains("kid_friendly") || value.contains("balanced") {
        MacroProfile::KidFriendlyBalanced
    } else {
        MacroProfile::Balanced
    }
}

fn normalize_meal_type(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    fn meal_json(day: &str) -> Value {
        json!({
            "day": day,
            "audience": "kids",
            "meal_type": "Kid Friendly",
            "recipe": {
                "title": "Mini Meatballs",
                "description": "Bite-size meatballs.",
                "servings": "4",
                "macro_profile": "kid_friendly_balanced",
                "prep_time_min": 15,
                "cook_time_min": 25.0,
                "ingredients": [
                    {"name": "ground beef", "quantity": "1.5", "unit": "lbs", "category": "meat"},
                    {"name": "breadcrumbs", "quantity": 0.5, "unit": "cup"}
                ],
                "steps": [
                    {"order": 2, "instruction": "Bake."},
                    {"order": 1, "instruction": "Mix and roll."}
                ]
            }
        })
    }

    #[test]
    fn test_parse_meal_fields() {
        let plan = parse_weekly_plan(json!({"meals": [meal_json("MONDAY")]}), date!(2026 - 10 - 19))
            .unwrap();

        let meal = &plan.meals[0];
        assert_eq!(meal.day, DayOfWeek::Monday);
        assert_eq!(meal.audience, Audience::Kids);
        assert_eq!(meal.meal_type, "kid_friendly");
        assert_eq!(meal.recipe.servings, 4);
        assert_eq!(meal.recipe.cook_time_min, 25);
        assert_eq!(meal.recipe.macro_profile, MacroProfile::KidFriendlyBalanced);
        assert_eq!(meal.recipe.ingredients[0].quantity, 1.5);
        assert_eq!(meal.recipe.ingredients[1].category, None);
        assert_eq!(meal.recipe.ordered_steps()[0].instruction, "Mix and roll.");
        assert_eq!(plan.week_of, date!(2026 - 10 - 19));
    }

    #[test]
    fn test_missing_meals_is_empty_plan() {
        let plan = parse_weekly_plan(json!({}), date!(2026 - 10 - 19)).unwrap();
        assert!(plan.meals.is_empty());
    }

    #[test]
    fn test_unknown_day() {
        let err = parse_weekly_plan(json!({"meals": [meal_json("FUNDAY")]}), date!(2026 - 10 - 19))
            .unwrap_err();
        assert!(matches!(err, PlanError::UnknownDay(day) if day == "FUNDAY"));
    }

    #[test]
    fn test_invalid_quantity() {
        let mut meal = meal_json("MONDAY");
        meal["recipe"]["ingredients"][0]["quantity"] = json!("a handful");

        let err = parse_weekly_plan(json!({"meals": [meal]}), date!(2026 - 10 - 19)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidNumber { field: "quantity", .. }));
    }

    #[test]
    fn test_missing_recipe_field_is_shape_error() {
        let mut meal = meal_json("MONDAY");
        meal["recipe"].as_object_mut().unwrap().remove("title");

        let err = parse_weekly_plan(json!({"meals": [meal]}), date!(2026 - 10 - 19)).unwrap_err();
        assert!(matches!(err, PlanError::Shape(_)));
    }

    #[test]
    fn test_macro_profile_mapping() {
        assert_eq!(
            macro_profile_from(Some("HIGH_PROTEIN")),
            MacroProfile::HighProteinLowCarb
        );
        assert_eq!(
            macro_profile_from(Some("low_carb")),
            MacroProfile::HighProteinLowCarb
        );
        assert_eq!(
            macro_profile_from(Some("balanced")),
            MacroProfile::KidFriendlyBalanced
        );
        assert_eq!(macro_profile_from(Some("vegan")), MacroProfile::Balanced);
        assert_eq!(macro_profile_from(None), MacroProfile::Balanced);
    }

    #[test]
    fn test_meal_type_fallbacks() {
        let mut meal = meal_json("MONDAY");
        meal["recipe"]["meal_type"] = json!("High Protein");
        let plan = parse_weekly_plan(json!({"meals": [meal]}), date!(2026 - 10 - 19)).unwrap();
        assert_eq!(plan.meals[0].meal_type, "high_protein");

        let mut meal = meal_json("MONDAY");
        meal.as_object_mut().unwrap().remove("meal_type");
        let plan = parse_weekly_plan(json!({"meals": [meal]}), date!(2026 - 10 - 19)).unwrap();
        assert_eq!(plan.meals[0].meal_type, "balanced");
        assert_eq!(plan.meals[0].recipe.meal_type, "balanced");
    }

    #[test]
    fn test_unknown_audience_defaults_to_adult() {
        let mut meal = meal_json("MONDAY");
        meal["audience"] = json!("family");
        let plan = parse_weekly_plan(json!({"meals": [meal]}), date!(2026 - 10 - 19)).unwrap();
        assert_eq!(plan.meals[0].audience, Audience::Adult);
    }
}
