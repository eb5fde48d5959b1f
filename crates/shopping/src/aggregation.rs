use dinnerplan_shared::{Ingredient, PlannerSettings, WeeklyPlan};
use tracing::debug;

use crate::units::{are_compatible_units, normalize_unit};

const UNCATEGORIZED_SORT_KEY: &str = "zzz_uncategorized";

/// Normalize ingredient name (lowercase, trim whitespace)
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Check whether two ingredients can be merged into one shopping entry
///
/// Names must match after normalization, and units must either normalize to
/// the same token or fall in the same compatibility group.
pub fn can_combine(a: &Ingredient, b: &Ingredient) -> bool {
    if normalize_name(&a.name) != normalize_name(&b.name) {
        return false;
    }

    let unit_a = normalize_unit(&a.unit);
    let unit_b = normalize_unit(&b.unit);

    unit_a == unit_b || are_compatible_units(&unit_a, &unit_b)
}

/// Generate an aggregated grocery list from the weekly meal plan
///
/// Ingredients are folded in plan order, then recipe order. Each one is added
/// to the first accumulated entry it can combine with; otherwise it starts a
/// new entry that keeps its original name, unit and category. The result is
/// sorted by category (uncategorized last), then by normalized name.
///
/// `_settings` is accepted so planner preferences travel with the plan; no
/// field is read here.
pub fn generate_grocery_list(plan: &WeeklyPlan, _settings: &PlannerSettings) -> Vec<Ingredient> {
    let mut entries: Vec<Ingredient> = Vec::new();

    for meal in &plan.meals {
        for ingredient in &meal.recipe.ingredients {
            match entries
                .iter_mut()
                .find(|existing| can_combine(ingredient, existing))
            {
                Some(existing) => existing.quantity += ingredient.quantity,
                None => entries.push(ingredient.clone()),
            }
        }
    }

    entries.sort_by_cached_key(sort_key);

    debug!(
        meals = plan.meals.len(),
        items = entries.len(),
        "Aggregated grocery list"
    );

    entries
}

fn sort_key(ingredient: &Ingredient) -> (String, String) {
    let category = ingredient
        .category
        .as_deref()
        .filter(|category| !category.is_empty())
        .unwrap_or(UNCATEGORIZED_SORT_KEY);

    (category.to_lowercase(), normalize_name(&ingredient.name))
}
