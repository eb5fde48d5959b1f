use std::collections::BTreeSet;

use dinnerplan_shared::{DayOfWeek, WeeklyPlan};
use tracing::warn;

use crate::PlanError;

const EXPECTED_MEALS: usize = 7;

/// Check that every day Monday..Sunday has exactly one dinner
///
/// Timing outliers are only logged; a slow recipe is still a usable plan.
pub fn validate_plan(plan: &WeeklyPlan) -> Result<(), PlanError> {
    let found: BTreeSet<DayOfWeek> = plan.meals.iter().map(|meal| meal.day).collect();
    let missing: Vec<DayOfWeek> = DayOfWeek::week()
        .iter()
        .copied()
        .filter(|day| !found.contains(day))
        .collect();

    if !missing.is_empty() {
        return Err(PlanError::MissingDays(missing));
    }

    if plan.meals.len() != EXPECTED_MEALS {
        return Err(PlanError::MealCount(plan.meals.len()));
    }

    for meal in &plan.meals {
        let total_time = meal.recipe.total_time_min();
        if !(15..=75).contains(&total_time) {
            warn!(
                day = %meal.day,
                total_time,
                "Meal total time outside expected range (25-45 min active cooking)"
            );
        }

        let cook_time = meal.recipe.cook_time_min;
        if !(10..=55).contains(&cook_time) {
            warn!(
                day = %meal.day,
                cook_time,
                "Meal cook time outside expected range (25-45 min)"
            );
        }
    }

    Ok(())
}
