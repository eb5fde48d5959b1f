pub mod mealplan;
pub mod recipe;
mod settings;

pub use mealplan::{Audience, DayOfWeek, PlannedMeal, WeeklyPlan};
pub use recipe::{Ingredient, MacroProfile, Recipe, RecipeStep};
pub use settings::PlannerSettings;
