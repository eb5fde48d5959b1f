use askama::Template;
use dinnerplan_shared::{Audience, Ingredient, PlannedMeal, WeeklyPlan};
use dinnerplan_shopping::{format_grocery_list, format_quantity, group_by_category};
use time::macros::format_description;

use super::EmailContent;
use crate::error::AppError;

struct StepView {
    order: u32,
    instruction: String,
}

struct MealView {
    day: String,
    title: String,
    badge: String,
    badge_class: &'static str,
    description: String,
    servings: u32,
    prep_time: u32,
    cook_time: u32,
    total_time: u32,
    ingredients: Vec<String>,
    steps: Vec<StepView>,
}

struct GroceryGroupView {
    title: String,
    items: Vec<String>,
}

/// Weekly plan email HTML template
#[derive(Template)]
#[template(path = "emails/weekly-plan.html")]
struct WeeklyPlanHtmlTemplate<'a> {
    week: &'a str,
    meals: &'a [MealView],
    grocery_groups: &'a [GroceryGroupView],
}

/// Weekly plan email plain text template
#[derive(Template)]
#[template(path = "emails/weekly-plan.txt")]
struct WeeklyPlanTextTemplate<'a> {
    week: &'a str,
    meals: &'a [MealView],
    grocery_text: &'a str,
}

/// Render the HTML and plain text bodies for a plan and its grocery list
///
/// Meals are listed Monday through Sunday regardless of plan order.
pub fn build_email_content(
    plan: &WeeklyPlan,
    grocery_list: &[Ingredient],
) -> Result<EmailContent, AppError> {
    let week = plan
        .week_of
        .format(format_description!("[month repr:long] [day], [year]"))?;

    let meals: Vec<MealView> = plan
        .meals_by_day()
        .into_iter()
        .map(|(_, meal)| meal_view(meal))
        .collect();

    let grocery_groups: Vec<GroceryGroupView> = group_by_category(grocery_list)
        .into_iter()
        .map(|group| GroceryGroupView {
            title: group.title().to_string(),
            items: group.items.into_iter().map(ingredient_line).collect(),
        })
        .collect();

    let html = WeeklyPlanHtmlTemplate {
        week: &week,
        meals: &meals,
        grocery_groups: &grocery_groups,
    }
    .render()?;

    let grocery_text = format_grocery_list(grocery_list);
    let text = WeeklyPlanTextTemplate {
        week: &week,
        meals: &meals,
        grocery_text: &grocery_text,
    }
    .render()?;

    Ok(EmailContent { html, text })
}

/// Subject line, e.g. "Weekly Dinner Plan (Week of 2026-10-19)"
pub fn email_subject(plan: &WeeklyPlan) -> Result<String, AppError> {
    let week = plan
        .week_of
        .format(format_description!("[year]-[month]-[day]"))?;

    Ok(format!("Weekly Dinner Plan (Week of {week})"))
}

fn meal_view(meal: &PlannedMeal) -> MealView {
    let recipe = &meal.recipe;
    let (audience, badge_class) = match meal.audience {
        Audience::Adult => ("Adult", "badge-adult"),
        Audience::Kids => ("Kids", "badge-kids"),
    };

    MealView {
        day: meal.day.title(),
        title: recipe.title.clone(),
        badge: format!("{audience} • {}", meal_type_label(&meal.meal_type)),
        badge_class,
        description: recipe.description.clone(),
        servings: recipe.servings,
        prep_time: recipe.prep_time_min,
        cook_time: recipe.cook_time_min,
        total_time: recipe.total_time_min(),
        ingredients: recipe.ingredients.iter().map(ingredient_line).collect(),
        steps: recipe
            .ordered_steps()
            .into_iter()
            .map(|step| StepView {
                order: step.order,
                instruction: step.instruction.clone(),
            })
            .collect(),
    }
}

fn ingredient_line(ingredient: &Ingredient) -> String {
    format!(
        "{} {} {}",
        format_quantity(ingredient.quantity),
        ingredient.unit,
        ingredient.name
    )
}

/// "high_protein" -> "High Protein"
fn meal_type_label(meal_type: &str) -> String {
    meal_type
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
