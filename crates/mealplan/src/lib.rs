//! Turns the plan producer's JSON reply into a validated [`WeeklyPlan`].

mod error;
mod parse;
mod repair;
mod validate;

pub use error::PlanError;
pub use parse::parse_weekly_plan;
pub use repair::{parse_json_plan, strip_code_fence};
pub use validate::validate_plan;

use dinnerplan_shared::WeeklyPlan;
use time::Date;

/// Strip fences, parse (repairing when needed), convert and validate a plan.
pub fn load_plan(content: &str, week_of: Date) -> Result<WeeklyPlan, PlanError> {
    let content = strip_code_fence(content);
    let data = parse_json_plan(&content)?;
    let plan = parse_weekly_plan(data, week_of)?;

    validate_plan(&plan)?;

    tracing::info!(meals = plan.meals.len(), week_of = %plan.week_of, "Loaded weekly plan");

    Ok(plan)
}
