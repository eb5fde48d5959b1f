use anyhow::Context;
use dinnerplan::Config;
use dinnerplan::pipeline::read_plan_source;
use dinnerplan_shopping::{format_grocery_list, generate_grocery_list};
use time::Date;

/// Print the aggregated grocery list for a plan
#[tracing::instrument(skip(config))]
pub fn grocery(config: Config, plan_source: String, week_of: Date) -> anyhow::Result<()> {
    let content = read_plan_source(&plan_source)?;
    let plan = dinnerplan_mealplan::load_plan(&content, week_of)
        .with_context(|| format!("failed to load plan from {plan_source}"))?;

    let grocery_list = generate_grocery_list(&plan, &config.planner);
    tracing::info!(items = grocery_list.len(), "Generated grocery list");

    println!("{}", format_grocery_list(&grocery_list));

    Ok(())
}
