//! Weekly plan pipeline: load the plan, aggregate groceries, render the email

use std::io::Read;

use dinnerplan_shared::{Ingredient, PlannerSettings, WeeklyPlan};
use dinnerplan_shopping::generate_grocery_list;
use time::{Date, OffsetDateTime, macros::format_description};
use tracing::info;

use crate::email::{EmailContent, build_email_content, email_subject};
use crate::error::AppError;

const RULE: &str = "================================================================================";

/// Everything needed to deliver (or preview) one week's plan
#[derive(Debug, Clone)]
pub struct WeeklyDigest {
    pub plan: WeeklyPlan,
    pub grocery_list: Vec<Ingredient>,
    pub subject: String,
    pub content: EmailContent,
}

impl WeeklyDigest {
    /// Run the plan through repair, validation, aggregation and rendering
    pub fn prepare(
        plan_json: &str,
        week_of: Date,
        settings: &PlannerSettings,
    ) -> Result<Self, AppError> {
        let plan = dinnerplan_mealplan::load_plan(plan_json, week_of)?;

        let grocery_list = generate_grocery_list(&plan, settings);
        info!(items = grocery_list.len(), "Generated grocery list");

        let content = build_email_content(&plan, &grocery_list)?;
        let subject = email_subject(&plan)?;

        Ok(Self {
            plan,
            grocery_list,
            subject,
            content,
        })
    }

    /// Console preview printed instead of sending
    pub fn dry_run_report(&self, target_email: &str, include_html: bool) -> String {
        let mut report = format!("\n{RULE}\nDRY RUN - Email would be sent to: {target_email}\n{RULE}\n");
        report.push_str("\nTEXT VERSION:\n");
        report.push_str(&self.content.text);
        if include_html {
            report.push_str(&format!("\n\n{RULE}\nHTML VERSION:\n"));
            report.push_str(&self.content.html);
        }
        report.push_str(&format!("\n\n{RULE}"));
        report
    }
}

/// Read plan JSON from a file, or from stdin when `source` is "-"
pub fn read_plan_source(source: &str) -> Result<String, AppError> {
    let to_error = |source_err| AppError::PlanSourceError {
        path: source.to_string(),
        source: source_err,
    };

    if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(to_error)?;
        return Ok(content);
    }

    std::fs::read_to_string(source).map_err(to_error)
}

/// Parse a YYYY-MM-DD date (clap value parser for `--week-of`)
pub fn parse_week_of(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| format!("Invalid date format '{value}'. Use YYYY-MM-DD."))
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
