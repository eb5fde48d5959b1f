use dinnerplan_shared::DayOfWeek;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Malformed plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Plan JSON has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown day: {0}")]
    UnknownDay(String),

    #[error("Plan validation failed: missing days {}", format_days(.0))]
    MissingDays(Vec<DayOfWeek>),

    #[error("Plan must have exactly 7 meals, found {0}")]
    MealCount(usize),
}

fn format_days(days: &[DayOfWeek]) -> String {
    days.iter()
        .map(DayOfWeek::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
