use serde::Deserialize;

/// Planner preferences handed through to grocery aggregation.
///
/// Aggregation reads none of these fields today; allergy-based filtering
/// would hang off `allergies_avoid`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct PlannerSettings {
    #[serde(default)]
    pub allergies_avoid: Vec<String>,
    #[serde(default)]
    pub meal_types: Vec<String>,
}
