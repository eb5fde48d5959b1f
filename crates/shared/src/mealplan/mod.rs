use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

use crate::recipe::Recipe;

/// Calendar day a dinner is planned for, Monday first.
#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Monday through Sunday.
    pub fn week() -> &'static [DayOfWeek] {
        Self::VARIANTS
    }

    /// "MONDAY" -> "Monday"
    pub fn title(&self) -> String {
        let upper = self.as_ref();
        let mut title = upper[..1].to_string();
        title.push_str(&upper[1..].to_lowercase());
        title
    }
}

#[derive(
    EnumString, Display, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Adult,
    Kids,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlannedMeal {
    pub day: DayOfWeek,
    pub audience: Audience,
    pub meal_type: String,
    pub recipe: Recipe,
}

/// Dinners for one week, in the order the producer listed them.
#[derive(Clone, Debug, PartialEq)]
pub struct WeeklyPlan {
    pub meals: Vec<PlannedMeal>,
    pub week_of: Date,
}

impl WeeklyPlan {
    pub fn new(meals: Vec<PlannedMeal>, week_of: Date) -> Self {
        Self { meals, week_of }
    }

    pub fn meal_for_day(&self, day: DayOfWeek) -> Option<&PlannedMeal> {
        self.meals.iter().find(|meal| meal.day == day)
    }

    /// Planned meals in Monday..Sunday order, skipping days without a meal.
    pub fn meals_by_day(&self) -> Vec<(DayOfWeek, &PlannedMeal)> {
        DayOfWeek::week()
            .iter()
            .filter_map(|day| self.meal_for_day(*day).map(|meal| (*day, meal)))
            .collect()
    }
}
