use std::collections::HashSet;

use serde::Deserialize;

use crate::meal_slots::{MealSlots, MealType, DAYS_PER_WEEK};

use super::error::GenerationError;

/// Per-meal ceilings; stored values are `INTEGER` columns.
pub const MAX_MEAL_CALORIES: f64 = 10_000.0;
pub const MAX_MEAL_PROTEIN: f64 = 1_000.0;

fn within(value: f64, max: f64) -> bool {
    (0.0..=max).contains(&value)
}

/// One meal as returned by the model, before it is tied to a plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMeal {
    pub day_of_week: u8,
    pub meal_type: MealType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub calories: f64,
    pub protein: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Parses the model reply into exactly one meal per slot of the week.
///
/// The reply is taken as-is: no fence stripping, no repair.
pub fn parse_meals(content: &str, slots: &MealSlots) -> Result<Vec<GeneratedMeal>, GenerationError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(GenerationError::InvalidJson)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => return Err(GenerationError::NotAnArray),
    };

    let expected = slots.per_week();
    if items.len() != expected {
        return Err(GenerationError::WrongCount {
            expected,
            actual: items.len(),
        });
    }

    let mut seen = HashSet::with_capacity(expected);
    let mut meals = Vec::with_capacity(expected);
    for (index, item) in items.into_iter().enumerate() {
        if let Some(day) = item.get("dayOfWeek").and_then(|d| d.as_i64()) {
            if !(0..i64::from(DAYS_PER_WEEK)).contains(&day) {
                return Err(GenerationError::DayOutOfRange { index, day });
            }
        }

        let meal: GeneratedMeal =
            serde_json::from_value(item).map_err(|e| GenerationError::InvalidMeal {
                index,
                reason: e.to_string(),
            })?;

        if meal.name.trim().is_empty() {
            return Err(GenerationError::InvalidMeal {
                index,
                reason: "empty name".into(),
            });
        }
        if !within(meal.calories, MAX_MEAL_CALORIES) || !within(meal.protein, MAX_MEAL_PROTEIN) {
            return Err(GenerationError::InvalidMeal {
                index,
                reason: format!(
                    "calories must be 0..={MAX_MEAL_CALORIES} and protein 0..={MAX_MEAL_PROTEIN}"
                ),
            });
        }
        if !slots.contains(meal.meal_type) {
            return Err(GenerationError::UnexpectedMealType {
                index,
                meal_type: meal.meal_type,
            });
        }
        if !seen.insert((meal.day_of_week, meal.meal_type)) {
            return Err(GenerationError::DuplicateSlot {
                day: meal.day_of_week,
                meal_type: meal.meal_type,
            });
        }
        meals.push(meal);
    }

    Ok(meals)
}
