use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::meal_slots::MealType;

use super::repo_types::{PlanDetails, PlanMeal};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Raw form submission. Fields stay untyped JSON so that missing and
/// mistyped fields are all reported by the validator in one response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub calories_target: Option<Value>,
    pub protein_target: Option<Value>,
    pub preferences: Option<Value>,
    pub week_start_date: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    pub id: Uuid,
    pub day_of_week: u8,
    pub meal_type: MealType,
    pub name: String,
    pub description: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories_target: i32,
    pub protein_target: i32,
    pub preferences: Vec<String>,
    #[serde(with = "iso_date")]
    pub week_start_date: Date,
    pub meals: Vec<MealResponse>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<PlanMeal> for MealResponse {
    fn from(m: PlanMeal) -> Self {
        Self {
            id: m.id,
            day_of_week: m.day_of_week,
            meal_type: m.meal_type,
            name: m.name,
            description: m.description,
            calories: m.calories,
            protein: m.protein,
            ingredients: m.ingredients,
            instructions: m.instructions,
        }
    }
}

impl From<PlanDetails> for MealPlanResponse {
    fn from(d: PlanDetails) -> Self {
        let p = d.plan;
        Self {
            id: p.id,
            user_id: p.user_id,
            name: p.name,
            calories_target: p.calories_target,
            protein_target: p.protein_target,
            preferences: p.preferences,
            week_start_date: p.week_start_date,
            meals: d.meals.into_iter().map(MealResponse::from).collect(),
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: &'static [&'static str],
}
