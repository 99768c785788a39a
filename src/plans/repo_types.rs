use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::meal_slots::MealType;

/// Row of `meal_plans`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories_target: i32,
    pub protein_target: i32,
    pub preferences: Vec<String>,
    pub week_start_date: Date,
    pub created_at: OffsetDateTime,
}

/// Row of `plan_meals` as stored; `meal_type` is the raw text column.
#[derive(Debug, Clone, FromRow)]
pub struct PlanMealRow {
    pub id: Uuid,
    pub meal_plan_id: Uuid,
    pub position: i32,
    pub day_of_week: i16,
    pub meal_type: String,
    pub name: String,
    pub description: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanMeal {
    pub id: Uuid,
    pub meal_plan_id: Uuid,
    pub position: i32,
    pub day_of_week: u8,
    pub meal_type: MealType,
    pub name: String,
    pub description: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<PlanMealRow> for PlanMeal {
    type Error = anyhow::Error;

    fn try_from(r: PlanMealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            meal_plan_id: r.meal_plan_id,
            position: r.position,
            day_of_week: u8::try_from(r.day_of_week)?,
            meal_type: MealType::from_str(&r.meal_type)?,
            name: r.name,
            description: r.description,
            calories: r.calories,
            protein: r.protein,
            ingredients: r.ingredients,
            instructions: r.instructions,
            created_at: r.created_at,
        })
    }
}

/// A plan with its meals in creation order.
#[derive(Debug, Clone)]
pub struct PlanDetails {
    pub plan: MealPlan,
    pub meals: Vec<PlanMeal>,
}

/// Input to the nested plan + meals insert.
#[derive(Debug, Clone)]
pub struct NewMealPlan {
    pub user_id: Uuid,
    pub name: String,
    pub calories_target: i32,
    pub protein_target: i32,
    pub preferences: Vec<String>,
    pub week_start_date: Date,
    pub meals: Vec<NewMeal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub day_of_week: u8,
    pub meal_type: MealType,
    pub name: String,
    pub description: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(meal_type: &str, day: i16) -> PlanMealRow {
        PlanMealRow {
            id: Uuid::new_v4(),
            meal_plan_id: Uuid::new_v4(),
            position: 0,
            day_of_week: day,
            meal_type: meal_type.into(),
            name: "Soup".into(),
            description: None,
            calories: 400,
            protein: 20,
            ingredients: vec![],
            instructions: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn row_converts_meal_type() {
        let meal = PlanMeal::try_from(row("DINNER", 6)).unwrap();
        assert_eq!(meal.meal_type, MealType::Dinner);
        assert_eq!(meal.day_of_week, 6);
    }

    #[test]
    fn row_with_unknown_type_or_negative_day_fails() {
        assert!(PlanMeal::try_from(row("BRUNCH", 1)).is_err());
        assert!(PlanMeal::try_from(row("LUNCH", -1)).is_err());
    }
}
