use anyhow::Context;
use serde::Serialize;
use time::{macros::format_description, Date, Duration};
use uuid::Uuid;

use crate::meal_slots::{MealSlots, MealType, DAYS_PER_WEEK, DAY_NAMES};

use super::repo_types::{PlanDetails, PlanMeal};

const INGREDIENT_PREVIEW: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Nutrition {
    pub calories: i64,
    pub protein: i64,
}

impl Nutrition {
    fn sum<'a>(meals: impl Iterator<Item = &'a PlanMeal>) -> Self {
        meals.fold(Self::default(), |acc, m| Self {
            calories: acc.calories + i64::from(m.calories),
            protein: acc.protein + i64::from(m.protein),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCard {
    pub name: String,
    pub description: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub ingredients: Vec<String>,
    pub more_ingredients: usize,
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub meal_type: MealType,
    pub label: &'static str,
    pub meal: Option<MealCard>,
    /// Set only when no meal exists for the slot.
    pub empty_text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub day_of_week: u8,
    pub day_name: &'static str,
    pub date_label: String,
    pub totals: Nutrition,
    pub slots: Vec<SlotView>,
}

/// The 7-day grid rendered for a stored plan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub plan_id: Uuid,
    pub title: String,
    pub week_label: String,
    pub daily_average: Nutrition,
    pub target: Nutrition,
    pub preferences: Vec<String>,
    pub days: Vec<DayView>,
}

/// `Jan 7` style label for `start + offset` days.
pub fn day_label(start: Date, offset: u8) -> anyhow::Result<String> {
    let date = start
        .checked_add(Duration::days(i64::from(offset)))
        .context("date out of range")?;
    date.format(format_description!("[month repr:short] [day padding:none]"))
        .context("format date")
}

fn card(meal: &PlanMeal) -> MealCard {
    MealCard {
        name: meal.name.clone(),
        description: meal.description.clone().filter(|d| !d.is_empty()),
        calories: meal.calories,
        protein: meal.protein,
        ingredients: meal
            .ingredients
            .iter()
            .take(INGREDIENT_PREVIEW)
            .cloned()
            .collect(),
        more_ingredients: meal.ingredients.len().saturating_sub(INGREDIENT_PREVIEW),
        instructions: meal.instructions.clone().filter(|i| !i.is_empty()),
    }
}

fn rounded_daily(total: i64) -> i64 {
    (total as f64 / f64::from(DAYS_PER_WEEK)).round() as i64
}

/// Groups meals by (day, type) for every configured slot. A slot without a
/// meal gets an explicit empty state; if a slot has several meals the first
/// one in creation order is shown. Totals and averages count only the meals
/// shown.
pub fn build_week_view(details: &PlanDetails, slots: &MealSlots) -> anyhow::Result<WeekView> {
    let plan = &details.plan;

    let mut days = Vec::with_capacity(DAYS_PER_WEEK as usize);
    let mut total = Nutrition::default();
    for (day, day_name) in (0..DAYS_PER_WEEK).zip(DAY_NAMES) {
        let placed: Vec<(MealType, Option<&PlanMeal>)> = slots
            .types()
            .iter()
            .map(|&meal_type| {
                let meal = details
                    .meals
                    .iter()
                    .find(|m| m.day_of_week == day && m.meal_type == meal_type);
                (meal_type, meal)
            })
            .collect();

        let totals = Nutrition::sum(placed.iter().filter_map(|(_, m)| *m));
        total.calories += totals.calories;
        total.protein += totals.protein;

        let slot_views = placed
            .into_iter()
            .map(|(meal_type, meal)| SlotView {
                meal_type,
                label: meal_type.label(),
                meal: meal.map(card),
                empty_text: match meal {
                    Some(_) => None,
                    None => Some(format!("No {} planned", meal_type.label().to_lowercase())),
                },
            })
            .collect();

        days.push(DayView {
            day_of_week: day,
            day_name,
            date_label: day_label(plan.week_start_date, day)?,
            totals,
            slots: slot_views,
        });
    }

    Ok(WeekView {
        plan_id: plan.id,
        title: plan.name.clone(),
        week_label: format!("Week of {}", day_label(plan.week_start_date, 0)?),
        daily_average: Nutrition {
            calories: rounded_daily(total.calories),
            protein: rounded_daily(total.protein),
        },
        target: Nutrition {
            calories: i64::from(plan.calories_target),
            protein: i64::from(plan.protein_target),
        },
        preferences: plan.preferences.clone(),
        days,
    })
}
