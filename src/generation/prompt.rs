use crate::meal_slots::{MealSlots, MealType, DAYS_PER_WEEK, DAY_NAMES};

use super::PlanTargets;

pub const SYSTEM_PROMPT: &str = "You are a professional nutritionist and chef. \
You write practical, balanced meal plans that hit specific nutritional targets. \
Reply with valid JSON only.";

/// Per-meal share of a daily total, rounded to the nearest unit.
pub fn per_meal(daily: i32, slots: &MealSlots) -> i64 {
    (f64::from(daily) / slots.per_day() as f64).round() as i64
}

fn slot_names(slots: &MealSlots) -> String {
    let names: Vec<String> = slots
        .types()
        .iter()
        .map(|t| t.label().to_lowercase())
        .collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        _ => names.join(""),
    }
}

fn type_legend(slots: &MealSlots) -> String {
    slots
        .types()
        .iter()
        .map(|t| format!("\"{}\"", t.as_str()))
        .collect::<Vec<_>>()
        .join(" or ")
}

fn count_breakdown(slots: &MealSlots) -> String {
    slots
        .types()
        .iter()
        .map(|t| format!("{} {}", DAYS_PER_WEEK, t.plural()))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn day_legend() -> String {
    DAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{i}={d}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the user instruction asking for the whole week as one JSON array.
pub fn build_user_prompt(targets: &PlanTargets, slots: &MealSlots) -> String {
    let total = slots.per_week();
    let example_type = slots.types().first().copied().unwrap_or(MealType::Lunch);
    let preferences = if targets.preferences.is_empty() {
        "No specific dietary preferences".to_string()
    } else {
        format!(
            "Dietary preferences and restrictions: {}",
            targets.preferences.join(", ")
        )
    };

    format!(
        r#"Create a {days}-day meal plan with {names} for every day ({total} meals in total).

Requirements:
- Daily calorie target: {cal} calories
- Daily protein target: {prot}g protein
- Target per meal: about {cal_meal} calories and {prot_meal}g protein
- {preferences}

For every meal include:
1. An appealing name
2. A short description (1-2 sentences)
3. Estimated calories
4. Estimated protein in grams
5. The main ingredients (5-8 items)
6. Short cooking instructions (2-3 sentences)

Vary the dishes across the week and keep them realistic for home cooking.

Answer with a JSON array of objects using exactly this structure:
[
  {{
    "dayOfWeek": 0,
    "mealType": "{example_type}",
    "name": "Meal name",
    "description": "Short description",
    "calories": {cal_meal},
    "protein": {prot_meal},
    "ingredients": ["ingredient 1", "ingredient 2", "ingredient 3"],
    "instructions": "Cooking instructions"
  }}
]

Days: {day_legend}
Meal types: {type_legend}

Return all {total} meals ({breakdown}) in that single JSON array."#,
        days = DAYS_PER_WEEK,
        names = slot_names(slots),
        total = total,
        cal = targets.calories_target,
        prot = targets.protein_target,
        cal_meal = per_meal(targets.calories_target, slots),
        prot_meal = per_meal(targets.protein_target, slots),
        preferences = preferences,
        example_type = example_type.as_str(),
        day_legend = day_legend(),
        type_legend = type_legend(slots),
        breakdown = count_breakdown(slots),
    )
}
