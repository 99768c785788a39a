use tracing::{error, info, instrument};

use crate::{
    error::ApiError,
    generation::{self, GeneratedMeal},
    state::AppState,
    users::services::find_or_create_user,
};

use super::{
    repo_types::{NewMeal, NewMealPlan, PlanDetails},
    validation::ValidatedSubmission,
};

impl From<GeneratedMeal> for NewMeal {
    fn from(m: GeneratedMeal) -> Self {
        Self {
            day_of_week: m.day_of_week,
            meal_type: m.meal_type,
            name: m.name,
            description: m.description,
            calories: m.calories.round() as i32,
            protein: m.protein.round() as i32,
            ingredients: m.ingredients,
            instructions: m.instructions,
        }
    }
}

/// Generate a week of meals for a validated submission and store it.
///
/// Generation runs before anything is written, so a rejected model reply
/// leaves no user, plan or meal rows behind.
#[instrument(skip(state, submission), fields(email = %submission.email))]
pub async fn create_meal_plan(
    state: &AppState,
    submission: ValidatedSubmission,
) -> Result<PlanDetails, ApiError> {
    let meals = generation::generate_weekly_meals(
        state.generator.as_ref(),
        &state.config.generation,
        &submission.targets(),
        &state.config.meal_slots,
    )
    .await?;

    let user = find_or_create_user(state.store.as_ref(), &submission.email, &submission.name)
        .await
        .map_err(|e| {
            error!(error = %e, "find_or_create_user failed");
            ApiError::Persistence(e)
        })?;

    let new_plan = NewMealPlan {
        user_id: user.id,
        name: submission.plan_name(),
        calories_target: submission.calories_target,
        protein_target: submission.protein_target,
        preferences: submission.preferences,
        week_start_date: submission.week_start_date,
        meals: meals.into_iter().map(NewMeal::from).collect(),
    };

    let details = state.store.create_plan(new_plan).await.map_err(|e| {
        error!(error = %e, user_id = %user.id, "create_plan failed");
        ApiError::Persistence(e)
    })?;

    info!(
        plan_id = %details.plan.id,
        user_id = %user.id,
        meals = details.meals.len(),
        "meal plan created"
    );
    Ok(details)
}
