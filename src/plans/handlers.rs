use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, FieldError},
    state::AppState,
};

use super::{
    display::{build_week_view, WeekView},
    dto::{MealPlanRequest, MealPlanResponse, PreferencesResponse},
    repo_types::PlanDetails,
    services,
    validation::{validate, COMMON_PREFERENCES},
};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", post(create_meal_plan))
        .route("/generate-meal-plan", post(create_meal_plan))
        .route("/meal-plans/:id", get(get_meal_plan))
        .route("/meal-plans/:id/week", get(get_week_view))
}

pub fn form_routes() -> Router<AppState> {
    Router::new().route("/preferences", get(list_preferences))
}

#[instrument(skip(state, payload))]
pub async fn create_meal_plan(
    State(state): State<AppState>,
    payload: Result<Json<MealPlanRequest>, JsonRejection>,
) -> Result<Json<MealPlanResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "unreadable meal plan request");
        ApiError::Validation(vec![FieldError::new("body", e.body_text())])
    })?;

    let submission = validate(request).map_err(|details| {
        warn!(fields = ?details.iter().map(|d| d.field).collect::<Vec<_>>(), "invalid meal plan request");
        ApiError::Validation(details)
    })?;

    let details = services::create_meal_plan(&state, submission).await?;
    Ok(Json(details.into()))
}

async fn load_plan(state: &AppState, id: Uuid) -> Result<PlanDetails, ApiError> {
    match state.store.get_plan(id).await {
        Ok(Some(details)) => Ok(details),
        Ok(None) => Err(ApiError::NotFound),
        Err(e) => {
            error!(error = %e, %id, "get_plan failed");
            Err(ApiError::Internal(e))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MealPlanResponse>, ApiError> {
    let details = load_plan(&state, id).await?;
    Ok(Json(details.into()))
}

#[instrument(skip(state))]
pub async fn get_week_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WeekView>, ApiError> {
    let details = load_plan(&state, id).await?;
    let view = build_week_view(&details, &state.config.meal_slots).map_err(|e| {
        error!(error = %e, %id, "build_week_view failed");
        ApiError::Internal(e)
    })?;
    Ok(Json(view))
}

pub async fn list_preferences() -> Json<PreferencesResponse> {
    Json(PreferencesResponse {
        preferences: &COMMON_PREFERENCES,
    })
}
