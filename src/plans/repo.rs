use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::repo_types::{MealPlan, NewMeal, NewMealPlan, PlanDetails, PlanMeal, PlanMealRow};

const PLAN_COLUMNS: &str =
    "id, user_id, name, calories_target, protein_target, preferences, week_start_date, created_at";

const MEAL_COLUMNS: &str = "id, meal_plan_id, position, day_of_week, meal_type, name, \
     description, calories, protein, ingredients, instructions, created_at";

/// Insert a plan and all of its meals in one transaction.
pub async fn insert_plan_with_meals(db: &PgPool, new: NewMealPlan) -> anyhow::Result<PlanDetails> {
    let mut tx = db.begin().await.context("begin tx")?;

    let plan = sqlx::query_as::<_, MealPlan>(&format!(
        r#"
        INSERT INTO meal_plans
            (id, user_id, name, calories_target, protein_target, preferences, week_start_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PLAN_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(&new.name)
    .bind(new.calories_target)
    .bind(new.protein_target)
    .bind(&new.preferences)
    .bind(new.week_start_date)
    .fetch_one(&mut *tx)
    .await
    .context("insert meal plan")?;

    let mut meals = Vec::with_capacity(new.meals.len());
    for (position, meal) in new.meals.iter().enumerate() {
        let row = insert_meal_tx(&mut tx, plan.id, position as i32, meal).await?;
        meals.push(PlanMeal::try_from(row)?);
    }

    tx.commit().await.context("commit tx")?;
    Ok(PlanDetails { plan, meals })
}

async fn insert_meal_tx(
    tx: &mut Transaction<'_, Postgres>,
    plan_id: Uuid,
    position: i32,
    meal: &NewMeal,
) -> anyhow::Result<PlanMealRow> {
    let row = sqlx::query_as::<_, PlanMealRow>(&format!(
        r#"
        INSERT INTO plan_meals
            (id, meal_plan_id, position, day_of_week, meal_type, name,
             description, calories, protein, ingredients, instructions)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(plan_id)
    .bind(position)
    .bind(i16::from(meal.day_of_week))
    .bind(meal.meal_type.as_str())
    .bind(&meal.name)
    .bind(&meal.description)
    .bind(meal.calories)
    .bind(meal.protein)
    .bind(&meal.ingredients)
    .bind(&meal.instructions)
    .fetch_one(&mut **tx)
    .await
    .with_context(|| format!("insert meal #{position}"))?;
    Ok(row)
}

/// Load a plan and its meals in creation order.
pub async fn get_plan(db: &PgPool, plan_id: Uuid) -> anyhow::Result<Option<PlanDetails>> {
    let plan = sqlx::query_as::<_, MealPlan>(&format!(
        "SELECT {PLAN_COLUMNS} FROM meal_plans WHERE id = $1"
    ))
    .bind(plan_id)
    .fetch_optional(db)
    .await
    .context("select meal plan")?;

    let Some(plan) = plan else {
        return Ok(None);
    };

    let rows = sqlx::query_as::<_, PlanMealRow>(&format!(
        "SELECT {MEAL_COLUMNS} FROM plan_meals WHERE meal_plan_id = $1 ORDER BY position ASC"
    ))
    .bind(plan_id)
    .fetch_all(db)
    .await
    .context("select plan meals")?;

    let meals = rows
        .into_iter()
        .map(PlanMeal::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Some(PlanDetails { plan, meals }))
}
