use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    plans::{
        repo,
        repo_types::{NewMealPlan, PlanDetails},
    },
    users::User,
};

/// Persistence used by the plan flow. Creates only; nothing is updated or
/// deleted.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    /// Returns `None` if a user with this email already exists.
    async fn create_user(&self, email: &str, name: &str) -> anyhow::Result<Option<User>>;

    /// Writes the plan and its meals as one unit.
    async fn create_plan(&self, plan: NewMealPlan) -> anyhow::Result<PlanDetails>;

    async fn get_plan(&self, plan_id: Uuid) -> anyhow::Result<Option<PlanDetails>>;
}

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        User::find_by_email(&self.db, email).await
    }

    async fn create_user(&self, email: &str, name: &str) -> anyhow::Result<Option<User>> {
        User::create(&self.db, email, name).await
    }

    async fn create_plan(&self, plan: NewMealPlan) -> anyhow::Result<PlanDetails> {
        repo::insert_plan_with_meals(&self.db, plan).await
    }

    async fn get_plan(&self, plan_id: Uuid) -> anyhow::Result<Option<PlanDetails>> {
        repo::get_plan(&self.db, plan_id).await
    }
}
