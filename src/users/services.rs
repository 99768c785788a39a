use anyhow::Context;
use tracing::{debug, info, instrument};

use crate::{store::PlanStore, users::User};

/// Find the user owning `email`, creating it on first use.
///
/// A concurrent request may create the same email between our lookup and
/// insert; the insert then yields nothing and the row it wrote is re-read.
#[instrument(skip(store, name))]
pub async fn find_or_create_user(
    store: &dyn PlanStore,
    email: &str,
    name: &str,
) -> anyhow::Result<User> {
    if let Some(user) = store.find_user_by_email(email).await? {
        debug!(user_id = %user.id, "existing user");
        return Ok(user);
    }

    if let Some(user) = store.create_user(email, name).await? {
        info!(user_id = %user.id, "user created");
        return Ok(user);
    }

    debug!("lost user creation race; re-reading");
    store
        .find_user_by_email(email)
        .await?
        .context("user vanished after create conflict")
}
