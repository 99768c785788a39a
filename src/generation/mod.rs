pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::{config::GenerationConfig, meal_slots::MealSlots};

pub use client::{CompletionClient, CompletionRequest, DisabledClient, OpenAiClient};
pub use error::GenerationError;
pub use parse::GeneratedMeal;

/// Nutritional inputs to the prompt. Advisory only; nothing checks the
/// generated meals against them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTargets {
    pub calories_target: i32,
    pub protein_target: i32,
    pub preferences: Vec<String>,
}

/// Builds the configured client, or a disabled one when the credential is
/// missing so the server can still start.
pub fn build_client(config: &GenerationConfig) -> Arc<dyn CompletionClient> {
    match OpenAiClient::new(config) {
        Ok(client) => {
            info!(model = %config.model, "generation client configured");
            Arc::new(client)
        }
        Err(e) => {
            warn!(error = %e, "meal plan generation is disabled");
            Arc::new(DisabledClient)
        }
    }
}

/// Asks the model for a week of meals and checks the shape of the answer.
/// One attempt; any failure is returned unchanged.
#[instrument(skip(client, config, targets, slots), fields(expected_meals = slots.per_week()))]
pub async fn generate_weekly_meals(
    client: &dyn CompletionClient,
    config: &GenerationConfig,
    targets: &PlanTargets,
    slots: &MealSlots,
) -> Result<Vec<GeneratedMeal>, GenerationError> {
    let request = CompletionRequest {
        system: prompt::SYSTEM_PROMPT.to_string(),
        user: prompt::build_user_prompt(targets, slots),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    let content = client.complete(&request).await.map_err(|e| {
        error!(error = %e, "generation call failed");
        e
    })?;

    parse::parse_meals(&content, slots).map_err(|e| {
        error!(error = %e, "generated meal plan rejected");
        e
    })
}
