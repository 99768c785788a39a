use thiserror::Error;

use crate::meal_slots::MealType;

/// Everything that can go wrong between building the prompt and holding a
/// checked list of meals. Callers collapse all of these into one generic
/// failure; the variants exist for the server log.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation API key is not configured (set OPENAI_API_KEY)")]
    MissingCredential,

    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("generation API returned no content")]
    EmptyContent,

    #[error("generated content is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("generated content is not a JSON array")]
    NotAnArray,

    #[error("expected {expected} meals, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("meal #{index} is malformed: {reason}")]
    InvalidMeal { index: usize, reason: String },

    #[error("meal #{index} has day index {day} outside 0..=6")]
    DayOutOfRange { index: usize, day: i64 },

    #[error("meal #{index} has meal type {meal_type} which is not served")]
    UnexpectedMealType { index: usize, meal_type: MealType },

    #[error("slot (day {day}, {meal_type}) appears more than once")]
    DuplicateSlot { day: u8, meal_type: MealType },
}
