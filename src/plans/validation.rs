use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use time::{macros::format_description, Date};

use crate::{error::FieldError, generation::PlanTargets};

use super::dto::MealPlanRequest;

pub const CALORIES_RANGE: (i32, i32) = (1200, 4000);
pub const PROTEIN_RANGE: (i32, i32) = (50, 300);

/// Tags offered by the form; submissions may also carry free-form ones.
pub const COMMON_PREFERENCES: [&str; 9] = [
    "Vegetarian",
    "Vegan",
    "Gluten-free",
    "Dairy-free",
    "Low-carb",
    "High-protein",
    "Mediterranean",
    "No nuts",
    "No seafood",
];

/// A submission that passed every check, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub calories_target: i32,
    pub protein_target: i32,
    pub preferences: Vec<String>,
    pub week_start_date: Date,
}

impl ValidatedSubmission {
    pub fn targets(&self) -> PlanTargets {
        PlanTargets {
            calories_target: self.calories_target,
            protein_target: self.protein_target,
            preferences: self.preferences.clone(),
        }
    }

    pub fn plan_name(&self) -> String {
        format!("{}'s Meal Plan", self.name)
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trimmed text field. Missing or null reads as empty; any other non-string
/// is reported and yields `None`.
fn text_field(
    field: &'static str,
    value: Option<Value>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

fn whole_in_range(
    field: &'static str,
    value: Option<Value>,
    (min, max): (i32, i32),
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    let v = match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            return None;
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a number"));
            return None;
        }
    };
    if v.fract() != 0.0 {
        errors.push(FieldError::new(field, "must be a whole number"));
        return None;
    }
    if v < f64::from(min) || v > f64::from(max) {
        errors.push(FieldError::new(
            field,
            format!("must be between {min} and {max}"),
        ));
        return None;
    }
    Some(v as i32)
}

fn preference_list(value: Option<Value>, errors: &mut Vec<FieldError>) -> Vec<String> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(FieldError::new("preferences", "must be an array of strings"));
            return Vec::new();
        }
    };
    let mut raw = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => raw.push(s),
            _ => {
                errors.push(FieldError::new("preferences", "must be an array of strings"));
                return Vec::new();
            }
        }
    }
    normalize_preferences(raw)
}

fn normalize_preferences(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for p in raw {
        let p = p.trim();
        if !p.is_empty() && !out.iter().any(|seen| seen == p) {
            out.push(p.to_string());
        }
    }
    out
}

/// Checks every field and reports all failures at once.
pub fn validate(req: MealPlanRequest) -> Result<ValidatedSubmission, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = text_field("name", req.name, &mut errors).unwrap_or_default();
    if name.is_empty() && !errors.iter().any(|e| e.field == "name") {
        errors.push(FieldError::new("name", "must not be empty"));
    }

    let email = text_field("email", req.email, &mut errors).map(|e| e.to_lowercase());
    if let Some(email) = &email {
        if !is_valid_email(email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }
    }
    let email = email.unwrap_or_default();

    let calories = whole_in_range("caloriesTarget", req.calories_target, CALORIES_RANGE, &mut errors);
    let protein = whole_in_range("proteinTarget", req.protein_target, PROTEIN_RANGE, &mut errors);

    let preferences = preference_list(req.preferences, &mut errors);

    let raw_date = text_field("weekStartDate", req.week_start_date, &mut errors);
    let week_start_date = match raw_date.as_deref() {
        None => None,
        Some("") => {
            errors.push(FieldError::new("weekStartDate", "is required"));
            None
        }
        Some(s) => match Date::parse(s, format_description!("[year]-[month]-[day]")) {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push(FieldError::new(
                    "weekStartDate",
                    "must be a date in YYYY-MM-DD form",
                ));
                None
            }
        },
    };

    match (calories, protein, week_start_date) {
        (Some(calories_target), Some(protein_target), Some(week_start_date)) if errors.is_empty() => {
            Ok(ValidatedSubmission {
                name,
                email,
                calories_target,
                protein_target,
                preferences,
                week_start_date,
            })
        }
        _ => Err(errors),
    }
}
