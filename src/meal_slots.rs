use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: u8 = 7;

/// Day names by day-of-week index, 0 = Sunday.
pub const DAY_NAMES: [&str; DAYS_PER_WEEK as usize] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Meal-type tag of a slot. Wire and storage form is the uppercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MealType {
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Lunch => "LUNCH",
            MealType::Dinner => "DINNER",
        }
    }

    /// Human label used by the week view ("Lunch", "Dinner").
    pub fn label(self) -> &'static str {
        match self {
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            MealType::Lunch => "lunches",
            MealType::Dinner => "dinners",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LUNCH" => Ok(MealType::Lunch),
            "DINNER" => Ok(MealType::Dinner),
            other => anyhow::bail!("unknown meal type {other:?}"),
        }
    }
}

/// Meal types served each day, in display order.
///
/// The prompt builder, the shape check on generated output and the week view
/// all read the per-day cardinality from here so they cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealSlots(Vec<MealType>);

impl MealSlots {
    pub fn new(types: Vec<MealType>) -> anyhow::Result<Self> {
        anyhow::ensure!(!types.is_empty(), "at least one meal type is required");
        for (i, t) in types.iter().enumerate() {
            anyhow::ensure!(!types[..i].contains(t), "meal type {t} listed twice");
        }
        Ok(Self(types))
    }

    /// Parses a comma separated list such as `LUNCH,DINNER`.
    pub fn parse(list: &str) -> anyhow::Result<Self> {
        let types = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(MealType::from_str)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::new(types)
    }

    pub fn types(&self) -> &[MealType] {
        &self.0
    }

    pub fn per_day(&self) -> usize {
        self.0.len()
    }

    pub fn per_week(&self) -> usize {
        self.per_day() * DAYS_PER_WEEK as usize
    }

    pub fn contains(&self, meal_type: MealType) -> bool {
        self.0.contains(&meal_type)
    }

    /// Every (day, type) pair of the week, day-major.
    pub fn iter_week(&self) -> impl Iterator<Item = (u8, MealType)> + '_ {
        (0..DAYS_PER_WEEK).flat_map(move |day| self.0.iter().map(move |t| (day, *t)))
    }
}

impl Default for MealSlots {
    fn default() -> Self {
        Self(vec![MealType::Lunch, MealType::Dinner])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lunch_and_dinner() {
        let slots = MealSlots::default();
        assert_eq!(slots.types(), &[MealType::Lunch, MealType::Dinner]);
        assert_eq!(slots.per_day(), 2);
        assert_eq!(slots.per_week(), 14);
        assert_eq!(slots.iter_week().count(), 14);
    }

    #[test]
    fn parse_accepts_case_and_spaces() {
        let slots = MealSlots::parse(" dinner , Lunch").unwrap();
        assert_eq!(slots.types(), &[MealType::Dinner, MealType::Lunch]);

        let single = MealSlots::parse("DINNER").unwrap();
        assert_eq!(single.per_week(), 7);
        assert!(!single.contains(MealType::Lunch));
    }

    #[test]
    fn parse_rejects_bad_lists() {
        assert!(MealSlots::parse("").is_err());
        assert!(MealSlots::parse("LUNCH,LUNCH").is_err());
        assert!(MealSlots::parse("BREAKFAST").is_err());
    }

    #[test]
    fn meal_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&MealType::Lunch).unwrap(), "\"LUNCH\"");
        let t: MealType = serde_json::from_str("\"DINNER\"").unwrap();
        assert_eq!(t, MealType::Dinner);
        assert!(serde_json::from_str::<MealType>("\"dinner\"").is_err());
    }
}
