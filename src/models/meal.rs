use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// The three meals of a day. Every catalog item belongs to exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    /// All slots in serving order.
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            other => Err(PlannerError::InvalidItem(format!(
                "unknown meal type '{}'",
                other
            ))),
        }
    }
}

/// A catalog meal. Immutable once built; schedules share it through `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealItem {
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub price: f64,
    pub slot: MealSlot,
}

impl MealItem {
    /// Build a validated item: non-empty name, positive calories, non-negative price.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        calories: f64,
        price: f64,
        slot: MealSlot,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        let category = category.into().trim().to_string();

        if name.is_empty() {
            return Err(PlannerError::InvalidItem("empty meal name".to_string()));
        }
        if !calories.is_finite() || calories <= 0.0 {
            return Err(PlannerError::InvalidItem(format!(
                "{}: calories must be positive, got {}",
                name, calories
            )));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(PlannerError::InvalidItem(format!(
                "{}: price must be non-negative, got {}",
                name, price
            )));
        }

        Ok(Self {
            name,
            category,
            calories,
            price,
            slot,
        })
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-insensitive category comparison.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }
}

/// One row of the tabular catalog source, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Type")]
    pub slot: String,

    #[serde(rename = "Category", default)]
    pub category: String,

    #[serde(rename = "Cal")]
    pub calories: f64,

    #[serde(rename = "Price")]
    pub price: f64,
}

impl TryFrom<MealRecord> for MealItem {
    type Error = PlannerError;

    fn try_from(record: MealRecord) -> Result<Self> {
        let slot = record.slot.parse()?;
        MealItem::new(
            record.name,
            record.category,
            record.calories,
            record.price,
            slot,
        )
    }
}

impl From<&MealItem> for MealRecord {
    fn from(item: &MealItem) -> Self {
        Self {
            name: item.name.clone(),
            slot: item.slot.to_string(),
            category: item.category.clone(),
            calories: item.calories,
            price: item.price,
        }
    }
}
