use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::DAYS_PER_WEEK;
use crate::planner::constants::{HEAVY_DAILY_CALORIES, LIGHT_DAILY_CALORIES};

/// Run-wide sampling bias derived from the calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalProfile {
    /// Prefer items at or above the slot's median calories.
    Heavy,
    /// Prefer items at or below the slot's median calories.
    Light,
    /// No bias.
    #[default]
    Standard,
}

impl GoalProfile {
    /// Pick the profile for a weekly calorie target.
    pub fn for_weekly_calories(weekly_calories: f64) -> Self {
        let daily = weekly_calories / DAYS_PER_WEEK as f64;
        if daily > HEAVY_DAILY_CALORIES {
            GoalProfile::Heavy
        } else if daily < LIGHT_DAILY_CALORIES {
            GoalProfile::Light
        } else {
            GoalProfile::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalProfile::Heavy => "heavy",
            GoalProfile::Light => "light",
            GoalProfile::Standard => "standard",
        }
    }
}

impl fmt::Display for GoalProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_thresholds() {
        assert_eq!(GoalProfile::for_weekly_calories(3000.0 * 7.0), GoalProfile::Heavy);
        assert_eq!(GoalProfile::for_weekly_calories(1500.0 * 7.0), GoalProfile::Light);
        assert_eq!(GoalProfile::for_weekly_calories(2500.0 * 7.0), GoalProfile::Standard);
    }

    #[test]
    fn test_profile_boundaries_are_standard() {
        // Both thresholds are strict.
        assert_eq!(GoalProfile::for_weekly_calories(2800.0 * 7.0), GoalProfile::Standard);
        assert_eq!(GoalProfile::for_weekly_calories(1800.0 * 7.0), GoalProfile::Standard);
    }
}
