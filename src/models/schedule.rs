use std::sync::Arc;

use serde::Serialize;

use crate::error::{PlannerError, Result};
use crate::models::meal::{MealItem, MealSlot};
use crate::planner::GoalProfile;

/// Number of days in a schedule.
pub const DAYS_PER_WEEK: usize = 7;

/// One day of meals: an item for every slot.
///
/// A day that could not be fully populated is represented by `None` in
/// the owning [`WeeklySchedule`], never by a partial `DayPlan`.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    breakfast: Arc<MealItem>,
    lunch: Arc<MealItem>,
    dinner: Arc<MealItem>,
}

impl DayPlan {
    /// Assemble a day, checking every item sits in its own slot.
    pub fn new(
        breakfast: Arc<MealItem>,
        lunch: Arc<MealItem>,
        dinner: Arc<MealItem>,
    ) -> Result<Self> {
        for (item, slot) in [
            (&breakfast, MealSlot::Breakfast),
            (&lunch, MealSlot::Lunch),
            (&dinner, MealSlot::Dinner),
        ] {
            if item.slot != slot {
                return Err(PlannerError::InvalidInput(format!(
                    "{} is a {} item, not {}",
                    item.name, item.slot, slot
                )));
            }
        }

        Ok(Self {
            breakfast,
            lunch,
            dinner,
        })
    }

    pub fn meal(&self, slot: MealSlot) -> &MealItem {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Meals in serving order.
    pub fn meals(&self) -> [&MealItem; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }

    pub fn cost(&self) -> f64 {
        self.meals().iter().map(|m| m.price).sum()
    }

    pub fn calories(&self) -> f64 {
        self.meals().iter().map(|m| m.calories).sum()
    }
}

/// Scores cached on a schedule by the fitness evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    /// Signed ranking score, higher is better.
    pub fitness: f64,
    /// Accuracy percent in `[0, 100]`.
    pub accuracy: f64,
    pub total_cost: f64,
    pub total_calories: f64,
}

/// A candidate week: the unit of selection, crossover and mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySchedule {
    days: [Option<DayPlan>; DAYS_PER_WEEK],
    goal: GoalProfile,
    evaluation: Option<Evaluation>,
}

impl WeeklySchedule {
    /// Wrap a pre-built week. The schedule starts unevaluated.
    pub fn from_days(days: [Option<DayPlan>; DAYS_PER_WEEK], goal: GoalProfile) -> Self {
        Self {
            days,
            goal,
            evaluation: None,
        }
    }

    pub fn days(&self) -> &[Option<DayPlan>; DAYS_PER_WEEK] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Option<&DayPlan> {
        self.days.get(index).and_then(Option::as_ref)
    }

    pub fn goal(&self) -> GoalProfile {
        self.goal
    }

    /// All seven days, or `None` if any day is invalid.
    pub fn complete_days(&self) -> Option<Vec<&DayPlan>> {
        self.days.iter().map(Option::as_ref).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.days.iter().all(Option::is_some)
    }

    /// Replace one day. Cached scores are dropped.
    pub fn replace_day(&mut self, index: usize, day: Option<DayPlan>) {
        if let Some(slot) = self.days.get_mut(index) {
            *slot = day;
            self.evaluation = None;
        }
    }

    pub fn evaluation(&self) -> Option<Evaluation> {
        self.evaluation
    }

    pub(crate) fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.evaluation = Some(evaluation);
    }

    /// Cached fitness; unevaluated schedules rank below everything.
    pub fn fitness(&self) -> f64 {
        self.evaluation
            .map(|e| e.fitness)
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// Cached accuracy percent, 0 when unevaluated.
    pub fn accuracy(&self) -> f64 {
        self.evaluation.map(|e| e.accuracy).unwrap_or(0.0)
    }
}
