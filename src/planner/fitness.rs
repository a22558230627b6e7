use crate::models::{DayPlan, Evaluation, MealSlot, WeeklySchedule};
use crate::planner::constants::{
    CALORIE_WEIGHT, COST_WEIGHT, INVALID_FITNESS, LUNCH_REPEAT_PENALTY,
};

/// Weekly targets a schedule is scored against. Both must be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessTargets {
    pub weekly_budget: f64,
    pub weekly_calories: f64,
}

impl FitnessTargets {
    pub fn new(weekly_budget: f64, weekly_calories: f64) -> Self {
        Self {
            weekly_budget,
            weekly_calories,
        }
    }

    /// Score a schedule without touching its cache.
    pub fn score(&self, schedule: &WeeklySchedule) -> Evaluation {
        let Some(days) = schedule.complete_days() else {
            return Evaluation {
                fitness: INVALID_FITNESS,
                accuracy: 0.0,
                total_cost: 0.0,
                total_calories: 0.0,
            };
        };

        let total_cost: f64 = days.iter().map(|d| d.cost()).sum();
        let total_calories: f64 = days.iter().map(|d| d.calories()).sum();

        let cost_error = (self.weekly_budget - total_cost).abs() / self.weekly_budget;
        let calorie_error = (self.weekly_calories - total_calories).abs() / self.weekly_calories;

        let total_error =
            COST_WEIGHT * cost_error + CALORIE_WEIGHT * calorie_error + variety_penalty(&days);

        Evaluation {
            fitness: -total_error,
            accuracy: (100.0 * (1.0 - total_error)).max(0.0),
            total_cost,
            total_calories,
        }
    }

    /// Score a schedule and cache the result on it.
    pub fn evaluate(&self, schedule: &mut WeeklySchedule) -> Evaluation {
        let evaluation = self.score(schedule);
        schedule.set_evaluation(evaluation);
        evaluation
    }
}

/// Number of consecutive day pairs serving the same lunch.
pub fn lunch_repeats(days: &[&DayPlan]) -> usize {
    days.windows(2)
        .filter(|pair| pair[0].meal(MealSlot::Lunch).name == pair[1].meal(MealSlot::Lunch).name)
        .count()
}

fn variety_penalty(days: &[&DayPlan]) -> f64 {
    LUNCH_REPEAT_PENALTY * lunch_repeats(days) as f64
}
