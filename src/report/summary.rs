use serde::Serialize;

use crate::models::{DAYS_PER_WEEK, MealSlot, WeeklySchedule};
use crate::planner::{FitnessTargets, OptimizationResult, lunch_repeats};

/// One row of the schedule table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub cost: f64,
    pub calories: f64,
}

/// Table rows for a schedule. Missing days render as `-` with zero totals.
pub fn day_rows(schedule: &WeeklySchedule) -> Vec<DayRow> {
    schedule
        .days()
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let name = |slot: MealSlot| {
                day.as_ref()
                    .map_or_else(|| "-".to_string(), |d| d.meal(slot).name.clone())
            };
            DayRow {
                day: format!("Day {}", i + 1),
                breakfast: name(MealSlot::Breakfast),
                lunch: name(MealSlot::Lunch),
                dinner: name(MealSlot::Dinner),
                cost: day.as_ref().map_or(0.0, |d| d.cost()),
                calories: day.as_ref().map_or(0.0, |d| d.calories()),
            }
        })
        .collect()
}

/// Share of the week's spending going to one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotShare {
    pub slot: MealSlot,
    pub cost: f64,
    pub percent: f64,
}

/// Spending per slot over the whole week, in serving order.
pub fn budget_split(schedule: &WeeklySchedule) -> [SlotShare; 3] {
    let spent = |slot: MealSlot| -> f64 {
        schedule
            .days()
            .iter()
            .flatten()
            .map(|d| d.meal(slot).price)
            .sum()
    };
    let total: f64 = MealSlot::ALL.iter().map(|&s| spent(s)).sum();

    MealSlot::ALL.map(|slot| {
        let cost = spent(slot);
        SlotShare {
            slot,
            cost,
            percent: if total > 0.0 { 100.0 * cost / total } else { 0.0 },
        }
    })
}

/// Headline numbers and analytics for a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub weekly_budget: f64,
    pub daily_calorie_target: f64,
    pub total_cost: f64,
    /// Positive when over budget.
    pub cost_delta: f64,
    pub daily_calories: f64,
    pub daily_calorie_delta: f64,
    pub accuracy: f64,
    pub daily_budget: f64,
    pub daily_costs: Vec<f64>,
    pub budget_split: [SlotShare; 3],
    pub lunch_repeats: usize,
    pub first_fitness: Option<f64>,
    pub final_fitness: Option<f64>,
    pub generations_run: usize,
    pub cancelled: bool,
}

impl PlanSummary {
    pub fn new(result: &OptimizationResult, targets: &FitnessTargets) -> Self {
        let evaluation = result.evaluation;
        let days = DAYS_PER_WEEK as f64;
        let daily_calories = evaluation.total_calories / days;
        let daily_calorie_target = targets.weekly_calories / days;

        let daily_costs = result
            .best
            .days()
            .iter()
            .map(|d| d.as_ref().map_or(0.0, |d| d.cost()))
            .collect();

        Self {
            weekly_budget: targets.weekly_budget,
            daily_calorie_target,
            total_cost: evaluation.total_cost,
            cost_delta: evaluation.total_cost - targets.weekly_budget,
            daily_calories,
            daily_calorie_delta: daily_calories - daily_calorie_target,
            accuracy: evaluation.accuracy,
            daily_budget: targets.weekly_budget / days,
            daily_costs,
            budget_split: budget_split(&result.best),
            lunch_repeats: result
                .best
                .complete_days()
                .map_or(0, |days| lunch_repeats(&days)),
            first_fitness: result.history.first(),
            final_fitness: result.history.last(),
            generations_run: result.generations_run,
            cancelled: result.cancelled,
        }
    }

    /// Days whose spending exceeds the even daily share of the budget.
    pub fn days_over_budget(&self) -> usize {
        self.daily_costs
            .iter()
            .filter(|&&c| c > self.daily_budget)
            .count()
    }
}
