use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::MealSlot;
use crate::planner::{FitnessTargets, OptimizationResult};
use crate::report::summary::{PlanSummary, day_rows};

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write the schedule table as CSV.
pub fn write_schedule_csv(result: &OptimizationResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["Day", "Breakfast", "Lunch", "Dinner", "Cost", "Calories"])?;
    for row in day_rows(&result.best) {
        wtr.write_record([
            row.day,
            row.breakfast,
            row.lunch,
            row.dinner,
            format!("{:.2}", row.cost),
            format!("{:.0}", row.calories),
        ])?;
    }

    wtr.flush()?;
    info!(path = %path.display(), "schedule written");
    Ok(())
}

/// Write the best fitness per generation as CSV.
pub fn write_history_csv(result: &OptimizationResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["generation", "best_fitness"])?;
    for (i, fitness) in result.history.iter().enumerate() {
        wtr.write_record([(i + 1).to_string(), format!("{:.6}", fitness)])?;
    }

    wtr.flush()?;
    info!(path = %path.display(), generations = result.history.len(), "history written");
    Ok(())
}

/// Write the full report: targets, metrics, days, history.
pub fn write_report_json(
    result: &OptimizationResult,
    targets: &FitnessTargets,
    path: &Path,
) -> Result<()> {
    let summary = PlanSummary::new(result, targets);

    let days = result
        .best
        .days()
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let meals = day.as_ref().map(|d| {
                MealSlot::ALL
                    .iter()
                    .map(|&slot| {
                        let meal = d.meal(slot);
                        serde_json::json!({
                            "slot": slot,
                            "name": meal.name,
                            "category": meal.category,
                            "price": meal.price,
                            "calories": meal.calories,
                        })
                    })
                    .collect::<Vec<_>>()
            });
            serde_json::json!({
                "day": i + 1,
                "meals": meals,
                "cost": day.as_ref().map_or(0.0, |d| d.cost()),
                "calories": day.as_ref().map_or(0.0, |d| d.calories()),
            })
        })
        .collect::<Vec<_>>();

    let json = serde_json::json!({
        "targets": {
            "weekly_budget": targets.weekly_budget,
            "weekly_calories": targets.weekly_calories,
        },
        "goal": result.goal,
        "metrics": {
            "total_cost": truncate(summary.total_cost, 2),
            "cost_delta": truncate(summary.cost_delta, 2),
            "daily_calories": truncate(summary.daily_calories, 1),
            "daily_calorie_delta": truncate(summary.daily_calorie_delta, 1),
            "accuracy": truncate(summary.accuracy, 2),
            "fitness": truncate(result.evaluation.fitness, 6),
            "lunch_repeats": summary.lunch_repeats,
        },
        "budget_split": summary.budget_split.iter().map(|share| {
            serde_json::json!({
                "slot": share.slot,
                "cost": truncate(share.cost, 2),
                "percent": truncate(share.percent, 1),
            })
        }).collect::<Vec<_>>(),
        "days": days,
        "generations_run": result.generations_run,
        "cancelled": result.cancelled,
        "history": result.history,
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    info!(path = %path.display(), "report written");
    Ok(())
}
