use crate::catalog::{CatalogProvider, MealCatalog};
use crate::models::MealSlot;
use crate::planner::{OptimizationResult, ProgressSink};
use crate::report::{PlanSummary, day_rows};

/// Longest cell width used for meal names in the schedule table.
const MAX_NAME_WIDTH: usize = 32;

fn clip(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut clipped: String = name.chars().take(width.saturating_sub(1)).collect();
        clipped.push('~');
        clipped
    }
}

/// Prints one progress line per report to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleProgress {
    total: usize,
}

impl ConsoleProgress {
    pub fn new(total: usize) -> Self {
        Self { total }
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, generation: usize, best_accuracy: f64) {
        eprintln!(
            "Generation {:>4}/{}: accuracy {:.1}%",
            generation + 1,
            self.total,
            best_accuracy
        );
    }
}

/// Display the headline metrics, the weekly table and the analytics.
pub fn display_plan(result: &OptimizationResult, summary: &PlanSummary) {
    println!();
    println!("=== Weekly Plan ({} profile) ===", result.goal);
    if summary.cancelled {
        println!("(stopped early after {} generations)", summary.generations_run);
    }
    println!();

    println!(
        "Total cost:     {:>9.2} ({:+.0} vs budget {:.0})",
        summary.total_cost, summary.cost_delta, summary.weekly_budget
    );
    println!(
        "Daily calories: {:>9.0} ({:+.0} vs target {:.0})",
        summary.daily_calories, summary.daily_calorie_delta, summary.daily_calorie_target
    );
    println!("Accuracy:       {:>8.1}%", summary.accuracy);
    println!();

    display_schedule_table(result);
    display_analytics(summary);
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>, header: &str) -> usize {
    cells
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
        .min(MAX_NAME_WIDTH)
}

fn display_schedule_table(result: &OptimizationResult) {
    let rows = day_rows(&result.best);
    let wb = column_width(rows.iter().map(|r| r.breakfast.as_str()), "Breakfast");
    let wl = column_width(rows.iter().map(|r| r.lunch.as_str()), "Lunch");
    let wd = column_width(rows.iter().map(|r| r.dinner.as_str()), "Dinner");

    println!(
        "{:<6}  {:<wb$}  {:<wl$}  {:<wd$}  {:>8}  {:>8}",
        "Day", "Breakfast", "Lunch", "Dinner", "Cost", "Calories"
    );
    println!("{}", "-".repeat(6 + wb + wl + wd + 8 + 8 + 10));

    for row in &rows {
        println!(
            "{:<6}  {:<wb$}  {:<wl$}  {:<wd$}  {:>8.2}  {:>8.0}",
            row.day,
            clip(&row.breakfast, wb),
            clip(&row.lunch, wl),
            clip(&row.dinner, wd),
            row.cost,
            row.calories,
        );
    }
    println!();
}

fn display_analytics(summary: &PlanSummary) {
    println!("--- Daily Spending (target {:.2}/day) ---", summary.daily_budget);
    let peak = summary
        .daily_costs
        .iter()
        .copied()
        .fold(summary.daily_budget, f64::max);
    for (i, cost) in summary.daily_costs.iter().enumerate() {
        let bar = if peak > 0.0 {
            ((cost / peak) * 30.0).round() as usize
        } else {
            0
        };
        let marker = if *cost > summary.daily_budget { " over" } else { "" };
        println!("Day {}  {:>8.2}  {}{}", i + 1, cost, "#".repeat(bar), marker);
    }
    println!("{} of 7 days over the daily target", summary.days_over_budget());
    println!();

    println!("--- Budget Split ---");
    for share in &summary.budget_split {
        println!(
            "{:<10} {:>9.2}  {:>5.1}%",
            share.slot.as_str(),
            share.cost,
            share.percent
        );
    }
    println!();

    println!("--- Convergence ---");
    println!("Generations run: {}", summary.generations_run);
    if let (Some(first), Some(last)) = (summary.first_fitness, summary.final_fitness) {
        println!("Best fitness:    {:.4} -> {:.4}", first, last);
    }
    println!("Lunch repeats:   {}", summary.lunch_repeats);
    println!();
}

/// List the catalog by slot with price and calorie ranges.
pub fn display_catalog(catalog: &MealCatalog) {
    if catalog.is_empty() {
        println!("Catalog: (empty)");
        return;
    }

    for slot in MealSlot::ALL {
        let items = catalog.items(slot);
        println!();
        println!("=== {} ({} items) ===", slot, items.len());

        if let Some(((min_price, max_price), (min_cal, max_cal))) = catalog.slot_ranges(slot) {
            println!(
                "price {:.0}-{:.0}, calories {:.0}-{:.0}",
                min_price, max_price, min_cal, max_cal
            );
        }
        println!();

        let width = items.iter().map(|m| m.name.chars().count()).max().unwrap_or(10);
        for item in items {
            println!(
                "  {:<width$}  {:>5.0} cal  {:>7.2}  {}",
                item.name, item.calories, item.price, item.category
            );
        }
    }
    println!();
}
