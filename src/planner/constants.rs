// ─────────────────────────────────────────────────────────────────────────────
// Fitness
// ─────────────────────────────────────────────────────────────────────────────

/// Fitness assigned to a schedule with an invalid day.
pub const INVALID_FITNESS: f64 = -99999.0;

/// Weight of the normalized budget error.
pub const COST_WEIGHT: f64 = 0.5;

/// Weight of the normalized calorie error.
pub const CALORIE_WEIGHT: f64 = 0.5;

/// Penalty per pair of consecutive days serving the same lunch.
pub const LUNCH_REPEAT_PENALTY: f64 = 0.05;

// ─────────────────────────────────────────────────────────────────────────────
// Evolution
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum number of schedules carried unchanged into the next generation.
pub const ELITE_COUNT: usize = 10;

/// Parents are drawn from this many top-ranked schedules.
pub const PARENT_POOL_SIZE: usize = 20;

/// Probability that a child has one day resampled.
pub const MUTATION_RATE: f64 = 0.2;

/// Progress is reported roughly this many times per run.
pub const PROGRESS_REPORTS_PER_RUN: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Goal profile thresholds (daily calories)
// ─────────────────────────────────────────────────────────────────────────────

/// Daily targets above this bias sampling toward calorie-dense meals.
pub const HEAVY_DAILY_CALORIES: f64 = 2800.0;

/// Daily targets below this bias sampling toward light meals.
pub const LIGHT_DAILY_CALORIES: f64 = 1800.0;
