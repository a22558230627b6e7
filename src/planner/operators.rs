use rand::Rng;

use crate::models::{DAYS_PER_WEEK, WeeklySchedule};
use crate::planner::constants::MUTATION_RATE;
use crate::planner::sampler::MealSamplers;

/// Single-point crossover at a uniformly drawn split in `1..DAYS_PER_WEEK`.
pub fn crossover<R: Rng + ?Sized>(
    first: &WeeklySchedule,
    second: &WeeklySchedule,
    rng: &mut R,
) -> WeeklySchedule {
    let split = rng.gen_range(1..DAYS_PER_WEEK);
    crossover_at(first, second, split)
}

/// Days `[0, split)` from `first`, the rest from `second`.
///
/// `split` is clamped so both parents contribute at least one day. The
/// child owns its days; the goal profile comes from `first`.
pub fn crossover_at(first: &WeeklySchedule, second: &WeeklySchedule, split: usize) -> WeeklySchedule {
    let split = split.clamp(1, DAYS_PER_WEEK - 1);
    let days = std::array::from_fn(|i| {
        if i < split {
            first.days()[i].clone()
        } else {
            second.days()[i].clone()
        }
    });
    WeeklySchedule::from_days(days, first.goal())
}

/// Resample one random day with probability [`MUTATION_RATE`].
///
/// Returns whether a day was replaced.
pub fn mutate<R: Rng + ?Sized>(
    schedule: &mut WeeklySchedule,
    samplers: &MealSamplers,
    rng: &mut R,
) -> bool {
    if !rng.gen_bool(MUTATION_RATE) {
        return false;
    }

    let index = rng.gen_range(0..DAYS_PER_WEEK);
    let day = samplers.sample_day(schedule.goal(), rng);
    schedule.replace_day(index, day);
    true
}
