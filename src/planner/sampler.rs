use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::CatalogProvider;
use crate::error::{PlannerError, Result};
use crate::models::{DayPlan, MealItem, MealSlot, WeeklySchedule};
use crate::planner::goal::GoalProfile;

/// Median calories of a candidate set (mean of the middle pair for even counts).
pub fn median_calories(candidates: &[Arc<MealItem>]) -> Option<f64> {
    if candidates.is_empty() {
        return None;
    }

    let mut calories: Vec<f64> = candidates.iter().map(|m| m.calories).collect();
    calories.sort_by(|a, b| a.total_cmp(b));

    let mid = calories.len() / 2;
    if calories.len() % 2 == 0 {
        Some((calories[mid - 1] + calories[mid]) / 2.0)
    } else {
        Some(calories[mid])
    }
}

/// Indices of the candidates a goal may draw from.
///
/// Falls back to the full set when the restriction leaves nothing.
fn eligible_indices(candidates: &[Arc<MealItem>], goal: GoalProfile) -> Vec<usize> {
    let all = || (0..candidates.len()).collect::<Vec<_>>();

    let Some(median) = median_calories(candidates) else {
        return Vec::new();
    };

    let restricted: Vec<usize> = match goal {
        GoalProfile::Standard => return all(),
        GoalProfile::Heavy => (0..candidates.len())
            .filter(|&i| candidates[i].calories >= median)
            .collect(),
        GoalProfile::Light => (0..candidates.len())
            .filter(|&i| candidates[i].calories <= median)
            .collect(),
    };

    if restricted.is_empty() { all() } else { restricted }
}

/// Draw one item from `candidates`, biased by `goal`.
pub fn sample<'a, R: Rng + ?Sized>(
    slot: MealSlot,
    candidates: &'a [Arc<MealItem>],
    goal: GoalProfile,
    rng: &mut R,
) -> Result<&'a Arc<MealItem>> {
    eligible_indices(candidates, goal)
        .choose(rng)
        .map(|&i| &candidates[i])
        .ok_or(PlannerError::EmptyCatalog(slot))
}

/// Per-slot sampler with the heavy/light subsets computed once.
///
/// Draws are distributed exactly like [`sample`] over the same candidates.
#[derive(Debug, Clone)]
pub struct SlotSampler {
    slot: MealSlot,
    items: Vec<Arc<MealItem>>,
    heavy: Vec<usize>,
    light: Vec<usize>,
}

impl SlotSampler {
    pub fn new(slot: MealSlot, candidates: &[Arc<MealItem>]) -> Self {
        Self {
            slot,
            items: candidates.to_vec(),
            heavy: eligible_indices(candidates, GoalProfile::Heavy),
            light: eligible_indices(candidates, GoalProfile::Light),
        }
    }

    pub fn slot(&self) -> MealSlot {
        self.slot
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn draw<R: Rng + ?Sized>(&self, goal: GoalProfile, rng: &mut R) -> Result<Arc<MealItem>> {
        let picked = match goal {
            GoalProfile::Standard => self.items.choose(rng),
            GoalProfile::Heavy => self.heavy.choose(rng).map(|&i| &self.items[i]),
            GoalProfile::Light => self.light.choose(rng).map(|&i| &self.items[i]),
        };

        picked.cloned().ok_or(PlannerError::EmptyCatalog(self.slot))
    }
}

/// The three slot samplers of a run.
#[derive(Debug, Clone)]
pub struct MealSamplers {
    breakfast: SlotSampler,
    lunch: SlotSampler,
    dinner: SlotSampler,
}

impl MealSamplers {
    pub fn from_catalog<C: CatalogProvider + ?Sized>(catalog: &C) -> Self {
        Self {
            breakfast: SlotSampler::new(MealSlot::Breakfast, catalog.items(MealSlot::Breakfast)),
            lunch: SlotSampler::new(MealSlot::Lunch, catalog.items(MealSlot::Lunch)),
            dinner: SlotSampler::new(MealSlot::Dinner, catalog.items(MealSlot::Dinner)),
        }
    }

    pub fn for_slot(&self, slot: MealSlot) -> &SlotSampler {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Sample a full day, or `None` if any slot cannot be filled.
    pub fn sample_day<R: Rng + ?Sized>(&self, goal: GoalProfile, rng: &mut R) -> Option<DayPlan> {
        let breakfast = self.breakfast.draw(goal, rng).ok()?;
        let lunch = self.lunch.draw(goal, rng).ok()?;
        let dinner = self.dinner.draw(goal, rng).ok()?;
        DayPlan::new(breakfast, lunch, dinner).ok()
    }

    /// Build a fresh week, one independently sampled day at a time.
    pub fn fresh_schedule<R: Rng + ?Sized>(&self, goal: GoalProfile, rng: &mut R) -> WeeklySchedule {
        let days = std::array::from_fn(|_| self.sample_day(goal, rng));
        WeeklySchedule::from_days(days, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn lunches(calories: &[f64]) -> Vec<Arc<MealItem>> {
        calories
            .iter()
            .enumerate()
            .map(|(i, &cal)| {
                Arc::new(MealItem::new(format!("Lunch {}", i), "Test", cal, 10.0, MealSlot::Lunch).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median_calories(&lunches(&[400.0, 100.0, 300.0, 200.0])), Some(250.0));
        assert_eq!(median_calories(&lunches(&[500.0, 100.0, 300.0])), Some(300.0));
        assert_eq!(median_calories(&[]), None);
    }

    #[test]
    fn test_heavy_only_draws_above_median() {
        let candidates = lunches(&[100.0, 200.0, 300.0, 400.0]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let item = sample(MealSlot::Lunch, &candidates, GoalProfile::Heavy, &mut rng).unwrap();
            assert!(item.calories >= 250.0, "heavy drew {}", item.calories);
        }
    }

    #[test]
    fn test_light_only_draws_below_median() {
        let candidates = lunches(&[100.0, 200.0, 300.0, 400.0]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let item = sample(MealSlot::Lunch, &candidates, GoalProfile::Light, &mut rng).unwrap();
            assert!(item.calories <= 250.0, "light drew {}", item.calories);
        }
    }

    #[test]
    fn test_standard_reaches_every_item() {
        let candidates = lunches(&[100.0, 200.0, 300.0, 400.0]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let item = sample(MealSlot::Lunch, &candidates, GoalProfile::Standard, &mut rng).unwrap();
            seen.insert(item.name.clone());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_empty_candidates_fail() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = sample(MealSlot::Dinner, &[], GoalProfile::Heavy, &mut rng);
        assert!(matches!(result, Err(PlannerError::EmptyCatalog(MealSlot::Dinner))));

        let sampler = SlotSampler::new(MealSlot::Dinner, &[]);
        assert!(sampler.draw(GoalProfile::Standard, &mut rng).is_err());
    }

    #[test]
    fn test_single_item_satisfies_every_goal() {
        let candidates = lunches(&[650.0]);
        let sampler = SlotSampler::new(MealSlot::Lunch, &candidates);
        let mut rng = StdRng::seed_from_u64(3);
        for goal in [GoalProfile::Heavy, GoalProfile::Light, GoalProfile::Standard] {
            assert_eq!(sampler.draw(goal, &mut rng).unwrap().calories, 650.0);
        }
    }

    #[test]
    fn test_slot_sampler_matches_free_sample() {
        let candidates = lunches(&[120.0, 900.0, 450.0, 700.0, 300.0]);
        let sampler = SlotSampler::new(MealSlot::Lunch, &candidates);

        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let from_fn = sample(MealSlot::Lunch, &candidates, GoalProfile::Heavy, &mut a).unwrap();
            let from_sampler = sampler.draw(GoalProfile::Heavy, &mut b).unwrap();
            assert_eq!(from_fn.name, from_sampler.name);
        }
    }

    #[test]
    fn test_samplers_follow_catalog_slots() {
        let catalog = crate::catalog::MealCatalog::from_items(MealSlot::ALL.map(|slot| {
            MealItem::new(format!("{} only", slot), "Test", 500.0, 10.0, slot).unwrap()
        }));
        let samplers = MealSamplers::from_catalog(&catalog);

        for slot in MealSlot::ALL {
            let sampler = samplers.for_slot(slot);
            assert_eq!(sampler.slot(), slot);
            assert_eq!(sampler.len(), 1);
            assert!(!sampler.is_empty());
        }

        let mut rng = StdRng::seed_from_u64(4);
        let week = samplers.fresh_schedule(GoalProfile::Heavy, &mut rng);
        assert!(week.is_complete());
        assert_eq!(week.goal(), GoalProfile::Heavy);
    }
}
