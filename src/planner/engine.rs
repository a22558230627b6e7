use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::CatalogProvider;
use crate::error::{PlannerError, Result};
use crate::models::{Evaluation, MealSlot, WeeklySchedule};
use crate::planner::config::RunConfig;
use crate::planner::constants::{ELITE_COUNT, PARENT_POOL_SIZE, PROGRESS_REPORTS_PER_RUN};
use crate::planner::fitness::FitnessTargets;
use crate::planner::goal::GoalProfile;
use crate::planner::operators::{crossover, mutate};
use crate::planner::progress::{ProgressSink, report_interval};
use crate::planner::sampler::MealSamplers;

/// Best fitness of every generation, in order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FitnessHistory(Vec<f64>);

impl FitnessHistory {
    fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    fn push(&mut self, fitness: f64) {
        self.0.push(fitness);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn is_non_decreasing(&self) -> bool {
        self.0.windows(2).all(|w| w[1] >= w[0])
    }
}

/// Output of a run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Top-ranked schedule of the last evaluated generation.
    pub best: WeeklySchedule,
    pub evaluation: Evaluation,
    pub history: FitnessHistory,
    pub goal: GoalProfile,
    pub generations_run: usize,
    /// Stopped early by the cancel flag or the time limit.
    pub cancelled: bool,
}

/// Number of top schedules copied unchanged into the next generation.
///
/// At most [`ELITE_COUNT`], always leaving room for one child, but never
/// zero so the best schedule survives even a population of one.
pub fn elite_count(population_size: usize) -> usize {
    ELITE_COUNT.min(population_size.saturating_sub(1)).max(1)
}

/// Generational genetic search over weekly schedules.
pub struct EvolutionEngine<'a, C: CatalogProvider + ?Sized> {
    catalog: &'a C,
    config: RunConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, C: CatalogProvider + ?Sized> EvolutionEngine<'a, C> {
    /// Validate the configuration and the catalog before anything runs.
    pub fn new(catalog: &'a C, config: RunConfig) -> Result<Self> {
        config.validate()?;

        if let Some(slot) = MealSlot::ALL
            .into_iter()
            .find(|&slot| catalog.items(slot).is_empty())
        {
            return Err(PlannerError::EmptyCatalog(slot));
        }

        Ok(Self {
            catalog,
            config,
            cancel: None,
        })
    }

    /// Stop after the current generation once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn run<P: ProgressSink + ?Sized>(&self, progress: &mut P) -> Result<OptimizationResult> {
        let started = Instant::now();
        let time_limit = self.config.time_limit();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let goal = GoalProfile::for_weekly_calories(self.config.weekly_calories);
        let samplers = MealSamplers::from_catalog(self.catalog);
        let targets = self.config.targets();
        let size = self.config.population_size;
        let total = self.config.generation_count;
        let interval = report_interval(total, PROGRESS_REPORTS_PER_RUN);
        let parallel = size >= self.config.parallel_threshold;

        info!(
            %goal,
            population = size,
            generations = total,
            seed = ?self.config.seed,
            parallel,
            "starting optimization"
        );

        let mut population: Vec<WeeklySchedule> = (0..size)
            .map(|_| samplers.fresh_schedule(goal, &mut rng))
            .collect();
        let mut history = FitnessHistory::with_capacity(total);
        let mut cancelled = false;

        for generation in 0..total {
            evaluate_population(&mut population, &targets, parallel);
            rank(&mut population);

            let leader = &population[0];
            history.push(leader.fitness());
            debug!(
                generation = generation + 1,
                fitness = leader.fitness(),
                accuracy = leader.accuracy(),
                "generation ranked"
            );

            if generation % interval == 0 {
                progress.report(generation, leader.accuracy());
            }

            if generation + 1 == total {
                break;
            }

            if let Some(reason) = self.stop_reason(started, time_limit) {
                warn!(
                    generation = generation + 1,
                    reason, "stopping early with current best schedule"
                );
                cancelled = true;
                break;
            }

            population = breed_next_generation(&population, size, &samplers, &mut rng);
        }

        let best = population.into_iter().next().ok_or_else(|| {
            PlannerError::InvalidConfig("population size must be at least 1".to_string())
        })?;
        let evaluation = best.evaluation().unwrap_or_else(|| targets.score(&best));

        info!(
            generations = history.len(),
            accuracy = evaluation.accuracy,
            total_cost = evaluation.total_cost,
            total_calories = evaluation.total_calories,
            "optimization finished"
        );

        Ok(OptimizationResult {
            best,
            evaluation,
            generations_run: history.len(),
            history,
            goal,
            cancelled,
        })
    }

    fn stop_reason(&self, started: Instant, time_limit: Option<Duration>) -> Option<&'static str> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Some("cancelled");
        }
        if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
            return Some("time limit reached");
        }
        None
    }
}

/// Validate, then run a full optimization.
pub fn optimize<C, P>(catalog: &C, config: RunConfig, progress: &mut P) -> Result<OptimizationResult>
where
    C: CatalogProvider + ?Sized,
    P: ProgressSink + ?Sized,
{
    EvolutionEngine::new(catalog, config)?.run(progress)
}

fn evaluate_population(population: &mut [WeeklySchedule], targets: &FitnessTargets, parallel: bool) {
    if parallel {
        population.par_iter_mut().for_each(|schedule| {
            targets.evaluate(schedule);
        });
    } else {
        for schedule in population.iter_mut() {
            targets.evaluate(schedule);
        }
    }
}

/// Stable sort, best first.
fn rank(population: &mut [WeeklySchedule]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

/// Elites first, then mutated crossover children of the top-ranked pool.
fn breed_next_generation<R: Rng + ?Sized>(
    ranked: &[WeeklySchedule],
    size: usize,
    samplers: &MealSamplers,
    rng: &mut R,
) -> Vec<WeeklySchedule> {
    let elite = elite_count(size).min(ranked.len());
    let pool = &ranked[..PARENT_POOL_SIZE.min(ranked.len())];

    let mut next = Vec::with_capacity(size);
    next.extend_from_slice(&ranked[..elite]);

    while next.len() < size {
        let (Some(first), Some(second)) = (pool.choose(rng), pool.choose(rng)) else {
            break;
        };
        let mut child = crossover(first, second, rng);
        mutate(&mut child, samplers, rng);
        next.push(child);
    }

    next
}
