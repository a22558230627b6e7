pub mod config;
pub mod constants;
pub mod engine;
pub mod fitness;
pub mod goal;
pub mod operators;
pub mod progress;
pub mod sampler;

pub use config::RunConfig;
pub use constants::*;
pub use engine::{EvolutionEngine, FitnessHistory, OptimizationResult, elite_count, optimize};
pub use fitness::{FitnessTargets, lunch_repeats};
pub use goal::GoalProfile;
pub use operators::{crossover, crossover_at, mutate};
pub use progress::{NoProgress, ProgressSink, report_interval};
pub use sampler::{MealSamplers, SlotSampler, median_calories, sample};
