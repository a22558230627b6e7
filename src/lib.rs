pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod report;

pub use catalog::{CatalogProvider, MealCatalog};
pub use error::{PlannerError, Result};
pub use models::{DayPlan, MealItem, MealSlot, WeeklySchedule};
pub use planner::{EvolutionEngine, OptimizationResult, RunConfig, optimize};
