use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::DAYS_PER_WEEK;
use crate::planner::fitness::FitnessTargets;

/// Parameters of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub weekly_budget: f64,
    pub weekly_calories: f64,
    pub population_size: usize,
    pub generation_count: usize,
    /// Fixed seed for a reproducible run; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Wall-clock limit after which the current best schedule is returned.
    pub time_limit_secs: Option<u64>,
    /// Populations at least this large are evaluated on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            weekly_budget: 3000.0,
            weekly_calories: 2500.0 * DAYS_PER_WEEK as f64,
            population_size: 100,
            generation_count: 150,
            seed: None,
            time_limit_secs: None,
            parallel_threshold: 512,
        }
    }
}

impl RunConfig {
    pub fn new(
        weekly_budget: f64,
        weekly_calories: f64,
        population_size: usize,
        generation_count: usize,
    ) -> Self {
        Self {
            weekly_budget,
            weekly_calories,
            population_size,
            generation_count,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Load a JSON config; missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn daily_calories(&self) -> f64 {
        self.weekly_calories / DAYS_PER_WEEK as f64
    }

    pub fn targets(&self) -> FitnessTargets {
        FitnessTargets::new(self.weekly_budget, self.weekly_calories)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        if !self.weekly_budget.is_finite() || self.weekly_budget <= 0.0 {
            return Err(PlannerError::InvalidConfig(format!(
                "weekly budget must be positive, got {}",
                self.weekly_budget
            )));
        }
        if !self.weekly_calories.is_finite() || self.weekly_calories <= 0.0 {
            return Err(PlannerError::InvalidConfig(format!(
                "weekly calories must be positive, got {}",
                self.weekly_calories
            )));
        }
        if self.population_size < 1 {
            return Err(PlannerError::InvalidConfig(
                "population size must be at least 1".to_string(),
            ));
        }
        if self.generation_count < 1 {
            return Err(PlannerError::InvalidConfig(
                "generation count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.daily_calories(), 2500.0);
    }

    #[test]
    fn test_rejects_bad_targets() {
        assert!(RunConfig::new(0.0, 14000.0, 10, 10).validate().is_err());
        assert!(RunConfig::new(-5.0, 14000.0, 10, 10).validate().is_err());
        assert!(RunConfig::new(1000.0, 0.0, 10, 10).validate().is_err());
        assert!(RunConfig::new(f64::NAN, 14000.0, 10, 10).validate().is_err());
    }

    #[test]
    fn test_rejects_empty_run() {
        let result = RunConfig::new(1000.0, 14000.0, 0, 10).validate();
        assert!(matches!(result, Err(PlannerError::InvalidConfig(_))));

        let result = RunConfig::new(1000.0, 14000.0, 10, 0).validate();
        assert!(matches!(result, Err(PlannerError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"weekly_budget": 1500, "seed": 9}"#).unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.weekly_budget, 1500.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.population_size, RunConfig::default().population_size);
    }
}
