use dialoguer::{Input, MultiSelect};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::DAYS_PER_WEEK;
use crate::planner::RunConfig;

/// Minimum Jaro-Winkler similarity for a typed category to count as a match.
const CATEGORY_MATCH_THRESHOLD: f64 = 0.85;

/// Resolve a typed category against the known ones.
///
/// Exact case-insensitive match first, then the closest fuzzy match above
/// [`CATEGORY_MATCH_THRESHOLD`].
pub fn resolve_category(input: &str, known: &[String]) -> Option<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = known.iter().find(|k| k.to_lowercase() == needle) {
        return Some(exact.clone());
    }

    known
        .iter()
        .map(|k| (k, jaro_winkler(&k.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > CATEGORY_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, _)| k.clone())
}

/// Resolve many inputs, splitting comma-separated ones.
///
/// Returns `(resolved, unresolved)`; resolved names are deduplicated.
pub fn resolve_categories<S: AsRef<str>>(inputs: &[S], known: &[String]) -> (Vec<String>, Vec<String>) {
    let mut resolved: Vec<String> = Vec::new();
    let mut unresolved = Vec::new();

    for raw in inputs.iter().flat_map(|i| i.as_ref().split(',')) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match resolve_category(raw, known) {
            Some(name) if !resolved.contains(&name) => resolved.push(name),
            Some(_) => {}
            None => unresolved.push(raw.to_string()),
        }
    }

    (resolved, unresolved)
}

fn prompt_f64_in_range(prompt: &str, default: f64, min: f64, max: f64) -> Result<f64> {
    Ok(Input::<f64>::new()
        .with_prompt(format!("{} ({}-{})", prompt, min, max))
        .default(default.clamp(min, max))
        .validate_with(move |v: &f64| -> std::result::Result<(), String> {
            if (min..=max).contains(v) {
                Ok(())
            } else {
                Err(format!("must be between {} and {}", min, max))
            }
        })
        .interact_text()?)
}

fn prompt_usize_in_range(prompt: &str, default: usize, min: usize, max: usize) -> Result<usize> {
    Ok(Input::<usize>::new()
        .with_prompt(format!("{} ({}-{})", prompt, min, max))
        .default(default.clamp(min, max))
        .validate_with(move |v: &usize| -> std::result::Result<(), String> {
            if (min..=max).contains(v) {
                Ok(())
            } else {
                Err(format!("must be between {} and {}", min, max))
            }
        })
        .interact_text()?)
}

/// Ask for budget, calories and search size, starting from `base`.
pub fn prompt_run_config(base: RunConfig) -> Result<RunConfig> {
    let weekly_budget = prompt_f64_in_range("Weekly budget", base.weekly_budget, 500.0, 10000.0)?;
    let daily_calories =
        prompt_f64_in_range("Daily calorie target", base.daily_calories(), 1200.0, 5000.0)?;
    let generation_count = prompt_usize_in_range("Generations", base.generation_count, 50, 400)?;
    let population_size = prompt_usize_in_range("Population size", base.population_size, 50, 300)?;

    Ok(RunConfig {
        weekly_budget,
        weekly_calories: daily_calories * DAYS_PER_WEEK as f64,
        generation_count,
        population_size,
        ..base
    })
}

/// Let the user tick categories to exclude. `preselected` start ticked.
pub fn prompt_exclusions(categories: &[String], preselected: &[String]) -> Result<Vec<String>> {
    if categories.is_empty() {
        return Ok(Vec::new());
    }

    let defaults: Vec<bool> = categories
        .iter()
        .map(|c| preselected.iter().any(|p| p.eq_ignore_ascii_case(c)))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Exclude categories (space to toggle, enter to confirm)")
        .items(categories)
        .defaults(&defaults)
        .interact()?;

    Ok(picked.into_iter().map(|i| categories[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        ["Chicken", "Dairy", "Meat", "Seafood", "Vegetarian"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(resolve_category("seafood", &known()), Some("Seafood".to_string()));
        assert_eq!(resolve_category("  MEAT ", &known()), Some("Meat".to_string()));
    }

    #[test]
    fn test_fuzzy_match() {
        assert_eq!(resolve_category("vegetarain", &known()), Some("Vegetarian".to_string()));
        assert_eq!(resolve_category("chiken", &known()), Some("Chicken".to_string()));
    }

    #[test]
    fn test_unrelated_input_is_rejected() {
        assert_eq!(resolve_category("pizza", &known()), None);
        assert_eq!(resolve_category("", &known()), None);
    }

    #[test]
    fn test_resolve_categories_splits_and_dedups() {
        let (resolved, unresolved) =
            resolve_categories(&["meat,Seafood", "MEAT", "xyz"], &known());
        assert_eq!(resolved, vec!["Meat", "Seafood"]);
        assert_eq!(unresolved, vec!["xyz"]);
    }
}
