use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Smart Nutrition: evolves a 7-day meal schedule toward a weekly budget and calorie target.
#[derive(Parser, Debug)]
#[command(name = "smart_nutrition")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the meal catalog (CSV or JSON).
    #[arg(short, long, global = true, default_value = "meal_catalog.csv")]
    pub file: String,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Optimize a weekly schedule.
    Plan(PlanArgs),

    /// Write the built-in catalog to the catalog file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// List the catalog by meal type.
    Catalog {
        /// Categories to leave out (repeatable or comma-separated).
        #[arg(short, long)]
        exclude: Vec<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanArgs::default())
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct PlanArgs {
    /// Weekly budget.
    #[arg(short, long)]
    pub budget: Option<f64>,

    /// Daily calorie target.
    #[arg(short = 'c', long)]
    pub daily_calories: Option<f64>,

    /// Categories to leave out (repeatable or comma-separated).
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Number of generations.
    #[arg(short, long)]
    pub generations: Option<usize>,

    /// Population size.
    #[arg(short, long)]
    pub population: Option<usize>,

    /// Seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many seconds and keep the best schedule so far.
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// JSON run configuration; flags override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Export the schedule table as CSV.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Export the full report as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Export the fitness history as CSV.
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Prompt for the run parameters and exclusions.
    #[arg(short, long)]
    pub interactive: bool,
}
