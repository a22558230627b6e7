use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use smart_nutrition_rs::MealCatalog;
use smart_nutrition_rs::catalog::{builtin_catalog, load_or_builtin, save_catalog};
use smart_nutrition_rs::cli::{Cli, Command, PlanArgs};
use smart_nutrition_rs::error::{PlannerError, Result};
use smart_nutrition_rs::interface::{
    ConsoleProgress, display_catalog, display_plan, prompt_exclusions, prompt_run_config,
    resolve_categories,
};
use smart_nutrition_rs::models::DAYS_PER_WEEK;
use smart_nutrition_rs::planner::{EvolutionEngine, RunConfig};
use smart_nutrition_rs::report::{
    PlanSummary, write_history_csv, write_report_json, write_schedule_csv,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the rendered plan.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan(args) => cmd_plan(&cli.file, args),
        Command::Init { force } => cmd_init(&cli.file, force),
        Command::Catalog { exclude } => cmd_catalog(&cli.file, &exclude),
    }
}

/// Resolve typed category names and drop them from the catalog.
fn apply_exclusions(catalog: &MealCatalog, requested: &[String]) -> MealCatalog {
    if requested.is_empty() {
        return catalog.clone();
    }

    let known = catalog.categories();
    let (resolved, unresolved) = resolve_categories(requested, &known);
    for name in &unresolved {
        eprintln!("Unknown category ignored: {}", name);
    }

    let filtered = catalog.without_categories(&resolved);
    info!(
        excluded = ?resolved,
        before = catalog.len(),
        after = filtered.len(),
        "categories excluded"
    );
    filtered
}

/// Defaults, then the config file, then individual flags.
fn build_config(args: &PlanArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(budget) = args.budget {
        config.weekly_budget = budget;
    }
    if let Some(daily) = args.daily_calories {
        config.weekly_calories = daily * DAYS_PER_WEEK as f64;
    }
    if let Some(generations) = args.generations {
        config.generation_count = generations;
    }
    if let Some(population) = args.population {
        config.population_size = population;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.time_limit.is_some() {
        config.time_limit_secs = args.time_limit;
    }

    Ok(config)
}

/// Optimize and display a weekly schedule.
fn cmd_plan(file_path: &str, args: PlanArgs) -> Result<()> {
    let catalog = load_or_builtin(file_path)?;
    println!("Loaded {} meals", catalog.len());

    let mut config = build_config(&args)?;
    let mut excluded = args.exclude.clone();

    if args.interactive {
        config = prompt_run_config(config)?;
        let (preselected, _) = resolve_categories(&excluded, &catalog.categories());
        excluded = prompt_exclusions(&catalog.categories(), &preselected)?;
    }

    let catalog = apply_exclusions(&catalog, &excluded);
    let targets = config.targets();

    println!(
        "Planning for budget {:.0}, {:.0} kcal/day ({} generations, population {})",
        config.weekly_budget,
        config.daily_calories(),
        config.generation_count,
        config.population_size
    );
    println!();

    let engine = EvolutionEngine::new(&catalog, config)?;
    let mut progress = ConsoleProgress::new(engine.config().generation_count);
    let result = engine.run(&mut progress)?;

    let summary = PlanSummary::new(&result, &targets);
    display_plan(&result, &summary);

    if let Some(path) = &args.csv {
        write_schedule_csv(&result, path)?;
        println!("Schedule written to {}", path.display());
    }
    if let Some(path) = &args.history {
        write_history_csv(&result, path)?;
        println!("History written to {}", path.display());
    }
    if let Some(path) = &args.json {
        write_report_json(&result, &targets, path)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// Write the built-in catalog to disk.
fn cmd_init(file_path: &str, force: bool) -> Result<()> {
    let path = Path::new(file_path);

    if path.exists() && !force {
        return Err(PlannerError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            file_path
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let catalog = builtin_catalog()?;
    save_catalog(path, &catalog)?;
    println!("Wrote {} meals to {}", catalog.len(), file_path);
    Ok(())
}

/// List catalog contents.
fn cmd_catalog(file_path: &str, exclude: &[String]) -> Result<()> {
    let catalog = load_or_builtin(file_path)?;
    let catalog = apply_exclusions(&catalog, exclude);

    if let Err(e) = catalog.check_non_empty() {
        warn!("{}", e);
    }

    display_catalog(&catalog);
    Ok(())
}
