use clap::Parser;
use std::path::PathBuf;
use taskweave::cli::input::{render_json, write_plan_file, write_task_list_file};
use taskweave::cli::{Args, Commands, ConfigDiscovery, TaskListLoader, TaskweaveConfig};
use taskweave::{Advisor, DependencyOptimizer, Planner, PlannerConfig};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("taskweave=info")
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Plan {
            file,
            config,
            output,
            optimize,
            verbose,
            pretty,
        } => run_plan(file, config, output, optimize, verbose, pretty),
        Commands::Optimize {
            file,
            output,
            pretty,
        } => run_optimize(file, output, pretty),
        Commands::Advise {
            file,
            config,
            verbose,
        } => run_advise(file, config, verbose),
        Commands::ShowConfig => {
            ConfigDiscovery::show_discovery_info();
            Ok(())
        }
    }
}

fn load_config(
    config_override: Option<PathBuf>,
) -> Result<TaskweaveConfig, Box<dyn std::error::Error>> {
    match config_override {
        Some(path) => {
            info!("Loading configuration override from: {:?}", path);
            TaskweaveConfig::from_toml_file(path)
        }
        None => ConfigDiscovery::discover_config(),
    }
}

fn run_plan(
    file: PathBuf,
    config_override: Option<PathBuf>,
    output: Option<PathBuf>,
    optimize: bool,
    verbose: bool,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_override)?;
    let tasks = TaskListLoader::load(&file)?;

    if verbose {
        println!("📋 Loaded {} tasks from {:?}", tasks.len(), file);
    }

    let planner_config = PlannerConfig {
        optimize_dependencies: optimize || config.planner.optimize_dependencies,
    };
    let plan = Planner::new(planner_config).plan(&tasks)?;

    if verbose {
        println!("✅ Planned {}", plan.summary());
        println!(
            "   critical path: {} tasks, {} min minimum",
            plan.critical_path.len(),
            plan.minimum_time
        );
        println!("   parallel efficiency: {:.1}%", plan.parallel_efficiency);
    }

    match output {
        Some(path) => {
            write_plan_file(&path, &plan, pretty)?;
            info!("Wrote execution plan to {:?}", path);
        }
        None => println!("{}", render_json(&plan, pretty)?),
    }

    Ok(())
}

fn run_optimize(
    file: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = TaskListLoader::load(&file)?;
    let reduced = DependencyOptimizer::reduce(&tasks);

    match output {
        Some(path) => {
            write_task_list_file(&path, &reduced, pretty)?;
            info!("Wrote reduced task list to {:?}", path);
        }
        None => {
            let document = taskweave::cli::TaskListDocument { tasks: reduced };
            println!("{}", render_json(&document, pretty)?);
        }
    }

    Ok(())
}

fn run_advise(
    file: PathBuf,
    config_override: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_override)?;
    let tasks = TaskListLoader::load(&file)?;
    let plan = Planner::new(config.planner.clone()).plan(&tasks)?;

    if verbose {
        println!("📋 Reviewed {}", plan.summary());
    }

    let advisories = Advisor::new(config.advisory).review(&plan);
    if advisories.is_empty() {
        println!("✅ No scheduling advisories");
    } else {
        println!("Found {} advisories:", advisories.len());
        for advisory in &advisories {
            println!("  ⚠️  {}", advisory);
        }
    }

    Ok(())
}
