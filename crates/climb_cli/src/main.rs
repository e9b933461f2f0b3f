//! Climb CLI
//!
//! Hold JSON → planned route document + step-by-step instructions

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use climb_core::api::{route_document_schema, RouteDocument};
#[cfg(feature = "cli")]
use climb_core::{HoldSet, PlanError, PlannerConfig};
#[cfg(feature = "cli")]
use climb_cli::ConfigOverrides;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "climb")]
#[command(about = "Plan a climbing route over detected holds", long_about = None)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Plan a route from a hold JSON file
    Plan {
        /// Hold JSON file (array of holds or object with a "holds" array)
        #[arg(long)]
        holds: PathBuf,

        /// Output route document path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Planner config (YAML or JSON); falls back to CLIMB_CONFIG_PATH
        #[arg(long)]
        config: Option<PathBuf>,

        /// Horizontal movement weight override
        #[arg(long)]
        horizontal_weight: Option<f64>,

        /// Minimum hold count override
        #[arg(long)]
        min_holds: Option<usize>,

        /// Source image name stored in the document
        #[arg(long)]
        image: Option<String>,

        /// Difficulty label stored in the document
        #[arg(long)]
        difficulty: Option<String>,

        /// Print a text sketch of the route
        #[arg(long, default_value = "false")]
        sketch: bool,
    },

    /// Plan the built-in demo wall
    Demo {
        /// Output route document path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print a text sketch of the route
        #[arg(long, default_value = "false")]
        sketch: bool,
    },

    /// Print the route document JSON schema
    Schema,
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        if let Some(PlanError::NoPathFound { holds, low_candidates, high_candidates }) =
            err.downcast_ref::<PlanError>()
        {
            eprintln!("❌ No route available");
            eprintln!("   Holds:           {}", holds);
            eprintln!("   Low candidates:  {}", low_candidates);
            eprintln!("   High candidates: {}", high_candidates);
            std::process::exit(2);
        }
        eprintln!("❌ {:#}", err);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Plan {
            holds,
            out,
            config,
            horizontal_weight,
            min_holds,
            image,
            difficulty,
            sketch,
        } => {
            println!("🧗 Planning route...");
            println!("   Holds: {}", holds.display());

            let overrides = ConfigOverrides { horizontal_weight, min_holds };
            let config = climb_cli::resolve_config(config.as_deref(), &overrides)?;
            let hold_set = climb_cli::load_holds(&holds)?;

            let image = image.or_else(|| {
                holds.file_name().map(|name| name.to_string_lossy().into_owned())
            });
            let document = climb_cli::plan_document(&hold_set, &config, image, difficulty)?;
            report(&document, &config, out, sketch)?;
        }

        Commands::Demo { out, sketch } => {
            println!("🧗 Planning demo wall...");

            let config = PlannerConfig::default();
            let document = climb_cli::plan_document(
                &HoldSet::demo_wall(),
                &config,
                Some("demo_wall".to_string()),
                None,
            )?;
            report(&document, &config, out, sketch)?;
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&route_document_schema()?)?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn report(
    document: &RouteDocument,
    config: &PlannerConfig,
    out: Option<PathBuf>,
    sketch: bool,
) -> Result<()> {
    let info = &document.route_info;
    println!("\n✅ Route planned!");
    println!("   Path:        {:?}", document.route.path);
    println!("   Steps:       {}", info.total_steps);
    println!("   Cost:        {:.1}", info.total_cost);
    println!("   Difficulty:  {}", info.difficulty);
    println!("   Fingerprint: {}", info.fingerprint);

    println!("\n📋 Instructions:");
    print!("{}", climb_cli::format_instructions(document));

    if sketch {
        println!("\n{}", climb_cli::render_sketch(document, config)?);
    }

    if let Some(path) = out {
        climb_cli::save_document(&path, document)?;
        println!("\n📄 Route saved to: {}", path.display());
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("climb CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
