//! critvec - test-vector generator CLI
//!
//! ## Commands
//!
//! - `list`: Load a criterion definition file and list its criteria
//! - `baseline`: Print the vector that resets every criterion
//! - `generate`: Print every vector of a test suite
//! - `plan`: Print the daemon command stream for a test suite

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use critvec_core::{
    CommandOutput, CriterionRegistry, TestSuite, TestVector, TestVectorFactory, Transport,
    VectorApplier, VectorReport,
};

#[derive(Parser)]
#[command(name = "critvec")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Criterion test-vector generator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the criteria of a definition file
    List {
        /// Criterion definition file
        #[arg(short, long, env = "CRITVEC_CRITERIA")]
        criteria: PathBuf,
    },

    /// Print the baseline vector (every criterion reset)
    Baseline {
        /// Criterion definition file
        #[arg(short, long, env = "CRITVEC_CRITERIA")]
        criteria: PathBuf,

        /// Vector name
        #[arg(short, long, default_value = "baseline")]
        name: String,

        /// Print vectors as JSON instead of text reports
        #[arg(long)]
        output_json: bool,
    },

    /// Generate every vector of a test suite
    Generate {
        /// Criterion definition file
        #[arg(short, long, env = "CRITVEC_CRITERIA")]
        criteria: PathBuf,

        /// Test suite JSON file
        #[arg(short, long, env = "CRITVEC_SUITE")]
        suite: PathBuf,

        /// Print vectors as JSON instead of text reports
        #[arg(long)]
        output_json: bool,
    },

    /// Dry-run the command stream a suite would send to the daemon
    Plan {
        /// Criterion definition file
        #[arg(short, long, env = "CRITVEC_CRITERIA")]
        criteria: PathBuf,

        /// Test suite JSON file
        #[arg(short, long, env = "CRITVEC_SUITE")]
        suite: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    critvec_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::List { criteria } => cmd_list(&criteria),
        Commands::Baseline {
            criteria,
            name,
            output_json,
        } => cmd_baseline(&criteria, &name, output_json),
        Commands::Generate {
            criteria,
            suite,
            output_json,
        } => cmd_generate(&criteria, &suite, output_json),
        Commands::Plan { criteria, suite } => cmd_plan(&criteria, &suite).await,
    }
}

fn load_registry(path: &Path) -> Result<CriterionRegistry> {
    CriterionRegistry::load(path)
        .with_context(|| format!("Failed to load criteria from {}", path.display()))
}

fn load_vectors(criteria: &Path, suite: &Path) -> Result<Vec<TestVector>> {
    let registry = load_registry(criteria)?;
    let suite = TestSuite::load(suite)
        .with_context(|| format!("Failed to load suite from {}", suite.display()))?;
    let vectors = suite
        .generate_all(&TestVectorFactory::new(&registry))
        .context("Failed to generate test vectors")?;
    Ok(vectors)
}

fn print_vectors(vectors: &[TestVector], output_json: bool) -> Result<()> {
    if output_json {
        let reports: Vec<VectorReport> = vectors.iter().map(TestVector::to_report).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for vector in vectors {
        println!("# {} [{}]", vector.name(), &vector.digest()[..12]);
        print!("{}", vector);
        println!();
    }
    Ok(())
}

fn cmd_list(criteria: &Path) -> Result<()> {
    let registry = load_registry(criteria)?;

    for variant in registry.variants() {
        println!(
            "{:<20} {:<20} {}",
            variant.kind(),
            variant.name(),
            variant.allowed_values().join(" ")
        );
    }
    info!(count = registry.len(), "Listed criteria");
    Ok(())
}

fn cmd_baseline(criteria: &Path, name: &str, output_json: bool) -> Result<()> {
    let registry = load_registry(criteria)?;
    let vector = TestVectorFactory::new(&registry)
        .baseline(name)
        .context("Failed to generate baseline vector")?;
    print_vectors(std::slice::from_ref(&vector), output_json)
}

fn cmd_generate(criteria: &Path, suite: &Path, output_json: bool) -> Result<()> {
    let vectors = load_vectors(criteria, suite)?;
    print_vectors(&vectors, output_json)?;
    info!(vectors = vectors.len(), "Generated test vectors");
    Ok(())
}

async fn cmd_plan(criteria: &Path, suite: &Path) -> Result<()> {
    let vectors = load_vectors(criteria, suite)?;
    let transport = PrintTransport;

    for vector in &vectors {
        println!("# {} ({})", vector.name(), vector.test_type());
        VectorApplier::new(&transport)
            .apply(vector)
            .await
            .with_context(|| format!("Failed to plan vector {}", vector.name()))?;
    }
    Ok(())
}

/// Transport that prints each command instead of sending it.
struct PrintTransport;

#[async_trait]
impl Transport for PrintTransport {
    async fn send(&self, command: &str, args: &[String]) -> critvec_core::Result<CommandOutput> {
        println!("{}", format_command(command, args));
        Ok(CommandOutput::ok(""))
    }
}

fn format_command(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}
