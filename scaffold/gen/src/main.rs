//! Scaffold Code Generator
//!
//! Generates C# source from scaffold schema documents.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use colored::Colorize;
use scaffold_define::Platform;
use scaffold_gen::config::{load_schema, load_settings};
use scaffold_gen::orchestrator::generate;
use scaffold_gen::output::write_artifacts;
use strum::IntoEnumIterator;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Scaffold code generator - transforms schema documents into C# sources
#[derive(Parser, Debug)]
#[command(name = "scaffold-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema document(s) to generate from (.yaml, .yml or .json)
    #[arg(short, long = "schema", required = true, num_args = 1..)]
    schemas: Vec<PathBuf>,

    /// Settings document selecting which categories to emit
    #[arg(long)]
    settings: PathBuf,

    /// Output directory; artifacts go to <output>/<platform>/<Name>.g.cs
    #[arg(short, long, default_value = "generated")]
    output: PathBuf,

    /// List the files that would be written without writing them
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing subscriber based on verbosity level.
///
/// `RUST_LOG` overrides the level chosen by `-v`.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,scaffold_gen=info".to_string(),
            2 => "info,scaffold_gen=debug".to_string(),
            _ => "debug,scaffold_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut documents = Vec::with_capacity(cli.schemas.len());
    for path in &cli.schemas {
        let document = load_schema(path)
            .wrap_err_with(|| format!("loading schema {}", path.display()))?;
        documents.push(document);
    }
    let settings = load_settings(&cli.settings)
        .wrap_err_with(|| format!("loading settings {}", cli.settings.display()))?;
    info!(schemas = documents.len(), "schema loaded");

    let artifacts = generate(&documents, &settings).wrap_err("code generation failed")?;
    let paths = write_artifacts(&artifacts, &cli.output, cli.dry_run)
        .wrap_err_with(|| format!("writing to {}", cli.output.display()))?;

    if cli.dry_run {
        for path in &paths {
            println!("{} {}", "would write".yellow(), path.display());
        }
    }

    for platform in Platform::iter() {
        let count = artifacts.names(platform).len();
        if count > 0 {
            println!("{} {count} {platform} artifact(s)", "generated".green().bold());
        }
    }
    if artifacts.is_empty() {
        println!("{}", "nothing to generate: no configured category matched the schema".dimmed());
    } else if !cli.dry_run {
        println!("{} {}", "output:".bold(), cli.output.display());
    }

    Ok(())
}
