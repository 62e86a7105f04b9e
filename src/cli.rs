//! Profilescout CLI - generate the demo dataset and search it from a terminal
//!
//! Usage:
//!   profilescout generate                   Write a demo profiles.csv
//!   profilescout search "python 3 years"    Semantic search with experience filter
//!   profilescout list                       Show the dataset

use clap::{Parser, Subcommand};
use colored::*;
use profilescout::{
    generate_profiles, load_or_generate, save_csv, DatasetConfig, Profile, ProfileSearch,
    SearchConfig, SearchOutcome, ThresholdPolicy,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "profilescout")]
#[command(about = "Profilescout - semantic candidate profile search")]
#[command(version)]
struct Cli {
    /// Path to the profile dataset (CSV)
    #[arg(short, long, env = "PROFILESCOUT_DATASET", default_value = "profiles.csv")]
    dataset: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a demo dataset
    Generate {
        /// Number of profiles
        #[arg(short, long, default_value = "50")]
        size: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Overwrite an existing dataset
        #[arg(short, long)]
        force: bool,
    },

    /// Search profiles
    Search {
        /// Search query, e.g. "machine learning 3+ years"
        query: String,

        /// Maximum results shown
        #[arg(short, long, default_value = "50")]
        limit: usize,

        /// Candidates fetched from the index before filtering
        #[arg(long, default_value = "50")]
        fan_out: usize,

        /// Only treat numbers followed by "+" or a unit word as a threshold
        #[arg(long)]
        strict_units: bool,

        /// Seed used if the dataset has to be generated
        #[arg(long)]
        seed: Option<u64>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List profiles in the dataset
    List {
        /// Maximum rows
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "profilescout=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate { size, seed, force } => cmd_generate(&cli.dataset, size, seed, force),
        Commands::Search {
            query,
            limit,
            fan_out,
            strict_units,
            seed,
            json,
        } => {
            cmd_search(
                &cli.dataset,
                query,
                limit,
                fan_out,
                strict_units,
                seed,
                json,
            )
            .await
        }
        Commands::List { limit } => cmd_list(&cli.dataset, limit),
    }
}

fn dataset_config(seed: Option<u64>) -> DatasetConfig {
    DatasetConfig {
        seed,
        ..DatasetConfig::default()
    }
}

fn cmd_generate(path: &Path, size: usize, seed: Option<u64>, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let profiles = generate_profiles(&dataset_config(seed).with_size(size))?;
    save_csv(path, &profiles)?;

    println!(
        "{}",
        format!("Wrote {} profiles to {}", profiles.len(), path.display())
            .bold()
            .green()
    );
    Ok(())
}

async fn cmd_search(
    path: &Path,
    query: String,
    limit: usize,
    fan_out: usize,
    strict_units: bool,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let policy = if strict_units {
        ThresholdPolicy::RequireUnit
    } else {
        ThresholdPolicy::AnyNumber
    };
    let config = SearchConfig::builder()
        .fan_out(fan_out)
        .display_cap(limit)
        .threshold_policy(policy)
        .build()?;

    let profiles = load_or_generate(path, &dataset_config(seed))?;
    let search = ProfileSearch::in_memory(Arc::new(profiles), config)?;
    let outcome = search.search(&query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        SearchOutcome::ValidationError { message } => {
            println!("{}", message.yellow());
        }
        SearchOutcome::NoResults { .. } => {
            println!(
                "{}",
                "No matching profiles found with the given experience.".red()
            );
        }
        SearchOutcome::Results {
            threshold,
            profiles,
            total_matches,
            ..
        } => {
            let heading = match threshold {
                Some(t) => format!(
                    "Found {} matching profiles (more than {} years experience)",
                    total_matches, t
                ),
                None => format!("Found {} matching profiles", total_matches),
            };
            println!("{}", heading.bold().green());
            println!();

            for (i, c) in profiles.iter().enumerate() {
                println!(
                    "{}. {} ({}) {}",
                    i + 1,
                    c.field("name").bold(),
                    c.field("location").cyan(),
                    format!("{:.3}", c.score).dimmed()
                );
                println!("   Email: {}", c.field("email"));
                println!("   Skills: {}", c.field("skills"));
                println!("   Experience: {} years", c.field("experience_years"));
                println!("   Summary: {}", c.field("summary"));
            }
        }
    }

    Ok(())
}

fn cmd_list(path: &Path, limit: usize) -> anyhow::Result<()> {
    let profiles = profilescout::load_csv(path)?;

    if profiles.is_empty() {
        println!("{}", "No profiles found".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Showing {} of {} profiles:", profiles.len().min(limit), profiles.len()).bold()
    );
    println!();

    for (i, p) in profiles.iter().take(limit).enumerate() {
        println!("{}", list_row(i + 1, p));
    }

    Ok(())
}

fn list_row(rank: usize, p: &Profile) -> String {
    format!(
        "{:>3}. {} - {} - {} yrs - {}",
        rank,
        p.name.bold(),
        p.location.cyan(),
        p.experience_years,
        p.skills.dimmed()
    )
}
