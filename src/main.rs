use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod data;
mod filter;
mod models;
mod present;
mod report;

#[derive(Parser)]
#[command(name = "university-dashboard")]
#[command(
    about = "University admissions, retention & satisfaction dashboard",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter dataset into the working directory
    Seed,
    /// List the term and department filter choices
    Filters,
    /// Print headline totals for the selected term and departments
    Kpis {
        #[arg(long)]
        term: Option<String>,
        /// May be repeated; defaults to every department
        #[arg(long = "department")]
        departments: Vec<String>,
    },
    /// Render the dashboard as a markdown report
    Report {
        #[arg(long)]
        term: Option<String>,
        /// May be repeated; defaults to every department
        #[arg(long = "department")]
        departments: Vec<String>,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Print the dashboard payload as JSON for an external display host
    Export {
        #[arg(long)]
        term: Option<String>,
        /// May be repeated; defaults to every department
        #[arg(long = "department")]
        departments: Vec<String>,
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed => {
            let written = data::write_starter_dataset(Path::new(data::DATA_FILE))?;
            println!("Wrote {written} starter rows to {}.", data::DATA_FILE);
        }
        Commands::Filters => {
            let dataset = data::load()?;
            println!("Terms:");
            for term in data::distinct_terms(dataset) {
                println!("- {term}");
            }
            println!("Departments:");
            for department in data::distinct_departments(dataset) {
                println!("- {department}");
            }
        }
        Commands::Kpis { term, departments } => {
            let dataset = data::load()?;
            let (term, departments) = resolve_selection(dataset, term, departments)?;
            let filtered =
                filter::filter_rows(dataset, &term, &filter::department_set(&departments));
            let summary = aggregate::kpis(&filtered);

            println!(
                "Key metrics for the {term} term ({}):",
                departments.join(", ")
            );
            println!("- Total Applications: {}", summary.total_applications);
            println!("- Total Admissions: {}", summary.total_admissions);
            println!("- Total Enrollments: {}", summary.total_enrollments);
        }
        Commands::Report {
            term,
            departments,
            out,
        } => {
            let dashboard = build_dashboard(term, departments)?;
            let markdown = report::render_markdown(&dashboard);
            std::fs::write(&out, markdown)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Dashboard written to {}.", out.display());
        }
        Commands::Export {
            term,
            departments,
            pretty,
        } => {
            let dashboard = build_dashboard(term, departments)?;
            let payload = if pretty {
                serde_json::to_string_pretty(&dashboard)?
            } else {
                serde_json::to_string(&dashboard)?
            };
            println!("{payload}");
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn build_dashboard(
    term: Option<String>,
    departments: Vec<String>,
) -> anyhow::Result<present::Dashboard> {
    let dataset = data::load()?;
    let (term, departments) = resolve_selection(dataset, term, departments)?;
    let filtered = filter::filter_rows(dataset, &term, &filter::department_set(&departments));
    debug!(rows = filtered.len(), term = %term, "filtered view computed");
    Ok(present::build_dashboard(
        dataset,
        &filtered,
        &term,
        &departments,
    ))
}

// Mirrors the selector defaults: the first term for the single-select,
// every department for the multi-select.
fn resolve_selection(
    dataset: &[models::MetricRecord],
    term: Option<String>,
    departments: Vec<String>,
) -> anyhow::Result<(String, Vec<String>)> {
    let term = match term {
        Some(term) => term,
        None => data::distinct_terms(dataset)
            .into_iter()
            .next()
            .context("dataset has no terms to select")?,
    };
    let departments = if departments.is_empty() {
        data::distinct_departments(dataset)
    } else {
        departments
    };
    Ok((term, departments))
}
