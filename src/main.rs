//! `license-reportr` — consolidated license report for a project's installed
//! npm dependency graph.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Run the two data sources concurrently: `npm ls --all --json`
//!    ([`listing`]) and `license-checker --json` ([`catalog`]). Neither may
//!    be substituted with empty data; any source failure is the sole outcome.
//! 4. Merge the validated dependency tree with the license catalog
//!    ([`license_tree`]), deriving browsable license URLs ([`license_url`]).
//! 5. Write the report file and print a summary ([`report`]).
//! 6. Exit `0` (report written) or `1` (any failure; no partial report).

mod catalog;
mod cli;
mod config;
mod license_tree;
mod license_url;
mod listing;
mod models;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Mode};
use config::load_config;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Resolve project path
    let project = cli.project.clone().unwrap_or_else(|| PathBuf::from("."));
    let project = project.canonicalize().unwrap_or(project);

    let config = load_config(&project, cli.config.as_deref())?;

    let out_path = match cli.mode() {
        Mode::Generate(path) => path,
        Mode::Verify(_) => {
            // The argument surface reserves --verify; report comparison is
            // not implemented.
            bail!("--verify is not implemented yet; use --out to regenerate the report");
        }
    };

    let spinner = if !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("scanning {}", project.display()));
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    // The two sources are independent; the merge needs both complete.
    let listing_result = tokio::try_join!(
        async { listing::npm_ls(&project, &config).await.map_err(anyhow::Error::from) },
        async {
            catalog::read_license_data(&project, &config)
                .await
                .map_err(anyhow::Error::from)
        },
    );

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let (tree, license_data) = listing_result?;

    let report_tree = license_tree::build(&tree, &license_data)?;
    report::write(&report_tree, &out_path, config.output.pretty)?;

    if !cli.quiet {
        report::terminal::render(&report_tree, &out_path);
    }

    Ok(())
}
