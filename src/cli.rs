use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "license-reportr",
    about = "Generate a license attribution report for a project's installed npm dependencies",
    version,
    group(ArgGroup::new("mode").required(true).args(["out", "verify"]))
)]
pub struct Cli {
    /// Write the license report to FILE
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Check a previously written report at FILE against the current dependency graph
    #[arg(long, value_name = "FILE", conflicts_with = "out")]
    pub verify: Option<PathBuf>,

    /// Project directory to analyze [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Config file [default: ./.license-reportr/config.toml, fallback ~/.config/license-reportr/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and the post-run summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// What the invocation asks for, with the report path attached.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Generate(PathBuf),
    Verify(PathBuf),
}

impl Cli {
    /// Resolve `--out`/`--verify` into a [`Mode`]. The arg group guarantees
    /// exactly one of the two is present.
    pub fn mode(&self) -> Mode {
        match (&self.out, &self.verify) {
            (Some(path), None) => Mode::Generate(path.clone()),
            (None, Some(path)) => Mode::Verify(path.clone()),
            _ => unreachable!("clap enforces exactly one of --out/--verify"),
        }
    }
}
