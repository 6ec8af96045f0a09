use std::path::Path;

use thiserror::Error;

use crate::config::{tool_command, Config};
use crate::models::Catalog;

/// Errors from the license-catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("license-checker failed: {stderr}")]
    Command { stderr: String },
    #[error("no results from license-checker")]
    NoResults,
    #[error("license-checker output is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run license-checker over `project` and parse its flat
/// `name@version -> attributes` map.
///
/// `--relativeLicensePath` keeps license-file paths relative to the install
/// root, which is what the license-URL derivation expects.
pub async fn read_license_data(project: &Path, config: &Config) -> Result<Catalog, CatalogError> {
    let mut command = tool_command(&config.tools.license_checker);
    command
        .arg("--json")
        .arg("--start")
        .arg(project)
        .arg("--relativeLicensePath");

    let output = command.output().await.map_err(|source| CatalogError::Spawn {
        command: config.tools.license_checker.clone(),
        source,
    })?;

    if !output.status.success() {
        return Err(CatalogError::Command {
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_catalog(&output.stdout)
}

fn parse_catalog(stdout: &[u8]) -> Result<Catalog, CatalogError> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(CatalogError::NoResults);
    }
    Ok(serde_json::from_slice(stdout)?)
}
