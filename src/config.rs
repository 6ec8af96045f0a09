use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tokio::process::Command;

/// Root configuration structure, deserialized from `.license-reportr/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool invocations.
    pub tools: ToolsConfig,
    /// Report output options.
    pub output: OutputConfig,
}

/// Commands used to reach the two external data sources. Overridable for
/// environments where the tools live outside `PATH` (e.g. an npx shim).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Command used for the dependency listing.
    pub npm: String,
    /// Command used for the license scan.
    pub license_checker: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            npm: "npm".to_string(),
            license_checker: "license-checker".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the report JSON. Compact output when false.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig { pretty: true }
    }
}

/// Turn a tool spec like `"npx license-checker"` into a runnable command:
/// first token is the program, the rest are leading arguments.
pub fn tool_command(spec: &str) -> Command {
    let mut parts = spec.split_whitespace();
    let mut command = Command::new(parts.next().unwrap_or(spec));
    command.args(parts);
    command
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-reportr/config.toml`
/// 3. `~/.config/license-reportr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = project_path.join(".license-reportr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-reportr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
