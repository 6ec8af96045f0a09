use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{tool_command, Config};
use crate::models::DependencyTreeNode;

/// Errors from the dependency-listing source and its validation.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("npm ls failed: {stderr}")]
    Command { stderr: String },
    #[error("no data from npm ls")]
    NoData,
    #[error("npm ls output is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "listing data does not match the expected format. Data: {payload}. Errors: {}.",
        .violations.join("; ")
    )]
    Schema {
        payload: Value,
        violations: Vec<String>,
    },
}

/// Run `npm ls --all --json` in `project` and normalize the output into a
/// [`DependencyTreeNode`].
///
/// npm exits nonzero when the installed tree has problems (e.g. unmet peer
/// dependencies) but still prints the tree, so only an empty stdout is
/// treated as a command failure.
pub async fn npm_ls(project: &Path, config: &Config) -> Result<DependencyTreeNode, ListingError> {
    let mut command = tool_command(&config.tools.npm);
    command.args(["ls", "--all", "--json"]).current_dir(project);

    let output = command.output().await.map_err(|source| ListingError::Spawn {
        command: config.tools.npm.clone(),
        source,
    })?;

    if output.stdout.is_empty() {
        if output.status.success() {
            return Err(ListingError::NoData);
        }
        return Err(ListingError::Command {
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let raw: Value = serde_json::from_slice(&output.stdout)?;
    validate_listing(&raw)
}

/// Validate and normalize a raw `npm ls --json` structure.
///
/// The root must carry `name` and `version` strings; every nested entry must
/// carry `from` and `version` strings (its name is the key in the parent's
/// `dependencies` map). Entries marking an unmet peer dependency are dropped.
/// Any other shape mismatch fails the whole listing with a [`ListingError::Schema`]
/// listing every violation by dotted path.
pub fn validate_listing(raw: &Value) -> Result<DependencyTreeNode, ListingError> {
    let mut violations = Vec::new();
    let tree = validate_root(raw, &mut violations);
    match tree {
        Some(tree) if violations.is_empty() => Ok(tree),
        _ => Err(ListingError::Schema {
            payload: raw.clone(),
            violations,
        }),
    }
}

fn validate_root(raw: &Value, violations: &mut Vec<String>) -> Option<DependencyTreeNode> {
    let Some(obj) = raw.as_object() else {
        violations.push("expected the listing root to be an object".to_string());
        return None;
    };

    let name = require_string(obj, "name", "", violations);
    let version = require_string(obj, "version", "", violations);
    let dependencies = validate_dependencies(obj.get("dependencies"), "", violations);

    match (name, version) {
        (Some(name), Some(version)) => Some(DependencyTreeNode {
            name,
            version,
            dependencies,
        }),
        _ => None,
    }
}

fn validate_dependencies(
    value: Option<&Value>,
    path: &str,
    violations: &mut Vec<String>,
) -> Vec<DependencyTreeNode> {
    let deps_path = join_path(path, "dependencies");
    let map = match value {
        None => return Vec::new(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            violations.push(format!("{deps_path}: expected a map of dependency entries"));
            return Vec::new();
        }
    };

    map.iter()
        .filter_map(|(name, entry)| validate_entry(name, entry, &deps_path, violations))
        .collect()
}

fn validate_entry(
    name: &str,
    entry: &Value,
    parent_path: &str,
    violations: &mut Vec<String>,
) -> Option<DependencyTreeNode> {
    let entry_path = join_path(parent_path, name);
    let Some(obj) = entry.as_object() else {
        violations.push(format!("{entry_path}: expected a dependency entry object"));
        return None;
    };

    // Decode as a dependency node first; only entries that are not valid
    // nodes can match the unmet-peer marker.
    let mut entry_violations = Vec::new();
    let from = require_string(obj, "from", &entry_path, &mut entry_violations);
    let version = require_string(obj, "version", &entry_path, &mut entry_violations);
    let dependencies = validate_dependencies(obj.get("dependencies"), &entry_path, &mut entry_violations);

    if entry_violations.is_empty() {
        if let (Some(_), Some(version)) = (from, version) {
            // `from` records how the dependency was requested; the installed
            // name is the key in the parent's map.
            return Some(DependencyTreeNode {
                name: name.to_string(),
                version,
                dependencies,
            });
        }
    }

    if obj.get("peerMissing") == Some(&Value::Bool(true)) {
        // Unmet peer dependency: dropped from its parent entirely.
        return None;
    }

    violations.extend(entry_violations);
    None
}

fn require_string(
    obj: &Map<String, Value>,
    field: &str,
    path: &str,
    violations: &mut Vec<String>,
) -> Option<String> {
    match obj.get(field) {
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            violations.push(format!("{}: expected a string", join_path(path, field)));
            None
        }
        None => {
            violations.push(format!("{}: missing required field", join_path(path, field)));
            None
        }
    }
}

fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}
