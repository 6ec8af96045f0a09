//! Report output.
//!
//! - [`write`] — serialize the report tree to JSON and persist it.
//! - [`terminal`] — colored post-run summary with a license-frequency table.

pub mod terminal;

use std::path::Path;

use anyhow::Result;

use crate::models::LicenseTreeNode;

/// Serialize the report tree and write it to `path`.
///
/// Absent optional fields are omitted from the JSON entirely, so the file
/// carries no null or empty placeholders.
pub fn write(tree: &LicenseTreeNode, path: &Path, pretty: bool) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_string_pretty(tree)?
    } else {
        serde_json::to_string(tree)?
    };
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Licenses;

    fn sample_tree() -> LicenseTreeNode {
        LicenseTreeNode {
            name: "the-project".into(),
            version: "1.0.1".into(),
            repository_url: None,
            publisher_name: None,
            publisher_email: None,
            publisher_url: None,
            licenses: Some(Licenses::One("MIT".into())),
            license_file: None,
            license_url: None,
            dependencies: vec![],
        }
    }

    #[test]
    fn test_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write(&sample_tree(), &path, true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"name\": \"the-project\""));
        assert!(content.ends_with('\n'));

        let parsed: LicenseTreeNode = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample_tree());
    }

    #[test]
    fn test_writes_compact_json_without_absent_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write(&sample_tree(), &path, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\"name\":\"the-project\",\"version\":\"1.0.1\",\"licenses\":\"MIT\",\"dependencies\":[]}\n"
        );
    }
}
