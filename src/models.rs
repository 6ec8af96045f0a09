use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One resolved package instance in the installed dependency graph.
///
/// Children keep the insertion order of the source listing. The same
/// `name@version` pair may occur at several tree positions (diamond
/// dependencies); each occurrence is independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyTreeNode {
    pub name: String,
    pub version: String,
    pub dependencies: Vec<DependencyTreeNode>,
}

impl DependencyTreeNode {
    /// Catalog lookup key, `name@version`.
    pub fn key(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// License metadata for a single package, as reported by license-checker.
///
/// Every field is independently optional; absence means "not reported",
/// not an error. Fields license-checker emits that the report does not
/// carry (e.g. `path`) are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub licenses: Option<Licenses>,
    pub repository: Option<String>,
    pub publisher: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub license_file: Option<String>,
}

/// license-checker reports either a single license identifier or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Licenses {
    One(String),
    Many(Vec<String>),
}

/// Flat license catalog keyed by `name@version`.
pub type Catalog = HashMap<String, LicenseInfo>;

/// One node of the final report tree.
///
/// Structurally isomorphic to the [`DependencyTreeNode`] it was built from.
/// Optional attributes are present only when the catalog reported them;
/// absent fields are omitted from the serialized report entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseTreeNode {
    pub name: String,
    pub version: String,
    #[serde(rename = "repositoryURL", skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(rename = "publisherName", skip_serializing_if = "Option::is_none")]
    pub publisher_name: Option<String>,
    #[serde(rename = "publisherEmail", skip_serializing_if = "Option::is_none")]
    pub publisher_email: Option<String>,
    #[serde(rename = "publisherURL", skip_serializing_if = "Option::is_none")]
    pub publisher_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Licenses>,
    #[serde(rename = "licenseFile", skip_serializing_if = "Option::is_none")]
    pub license_file: Option<String>,
    #[serde(rename = "licenseURL", skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    pub dependencies: Vec<LicenseTreeNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_info_deserializes_checker_output() {
        let json = r#"{
  "licenses": "BSD-3-Clause",
  "repository": "https://github.com/davglass/license-checker",
  "publisher": "Dav Glass",
  "email": "davglass@gmail.com",
  "path": "node_modules/license-checker",
  "licenseFile": "node_modules/license-checker/LICENSE"
}"#;
        let info: LicenseInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.licenses, Some(Licenses::One("BSD-3-Clause".into())));
        assert_eq!(info.email.as_deref(), Some("davglass@gmail.com"));
        assert_eq!(
            info.license_file.as_deref(),
            Some("node_modules/license-checker/LICENSE")
        );
    }

    #[test]
    fn test_licenses_accepts_a_list() {
        let info: LicenseInfo =
            serde_json::from_str(r#"{ "licenses": ["MIT", "Apache-2.0"] }"#).unwrap();
        assert_eq!(
            info.licenses,
            Some(Licenses::Many(vec!["MIT".into(), "Apache-2.0".into()]))
        );
    }

    #[test]
    fn test_absent_optional_fields_are_omitted_from_the_report() {
        let node = LicenseTreeNode {
            name: "the-project".into(),
            version: "1.0.1".into(),
            repository_url: None,
            publisher_name: None,
            publisher_email: None,
            publisher_url: None,
            licenses: Some(Licenses::One("MIT".into())),
            license_file: None,
            license_url: None,
            dependencies: Vec::new(),
        };
        let json = serde_json::to_value(&node).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("repositoryURL"));
        assert!(!obj.contains_key("publisherName"));
        assert!(!obj.contains_key("licenseURL"));
        assert_eq!(obj["licenses"], "MIT");
        assert_eq!(obj["dependencies"], serde_json::json!([]));
    }

    #[test]
    fn test_report_field_names_match_the_output_format() {
        let node = LicenseTreeNode {
            name: "the-project".into(),
            version: "1.0.1".into(),
            repository_url: Some("https://github.com/jmacindoe/the-project".into()),
            publisher_name: Some("Myself".into()),
            publisher_email: Some("me@example.com".into()),
            publisher_url: Some("me.example.com".into()),
            licenses: Some(Licenses::One("MIT".into())),
            license_file: Some("LICENSE.txt".into()),
            license_url: Some(
                "https://github.com/jmacindoe/the-project/blob/master/LICENSE.txt".into(),
            ),
            dependencies: Vec::new(),
        };
        let json = serde_json::to_value(&node).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "repositoryURL",
            "publisherName",
            "publisherEmail",
            "publisherURL",
            "licenses",
            "licenseFile",
            "licenseURL",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }
}
