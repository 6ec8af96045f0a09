use thiserror::Error;

use crate::license_url;
use crate::models::{Catalog, DependencyTreeNode, LicenseTreeNode};

#[derive(Debug, Error)]
pub enum BuildError {
    /// The two data sources disagree: every installed package must have been
    /// scanned, so a missing catalog entry aborts the whole build.
    #[error("no data from license-checker for {key} but it appears in output of npm ls")]
    MissingLicenseData { key: String },
}

/// Merge the dependency tree with the license catalog into the report tree.
///
/// Depth-first, preserving child order. Optional attributes are carried over
/// only when the catalog reported them; `licenseURL` is derived only when
/// both `repository` and `licenseFile` are present. The first missing
/// catalog key fails the whole build.
pub fn build(tree: &DependencyTreeNode, catalog: &Catalog) -> Result<LicenseTreeNode, BuildError> {
    let key = tree.key();
    let info = catalog
        .get(&key)
        .ok_or(BuildError::MissingLicenseData { key })?;

    let license_url = match (&info.repository, &info.license_file) {
        (Some(repository), Some(license_file)) => {
            Some(license_url::resolve(&tree.name, repository, license_file))
        }
        _ => None,
    };

    let dependencies = tree
        .dependencies
        .iter()
        .map(|dep| build(dep, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LicenseTreeNode {
        name: tree.name.clone(),
        version: tree.version.clone(),
        repository_url: info.repository.clone(),
        publisher_name: info.publisher.clone(),
        publisher_email: info.email.clone(),
        publisher_url: info.url.clone(),
        licenses: info.licenses.clone(),
        license_file: info.license_file.clone(),
        license_url,
        dependencies,
    })
}
