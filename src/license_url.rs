use colored::Colorize;
use url::Url;

/// Path templates for browsing a file inside a repository, per source host.
const HOST_CONVENTIONS: &[(&str, &str)] = &[
    ("github.com", "/blob/master/"),
    ("bitbucket.org", "/src/master/"),
];

/// Derive a direct link to a package's license file inside its source
/// repository.
///
/// The license path reported by the scanner is relative to the install
/// root, so for transitive dependencies it runs through `node_modules`;
/// everything up to and including the last `node_modules/<package>/`
/// segment is stripped before the path is appended to the repository URL.
///
/// Degrades rather than fails: an unparsable repository string (warned on
/// stderr) or an unrecognized host returns `repository_url` unchanged.
pub fn resolve(package_name: &str, repository_url: &str, license_file: &str) -> String {
    let license_path = package_relative_path(package_name, license_file);

    let parsed = match Url::parse(repository_url) {
        Ok(url) => url,
        Err(err) => {
            eprintln!(
                "{} cannot parse repository URL {} for {}: {}",
                "warning:".yellow().bold(),
                repository_url,
                package_name,
                err
            );
            return repository_url.to_string();
        }
    };

    let template = parsed
        .host_str()
        .and_then(|host| lookup_convention(host));

    match template {
        Some(template) => format!("{}{}{}", repository_url, template, license_path),
        None => repository_url.to_string(),
    }
}

fn lookup_convention(host: &str) -> Option<&'static str> {
    HOST_CONVENTIONS
        .iter()
        .find(|(known, _)| *known == host)
        .map(|(_, template)| *template)
}

/// Strip the install prefix from a license path, e.g.
/// `node_modules/metro/node_modules/yargs-parser/LICENSE.txt` becomes
/// `LICENSE.txt` for package `yargs-parser`. Paths without the marker are
/// used unchanged.
fn package_relative_path<'a>(package_name: &str, license_file: &'a str) -> &'a str {
    let marker = format!("node_modules/{}/", package_name);
    match license_file.rfind(&marker) {
        Some(idx) => &license_file[idx + marker.len()..],
        None => license_file,
    }
}
