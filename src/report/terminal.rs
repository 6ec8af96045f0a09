use std::collections::HashMap;
use std::path::Path;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::models::{LicenseTreeNode, Licenses};

/// Print the post-generate summary: package total, report location, and a
/// license-frequency table.
pub fn render(tree: &LicenseTreeNode, out_path: &Path) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let total = tally(tree, &mut counts);

    println!(
        "\n {} v{}",
        "license-reportr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" {} packages in the installed dependency graph", total);
    println!(
        " {} report written to {}\n",
        "✓".green(),
        out_path.display()
    );

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Packages").add_attribute(Attribute::Bold),
        ]);

    for (license, count) in pairs {
        table.add_row(vec![
            Cell::new(license),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}

/// Count packages per license label, depth-first. Packages without license
/// data are grouped under `unreported`.
fn tally(node: &LicenseTreeNode, counts: &mut HashMap<String, usize>) -> usize {
    let label = match &node.licenses {
        Some(Licenses::One(license)) => license.clone(),
        Some(Licenses::Many(list)) => list.join(", "),
        None => "unreported".to_string(),
    };
    *counts.entry(label).or_insert(0) += 1;

    1 + node
        .dependencies
        .iter()
        .map(|dep| tally(dep, counts))
        .sum::<usize>()
}
