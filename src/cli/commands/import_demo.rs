//! `demodata import-demo` - import the demo product set
//!
//! Interactive category selection and a confirmation prompt by default;
//! `--force`, `--no-category` and `--format json` together give the
//! non-interactive, machine-consumable variant.

use console::style;
use dialoguer::Select;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::catalog::store::CategoryEntry;
use crate::catalog::{ProductService, ProductStore, SqliteCatalog};
use crate::cli::helpers::{confirm_proceed, open_catalog, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::import::{DemoDataImporter, ImportOutcome};

#[derive(clap::Args, Debug)]
pub struct ImportDemoArgs {
    /// Do not ask for confirmation and import products immediately
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Import products into a specific category by id
    #[arg(long, conflicts_with = "no_category")]
    pub category_id: Option<String>,

    /// Import products without assigning them to any category
    #[arg(long)]
    pub no_category: bool,

    /// Import from a CSV file instead of the bundled demo data
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn run(args: ImportDemoArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = open_catalog(global)?;
    let machine_output = global.format == OutputFormat::Json;

    if !global.quiet && !machine_output {
        println!(
            "{} This will import demo products into your catalog.",
            style("!").yellow()
        );
    }

    let category_id = match (&args.category_id, args.no_category) {
        (Some(id), _) => Some(id.clone()),
        (None, true) => None,
        // JSON mode stays non-interactive, mirroring the admin trigger
        (None, false) if machine_output => None,
        (None, false) => Some(select_category(&catalog)?),
    };

    if !args.force && !machine_output && !confirm_proceed("Are you sure you want to proceed?")? {
        println!("Aborted.");
        return Ok(());
    }

    let mut service = ProductService::new(catalog, config.locale(), config.currency());
    let mut importer = DemoDataImporter::new(&mut service);

    let outcome = match &args.file {
        Some(path) => importer.install_from_path(path, category_id.as_deref()),
        None => importer.install_bundled(category_id.as_deref()),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&outcome).into_diagnostic()?
            );
        }
        OutputFormat::Text => {
            report_outcome(&outcome, category_id.as_deref(), args.no_category, &service, global);
        }
    }

    Ok(())
}

fn report_outcome(
    outcome: &ImportOutcome,
    category_id: Option<&str>,
    no_category: bool,
    service: &ProductService<SqliteCatalog>,
    global: &GlobalOpts,
) {
    if global.quiet {
        return;
    }

    if !outcome.imported.is_empty() {
        println!();
        println!("{}", style("Imported Articles").bold());

        let mut builder = Builder::default();
        builder.push_record(["Product Number", "Name", "EAN", "MPN"]);
        for product in &outcome.imported {
            builder.push_record([
                product.product_number.clone(),
                truncate_str(&product.name, 40),
                product.ean.clone().unwrap_or_default(),
                product.mpn.clone().unwrap_or_default(),
            ]);
        }
        println!("{}", builder.build().with(Style::markdown()));
        println!();
    }

    println!("  {}", outcome.additional_info);

    let category_name = category_id
        .and_then(|id| service.store().category_name(id).ok().flatten());

    let mut message = String::from("Demo data imported successfully!");
    if let Some(name) = category_name {
        message.push_str(&format!(
            " Products have been assigned to category: {name}"
        ));
    } else if no_category {
        message.push_str(" Products have been imported without category assignment.");
    } else {
        message.push_str(" Products have been imported.");
    }
    println!("{} {}", style("✓").green(), message);
    println!(
        "Run {} to remove them again.",
        style("demodata remove-demo").cyan()
    );
}

/// Offer all categories for selection, shallowest breadcrumb first.
fn select_category(catalog: &SqliteCatalog) -> Result<String> {
    let categories = catalog
        .categories()
        .map_err(|e| miette::miette!("{}", e))?;

    if categories.is_empty() {
        return Err(miette::miette!(
            "No categories found in the catalog. Run `demodata install` first, or pass --no-category."
        ));
    }

    let mut choices: Vec<(String, String)> = categories
        .iter()
        .map(|category| {
            let breadcrumb = breadcrumb(category, &categories);
            (category.id.clone(), breadcrumb)
        })
        .collect();
    // Shallow categories first, then alphabetically within a depth
    choices.sort_by_key(|(_, label)| (label.matches(" > ").count(), label.clone()));

    let labels: Vec<&str> = choices.iter().map(|(_, label)| label.as_str()).collect();
    let selected = Select::new()
        .with_prompt("Select a category to import the demo products into")
        .items(&labels)
        .default(0)
        .interact()
        .into_diagnostic()?;

    Ok(choices[selected].0.clone())
}

/// Build the `Parent > Child` breadcrumb path for one category.
fn breadcrumb(category: &CategoryEntry, all: &[CategoryEntry]) -> String {
    let mut parts = vec![category.name.clone()];
    let mut current = category.parent_id.clone();

    while let Some(parent_id) = current {
        match all.iter().find(|c| c.id == parent_id) {
            Some(parent) => {
                parts.insert(0, parent.name.clone());
                current = parent.parent_id.clone();
            }
            None => break,
        }
    }

    parts.join(" > ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, parent: Option<&str>) -> CategoryEntry {
        CategoryEntry {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent.map(str::to_string),
        }
    }

    #[test]
    fn test_breadcrumb_walks_to_root() {
        let all = vec![
            entry("1", "Catalogue", None),
            entry("2", "Hardware", Some("1")),
            entry("3", "Printers", Some("2")),
        ];
        assert_eq!(breadcrumb(&all[2], &all), "Catalogue > Hardware > Printers");
        assert_eq!(breadcrumb(&all[0], &all), "Catalogue");
    }

    #[test]
    fn test_breadcrumb_tolerates_missing_parent() {
        let all = vec![entry("2", "Orphan", Some("gone"))];
        assert_eq!(breadcrumb(&all[0], &all), "Orphan");
    }
}
