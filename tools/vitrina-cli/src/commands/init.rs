//! Initialize a new catalogue bundle.

use std::path::PathBuf;

use vitrina_catalogue_model::LoadedCatalogue;

pub fn run(
    name: String,
    output: PathBuf,
    organization: String,
    currency: String,
) -> anyhow::Result<()> {
    let bundle_dir = output.join(&name);
    println!("Creating catalogue '{}' at {}", name, bundle_dir.display());

    let catalogue = LoadedCatalogue::create(&bundle_dir, &name, &organization, &currency)
        .map_err(|e| anyhow::anyhow!("Failed to create catalogue: {e}"))?;

    println!("Catalogue created successfully:");
    println!("  Directory: {}", catalogue.root.display());
    println!("  Organization: {organization}");
    println!("  Currency: {currency}");
    println!();
    println!("Directory structure:");
    println!("  {}/", name);
    println!("  ├── meta/        (catalogue.json)");
    println!("  ├── cache/       (downloaded photos)");
    println!("  └── exports/     (composed price cards)");

    Ok(())
}
