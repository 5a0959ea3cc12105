//! Validate a catalogue bundle.

use std::path::PathBuf;

use vitrina_catalogue_model::LoadedCatalogue;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating catalogue at: {}", path.display());

    let loaded = LoadedCatalogue::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load catalogue: {e}"))?;

    println!("  Name: {}", loaded.catalogue.name);
    println!("  Version: {}", loaded.catalogue.version);
    println!("  Items: {}", loaded.catalogue.items.len());

    let errors = loaded.catalogue.validate();
    if errors.is_empty() {
        println!("\nCatalogue is valid.");
    } else {
        println!("\nValidation issues:");
        for error in &errors {
            println!("  - {error}");
        }
        println!(
            "\n{} issue(s) found. Sharing may fail until they are fixed.",
            errors.len()
        );
    }

    Ok(())
}
