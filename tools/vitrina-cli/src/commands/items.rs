//! List catalogue items.

use std::path::PathBuf;

use vitrina_catalogue_model::LoadedCatalogue;
use vitrina_compose_engine::format_price;

pub fn run(path: PathBuf, search: Option<String>) -> anyhow::Result<()> {
    let loaded = LoadedCatalogue::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load catalogue: {e}"))?;
    let catalogue = &loaded.catalogue;

    let query = search.unwrap_or_default();
    let items = catalogue.search(&query);

    if items.is_empty() {
        if query.is_empty() {
            println!("Catalogue '{}' has no items.", catalogue.name);
        } else {
            println!("No items in '{}' match '{query}'.", catalogue.name);
        }
        return Ok(());
    }

    println!("{} ({} item(s)):", catalogue.name, items.len());
    for item in items {
        println!(
            "  {:<12} {:<32} {}",
            item.id,
            item.name,
            format_price(item.price, &catalogue.currency)
        );
        if let Some(ref description) = item.description {
            println!("  {:<12} {description}", "");
        }
    }

    Ok(())
}
