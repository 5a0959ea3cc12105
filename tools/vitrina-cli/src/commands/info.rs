//! Show catalogue information.

use std::path::PathBuf;

use vitrina_catalogue_model::LoadedCatalogue;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let loaded = LoadedCatalogue::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load catalogue: {e}"))?;

    let c = &loaded.catalogue;

    println!("Catalogue: {}", c.name);
    println!("  ID: {}", c.id);
    println!("  Organization: {}", c.organization);
    println!("  Currency: {}", c.currency);
    println!("  Created: {}", c.created_at);
    println!("  Modified: {}", c.modified_at);
    println!();

    println!("Items: {}", c.items.len());
    let described = c
        .items
        .iter()
        .filter(|i| i.description.is_some())
        .count();
    let with_blurhash = c
        .items
        .iter()
        .filter(|i| i.image.blurhash.is_some())
        .count();
    println!("  With descriptions: {described}");
    println!("  With blurhash placeholders: {with_blurhash}");
    println!();

    println!("Bundle:");
    println!("  Root: {}", loaded.root.display());
    let cached = count_files(&loaded.cache_dir());
    let exported = count_files(&loaded.exports_dir());
    println!("  Cached media files: {cached}");
    println!("  Staged exports: {exported}");

    Ok(())
}

fn count_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}
