//! Add an item to a catalogue.

use std::path::PathBuf;

use vitrina_catalogue_model::{Item, ItemImage, LoadedCatalogue};
use vitrina_compose_engine::format_price;

pub fn run(
    path: PathBuf,
    name: String,
    price: f64,
    image_url: String,
    description: Option<String>,
    id: Option<String>,
) -> anyhow::Result<()> {
    let mut loaded = LoadedCatalogue::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load catalogue: {e}"))?;

    let id = id.unwrap_or_else(|| {
        let mut n = loaded.catalogue.items.len() + 1;
        while loaded.catalogue.find_item(&format!("item-{n}")).is_some() {
            n += 1;
        }
        format!("item-{n}")
    });
    if loaded.catalogue.find_item(&id).is_some() {
        anyhow::bail!("Item id '{id}' already exists in catalogue '{}'", loaded.catalogue.name);
    }

    loaded.catalogue.items.push(Item {
        id: id.clone(),
        name: name.clone(),
        description,
        price,
        image: ItemImage {
            image_url,
            blurhash: None,
        },
    });

    let problems = loaded.catalogue.validate();
    if !problems.is_empty() {
        println!("Refusing to save; the item would make the catalogue invalid:");
        for problem in &problems {
            println!("  - {problem}");
        }
        anyhow::bail!("{} problem(s) found", problems.len());
    }

    loaded.catalogue.touch();
    loaded
        .save()
        .map_err(|e| anyhow::anyhow!("Failed to save catalogue: {e}"))?;

    println!(
        "Added '{}' ({}) at {} to '{}' ({} item(s) total)",
        name,
        id,
        format_price(price, &loaded.catalogue.currency),
        loaded.catalogue.name,
        loaded.catalogue.items.len()
    );

    Ok(())
}
