//! CLI subcommand implementations.

pub mod add;
pub mod check;
pub mod compose;
pub mod info;
pub mod init;
pub mod items;
pub mod save;
pub mod share;
pub mod validate;

use vitrina_catalogue_model::{Catalogue, SelectionEntry, SelectionStore};

/// Build the selection for a share-style command. Requested ids are
/// added in the order given; an empty request selects the whole
/// catalogue in its own order.
pub(crate) fn stage_selection(
    catalogue: &Catalogue,
    ids: &[String],
) -> anyhow::Result<SelectionStore> {
    let store = SelectionStore::new();

    if ids.is_empty() {
        for item in &catalogue.items {
            store.add(SelectionEntry::from(item));
        }
    } else {
        for id in ids {
            let item = catalogue.find_item(id).ok_or_else(|| {
                anyhow::anyhow!("No item '{id}' in catalogue '{}'", catalogue.name)
            })?;
            if !store.add(SelectionEntry::from(item)) {
                tracing::debug!(id, "Item requested twice; keeping first position");
            }
        }
    }

    if store.is_empty() {
        anyhow::bail!("Nothing selected; the catalogue has no items");
    }
    Ok(store)
}
