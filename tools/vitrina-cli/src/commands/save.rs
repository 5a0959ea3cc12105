//! Save selected items into a gallery album.

use std::path::PathBuf;

use vitrina_catalogue_model::LoadedCatalogue;
use vitrina_common::AppConfig;
use vitrina_compose_engine::CardStyle;
use vitrina_delivery_desktop::DirectoryGallery;
use vitrina_share_pipeline::{SessionConfig, ShareMode, ShareSession};

pub async fn run(
    config: &AppConfig,
    path: PathBuf,
    items: Vec<String>,
    plain: bool,
    album: Option<String>,
) -> anyhow::Result<()> {
    let loaded = LoadedCatalogue::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load catalogue: {e}"))?;

    let store = super::stage_selection(&loaded.catalogue, &items)?;
    let mode = if plain {
        ShareMode::Plain
    } else {
        ShareMode::Composed
    };
    let album = album.unwrap_or_else(|| config.gallery.album.clone());

    println!(
        "Saving {} item(s) from '{}' into album '{album}'",
        store.len(),
        loaded.catalogue.name
    );

    let session_config = SessionConfig {
        mode,
        cache_dir: loaded.cache_dir(),
        output_dir: loaded.exports_dir(),
        style: CardStyle::from_defaults(&config.card).with_currency(&loaded.catalogue.currency),
        fetch: config.fetch.clone(),
    };
    let mut session = ShareSession::from_store(&store, session_config);

    let cancel = session.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\nCancelling...");
            cancel.cancel();
        }
    });

    session.prepare().await?;
    println!("  Staged {} file(s)", session.files().len());

    let gallery = DirectoryGallery::from_defaults(&config.gallery);
    let receipt = session.save(&gallery, &album)?;

    println!(
        "Album '{}' now holds {} asset(s) ({} newly added).",
        receipt.album, receipt.total_assets, receipt.newly_added
    );
    println!("  Location: {}", receipt.album_path.display());

    Ok(())
}
