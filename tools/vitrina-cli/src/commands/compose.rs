//! Compose cards into the bundle's exports directory.

use std::path::PathBuf;

use vitrina_catalogue_model::LoadedCatalogue;
use vitrina_common::AppConfig;
use vitrina_compose_engine::CardStyle;
use vitrina_share_pipeline::{SessionConfig, ShareMode, ShareSession};

pub async fn run(
    config: &AppConfig,
    path: PathBuf,
    items: Vec<String>,
    quality: Option<u8>,
) -> anyhow::Result<()> {
    let loaded = LoadedCatalogue::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load catalogue: {e}"))?;

    let store = super::stage_selection(&loaded.catalogue, &items)?;

    let mut style =
        CardStyle::from_defaults(&config.card).with_currency(&loaded.catalogue.currency);
    if let Some(quality) = quality {
        style.jpeg_quality = quality.clamp(1, 100);
    }

    println!(
        "Composing {} card(s) from '{}' at quality {}",
        store.len(),
        loaded.catalogue.name,
        style.jpeg_quality
    );

    let session_config = SessionConfig {
        mode: ShareMode::Composed,
        cache_dir: loaded.cache_dir(),
        output_dir: loaded.exports_dir(),
        style,
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

    println!("Composed {} card(s):", session.files().len());
    for file in session.files() {
        println!("  {}", file.display());
    }

    Ok(())
}
