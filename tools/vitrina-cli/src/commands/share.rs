//! Share selected items through the configured share sheet.

use std::path::PathBuf;

use vitrina_catalogue_model::LoadedCatalogue;
use vitrina_common::AppConfig;
use vitrina_compose_engine::CardStyle;
use vitrina_delivery_desktop::CommandShareSheet;
use vitrina_share_pipeline::{SessionConfig, ShareMode, ShareOptions, ShareSession};

pub async fn run(
    config: &AppConfig,
    path: PathBuf,
    items: Vec<String>,
    plain: bool,
    title: Option<String>,
    message: Option<String>,
    target: Option<String>,
) -> anyhow::Result<()> {
    let loaded = LoadedCatalogue::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load catalogue: {e}"))?;

    let store = super::stage_selection(&loaded.catalogue, &items)?;
    let mode = if plain {
        ShareMode::Plain
    } else {
        ShareMode::Composed
    };

    println!(
        "Sharing {} item(s) from '{}' ({:?} mode)",
        store.len(),
        loaded.catalogue.name,
        mode
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

    let sheet = CommandShareSheet::from_defaults(&config.share);
    let options = ShareOptions {
        title,
        message,
        target,
    };
    let receipt = session.share(&sheet, &options)?;

    println!(
        "Shared {} file(s) via {}.",
        receipt.files_delivered, receipt.target
    );

    Ok(())
}
