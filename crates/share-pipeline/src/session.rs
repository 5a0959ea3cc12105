//! Share session management.

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use vitrina_catalogue_model::{ExportItem, SelectionStore};
use vitrina_common::{FetchDefaults, VitrinaError, VitrinaResult};
use vitrina_compose_engine::{
    capture_card, prepare_card, CapturedComposite, CardStyle, PreparedCard, RenderBatch, Typeface,
};
use vitrina_delivery_core::{AlbumReceipt, PhotoGallery, ShareReceipt, ShareRequest, ShareSheet};
use vitrina_fetch_engine::{FetchedCard, MediaFetcher};

/// Configuration for starting a new share session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Whether to share composed cards or the raw downloads.
    pub mode: ShareMode,

    /// Directory downloaded photos are staged in.
    pub cache_dir: PathBuf,

    /// Directory captured cards are written to.
    pub output_dir: PathBuf,

    /// Card rendering style. Ignored in plain mode.
    pub style: CardStyle,

    /// Remote fetch settings.
    pub fetch: FetchDefaults,
}

/// What the export set is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    /// The downloaded photos, untouched and at full quality.
    Plain,
    /// Flattened price cards composed from the photos.
    Composed,
}

/// State of a share session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePhase {
    /// Session created but not started.
    Idle,
    /// Downloading selected photos.
    AwaitingDownload,
    /// Composing cards; the batch barrier counts arrivals.
    AwaitingRender,
    /// Encoding composed cards to files.
    AwaitingCapture,
    /// Export set staged; awaiting share or save.
    ReadyToExport,
    /// The export set was delivered.
    Exported,
    /// A step failed; the session is spent.
    Failed,
}

/// Presentation options for a share handoff.
#[derive(Debug, Clone, Default)]
pub struct ShareOptions {
    /// Optional sheet title.
    pub title: Option<String>,

    /// Optional message accompanying the files.
    pub message: Option<String>,

    /// Optional single named target to route to directly.
    pub target: Option<String>,
}

/// One share flow from selection snapshot to delivery.
///
/// A session is single-use: it prepares an export set once and delivers
/// it once. Any failure leaves the session in [`SharePhase::Failed`];
/// retrying means starting a new session.
pub struct ShareSession {
    config: SessionConfig,
    items: Vec<ExportItem>,
    phase: SharePhase,
    cancel: CancellationToken,
    files: Vec<PathBuf>,
}

impl ShareSession {
    /// Create a session over an explicit item snapshot.
    pub fn new(items: Vec<ExportItem>, config: SessionConfig) -> Self {
        Self {
            config,
            items,
            phase: SharePhase::Idle,
            cancel: CancellationToken::new(),
            files: Vec::new(),
        }
    }

    /// Create a session by snapshotting the current selection. Later
    /// changes to the store do not affect this session.
    pub fn from_store(store: &SelectionStore, config: SessionConfig) -> Self {
        Self::new(store.list_for_export(), config)
    }

    /// Current session phase.
    pub fn phase(&self) -> SharePhase {
        self.phase
    }

    /// Items this session will export, in selection order.
    pub fn items(&self) -> &[ExportItem] {
        &self.items
    }

    /// The staged export set. Empty until the session reaches
    /// [`SharePhase::ReadyToExport`].
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Get a clone of the cancellation token for wiring into signal
    /// handlers.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Abort in-flight downloads and renders. The session lands in
    /// [`SharePhase::Failed`] once the running step observes the token.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Run the session up to a staged export set.
    ///
    /// Downloads every selected photo, and in composed mode renders and
    /// captures one price card per item. On success the session is
    /// [`SharePhase::ReadyToExport`] and [`files`](Self::files) holds the
    /// export set in selection order.
    pub async fn prepare(&mut self) -> VitrinaResult<()> {
        if self.phase != SharePhase::Idle {
            return Err(VitrinaError::compose("Session already started"));
        }
        if self.items.is_empty() {
            return Err(VitrinaError::selection("Nothing selected to share"));
        }

        tracing::info!(
            items = self.items.len(),
            mode = ?self.config.mode,
            "Starting share session"
        );

        match self.run_to_ready().await {
            Ok(files) => {
                self.files = files;
                self.phase = SharePhase::ReadyToExport;
                tracing::info!(files = self.files.len(), "Export set staged");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Share session failed");
                self.phase = SharePhase::Failed;
                Err(e)
            }
        }
    }

    /// Hand the staged export set to a share sheet.
    pub fn share(
        &mut self,
        sheet: &dyn ShareSheet,
        options: &ShareOptions,
    ) -> VitrinaResult<ShareReceipt> {
        if self.phase != SharePhase::ReadyToExport {
            return Err(VitrinaError::delivery("No export set is ready to share"));
        }

        let mut request = ShareRequest::new(self.files.clone());
        if let Some(ref title) = options.title {
            request = request.with_title(title.clone());
        }
        if let Some(ref message) = options.message {
            request = request.with_message(message.clone());
        }
        if let Some(ref target) = options.target {
            request = request.with_target(target.clone());
        }

        match sheet.share_files(&request) {
            Ok(receipt) => {
                self.phase = SharePhase::Exported;
                tracing::info!(target = %receipt.target, files = receipt.files_delivered, "Batch shared");
                Ok(receipt)
            }
            Err(e) => {
                self.phase = SharePhase::Failed;
                Err(e)
            }
        }
    }

    /// Save the staged export set into a gallery album.
    pub fn save(
        &mut self,
        gallery: &dyn PhotoGallery,
        album: &str,
    ) -> VitrinaResult<AlbumReceipt> {
        if self.phase != SharePhase::ReadyToExport {
            return Err(VitrinaError::delivery("No export set is ready to save"));
        }

        match gallery.save_to_album(&self.files, album) {
            Ok(receipt) => {
                self.phase = SharePhase::Exported;
                tracing::info!(album, added = receipt.newly_added, "Batch saved to album");
                Ok(receipt)
            }
            Err(e) => {
                self.phase = SharePhase::Failed;
                Err(e)
            }
        }
    }

    async fn run_to_ready(&mut self) -> VitrinaResult<Vec<PathBuf>> {
        self.phase = SharePhase::AwaitingDownload;
        let fetcher = MediaFetcher::new(&self.config.cache_dir, &self.config.fetch)?;

        match self.config.mode {
            ShareMode::Plain => {
                let urls: Vec<String> =
                    self.items.iter().map(|i| i.image_url.clone()).collect();
                let paths = fetcher.fetch_to_cache(&urls, &self.cancel).await?;
                tracing::debug!("Plain batch exports the downloads untouched");
                Ok(paths)
            }
            ShareMode::Composed => {
                let cards = fetcher
                    .fetch_with_dimensions(&self.items, &self.cancel)
                    .await?;

                self.phase = SharePhase::AwaitingRender;
                let prepared = self.render_all(cards).await?;

                self.phase = SharePhase::AwaitingCapture;
                let captured = self.capture_all(prepared).await?;
                Ok(captured.into_iter().map(|c| c.local_path).collect())
            }
        }
    }

    /// Render every card on blocking workers. Each completed render
    /// signals the batch barrier; capture is gated on the barrier seeing
    /// every arrival, never on elapsed time.
    async fn render_all(&self, cards: Vec<FetchedCard>) -> VitrinaResult<Vec<PreparedCard>> {
        let typeface = Arc::new(Typeface::resolve(self.config.style.typeface.as_deref())?);
        let style = Arc::new(self.config.style.clone());
        let batch = Arc::new(RenderBatch::new(cards.len()));

        let mut workers = Vec::with_capacity(cards.len());
        for card in cards {
            let typeface = Arc::clone(&typeface);
            let style = Arc::clone(&style);
            let batch = Arc::clone(&batch);
            let cancel = self.cancel.clone();
            workers.push(tokio::task::spawn_blocking(move || {
                if cancel.is_cancelled() {
                    return Err(VitrinaError::Cancelled);
                }
                let prepared = prepare_card(&card, &style, &typeface)?;
                batch.mark_rendered();
                Ok(prepared)
            }));
        }

        let mut prepared = Vec::with_capacity(workers.len());
        for worker in workers {
            let card = worker
                .await
                .map_err(|e| VitrinaError::compose(format!("Render worker failed: {e}")))??;
            prepared.push(card);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(VitrinaError::Cancelled),
            _ = batch.wait_ready() => {}
        }
        tracing::debug!(
            arrived = batch.arrived(),
            expected = batch.expected(),
            "Render barrier released"
        );
        Ok(prepared)
    }

    async fn capture_all(
        &self,
        prepared: Vec<PreparedCard>,
    ) -> VitrinaResult<Vec<CapturedComposite>> {
        let quality = self.config.style.jpeg_quality;
        let out_dir = self.config.output_dir.clone();

        let mut workers = Vec::with_capacity(prepared.len());
        for card in prepared {
            let out_dir = out_dir.clone();
            let cancel = self.cancel.clone();
            workers.push(tokio::task::spawn_blocking(move || {
                if cancel.is_cancelled() {
                    return Err(VitrinaError::Cancelled);
                }
                capture_card(&card, quality, &out_dir)
            }));
        }

        let mut captured = Vec::with_capacity(workers.len());
        for worker in workers {
            let composite = worker
                .await
                .map_err(|e| VitrinaError::compose(format!("Capture worker failed: {e}")))??;
            captured.push(composite);
        }
        Ok(captured)
    }
}
