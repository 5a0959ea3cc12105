//! Concurrent batch downloads with all-or-nothing semantics.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::future::try_join_all;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use vitrina_catalogue_model::ExportItem;
use vitrina_common::{FetchDefaults, VitrinaError, VitrinaResult};

use crate::filename::cache_filename;

/// A remote image materialized to local storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedMediaAsset {
    /// URL the file was downloaded from.
    pub source_url: String,

    /// Where the bytes landed in the cache directory.
    pub local_path: PathBuf,

    /// Decoded pixel width. Zero until a dimension probe ran.
    pub width: u32,

    /// Decoded pixel height. Zero until a dimension probe ran.
    pub height: u32,
}

/// One selected item paired with its downloaded, probed photo.
#[derive(Debug, Clone)]
pub struct FetchedCard {
    /// The selection projection this photo belongs to.
    pub item: ExportItem,

    /// The downloaded photo with resolved dimensions.
    pub asset: CachedMediaAsset,
}

/// Downloads batches of item photos into a cache directory.
///
/// A batch either succeeds for every URL or fails as a whole; partial
/// downloads are discarded so callers never see a half-staged card set.
#[derive(Debug, Clone)]
pub struct MediaFetcher {
    client: reqwest::Client,
    cache_dir: PathBuf,
}

impl MediaFetcher {
    /// Build a fetcher that stages files under `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>, defaults: &FetchDefaults) -> VitrinaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(defaults.timeout_secs))
            .user_agent(defaults.user_agent.clone())
            .build()
            .map_err(|e| VitrinaError::fetch(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            cache_dir: cache_dir.into(),
        })
    }

    /// Directory downloads are staged in.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Download every URL into the cache, returning local paths in input
    /// order.
    ///
    /// Success for an individual URL is exactly HTTP 200. Any other
    /// status, transport error, or cancellation fails the whole batch;
    /// files this batch already wrote are removed best-effort before the
    /// error is returned.
    pub async fn fetch_to_cache(
        &self,
        urls: &[String],
        cancel: &CancellationToken,
    ) -> VitrinaResult<Vec<PathBuf>> {
        if urls.is_empty() {
            return Ok(vec![]);
        }

        tokio::fs::create_dir_all(&self.cache_dir).await.map_err(|e| {
            VitrinaError::fetch(format!(
                "Failed to create cache directory {}: {e}",
                self.cache_dir.display()
            ))
        })?;

        info!(count = urls.len(), "Fetching media batch");

        let downloads = urls.iter().map(|url| async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(VitrinaError::Cancelled),
                result = self.download_one(url) => result,
            }
        });

        match try_join_all(downloads).await {
            Ok(paths) => Ok(paths),
            Err(e) => {
                self.discard_batch(urls).await;
                Err(e)
            }
        }
    }

    /// Download every item's photo and resolve its pixel dimensions.
    ///
    /// Results line up with `items` positionally: element `i` carries
    /// item `i`'s metadata and the dimensions of item `i`'s photo. A
    /// photo that cannot be decoded fails the batch.
    pub async fn fetch_with_dimensions(
        &self,
        items: &[ExportItem],
        cancel: &CancellationToken,
    ) -> VitrinaResult<Vec<FetchedCard>> {
        let urls: Vec<String> = items.iter().map(|i| i.image_url.clone()).collect();
        let paths = self.fetch_to_cache(&urls, cancel).await?;

        let mut cards = Vec::with_capacity(items.len());
        for (item, local_path) in items.iter().zip(paths) {
            let (width, height) = match image::image_dimensions(&local_path) {
                Ok(dims) => dims,
                Err(e) => {
                    self.discard_batch(&urls).await;
                    return Err(VitrinaError::fetch(format!(
                        "Could not read image dimensions of {} (from {}): {e}",
                        local_path.display(),
                        item.image_url
                    )));
                }
            };

            debug!(item_id = %item.item_id, width, height, "Probed image dimensions");
            cards.push(FetchedCard {
                item: item.clone(),
                asset: CachedMediaAsset {
                    source_url: item.image_url.clone(),
                    local_path,
                    width,
                    height,
                },
            });
        }

        Ok(cards)
    }

    async fn download_one(&self, url: &str) -> VitrinaResult<PathBuf> {
        debug!(url, "Downloading");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| VitrinaError::fetch(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(VitrinaError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VitrinaError::fetch(format!("Failed to read body from {url}: {e}")))?;

        let path = self.cache_dir.join(cache_filename(url));
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            VitrinaError::fetch(format!("Failed to write {}: {e}", path.display()))
        })?;

        debug!(url, bytes = bytes.len(), path = %path.display(), "Downloaded");
        Ok(path)
    }

    /// Remove whatever this batch may have written. Filenames are
    /// deterministic per URL, so cached copies from earlier batches of
    /// the same URLs are discarded too; the cache makes no durability
    /// promises.
    async fn discard_batch(&self, urls: &[String]) {
        for url in urls {
            let path = self.cache_dir.join(cache_filename(url));
            if tokio::fs::remove_file(&path).await.is_ok() {
                debug!(path = %path.display(), "Discarded partial download");
            }
        }
        warn!(count = urls.len(), "Discarded media batch after failure");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn test_defaults() -> FetchDefaults {
        FetchDefaults {
            timeout_secs: 5,
            user_agent: "vitrina-test".to_string(),
        }
    }

    fn temp_cache(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn export_item(id: &str, url: String) -> ExportItem {
        ExportItem {
            item_id: id.to_string(),
            name: format!("Item {id}"),
            price: 10.0,
            image_url: url,
        }
    }

    #[tokio::test]
    async fn test_fetch_batch_preserves_input_order() {
        let mut server = mockito::Server::new_async().await;
        for (path, body) in [("/a.jpg", "alpha"), ("/b.jpg", "bravo"), ("/c.jpg", "charlie")] {
            server
                .mock("GET", path)
                .with_status(200)
                .with_body(body)
                .create_async()
                .await;
        }

        let cache = temp_cache("vitrina_fetch_order");
        let fetcher = MediaFetcher::new(&cache, &test_defaults()).unwrap();
        let urls: Vec<String> = ["/a.jpg", "/b.jpg", "/c.jpg"]
            .iter()
            .map(|p| format!("{}{p}", server.url()))
            .collect();

        let paths = fetcher
            .fetch_to_cache(&urls, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(paths.len(), 3);
        let bodies: Vec<String> = paths
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect();
        assert_eq!(bodies, vec!["alpha", "bravo", "charlie"]);

        std::fs::remove_dir_all(&cache).ok();
    }

    #[tokio::test]
    async fn test_empty_batch_returns_empty() {
        let cache = temp_cache("vitrina_fetch_empty");
        let fetcher = MediaFetcher::new(&cache, &test_defaults()).unwrap();
        let paths = fetcher
            .fetch_to_cache(&[], &CancellationToken::new())
            .await
            .unwrap();
        assert!(paths.is_empty());
    }

    #[tokio::test]
    async fn test_single_failure_discards_whole_batch_and_names_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a.jpg")
            .with_status(200)
            .with_body("alpha")
            .create_async()
            .await;
        server
            .mock("GET", "/b.jpg")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/c.jpg")
            .with_status(200)
            .with_body("charlie")
            .create_async()
            .await;

        let cache = temp_cache("vitrina_fetch_allornothing");
        let fetcher = MediaFetcher::new(&cache, &test_defaults()).unwrap();
        let urls: Vec<String> = ["/a.jpg", "/b.jpg", "/c.jpg"]
            .iter()
            .map(|p| format!("{}{p}", server.url()))
            .collect();

        let err = fetcher
            .fetch_to_cache(&urls, &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            VitrinaError::DownloadFailed { url, status } => {
                assert!(url.ends_with("/b.jpg"));
                assert_eq!(status, 404);
            }
            other => panic!("expected DownloadFailed, got {other:?}"),
        }

        for url in &urls {
            assert!(!cache.join(cache_filename(url)).exists());
        }

        std::fs::remove_dir_all(&cache).ok();
    }

    #[tokio::test]
    async fn test_success_requires_exactly_200() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/nocontent.jpg")
            .with_status(204)
            .create_async()
            .await;

        let cache = temp_cache("vitrina_fetch_204");
        let fetcher = MediaFetcher::new(&cache, &test_defaults()).unwrap();
        let urls = vec![format!("{}/nocontent.jpg", server.url())];

        let err = fetcher
            .fetch_to_cache(&urls, &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            VitrinaError::DownloadFailed { status, .. } => assert_eq!(status, 204),
            other => panic!("expected DownloadFailed, got {other:?}"),
        }

        std::fs::remove_dir_all(&cache).ok();
    }

    #[tokio::test]
    async fn test_fetch_with_dimensions_zips_metadata_positionally() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wide.png")
            .with_status(200)
            .with_body(png_bytes(8, 5))
            .create_async()
            .await;
        server
            .mock("GET", "/tall.png")
            .with_status(200)
            .with_body(png_bytes(3, 9))
            .create_async()
            .await;

        let cache = temp_cache("vitrina_fetch_dims");
        let fetcher = MediaFetcher::new(&cache, &test_defaults()).unwrap();
        let items = vec![
            export_item("wide", format!("{}/wide.png", server.url())),
            export_item("tall", format!("{}/tall.png", server.url())),
        ];

        let cards = fetcher
            .fetch_with_dimensions(&items, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].item.item_id, "wide");
        assert_eq!((cards[0].asset.width, cards[0].asset.height), (8, 5));
        assert_eq!(cards[1].item.item_id, "tall");
        assert_eq!((cards[1].asset.width, cards[1].asset.height), (3, 9));
        assert_eq!(cards[0].asset.source_url, items[0].image_url);

        std::fs::remove_dir_all(&cache).ok();
    }

    #[tokio::test]
    async fn test_undecodable_image_fails_dimension_batch() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/bad.jpg")
            .with_status(200)
            .with_body("definitely not a jpeg")
            .create_async()
            .await;

        let cache = temp_cache("vitrina_fetch_baddims");
        let fetcher = MediaFetcher::new(&cache, &test_defaults()).unwrap();
        let items = vec![export_item("bad", format!("{}/bad.jpg", server.url()))];

        let err = fetcher
            .fetch_with_dimensions(&items, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dimensions"));
        assert!(!cache.join(cache_filename(&items[0].image_url)).exists());

        std::fs::remove_dir_all(&cache).ok();
    }

    #[tokio::test]
    async fn test_cancelled_batch_returns_cancelled() {
        let cache = temp_cache("vitrina_fetch_cancel");
        let fetcher = MediaFetcher::new(&cache, &test_defaults()).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let urls = vec!["http://127.0.0.1:9/never.jpg".to_string()];
        let err = fetcher.fetch_to_cache(&urls, &cancel).await.unwrap_err();
        assert!(matches!(err, VitrinaError::Cancelled));

        std::fs::remove_dir_all(&cache).ok();
    }
}
