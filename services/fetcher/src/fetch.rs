//! Sequential granule fetching over anonymous HTTPS.
//!
//! The public NOAA buckets serve unauthenticated GETs, so a fetch is one
//! request streamed to a `.partial` file and renamed into place when the
//! body completes. No retry, no resumption, no concurrency: the first
//! failed transfer surfaces immediately and aborts the run.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use granule_common::GranuleRequest;

/// Error kinds for a single granule fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The archive has no object at the requested key. Covers 404 and the
    /// 403 that public buckets answer for absent keys when listing is
    /// denied to anonymous callers.
    #[error("object not found: {key}")]
    ObjectNotFound { key: String },

    /// The request or body stream failed
    #[error("transfer failed for {key}: {source}")]
    Transfer {
        key: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local file write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of fetching one granule.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Transferred to the returned path.
    Fetched(PathBuf),
    /// Destination already existed; nothing transferred.
    Skipped(PathBuf),
}

/// Fetches granules into a local output directory.
pub struct Fetcher {
    client: Client,
    output_dir: PathBuf,
}

impl Fetcher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .connect_timeout(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            output_dir: output_dir.into(),
        })
    }

    /// Destination a request resolves to: its verbatim remote filename
    /// under the output directory.
    pub fn destination(&self, request: &GranuleRequest) -> PathBuf {
        self.output_dir.join(&request.filename)
    }

    /// Fetch one granule, skipping the transfer when the destination file
    /// already exists.
    pub async fn fetch(&self, request: &GranuleRequest) -> Result<FetchOutcome, FetchError> {
        let final_path = self.destination(request);
        if final_path.exists() {
            info!(path = %final_path.display(), "file already present, skipping fetch");
            return Ok(FetchOutcome::Skipped(final_path));
        }

        let key = request.qualified_key();
        let url = request.https_url();
        debug!(url = %url, "requesting granule");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transfer {
                key: key.clone(),
                source: e,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                return Err(FetchError::ObjectNotFound { key });
            }
            _ => {}
        }
        let response = response
            .error_for_status()
            .map_err(|e| FetchError::Transfer {
                key: key.clone(),
                source: e,
            })?;

        let partial_path = self
            .output_dir
            .join(format!("{}.partial", request.filename));
        let mut file = File::create(&partial_path).await?;
        let mut stream = response.bytes_stream();
        let mut bytes = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Transfer {
                key: key.clone(),
                source: e,
            })?;
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }

        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&partial_path, &final_path).await?;

        info!(
            key = %key,
            path = %final_path.display(),
            bytes = bytes,
            "granule fetched"
        );
        Ok(FetchOutcome::Fetched(final_path))
    }
}
