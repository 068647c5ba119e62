use std::{
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use tokio::io::AsyncWriteExt;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Capability to pull raw artwork bytes for a URL onto disk.
///
/// Implementations must only make `dest` visible once the whole payload is written, and must
/// leave `dest` absent on any failure. No retries happen at this layer.
pub trait ArtworkFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str, dest: &Path) -> impl Future<Output = ThumbResult<()>> + Send;
}

/// HTTP(S) GET fetcher; only status 200 counts as artwork.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> ThumbResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ArtworkFetcher for HttpFetcher {
    #[tracing::instrument(skip(self, dest), fields(dest = %dest.display()))]
    async fn fetch(&self, url: &str, dest: &Path) -> ThumbResult<()> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ThumbError::network(format!("GET {url}: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ThumbError::network(format!("GET {url} returned {status}")));
        }
        let expected = response.content_length();

        let part = part_path(dest);
        let written = match stream_body(&mut response, &part).await {
            Ok(n) => n,
            Err(err) => {
                discard(&part).await;
                return Err(err);
            }
        };

        if written == 0 {
            discard(&part).await;
            return Err(ThumbError::network(format!("GET {url} returned an empty body")));
        }
        if let Some(len) = expected
            && len != written
        {
            discard(&part).await;
            return Err(ThumbError::network(format!(
                "GET {url} body truncated: {written} of {len} bytes"
            )));
        }

        tokio::fs::rename(&part, dest).await.map_err(|e| {
            ThumbError::Other(anyhow::Error::new(e).context(format!(
                "move '{}' into place",
                part.display()
            )))
        })?;
        tracing::debug!(bytes = written, "artwork fetched");
        Ok(())
    }
}

async fn stream_body(response: &mut reqwest::Response, part: &Path) -> ThumbResult<u64> {
    let mut file = tokio::fs::File::create(part).await?;
    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ThumbError::network(format!("read body: {e}")))?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    file.sync_all().await?;
    Ok(written)
}

async fn discard(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(path = %part.display(), error = %e, "could not remove partial download");
    }
}

/// Sibling path used while a download is in flight.
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
