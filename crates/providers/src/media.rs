//! Recording file download.

use async_trait::async_trait;
use lectern_pipeline::traits::{MediaFetcher, MediaFile};
use lectern_pipeline::PipelineError;

use crate::error::ProviderError;

/// Filename used when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "lecture.mp3";

/// Downloads submitted recording URLs into memory for transcription.
#[derive(Clone)]
pub struct MediaClient {
    client: reqwest::Client,
}

impl MediaClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn download(&self, url: &str) -> Result<MediaFile, ProviderError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "media host",
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let bytes = response.bytes().await?.to_vec();
        tracing::debug!(url, size = bytes.len(), "downloaded recording");
        Ok(MediaFile {
            bytes,
            filename: filename_from_url(url),
        })
    }
}

/// Last path segment of the URL, query string stripped.
fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && name.contains('.'))
        .unwrap_or(DEFAULT_FILENAME)
        .to_string()
}

#[async_trait]
impl MediaFetcher for MediaClient {
    async fn fetch(&self, url: &str) -> Result<MediaFile, PipelineError> {
        Ok(self.download(url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_last_path_segment() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/uploads/week3.mp3"),
            "week3.mp3"
        );
    }

    #[test]
    fn query_string_is_stripped() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/week3.m4a?token=abc"),
            "week3.m4a"
        );
    }

    #[test]
    fn bare_host_falls_back_to_default() {
        assert_eq!(filename_from_url("https://cdn.example.com/"), DEFAULT_FILENAME);
        assert_eq!(filename_from_url("https://cdn.example.com/dir"), DEFAULT_FILENAME);
    }
}
