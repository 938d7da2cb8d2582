pub mod client;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::{Error, Result, hls::Playlist, parse};

pub use client::HttpClient;

/// Status and body of a completed GET.
#[derive(Debug)]
pub struct FetchedResponse {
    pub status: u16,
    /// Body bytes, or the failure that interrupted reading them.
    pub body: Result<Bytes>,
}

impl FetchedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP GET requests.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue one GET. Transport failures are returned as `Err`; a response with
    /// any status is `Ok`.
    async fn get(&self, url: &Url) -> Result<FetchedResponse>;

    /// Fetch the body of a successful response.
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        let response = self.get(url).await?;
        if !response.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }
        response.body
    }
}

/// Fetch the playlist at `url` and parse it with `url` as the base.
pub async fn fetch_and_parse(fetcher: &dyn Fetcher, url: &Url) -> Result<Playlist> {
    let bytes = fetcher.fetch(url).await?;
    let text = String::from_utf8_lossy(&bytes);

    Ok(parse::parse(url, &text)?)
}
