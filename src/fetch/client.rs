use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

use super::{FetchedResponse, Fetcher};
use crate::{Error, Result};

/// HTTP client for playlist and segment requests.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_body_bytes: Option<u64>,
}

impl HttpClient {
    /// Client without a request timeout or body limit.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    pub fn with_options(timeout: Option<Duration>, max_body_bytes: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            max_body_bytes: None,
        }
    }

    async fn read_body(&self, url: &Url, response: Response) -> Result<Bytes> {
        let Some(limit) = self.max_body_bytes else {
            return Ok(response.bytes().await?);
        };

        let too_large = || Error::BodyTooLarge {
            url: url.to_string(),
            limit,
        };

        if response.content_length().is_some_and(|len| len > limit) {
            return Err(too_large());
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if (body.len() + chunk.len()) as u64 > limit {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn get(&self, url: &Url) -> Result<FetchedResponse> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = self.read_body(url, response).await;

        Ok(FetchedResponse { status, body })
    }
}
