//! Transport used by [`crate::Client`] to execute signed requests.

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;

use crate::error::Result;

/// HttpSend executes one signed `GET` request and returns the full response.
///
/// Implementations must read the body to completion and release the
/// connection before returning, on success and failure alike.
#[async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send a `GET` request to `url` and return the response.
    async fn http_send(&self, url: Url) -> Result<http::Response<Bytes>>;
}

/// [`HttpSend`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpSend {
    client: reqwest::Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, url: Url) -> Result<http::Response<Bytes>> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.headers_mut() = headers;
        Ok(out)
    }
}
