//! The HTTP capability the client is built on.
//!
//! [`HttpClient`] is the only seam between the client and the network: it
//! takes a fully built URL and hands back a status code and body. Tests
//! substitute in-memory implementations; production uses
//! [`ReqwestHttpClient`].

use async_trait::async_trait;
use log::debug;

use crate::clients::{
    config::ClientConfig,
    errors::{Result, TransportError},
};

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issue a single GET request.
///
/// Implementations own pooling, TLS and timeouts. They must not retry.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError>;
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::from)?;
        Ok(ReqwestHttpClient { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(HttpResponse { status, body })
    }
}
