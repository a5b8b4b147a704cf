//! HTTP transport through the anonymizing proxy
//!
//! This module owns all proxy/anonymity-network mechanics:
//! - Building the reqwest client routed through the Tor SOCKS5 endpoint
//! - Applying the spoofed client-identity header at client construction
//! - Circuit rotation over the Tor control port (AUTHENTICATE + SIGNAL NEWNYM)
//!
//! Rotation rebuilds the client so pooled connections cannot reuse the old
//! circuit; Tor only applies NEWNYM to fresh connections.

use crate::config::ProxyConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Errors raised by the transport layer
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("control port IO failed: {0}")]
    Control(#[from] std::io::Error),

    #[error("control command {command:?} rejected: {reply:?}")]
    ControlReply { command: String, reply: String },
}

/// Anonymized HTTP GET with a rotatable egress identity
///
/// The production implementation is [`TorTransport`]; tests substitute a
/// scripted mock. The spoofed identity header is process-wide configuration
/// applied when the transport is built, not per call.
#[async_trait]
pub trait Transport: Send {
    /// Fetches a URL and returns the response body as text
    async fn fetch(&self, url: &str) -> Result<String, TransportError>;

    /// Requests a new egress identity for subsequent fetches
    async fn rotate_identity(&mut self) -> Result<(), TransportError>;
}

/// Transport backed by a local Tor daemon
pub struct TorTransport {
    client: Client,
    proxy: ProxyConfig,
    user_agent: String,
}

impl TorTransport {
    /// Creates a transport from the proxy configuration
    ///
    /// With `proxy.enabled = false` the client connects directly and
    /// [`Transport::rotate_identity`] becomes a logged no-op; useful in
    /// development and against local test servers.
    ///
    /// # Arguments
    ///
    /// * `proxy` - Tor endpoints and the enabled flag
    /// * `user_agent` - The spoofed client-identity header value
    pub fn new(proxy: &ProxyConfig, user_agent: &str) -> Result<Self, TransportError> {
        let client = build_client(proxy, user_agent)?;

        Ok(Self {
            client,
            proxy: proxy.clone(),
            user_agent: user_agent.to_string(),
        })
    }

    /// Sends one command over an established control connection and checks
    /// for the `250` success reply
    async fn control_command(
        stream: &mut TcpStream,
        command: &str,
    ) -> Result<(), TransportError> {
        stream.write_all(command.as_bytes()).await?;
        stream.write_all(b"\r\n").await?;

        let mut buf = [0u8; 256];
        let n = stream.read(&mut buf).await?;
        let reply = String::from_utf8_lossy(&buf[..n]).trim().to_string();

        if !reply.starts_with("250") {
            return Err(TransportError::ControlReply {
                command: command.to_string(),
                reply,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Transport for TorTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                source: e,
            })?;

        tracing::debug!("GET {} -> {}", url, response.status());

        response.text().await.map_err(|e| TransportError::Request {
            url: url.to_string(),
            source: e,
        })
    }

    async fn rotate_identity(&mut self) -> Result<(), TransportError> {
        if !self.proxy.enabled {
            tracing::debug!("proxy disabled, skipping circuit rotation");
            return Ok(());
        }

        tracing::debug!("requesting new circuit from {}", self.proxy.control_addr);

        let mut stream = TcpStream::connect(&self.proxy.control_addr).await?;
        let auth = format!("AUTHENTICATE \"{}\"", self.proxy.control_password);
        Self::control_command(&mut stream, &auth).await?;
        Self::control_command(&mut stream, "SIGNAL NEWNYM").await?;
        stream.write_all(b"QUIT\r\n").await?;

        // Pooled connections keep their circuit; start over with a fresh pool
        self.client = build_client(&self.proxy, &self.user_agent)?;

        Ok(())
    }
}

/// Builds the HTTP client, proxied or direct per configuration
fn build_client(proxy: &ProxyConfig, user_agent: &str) -> Result<Client, TransportError> {
    let mut builder = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(20))
        .gzip(true)
        .brotli(true);

    if proxy.enabled {
        let socks = reqwest::Proxy::all(format!("socks5h://{}", proxy.socks_addr))
            .map_err(TransportError::Client)?;
        builder = builder.proxy(socks);
    }

    builder.build().map_err(TransportError::Client)
}
