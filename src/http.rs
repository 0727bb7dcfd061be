//! Minimal HTTP seam used by the translation and speech clients.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Result, VoiceError};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking request/response transport.
///
/// Transport failures (DNS, TLS, timeouts) are reported as
/// [`VoiceError::Transport`]; any response that arrives, whatever its
/// status, is returned as an [`HttpResponse`].
pub trait HttpTransport {
    /// `GET url` with the given query pairs, URL-encoded by the transport.
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse>;

    /// `POST url` with a JSON body and extra headers.
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        (**self).get(url, query)
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        (**self).post_json(url, headers, body)
    }
}

/// [`HttpTransport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| VoiceError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        let resp = self.client.get(url).query(query).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        log::debug!("GET {url} -> {status}");
        Ok(HttpResponse { status, body })
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        let mut req = self.client.post(url).json(body);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        log::debug!("POST {url} -> {status} ({} bytes)", body.len());
        Ok(HttpResponse { status, body })
    }
}
