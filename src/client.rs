//! The HTTP side: request assembly and execution.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Method, Url};
use serde::Serialize;
use tracing::{debug, info};

/// Everything needed to issue one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSpec {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status line, e.g. `200 OK`.
    pub status: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// `Status: ..`, a blank line, then one `Name: value` line per header.
    pub fn headers_text(&self) -> String {
        let mut text = format!("Status: {}\n\n", self.status);
        for (name, value) in &self.headers {
            text.push_str(&format!("{name}: {value}\n"));
        }
        text
    }

    /// The body, pretty-printed when it parses as JSON.
    pub fn body_text(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| self.body.clone())
    }
}

/// Appends `params` to the query string of `raw`, percent-encoding as
/// needed. Existing query pairs are kept.
pub fn build_url(raw: &str, params: &BTreeMap<String, String>) -> Result<String> {
    let mut url = Url::parse(raw).with_context(|| format!("invalid URL: {raw}"))?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in params {
            if !name.trim().is_empty() {
                pairs.append_pair(name, value);
            }
        }
    }
    Ok(url.to_string())
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    pub async fn execute(&self, spec: RequestSpec) -> Result<HttpResponse> {
        let method = Method::from_bytes(spec.method.as_bytes())
            .with_context(|| format!("unsupported method: {}", spec.method))?;
        debug!(method = %method, url = %spec.url, "sending request");

        let mut request = self.client.request(method.clone(), &spec.url);
        for (name, value) in &spec.headers {
            request = request.header(name, value);
        }
        if let Some(body) = spec.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{method} {} failed", spec.url))?;

        let status = response.status().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .context("failed to read response body")?;

        info!(status = %status, bytes = body.len(), "response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
