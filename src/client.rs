//! HTTP session against the workspace API.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Authenticated session against the workspace API. Every call is a single GET with
/// the API key header; nothing is retried.
#[derive(Clone)]
pub struct ApiSession {
    base: Url,
    client: reqwest::Client,
}

impl ApiSession {
    pub fn connect(config: &Config) -> AppResult<Self> {
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| AppError::transport("bad_header", format!("invalid API key header: {}", e)))?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(t) = config.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(Self { base: config.base_url.clone(), client })
    }

    /// `<base>/<segments...>`, keeping any path prefix on the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AppError::transport("bad_url", format!("cannot build a path on {}", self.base)))?;
            path.pop_if_empty();
            for s in segments { path.push(s); }
        }
        Ok(url)
    }

    /// GET an endpoint and return the raw body. Non-2xx statuses are transport errors.
    pub async fn get_bytes(&self, segments: &[&str], query: &[(&str, &str)]) -> AppResult<Vec<u8>> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let mut req = self.client.get(url.clone());
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            let snippet: String = String::from_utf8_lossy(&body).chars().take(200).collect();
            return Err(AppError::transport("http_status", format!("GET {} returned HTTP {}: {}", url, status, snippet)));
        }
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(body.to_vec())
    }

    pub fn base(&self) -> &Url { &self.base }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolvePolicy;
    use std::path::PathBuf;

    fn config(base: &str) -> Config {
        Config {
            api_key: "PMAK-test".into(),
            workspace_id: "ws".into(),
            base_url: Url::parse(base).unwrap(),
            dest_dir: PathBuf::from("."),
            filename: "default.json".into(),
            branch: String::new(),
            policy: ResolvePolicy::ShortCircuit,
            timeout: None,
        }
    }

    #[test]
    fn endpoint_joins_segments() {
        let s = ApiSession::connect(&config("https://api.getpostman.com")).unwrap();
        assert_eq!(s.endpoint(&["collections"]).unwrap().as_str(), "https://api.getpostman.com/collections");
        assert_eq!(s.endpoint(&["collections", "42-abc"]).unwrap().as_str(), "https://api.getpostman.com/collections/42-abc");
    }

    #[test]
    fn endpoint_keeps_base_prefix_and_escapes() {
        let s = ApiSession::connect(&config("http://127.0.0.1:9000/mock/")).unwrap();
        assert_eq!(s.endpoint(&["collections"]).unwrap().as_str(), "http://127.0.0.1:9000/mock/collections");
        assert_eq!(s.endpoint(&["collections", "a/b"]).unwrap().as_str(), "http://127.0.0.1:9000/mock/collections/a%2Fb");
        assert_eq!(s.base().as_str(), "http://127.0.0.1:9000/mock/");
    }
}
