//! HTTP client for feed fetches

use reqwest::{redirect, Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::FeedError;

/// Thin wrapper over a configured [`reqwest::Client`]
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: Option<&str>, max_redirects: usize) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(Self::default_user_agent()))
            .redirect(redirect::Policy::limited(max_redirects))
            .build()?;
        Ok(Self { client })
    }

    pub fn default_user_agent() -> &'static str {
        concat!("postline/", env!("CARGO_PKG_VERSION"))
    }

    /// GET a URL and return the body as text
    pub async fn get_text(&self, url: &Url) -> Result<String, FeedError> {
        tracing::debug!("GET {}", redacted(url));
        let resp = self.client.get(url.clone()).send().await?;
        let resp = check_status(url, resp).await?;
        Ok(resp.text().await?)
    }

    /// GET a URL and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FeedError> {
        tracing::debug!("GET {}", redacted(url));
        let resp = self.client.get(url.clone()).send().await?;
        let resp = check_status(url, resp).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| FeedError::Malformed(format!("invalid JSON from {}: {}", redacted(url), e)))
    }
}

async fn check_status(url: &Url, resp: Response) -> Result<Response, FeedError> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        let body = resp.text().await.unwrap_or_default();
        return Err(FeedError::Status {
            url: redacted(url),
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}

/// The URL without its query string, which may carry an API key
fn redacted(url: &Url) -> String {
    let mut u = url.clone();
    u.set_query(None);
    u.to_string()
}
