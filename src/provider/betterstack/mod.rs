//! # Better Stack Uptime Client
//!
//! Typed HTTP client for the Better Stack Uptime REST API.
//!
//! ## Transport
//!
//! - Every request carries `Authorization: Bearer <token>` and
//!   `Accept: application/json`; requests with a body add
//!   `Content-Type: application/json`.
//! - `POST` creates, `GET` fetches and lists, `PATCH` updates, `DELETE` deletes.
//! - Any status outside `200..=399` is an [`ApiError`].
//! - `DELETE` answering 404 counts as success, so deletes can be re-issued.
//! - Lists follow `pagination.next` until it is empty and concatenate pages.
//!
//! The underlying [`reqwest::Client`] is built once and shared by every
//! [`BetterStackClient`]; a client value is cheap and bound to one
//! `(base URL, token)` pair.

mod error;
mod heartbeat_groups;
mod heartbeats;
mod monitor_groups;
mod monitors;
pub mod requests;
pub mod responses;

pub use error::{is_not_found, is_quota_exceeded, ApiError, Error};
pub use requests::{
    HeartbeatGroupRequest, HeartbeatRequest, MonitorGroupRequest, MonitorPayload, MonitorRequest,
    RemoteRef, RequestHeader,
};
pub use responses::{
    Envelope, HeartbeatAttributes, HeartbeatGroupAttributes, ListEnvelope, MonitorAttributes,
    MonitorGroupAttributes, Pagination, RemoteHeader, RemoteHeartbeat, RemoteHeartbeatGroup,
    RemoteMonitor, RemoteMonitorGroup, Resource,
};

use crate::observability::metrics;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, Instrument};

/// Public Better Stack Uptime endpoint
pub const DEFAULT_BASE_URL: &str = "https://uptime.betterstack.com/api/v2";

/// Page size requested when listing
pub const DEFAULT_PAGE_SIZE: u32 = 50;

pub(crate) const MONITORS_PATH: &str = "/monitors";
pub(crate) const MONITOR_GROUPS_PATH: &str = "/monitor-groups";
pub(crate) const HEARTBEATS_PATH: &str = "/heartbeats";
pub(crate) const HEARTBEAT_GROUPS_PATH: &str = "/heartbeat-groups";

const APPLICATION_JSON: &str = "application/json";

/// Build the shared HTTP transport
///
/// # Errors
///
/// Fails if the TLS backend cannot be initialised.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, Error> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("betterstack-operator/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Better Stack client bound to one base URL and API token
#[derive(Clone)]
pub struct BetterStackClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    page_size: u32,
}

impl std::fmt::Debug for BetterStackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BetterStackClient")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl BetterStackClient {
    /// Create a client; a blank `base_url` selects [`DEFAULT_BASE_URL`]
    pub fn new(http: reqwest::Client, base_url: Option<&str>, token: impl Into<String>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            http,
            base_url,
            token: token.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}{path}` or `{base}{path}/{id}` with `id` percent-encoded as a
    /// single path segment
    fn endpoint(&self, path: &str, id: Option<&str>) -> Result<Url, Error> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = parse_url(&raw)?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|()| Error::InvalidUrl {
                    url: raw.clone(),
                    reason: "URL cannot be a base".to_string(),
                })?
                .push(id);
        }
        Ok(url)
    }

    /// Resolve a pagination link against this client's base URL
    ///
    /// Links under the base URL are re-rooted on it; relative links are
    /// appended to it; any other absolute link is followed as-is.
    fn resolve_link(&self, link: &str) -> Result<Url, Error> {
        let target = match link.strip_prefix(self.base_url.as_str()) {
            Some(rest) => format!("{}{rest}", self.base_url),
            None if link.starts_with('/') => format!("{}{link}", self.base_url),
            None => link.to_string(),
        };
        parse_url(&target)
    }

    /// Send a request and decode the response body
    ///
    /// Returns `Ok(None)` for 204 and for empty 2xx/3xx bodies.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Option<T>, Error> {
        let span = tracing::debug_span!(
            "betterstack.request",
            http.method = %method,
            http.path = url.path(),
            http.status = tracing::field::Empty,
        );
        let span_clone = span.clone();
        let method_label = method.as_str().to_string();

        async move {
            let mut request = self
                .http
                .request(method, url)
                .bearer_auth(&self.token)
                .header(ACCEPT, APPLICATION_JSON);
            if let Some(body) = body {
                request = request.header(CONTENT_TYPE, APPLICATION_JSON).body(body);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    metrics::record_remote_request(&method_label, "transport_error");
                    return Err(e.into());
                }
            };

            let status = response.status();
            span_clone.record("http.status", status.as_u16());
            let bytes = response.bytes().await?;

            if !(200..400).contains(&status.as_u16()) {
                let api_error = ApiError::from_response(status, &bytes);
                let outcome = if api_error.is_not_found() {
                    "not_found"
                } else {
                    "api_error"
                };
                metrics::record_remote_request(&method_label, outcome);
                debug!(status = status.as_u16(), message = %api_error.message, "Better Stack request failed");
                return Err(api_error.into());
            }

            metrics::record_remote_request(&method_label, "success");
            if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(None);
            }
            Ok(Some(serde_json::from_slice(&bytes)?))
        }
        .instrument(span)
        .await
    }

    /// Like [`send`](Self::send) but a missing body is an error
    async fn send_expecting<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<T, Error> {
        let method_name = method.to_string();
        let path = url.path().to_string();
        self.send(method, url, body)
            .await?
            .ok_or(Error::EmptyResponse {
                method: method_name,
                path,
            })
    }

    pub(crate) async fn create_resource<B, A>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Resource<A>, Error>
    where
        B: Serialize + ?Sized,
        A: DeserializeOwned,
    {
        let url = self.endpoint(path, None)?;
        let envelope: Envelope<Resource<A>> = self
            .send_expecting(Method::POST, url, Some(serde_json::to_vec(body)?))
            .await?;
        Ok(envelope.data)
    }

    pub(crate) async fn get_resource<A>(&self, path: &str, id: &str) -> Result<Resource<A>, Error>
    where
        A: DeserializeOwned,
    {
        let url = self.endpoint(path, Some(id))?;
        let envelope: Envelope<Resource<A>> = self.send_expecting(Method::GET, url, None).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn update_resource<B, A>(
        &self,
        path: &str,
        id: &str,
        body: &B,
    ) -> Result<Resource<A>, Error>
    where
        B: Serialize + ?Sized,
        A: DeserializeOwned,
    {
        let url = self.endpoint(path, Some(id))?;
        let envelope: Envelope<Resource<A>> = self
            .send_expecting(Method::PATCH, url, Some(serde_json::to_vec(body)?))
            .await?;
        Ok(envelope.data)
    }

    /// Delete; 404 is success
    pub(crate) async fn delete_resource(&self, path: &str, id: &str) -> Result<(), Error> {
        let url = self.endpoint(path, Some(id))?;
        match self
            .send::<serde_json::Value>(Method::DELETE, url, None)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                debug!(path, id, "Better Stack entity already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch every page of a collection, in order
    pub(crate) async fn list_resources<A>(&self, path: &str) -> Result<Vec<Resource<A>>, Error>
    where
        A: DeserializeOwned,
    {
        let mut url = self.endpoint(path, None)?;
        url.query_pairs_mut()
            .append_pair("page", "1")
            .append_pair("per_page", &self.page_size.to_string());

        let mut items = Vec::new();
        loop {
            let page: ListEnvelope<Resource<A>> =
                self.send_expecting(Method::GET, url.clone(), None).await?;
            items.extend(page.data);

            let Some(next) = page
                .pagination
                .and_then(|p| p.next)
                .filter(|next| !next.trim().is_empty())
            else {
                break;
            };

            let next_url = self.resolve_link(&next)?;
            if next_url == url {
                debug!(link = %next, "pagination link points at the current page, stopping");
                break;
            }
            url = next_url;
        }

        Ok(items)
    }
}

fn parse_url(raw: &str) -> Result<Url, Error> {
    Url::parse(raw).map_err(|err| Error::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })
}
