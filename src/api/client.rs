//! Blocking HTTP client for the tracker backend
//!
//! Wraps `reqwest::blocking::Client` with the base URL, bearer token and
//! error extraction shared by every resource.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::pagination::collect_pages;
use crate::config::settings::normalize_base_url;
use crate::error::{TrackerError, TrackerResult};

/// Environment variable holding the access token for this invocation
pub const ACCESS_TOKEN_ENV: &str = "VATU_ACCESS_TOKEN";

/// Downloaded file body plus the server-suggested filename
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
}

pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Option<Zeroizing<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> TrackerResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("vatu-tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrackerError::Network(e.to_string()))?;

        Ok(Self {
            base_url: normalize_base_url(base_url),
            client,
            token: None,
        })
    }

    /// Attach a bearer token to every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.token = if token.trim().is_empty() {
            None
        } else {
            Some(Zeroizing::new(token.trim().to_string()))
        };
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Identity the query cache is stored under: the base URL plus a
    /// SHA-256 of the token, so the token itself never reaches disk
    pub fn cache_owner(&self) -> String {
        let token = match &self.token {
            Some(token) => {
                let mut hasher = Sha256::new();
                hasher.update(token.as_bytes());
                format!("{:x}", hasher.finalize())
            }
            None => "anonymous".to_string(),
        };
        format!("{} {}", self.base_url, token)
    }

    /// Whether an absolute URL points below the configured base URL
    fn is_own_url(&self, url: &str) -> bool {
        url.strip_prefix(self.base_url.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    }

    /// Absolute URL for an API path such as `/envelopes/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The token is only attached to URLs under the base URL
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let own = self.is_own_url(&url);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) if own => builder.header(AUTHORIZATION, format!("Bearer {}", token.as_str())),
            _ => builder,
        }
    }

    fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> TrackerResult<Response> {
        tracing::debug!(%method, path, "request");

        let response = builder.send().map_err(|e| {
            tracing::warn!(%method, path, error = %e, "request failed");
            TrackerError::Network(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = error_message(status.as_u16(), &body);
        tracing::warn!(%method, path, status = status.as_u16(), %message, "request rejected");

        if status.as_u16() == 401 {
            return Err(TrackerError::Auth(message));
        }
        Err(TrackerError::Http {
            status: status.as_u16(),
            message,
        })
    }

    fn read_json<T: DeserializeOwned>(response: Response) -> TrackerResult<T> {
        let text = response.text()?;
        if text.trim().is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> TrackerResult<T> {
        let response = self.send(Method::GET, path, self.request(Method::GET, path))?;
        Self::read_json(response)
    }

    pub fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> TrackerResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.send(Method::GET, path, builder)?;
        Self::read_json(response)
    }

    /// Fetch every item of a list endpoint, whatever its pagination shape
    ///
    /// `next` links leading away from the base URL are refused.
    pub fn get_list<T: DeserializeOwned>(&self, path: &str) -> TrackerResult<Vec<T>> {
        let first: Value = self.get(path)?;
        collect_pages(first, |next| {
            if !self.is_own_url(&self.url(next)) {
                tracing::warn!(next, base = %self.base_url, "pagination link leaves the API");
                return Err(TrackerError::Network(format!(
                    "Refusing to follow pagination link outside {}: {}",
                    self.base_url, next
                )));
            }
            self.get(next)
        })
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> TrackerResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, builder)?;
        Self::read_json(response)
    }

    /// POST to an action endpoint that takes no body
    pub fn post_empty<T: DeserializeOwned>(&self, path: &str) -> TrackerResult<T> {
        let response = self.send(Method::POST, path, self.request(Method::POST, path))?;
        Self::read_json(response)
    }

    pub fn put<B, T>(&self, path: &str, body: &B) -> TrackerResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        let response = self.send(Method::PUT, path, builder)?;
        Self::read_json(response)
    }

    pub fn delete(&self, path: &str) -> TrackerResult<()> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path))?;
        Ok(())
    }

    /// Download a raw body, e.g. an export file
    pub fn download<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> TrackerResult<Download> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.send(Method::GET, path, builder)?;

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition);
        let bytes = response.bytes()?.to_vec();

        Ok(Download { bytes, filename })
    }
}

/// Human-readable message for a failed response
///
/// Prefers the server's `detail` field; falls back to DRF-style field errors
/// and finally to a generic message carrying the status.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            return detail.to_string();
        }
        if let Value::Object(map) = &value {
            let parts: Vec<String> = map
                .iter()
                .filter_map(|(field, v)| {
                    let text = match v {
                        Value::String(s) => s.clone(),
                        Value::Array(items) => items
                            .iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(" "),
                        _ => return None,
                    };
                    (!text.is_empty()).then(|| format!("{}: {}", field, text))
                })
                .collect();
            if !parts.is_empty() {
                return parts.join("; ");
            }
        }
    }
    format!("Request failed with status code {}", status)
}

fn filename_from_disposition(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
            .filter(|name| !name.is_empty())
    })
}
