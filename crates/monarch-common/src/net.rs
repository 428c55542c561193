//! Document fetching for the Monarch renderer.
//!
//! The pipeline treats fetching as a blocking call that returns a complete byte
//! buffer or fails; there is no streaming. [`Fetch`] is the seam the cascade and
//! the browser use, and [`NetFetcher`] is the default implementation backed by
//! blocking `reqwest` for `http(s)`, the filesystem for `file:`, and inline
//! decoding for `data:` URLs.

use std::io::ErrorKind;
use std::time::Duration;

use base64::Engine;
use thiserror::Error;

use crate::url::Url;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = "MonarchBrowser/0.1";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced by the fetch layer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The resource does not exist (missing file, HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),
    /// The transport failed before a response was read.
    #[error("connection error for {url}: {reason}")]
    Connection {
        /// The URL being fetched.
        url: String,
        /// Transport diagnostic.
        reason: String,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error {status} for {url}")]
    Http {
        /// The URL being fetched.
        url: String,
        /// Numeric status code.
        status: u16,
    },
    /// The fetcher does not know how to retrieve this scheme.
    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),
    /// A `data:` URL whose payload could not be decoded.
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),
}

/// The document-fetch collaborator.
///
/// Used for the initial document and for each linked stylesheet.
pub trait Fetch {
    /// Retrieve the complete body of `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the resource cannot be retrieved.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;

    /// Retrieve `url` and decode it as UTF-8, replacing invalid sequences.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Fetch::fetch`].
    fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        self.fetch(url)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Default fetcher: network, filesystem and `data:` URLs.
#[derive(Debug, Default)]
pub struct NetFetcher;

impl Fetch for NetFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        log::debug!("fetching {url}");
        match url.scheme() {
            "http" | "https" => fetch_http(url),
            "file" => fetch_file(url),
            "data" => decode_data_url(url.as_str()),
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}

fn fetch_http(url: &Url) -> Result<Vec<u8>, FetchError> {
    let connection_error = |e: reqwest::Error| FetchError::Connection {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(connection_error)?;

    let response = client
        .get(url.as_str())
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(connection_error)?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(url.to_string()));
    }
    if !status.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(connection_error)
}

fn fetch_file(url: &Url) -> Result<Vec<u8>, FetchError> {
    let path = url
        .to_file_path()
        .ok_or_else(|| FetchError::NotFound(url.to_string()))?;
    std::fs::read(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FetchError::NotFound(path.display().to_string()),
        _ => FetchError::Connection {
            url: url.to_string(),
            reason: e.to_string(),
        },
    })
}

/// Decode a `data:` URL payload into raw bytes.
///
/// Supports `;base64` payloads and plain payloads (returned verbatim).
///
/// # Errors
///
/// Returns [`FetchError::InvalidDataUrl`] if the comma separator is missing or
/// base64 decoding fails.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, FetchError> {
    let data_url = url.trim_start_matches("data:");
    let Some((metadata, data)) = data_url.split_once(',') else {
        return Err(FetchError::InvalidDataUrl("missing comma".to_string()));
    };

    if metadata.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| FetchError::InvalidDataUrl(format!("base64 decode error: {e}")))
    } else {
        Ok(data.as_bytes().to_vec())
    }
}
