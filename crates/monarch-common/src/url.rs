//! Document and stylesheet addresses.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! Parsing and joining are delegated to the `url` crate; this wrapper restricts
//! the accepted schemes to the ones the fetcher knows how to retrieve.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// Schemes the renderer can fetch.
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "file", "data"];

/// Errors produced when a caller hands the renderer an unusable address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The text is not a URL at all.
    #[error("malformed URL '{url}': {reason}")]
    Malformed {
        /// The offending input.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// The URL parsed but names a scheme we cannot retrieve.
    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),
}

/// An absolute URL with a supported scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    inner: url::Url,
}

impl Url {
    /// Parse an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::Malformed`] if the text is not an absolute URL and
    /// [`UrlError::UnsupportedScheme`] for schemes outside [`SUPPORTED_SCHEMES`].
    pub fn parse(text: &str) -> Result<Self, UrlError> {
        let inner = url::Url::parse(text.trim()).map_err(|e| UrlError::Malformed {
            url: text.to_string(),
            reason: e.to_string(),
        })?;
        Self::checked(inner)
    }

    /// Build a `file:` URL from a filesystem path.
    ///
    /// Relative paths are made absolute against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::Malformed`] if the path cannot be expressed as a URL.
    pub fn from_file_path(path: &Path) -> Result<Self, UrlError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|dir| dir.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };
        url::Url::from_file_path(&absolute)
            .map(|inner| Self { inner })
            .map_err(|()| UrlError::Malformed {
                url: absolute.display().to_string(),
                reason: "not an absolute file path".to_string(),
            })
    }

    /// Resolve a possibly relative reference (`a.css`, `../a.css`, `/a.css`,
    /// `//host/a.css`, or an absolute URL) against this URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is malformed or uses an unsupported scheme.
    pub fn resolve(&self, href: &str) -> Result<Self, UrlError> {
        let inner = self.inner.join(href.trim()).map_err(|e| UrlError::Malformed {
            url: href.to_string(),
            reason: e.to_string(),
        })?;
        Self::checked(inner)
    }

    fn checked(inner: url::Url) -> Result<Self, UrlError> {
        if SUPPORTED_SCHEMES.contains(&inner.scheme()) {
            Ok(Self { inner })
        } else {
            Err(UrlError::UnsupportedScheme(inner.scheme().to_string()))
        }
    }

    /// The URL scheme, lowercase.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.inner.scheme()
    }

    /// The host, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.inner.host_str()
    }

    /// The path component.
    #[must_use]
    pub fn path(&self) -> &str {
        self.inner.path()
    }

    /// The local filesystem path of a `file:` URL.
    #[must_use]
    pub fn to_file_path(&self) -> Option<PathBuf> {
        self.inner.to_file_path().ok()
    }

    /// The serialized URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.inner.as_str())
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
