//! Common utilities for the Monarch renderer.
//!
//! This crate provides shared infrastructure used by all pipeline stages:
//! - **URLs** - parsing and relative resolution of document and stylesheet addresses
//! - **Fetching** - the document-fetch collaborator and its network/file implementation
//! - **Warning System** - deduplicated warnings for recovered conditions

pub mod net;
pub mod url;
pub mod warning;

pub use net::{Fetch, FetchError, NetFetcher};
pub use url::{Url, UrlError};
