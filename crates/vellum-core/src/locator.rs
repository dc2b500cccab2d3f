//! Resource locator parsing
//!
//! An inherit link may point at the root node, a collection, a document,
//! or a fully-qualified URL on another deployment. Path matching is
//! permissive: segments past the second are ignored, mirroring the route
//! surface that produces these links.

use crate::errors::{Result, VellumError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Where a permission descriptor lives
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceLocator {
    /// The store's root node, holding the global default descriptor
    Root,
    /// A top-level collection
    Collection(String),
    /// A document within a collection
    Document {
        /// Collection the document belongs to
        collection: String,
        /// Document id
        id: String,
    },
    /// A resource on another deployment, reached by URL
    External(String),
}

impl ResourceLocator {
    /// Parse a path or URL into a locator.
    ///
    /// Text with a scheme and host is `External`; everything else is
    /// split into path segments: zero segments is `Root`, one is
    /// `Collection`, two or more is `Document` (trailing segments
    /// ignored). Segments containing whitespace or control characters
    /// are rejected; valid URL input cannot in practice produce such a
    /// segment, so this branch is defensive.
    pub fn parse(text: &str) -> Result<Self> {
        if let Ok(url) = Url::parse(text) {
            if url.has_host() {
                return Ok(Self::External(url.into()));
            }
        }

        let segments: Vec<&str> = text.split('/').filter(|s| !s.is_empty()).collect();
        for segment in &segments {
            if segment
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
            {
                return Err(VellumError::invalid(format!(
                    "malformed path segment in locator: {text:?}"
                )));
            }
        }

        match segments.as_slice() {
            [] => Ok(Self::Root),
            [collection] => Ok(Self::Collection((*collection).to_string())),
            [collection, id, ..] => Ok(Self::Document {
                collection: (*collection).to_string(),
                id: (*id).to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => f.write_str("/"),
            Self::Collection(name) => write!(f, "/{name}"),
            Self::Document { collection, id } => write!(f, "/{collection}/{id}"),
            Self::External(url) => f.write_str(url),
        }
    }
}
