//! Core types for country resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stage produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Structured ISO 3166 lookup.
    Reference,
    /// Trailing segment of a geocoded address.
    Geocoder,
    /// Earlier geocoder outcome served from the cache.
    Cache,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Geocoder => write!(f, "geocoder"),
            Self::Cache => write!(f, "cache"),
        }
    }
}

/// A country name produced by one of the stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCountry {
    pub name: String,
    /// ISO alpha-2 code, when the name is in the reference set.
    #[serde(default)]
    pub alpha2: Option<String>,
    pub source: ResolutionSource,
}

/// Outcome of resolving one location string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedCountry),
    Unresolved,
}

impl Resolution {
    pub fn country(&self) -> Option<&str> {
        match self {
            Self::Resolved(c) => Some(c.name.as_str()),
            Self::Unresolved => None,
        }
    }

    pub fn source(&self) -> Option<ResolutionSource> {
        match self {
            Self::Resolved(c) => Some(c.source),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Option<ResolvedCountry>> for Resolution {
    fn from(value: Option<ResolvedCountry>) -> Self {
        value.map_or(Self::Unresolved, Self::Resolved)
    }
}

/// Why a location string did not resolve.
///
/// `CountryNameResolver::resolve` folds every variant into
/// [`Resolution::Unresolved`]; `try_resolve` exposes them for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no location given")]
    AbsentInput,

    #[error("no reference entry matches '{0}'")]
    NoStructuredMatch(String),

    #[error("geocoding skipped for '{0}' (offline)")]
    Offline(String),

    #[error("geocoding request failed: {0}")]
    Geocoding(String),

    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),

    #[error("geocoder found nothing for '{0}'")]
    NotFound(String),

    #[error("address has no country segment: '{0}'")]
    MalformedAddress(String),

    #[error("geocoded country '{0}' is not in the reference set")]
    NotCanonical(String),

    #[error("'{0}' was previously unresolvable")]
    CachedUnresolved(String),
}

impl ResolveError {
    /// Failures that may succeed on a later attempt. These are never cached.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Geocoding(_) | Self::InvalidResponse(_) | Self::Offline(_)
        )
    }
}
