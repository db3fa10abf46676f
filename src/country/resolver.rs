//! Country name resolver: orchestrates the fallback chain.
//!
//! Flow: absent input → unresolved
//!       reference table → cache → geocoder (last address segment) → unresolved
//!
//! Cached and fresh geocoder segments go through the same validation step.

use super::cache::{CacheHit, ResolutionCache};
use super::geocoder::{country_segment, Geocoder, NominatimGeocoder};
use super::reference::{self, Country};
use super::types::{Resolution, ResolutionSource, ResolveError, ResolvedCountry};
use crate::config::ResolverConfig;

/// Structured stage alone: no cache, no network, no `&mut self`.
pub fn structured_match(location: Option<&str>) -> Option<ResolvedCountry> {
    let raw = location.map(str::trim).filter(|s| !s.is_empty())?;
    reference::lookup(raw).map(|c| canonical(c, ResolutionSource::Reference))
}

/// Map a reference hit to its alpha-2 code and back to the canonical name.
fn canonical(country: &Country, source: ResolutionSource) -> ResolvedCountry {
    let name = reference::canonical_name(country.alpha2).unwrap_or(country.name);
    ResolvedCountry {
        name: name.to_string(),
        alpha2: Some(country.alpha2.to_string()),
        source,
    }
}

/// Resolves free-text locations to canonical country names.
pub struct CountryNameResolver<G = NominatimGeocoder> {
    geocoder: G,
    cache: ResolutionCache,
    language: String,
    validate_geocoded: bool,
    offline: bool,
}

impl CountryNameResolver<NominatimGeocoder> {
    pub fn from_config(cfg: &ResolverConfig) -> Self {
        Self::with_config(NominatimGeocoder::from_config(cfg), cfg)
    }
}

impl<G: Geocoder> CountryNameResolver<G> {
    /// Resolver with default settings and an in-memory cache.
    pub fn new(geocoder: G) -> Self {
        Self::with_config(geocoder, &ResolverConfig::default())
    }

    pub fn with_config(geocoder: G, cfg: &ResolverConfig) -> Self {
        let cache = match &cfg.cache_path {
            Some(path) => ResolutionCache::load_from(path.clone(), cfg.cache_capacity),
            None => ResolutionCache::new(cfg.cache_capacity),
        };
        Self {
            geocoder,
            cache,
            language: cfg.language.clone(),
            validate_geocoded: cfg.validate_geocoded,
            offline: cfg.offline,
        }
    }

    /// Replace the cache (for testing or sharing a file-backed one).
    pub fn with_cache(mut self, cache: ResolutionCache) -> Self {
        self.cache = cache;
        self
    }

    /// Skip the geocoding stage entirely.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// When false, geocoded segments are returned as-is, even if they are
    /// not canonical country names.
    pub fn set_validate_geocoded(&mut self, validate: bool) {
        self.validate_geocoded = validate;
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Toggle writing the cache file on every geocoder result.
    /// Returns the previous setting.
    pub fn set_cache_autosave(&mut self, autosave: bool) -> bool {
        self.cache.set_autosave(autosave)
    }

    pub fn flush_cache(&mut self) {
        self.cache.flush();
    }

    /// Resolve a location. Never fails: every error becomes `Unresolved`.
    pub fn resolve(&mut self, location: Option<&str>) -> Resolution {
        match self.try_resolve(location) {
            Ok(country) => Resolution::Resolved(country),
            Err(e) => {
                tracing::debug!(location = location.unwrap_or(""), "unresolved: {}", e);
                Resolution::Unresolved
            }
        }
    }

    /// Like [`resolve`](Self::resolve) but reports why resolution failed.
    pub fn try_resolve(&mut self, location: Option<&str>) -> Result<ResolvedCountry, ResolveError> {
        let raw = location
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ResolveError::AbsentInput)?;

        // 1. Structured lookup
        if let Some(country) = structured_match(Some(raw)) {
            return Ok(country);
        }
        tracing::debug!("{}", ResolveError::NoStructuredMatch(raw.to_string()));

        // 2. Earlier geocoder outcome
        match self.cache.get(&self.language, raw) {
            Some(CacheHit::Segment(segment)) => {
                return self.finish(segment, ResolutionSource::Cache)
            }
            Some(CacheHit::Unresolved) => {
                return Err(ResolveError::CachedUnresolved(raw.to_string()))
            }
            None => {}
        }

        if self.offline {
            return Err(ResolveError::Offline(raw.to_string()));
        }

        // 3. Geocoder
        let segment = match self.fetch_segment(raw) {
            Ok(segment) => {
                self.cache.put(&self.language, raw, Some(&segment));
                segment
            }
            Err(e) if e.is_transient() => {
                tracing::warn!(location = raw, "geocoder unavailable: {}", e);
                return Err(e);
            }
            Err(e) => {
                self.cache.put(&self.language, raw, None);
                return Err(e);
            }
        };
        self.finish(segment, ResolutionSource::Geocoder)
    }

    fn fetch_segment(&self, raw: &str) -> Result<String, ResolveError> {
        let address = self
            .geocoder
            .geocode(raw, &self.language)?
            .ok_or_else(|| ResolveError::NotFound(raw.to_string()))?;
        tracing::debug!(location = raw, address = %address, "geocoded");
        country_segment(&address)
    }

    /// Apply the current validation mode to a geocoded segment.
    fn finish(&self, segment: String, source: ResolutionSource) -> Result<ResolvedCountry, ResolveError> {
        let known = reference::lookup(&segment);
        match known {
            Some(country) if self.validate_geocoded => Ok(canonical(country, source)),
            None if self.validate_geocoded => Err(ResolveError::NotCanonical(segment)),
            _ => Ok(ResolvedCountry {
                name: segment,
                alpha2: known.map(|c| c.alpha2.to_string()),
                source,
            }),
        }
    }
}
