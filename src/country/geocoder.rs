//! Geocoding stage: free text → formatted address → trailing country segment.

use super::types::ResolveError;
use crate::config::ResolverConfig;
use serde::Deserialize;
use std::time::Duration;

/// A service that turns a place description into a formatted address,
/// ordered most specific to least specific and comma-delimited.
pub trait Geocoder {
    /// `Ok(None)` means the service answered but found nothing.
    fn geocode(&self, query: &str, language: &str) -> Result<Option<String>, ResolveError>;
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, query: &str, language: &str) -> Result<Option<String>, ResolveError> {
        (**self).geocode(query, language)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str, language: &str) -> Result<Option<String>, ResolveError> {
        (**self).geocode(query, language)
    }
}

// ─── Nominatim ──────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct NominatimPlace {
    display_name: String,
}

/// OpenStreetMap Nominatim search client.
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    url: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            url: url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(cfg: &ResolverConfig) -> Self {
        Self::new(&cfg.geocoder_url, &cfg.user_agent, cfg.timeout())
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str, language: &str) -> Result<Option<String>, ResolveError> {
        tracing::debug!(query, language, url = %self.url, "geocoding");

        let response = self
            .agent
            .get(&self.url)
            .set("User-Agent", &self.user_agent)
            .query("q", query)
            .query("format", "json")
            .query("limit", "1")
            .query("accept-language", language)
            .call()
            .map_err(|e| ResolveError::Geocoding(e.to_string()))?;

        let places: Vec<NominatimPlace> = response
            .into_json()
            .map_err(|e| ResolveError::InvalidResponse(e.to_string()))?;

        Ok(places.into_iter().next().map(|p| p.display_name))
    }
}

// ─── Address parsing ────────────────────────────────────────────

/// Last comma-separated segment of a formatted address, trimmed.
pub fn country_segment(address: &str) -> Result<String, ResolveError> {
    let last = address.rsplit(',').next().unwrap_or("").trim();
    if last.is_empty() {
        return Err(ResolveError::MalformedAddress(address.to_string()));
    }
    Ok(last.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_segment() {
        assert_eq!(
            country_segment("Berlin, 10117, Germany").unwrap(),
            "Germany"
        );
        assert_eq!(country_segment("  Japan ").unwrap(), "Japan");
    }

    #[test]
    fn test_country_segment_keeps_inner_spaces() {
        assert_eq!(
            country_segment("Manhattan, New York County, New York, United States").unwrap(),
            "United States"
        );
    }

    #[test]
    fn test_country_segment_malformed() {
        assert!(matches!(
            country_segment(""),
            Err(ResolveError::MalformedAddress(_))
        ));
        assert!(matches!(
            country_segment("Somewhere, "),
            Err(ResolveError::MalformedAddress(_))
        ));
    }

    #[test]
    fn test_nominatim_payload_shape() {
        let body = r#"[{"place_id": 1, "lat": "52.5", "lon": "13.4",
            "display_name": "Berlin, Deutschland", "importance": 0.9}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        assert_eq!(places[0].display_name, "Berlin, Deutschland");
    }

    #[test]
    fn test_unreachable_geocoder_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let geo = NominatimGeocoder::new(
            "http://127.0.0.1:9/search",
            "geonorm-test",
            Duration::from_millis(500),
        );
        let err = geo.geocode("Berlin", "en").unwrap_err();
        assert!(err.is_transient(), "got {:?}", err);
    }
}
