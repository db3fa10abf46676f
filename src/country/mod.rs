//! Country name resolution.
//!
//! Maps free-text location strings to canonical ISO 3166 country names,
//! via a static reference table first and a geocoding service second.

pub mod cache;
pub mod geocoder;
pub mod reference;
pub mod resolver;
pub mod types;

pub use cache::ResolutionCache;
pub use geocoder::{Geocoder, NominatimGeocoder};
pub use reference::Country;
pub use resolver::{structured_match, CountryNameResolver};
pub use types::{Resolution, ResolutionSource, ResolveError, ResolvedCountry};
