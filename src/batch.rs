//! Batch resolution of contributor locations and per-country tallies.

use crate::country::{CountryNameResolver, Geocoder, ResolutionSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("invalid batch JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One contributor as exported by the scraper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContributorRecord {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// JSON batch entries may be full records or bare location strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchEntry {
    Record(ContributorRecord),
    Location(Option<String>),
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub source: Option<ResolutionSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub resolved: usize,
    pub unresolved: usize,
    /// Descending by count, ties by name.
    pub countries: Vec<CountryCount>,
    pub records: Vec<RecordOutcome>,
}

/// Parse a batch: a JSON array, or plain text with one location per line.
/// Blank lines in plain text are skipped.
pub fn parse_input(text: &str) -> Result<Vec<ContributorRecord>, BatchError> {
    if text.trim_start().starts_with('[') {
        let entries: Vec<BatchEntry> = serde_json::from_str(text)?;
        return Ok(entries
            .into_iter()
            .map(|e| match e {
                BatchEntry::Record(r) => r,
                BatchEntry::Location(location) => ContributorRecord { login: None, location },
            })
            .collect());
    }

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| ContributorRecord {
            login: None,
            location: Some(l.to_string()),
        })
        .collect())
}

/// Resolve every record. A record that fails to resolve is counted, never fatal.
/// A file-backed cache is written once, after the last record.
pub fn run<G: Geocoder>(
    resolver: &mut CountryNameResolver<G>,
    records: Vec<ContributorRecord>,
) -> BatchReport {
    let autosave = resolver.set_cache_autosave(false);
    let outcomes: Vec<RecordOutcome> = records
        .into_iter()
        .map(|r| {
            let resolution = resolver.resolve(r.location.as_deref());
            RecordOutcome {
                country: resolution.country().map(str::to_string),
                source: resolution.source(),
                login: r.login,
                location: r.location,
            }
        })
        .collect();
    resolver.flush_cache();
    resolver.set_cache_autosave(autosave);

    let countries = tally(&outcomes);
    let resolved: usize = countries.iter().map(|c| c.count).sum();
    let total = outcomes.len();
    tracing::info!(total, resolved, countries = countries.len(), "batch resolved");

    BatchReport {
        generated_at: Utc::now(),
        total,
        resolved,
        unresolved: total - resolved,
        countries,
        records: outcomes,
    }
}

/// Count resolved records per country.
pub fn tally(outcomes: &[RecordOutcome]) -> Vec<CountryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for country in outcomes.iter().filter_map(|o| o.country.as_deref()) {
        *counts.entry(country).or_default() += 1;
    }

    let mut out: Vec<CountryCount> = counts
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::ResolveError;

    struct FixedGeocoder;

    impl Geocoder for FixedGeocoder {
        fn geocode(&self, query: &str, _language: &str) -> Result<Option<String>, ResolveError> {
            match query {
                "Munich" => Ok(Some("München, Bayern, Deutschland".into())),
                "Shanghai" => Ok(Some("Shanghai, China".into())),
                "boom" => Err(ResolveError::Geocoding("timeout".into())),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn test_parse_plain_lines() {
        let records = parse_input("Germany\n\n  Shanghai \n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].location.as_deref(), Some("Shanghai"));
        assert!(records[0].login.is_none());
    }

    #[test]
    fn test_parse_json_mixed() {
        let text = r#"[
            {"login": "octocat", "location": "San Francisco"},
            {"login": "ghost"},
            "Berlin",
            null
        ]"#;
        let records = parse_input(text).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].login.as_deref(), Some("octocat"));
        assert_eq!(records[1].location, None);
        assert_eq!(records[2].location.as_deref(), Some("Berlin"));
        assert_eq!(records[3], ContributorRecord::default());
    }

    #[test]
    fn test_parse_json_error() {
        assert!(matches!(parse_input("[1, 2"), Err(BatchError::Json(_))));
    }

    #[test]
    fn test_run_tallies_and_survives_failures() {
        let mut resolver = CountryNameResolver::new(FixedGeocoder);
        let records = parse_input(
            r#"[
                {"login": "a", "location": "Germany"},
                {"login": "b", "location": "Munich"},
                {"login": "c", "location": "Shanghai"},
                {"login": "d", "location": "boom"},
                {"login": "e", "location": ""},
                {"login": "f"},
                {"login": "g", "location": "DEU"}
            ]"#,
        )
        .unwrap();

        let report = run(&mut resolver, records);
        assert_eq!(report.total, 7);
        assert_eq!(report.resolved, 4);
        assert_eq!(report.unresolved, 3);
        assert_eq!(
            report.countries,
            vec![
                CountryCount { country: "Germany".into(), count: 3 },
                CountryCount { country: "China".into(), count: 1 },
            ]
        );
        assert_eq!(report.records[1].source, Some(ResolutionSource::Geocoder));
        assert_eq!(report.records[3].country, None);
    }

    #[test]
    fn test_run_writes_cache_once_and_restores_autosave() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let cache = crate::country::ResolutionCache::load_from(path.clone(), 16);
        let mut resolver = CountryNameResolver::new(FixedGeocoder).with_cache(cache);

        let records = parse_input("Munich\nShanghai\nnowhere").unwrap();
        run(&mut resolver, records);

        let saved = crate::country::ResolutionCache::load_from(path.clone(), 16);
        assert_eq!(saved.len(), 3);

        // Autosave is back on: a single resolve reaches the file.
        resolver.resolve(Some("elsewhere"));
        assert_eq!(crate::country::ResolutionCache::load_from(path, 16).len(), 4);
    }

    #[test]
    fn test_tally_ties_sorted_by_name() {
        let outcome = |c: &str| RecordOutcome {
            login: None,
            location: None,
            country: Some(c.to_string()),
            source: Some(ResolutionSource::Reference),
        };
        let counts = tally(&[outcome("Japan"), outcome("France")]);
        assert_eq!(counts[0].country, "France");
        assert_eq!(counts[1].country, "Japan");
    }
}
