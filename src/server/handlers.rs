use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::batch::{self, BatchReport, ContributorRecord};
use crate::country::{reference, structured_match, Resolution, ResolutionSource};

use super::state::AppState;

/// Largest accepted POST /api/countries body, in entries.
pub const MAX_BATCH: usize = 1000;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

/// Run blocking resolver work off the async executor.
async fn with_resolver<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut crate::country::CountryNameResolver<super::DynGeocoder>) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut resolver = state
            .resolver
            .lock()
            .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "resolver lock poisoned"))?;
        Ok(f(&mut *resolver))
    })
    .await
    .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("resolver task failed: {}", e)))?
}

// ─── GET /api/country ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CountryQuery {
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct CountryResponse {
    pub location: Option<String>,
    pub country: Option<String>,
    pub alpha2: Option<String>,
    pub source: Option<ResolutionSource>,
}

pub async fn country(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryQuery>,
) -> Result<Json<CountryResponse>, ApiError> {
    let start = Instant::now();
    let location = params.location;

    // Reference hits never wait on the resolver lock.
    let resolution = match structured_match(location.as_deref()) {
        Some(country) => Resolution::Resolved(country),
        None => {
            let query = location.clone();
            with_resolver(state, move |r| r.resolve(query.as_deref())).await?
        }
    };

    tracing::info!(
        location = location.as_deref().unwrap_or(""),
        country = resolution.country().unwrap_or("-"),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/country"
    );

    let (country, alpha2, source) = match resolution {
        Resolution::Resolved(c) => (Some(c.name), c.alpha2, Some(c.source)),
        Resolution::Unresolved => (None, None, None),
    };
    Ok(Json(CountryResponse {
        location,
        country,
        alpha2,
        source,
    }))
}

// ─── POST /api/countries ─────────────────────────────────────────

pub async fn resolve_batch(
    State(state): State<Arc<AppState>>,
    Json(locations): Json<Vec<Option<String>>>,
) -> Result<Json<BatchReport>, ApiError> {
    if locations.len() > MAX_BATCH {
        return Err(api_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("At most {} locations per request", MAX_BATCH),
        ));
    }

    let start = Instant::now();
    let records: Vec<ContributorRecord> = locations
        .into_iter()
        .map(|location| ContributorRecord { login: None, location })
        .collect();

    let report = with_resolver(state, move |r| batch::run(r, records)).await?;

    tracing::info!(
        total = report.total,
        unresolved = report.unresolved,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "POST /api/countries"
    );
    Ok(Json(report))
}

// ─── GET /api/countries ──────────────────────────────────────────

#[derive(Serialize)]
pub struct CountryInfo {
    pub alpha2: &'static str,
    pub alpha3: &'static str,
    pub name: &'static str,
}

pub async fn country_list() -> Json<Vec<CountryInfo>> {
    Json(
        reference::all()
            .iter()
            .map(|c| CountryInfo {
                alpha2: c.alpha2,
                alpha3: c.alpha3,
                name: c.name,
            })
            .collect(),
    )
}
