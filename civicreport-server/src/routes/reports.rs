//! Public reports API for the map view

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use civicreport_core::parse_location;

use crate::error::AppError;
use crate::notify::Notifier;
use crate::state::AppState;
use crate::store::{AccountStore, IssueStore, SessionStore};

#[derive(Serialize)]
pub struct ReportEntry {
    pub id: u64,
    pub title: String,
    pub location: String,
    /// Parsed from the location string; null when not a usable "lat,lng"
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub status: String,
    pub department: String,
    pub image_path: Option<String>,
    pub endorsements: usize,
    pub created_at: DateTime<Utc>,
}

/// GET /api/reports
pub async fn list_reports<A, I, S, N>(
    State(state): State<Arc<AppState<A, I, S, N>>>,
) -> Result<Json<Vec<ReportEntry>>, AppError>
where
    A: AccountStore,
    I: IssueStore,
    S: SessionStore,
    N: Notifier,
{
    let issues = state.issues.list_issues()?;

    let reports = issues
        .into_iter()
        .map(|issue| {
            let coords = parse_location(&issue.location);
            ReportEntry {
                id: issue.id.0,
                title: issue.title,
                location: issue.location,
                lat: coords.lat,
                lng: coords.lng,
                status: issue.status.to_string(),
                department: issue.department,
                image_path: issue.image_path,
                endorsements: issue.endorsements.len(),
                created_at: issue.created_at,
            }
        })
        .collect();

    Ok(Json(reports))
}
