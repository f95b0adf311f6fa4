use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::availability::can_go_available;
use crate::engine::scoring::select_best;
use crate::error::AppError;
use crate::models::booking::ScoredWalker;
use crate::models::walk::Walk;
use crate::models::walker::{AvailabilitySlot, DayCode, Walker};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/walkers", post(register_walker).get(list_walkers))
        .route("/walkers/best", get(best_walker))
        .route("/walkers/:id/availability", patch(set_availability))
        .route("/walkers/:id/walks", get(list_assigned_walks))
}

#[derive(Deserialize)]
pub struct RegisterWalkerRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub rate_per_hour: f64,
}

#[derive(Deserialize)]
pub struct CandidateQuery {
    pub zone: Option<String>,
    pub day: Option<DayCode>,
}

#[derive(Deserialize)]
pub struct BestMatchQuery {
    pub zone: String,
    pub day: DayCode,
}

#[derive(Deserialize)]
pub struct SetAvailabilityRequest {
    pub available: bool,
}

async fn register_walker(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterWalkerRequest>,
) -> Result<Json<Walker>, AppError> {
    if payload.zones.iter().any(|zone| zone.trim().is_empty()) {
        return Err(AppError::BadRequest("zone names cannot be empty".to_string()));
    }

    let now = Utc::now();
    let walker = Walker {
        id: Uuid::new_v4(),
        name: payload.name,
        zones: dedup_zones(payload.zones),
        availability: dedup_days(payload.availability),
        // Negative rates are meaningless; store them as "rate unknown".
        rate_per_hour: payload.rate_per_hour.max(0.0),
        available: false,
        created_at: now,
        updated_at: now,
    };

    state.walkers.insert(walker.id, walker.clone());
    Ok(Json(walker))
}

async fn list_walkers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CandidateQuery>,
) -> Json<Vec<Walker>> {
    let mut walkers: Vec<Walker> = state
        .walkers
        .iter()
        .filter(|entry| {
            let walker = entry.value();
            let zone_ok = query
                .zone
                .as_deref()
                .is_none_or(|zone| walker.services_zone(zone));
            let day_ok = query.day.is_none_or(|day| walker.works_on(day));
            zone_ok && day_ok
        })
        .map(|entry| entry.value().clone())
        .collect();

    walkers.sort_by_key(|walker| (walker.created_at, walker.id));
    Json(walkers)
}

/// Runs the match scorer over every walker currently advertising
/// availability and returns the winner with its score breakdown.
async fn best_walker(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BestMatchQuery>,
) -> Result<Json<ScoredWalker>, AppError> {
    let mut candidates: Vec<Walker> = state
        .walkers
        .iter()
        .filter(|entry| entry.value().available)
        .map(|entry| entry.value().clone())
        .collect();

    candidates.sort_by_key(|walker| (walker.created_at, walker.id));

    let best = select_best(&candidates, &query.zone, query.day)
        .ok_or(AppError::NoAvailableWalkers)?;

    Ok(Json(best))
}

/// Availability toggle. Going available is gated: a walker with pending
/// walks today is kept unavailable no matter what was requested, and the
/// response carries the authoritative value.
async fn set_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAvailabilityRequest>,
) -> Result<Json<Walker>, AppError> {
    let assigned: Vec<Walk> = walks_for(&state, id);

    let mut walker = state
        .walkers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("walker {} not found", id)))?;

    let now = Utc::now();
    if payload.available && !can_go_available(&assigned, &now) {
        state.metrics.availability_denials_total.inc();
        tracing::info!(walker_id = %id, "availability refused: pending walks today");
        walker.available = false;
    } else {
        walker.available = payload.available;
    }
    walker.updated_at = now;

    Ok(Json(walker.clone()))
}

async fn list_assigned_walks(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Walk>>, AppError> {
    if !state.walkers.contains_key(&id) {
        return Err(AppError::NotFound(format!("walker {} not found", id)));
    }

    Ok(Json(walks_for(&state, id)))
}

fn walks_for(state: &AppState, walker_id: Uuid) -> Vec<Walk> {
    let mut walks: Vec<Walk> = state
        .walks
        .iter()
        .filter(|entry| entry.value().walker_id == Some(walker_id))
        .map(|entry| entry.value().clone())
        .collect();

    walks.sort_by_key(|walk| walk.start_time_planned);
    walks
}

fn dedup_zones(zones: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut zones = zones;
    zones.retain(|zone| seen.insert(zone.clone()));
    zones
}

fn dedup_days(availability: Vec<AvailabilitySlot>) -> Vec<AvailabilitySlot> {
    let mut seen = HashSet::new();
    let mut availability = availability;
    availability.retain(|slot| seen.insert(slot.day));
    availability
}
