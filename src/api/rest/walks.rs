use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::queue::enqueue_walk;
use crate::error::AppError;
use crate::models::booking::Booking;
use crate::models::walk::{Walk, WalkStatus};
use crate::models::walker::DayCode;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/walks", post(request_walk))
        .route("/walks/:id", get(get_walk))
        .route("/walks/:id/status", patch(update_walk_status))
        .route("/bookings", get(list_bookings))
}

#[derive(Deserialize)]
pub struct RequestWalkRequest {
    pub zone: String,
    pub dog_name: Option<String>,
    pub start_time_planned: DateTime<Utc>,
    pub end_time_planned: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct UpdateWalkStatusRequest {
    pub status: WalkStatus,
}

async fn request_walk(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RequestWalkRequest>,
) -> Result<Json<Walk>, AppError> {
    if payload.zone.trim().is_empty() {
        return Err(AppError::BadRequest("zone cannot be empty".to_string()));
    }

    if payload.end_time_planned < payload.start_time_planned {
        return Err(AppError::BadRequest(
            "end_time_planned must not precede start_time_planned".to_string(),
        ));
    }

    let walk = Walk {
        id: Uuid::new_v4(),
        zone: payload.zone,
        dog_name: payload.dog_name,
        day: DayCode::from_weekday(payload.start_time_planned.weekday()),
        start_time_planned: payload.start_time_planned,
        end_time_planned: payload.end_time_planned,
        status: WalkStatus::Scheduled,
        walker_id: None,
        created_at: Utc::now(),
    };

    state.walks.insert(walk.id, walk.clone());
    enqueue_walk(&state, walk.clone()).await?;

    Ok(Json(walk))
}

async fn get_walk(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Walk>, AppError> {
    let walk = state
        .walks
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("walk {} not found", id)))?;

    Ok(Json(walk.value().clone()))
}

async fn update_walk_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWalkStatusRequest>,
) -> Result<Json<Walk>, AppError> {
    let mut walk = state
        .walks
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("walk {} not found", id)))?;

    if !walk.status.can_transition_to(payload.status) {
        return Err(AppError::Conflict(format!(
            "invalid status transition for walk {}",
            id
        )));
    }

    walk.status = payload.status;

    Ok(Json(walk.clone()))
}

async fn list_bookings(State(state): State<Arc<AppState>>) -> Json<Vec<Booking>> {
    let mut bookings: Vec<Booking> = state
        .bookings
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    bookings.sort_by_key(|booking| booking.booked_at);
    Json(bookings)
}
