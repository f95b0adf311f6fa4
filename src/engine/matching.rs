use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::engine::availability::blocks_day;
use crate::engine::queue::enqueue_walk;
use crate::engine::scoring::select_best;
use crate::error::AppError;
use crate::models::booking::Booking;
use crate::models::walk::{Walk, WalkStatus};
use crate::models::walker::Walker;
use crate::state::AppState;

enum MatchOutcome {
    Booked,
    Requeued,
    Skipped,
}

impl MatchOutcome {
    fn as_label(&self) -> &'static str {
        match self {
            MatchOutcome::Booked => "success",
            MatchOutcome::Requeued => "requeued",
            MatchOutcome::Skipped => "skipped",
        }
    }
}

pub async fn run_matching_engine(state: Arc<AppState>, mut walk_rx: mpsc::Receiver<Walk>) {
    info!("matching engine started");

    while let Some(walk) = walk_rx.recv().await {
        state.metrics.walks_in_queue.dec();

        let start = Instant::now();
        match process_walk(state.clone(), walk).await {
            Ok(outcome) => {
                let elapsed = start.elapsed().as_secs_f64();
                state
                    .metrics
                    .matching_latency_seconds
                    .with_label_values(&[outcome.as_label()])
                    .observe(elapsed);
                state
                    .metrics
                    .bookings_total
                    .with_label_values(&[outcome.as_label()])
                    .inc();
            }
            Err(err) => {
                let elapsed = start.elapsed().as_secs_f64();
                state
                    .metrics
                    .matching_latency_seconds
                    .with_label_values(&["error"])
                    .observe(elapsed);
                state
                    .metrics
                    .bookings_total
                    .with_label_values(&["error"])
                    .inc();
                error!(error = %err, "failed to match walk");
            }
        }
    }

    warn!("matching engine stopped: queue channel closed");
}

async fn process_walk(state: Arc<AppState>, walk: Walk) -> Result<MatchOutcome, AppError> {
    // The queued value may be stale: the walk can be canceled (or otherwise
    // advanced) while it waits. Only the current record decides whether a
    // match may still happen.
    let Some(walk) = state.walks.get(&walk.id).map(|entry| entry.value().clone()) else {
        warn!(walk_id = %walk.id, "queued walk no longer exists; skipping");
        return Ok(MatchOutcome::Skipped);
    };

    if walk.status != WalkStatus::Scheduled || walk.walker_id.is_some() {
        info!(walk_id = %walk.id, "walk no longer awaiting a match; skipping");
        return Ok(MatchOutcome::Skipped);
    }

    let candidates: Vec<Walker> = state
        .walkers
        .iter()
        .filter_map(|entry| {
            let walker = entry.value();
            if walker.available {
                Some(walker.clone())
            } else {
                None
            }
        })
        .collect();

    // DashMap iteration order is arbitrary; ordering by registration time
    // makes the first-seen tie-break reproducible (earliest walker wins).
    let mut candidates = candidates;
    candidates.sort_by_key(|walker| (walker.created_at, walker.id));

    let Some(best) = select_best(&candidates, &walk.zone, walk.day) else {
        warn!(walk_id = %walk.id, "no available walkers; re-queueing walk");
        sleep(Duration::from_millis(250)).await;
        enqueue_walk(&state, walk).await?;
        return Ok(MatchOutcome::Requeued);
    };

    let mut booked_walk = walk.clone();
    booked_walk.status = WalkStatus::Assigned;
    booked_walk.walker_id = Some(best.walker.id);
    state.walks.insert(booked_walk.id, booked_walk.clone());

    if let Some(mut walker) = state.walkers.get_mut(&best.walker.id) {
        // A walk landing today is pending work: the walker stops advertising
        // availability until the gate opens again.
        if blocks_day(&booked_walk, &Utc::now()) {
            walker.available = false;
        }
        walker.updated_at = Utc::now();
    }

    let booking = Booking {
        id: Uuid::new_v4(),
        walk_id: booked_walk.id,
        walker_id: best.walker.id,
        score: best.score,
        score_breakdown: best.score_breakdown,
        booked_at: Utc::now(),
    };

    state.bookings.insert(booking.id, booking.clone());
    let _ = state.booking_events_tx.send(booking.clone());

    info!(
        walk_id = %booked_walk.id,
        walker_id = %best.walker.id,
        score = best.score,
        "walk booked"
    );

    Ok(MatchOutcome::Booked)
}
