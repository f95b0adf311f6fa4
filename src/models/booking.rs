use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::walker::Walker;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub zone_score: i32,
    pub day_score: i32,
    pub price_score: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.zone_score + self.day_score + self.price_score
    }
}

/// A candidate annotated with its match score. Recomputed per search,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredWalker {
    pub walker: Walker,
    pub score: i32,
    pub score_breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub walk_id: Uuid,
    pub walker_id: Uuid,
    pub score: i32,
    pub score_breakdown: ScoreBreakdown,
    pub booked_at: DateTime<Utc>,
}
