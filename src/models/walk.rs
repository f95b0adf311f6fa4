use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::walker::DayCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkStatus {
    Scheduled,
    Assigned,
    Arrived,
    InProgress,
    Completed,
    Canceled,
}

impl WalkStatus {
    /// A blocking walk still counts as pending work for the availability
    /// gate. Exhaustive so a new status cannot silently fall through.
    pub fn is_blocking(self) -> bool {
        match self {
            WalkStatus::Scheduled
            | WalkStatus::Assigned
            | WalkStatus::Arrived
            | WalkStatus::InProgress => true,
            WalkStatus::Completed | WalkStatus::Canceled => false,
        }
    }

    /// The lifecycle only moves forward one step at a time; canceling is
    /// allowed from any unfinished state, and finished walks stay finished.
    pub fn can_transition_to(self, next: WalkStatus) -> bool {
        if next == self {
            return true;
        }
        if next == WalkStatus::Canceled {
            return self.is_blocking();
        }
        self.successor() == Some(next)
    }

    fn successor(self) -> Option<WalkStatus> {
        match self {
            WalkStatus::Scheduled => Some(WalkStatus::Assigned),
            WalkStatus::Assigned => Some(WalkStatus::Arrived),
            WalkStatus::Arrived => Some(WalkStatus::InProgress),
            WalkStatus::InProgress => Some(WalkStatus::Completed),
            WalkStatus::Completed | WalkStatus::Canceled => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Walk {
    pub id: Uuid,
    pub zone: String,
    pub dog_name: Option<String>,
    /// Weekday of `start_time_planned`, matched against walker availability.
    pub day: DayCode,
    pub start_time_planned: DateTime<Utc>,
    pub end_time_planned: DateTime<Utc>,
    pub status: WalkStatus,
    pub walker_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::WalkStatus;

    #[test]
    fn lifecycle_advances_one_step_at_a_time() {
        assert!(WalkStatus::Scheduled.can_transition_to(WalkStatus::Assigned));
        assert!(WalkStatus::Assigned.can_transition_to(WalkStatus::Arrived));
        assert!(WalkStatus::Arrived.can_transition_to(WalkStatus::InProgress));
        assert!(WalkStatus::InProgress.can_transition_to(WalkStatus::Completed));
    }

    #[test]
    fn lifecycle_cannot_skip_ahead() {
        assert!(!WalkStatus::Scheduled.can_transition_to(WalkStatus::Completed));
        assert!(!WalkStatus::Scheduled.can_transition_to(WalkStatus::InProgress));
        assert!(!WalkStatus::Assigned.can_transition_to(WalkStatus::Completed));
    }

    #[test]
    fn lifecycle_cannot_move_backwards() {
        assert!(!WalkStatus::InProgress.can_transition_to(WalkStatus::Scheduled));
        assert!(!WalkStatus::Arrived.can_transition_to(WalkStatus::Assigned));
        assert!(!WalkStatus::Completed.can_transition_to(WalkStatus::InProgress));
    }

    #[test]
    fn cancel_is_allowed_from_any_unfinished_state() {
        assert!(WalkStatus::Scheduled.can_transition_to(WalkStatus::Canceled));
        assert!(WalkStatus::InProgress.can_transition_to(WalkStatus::Canceled));
        assert!(!WalkStatus::Completed.can_transition_to(WalkStatus::Canceled));
        assert!(!WalkStatus::Canceled.can_transition_to(WalkStatus::Scheduled));
    }

    #[test]
    fn same_status_is_a_no_op() {
        assert!(WalkStatus::Canceled.can_transition_to(WalkStatus::Canceled));
        assert!(WalkStatus::Arrived.can_transition_to(WalkStatus::Arrived));
    }
}
