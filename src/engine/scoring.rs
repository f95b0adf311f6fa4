use crate::models::booking::{ScoreBreakdown, ScoredWalker};
use crate::models::walker::{DayCode, Walker};

const ZONE_POINTS: i32 = 20;
const DAY_POINTS: i32 = 10;
const PRICE_POINTS_MAX: i32 = 10;

// 150/hour is treated as the ceiling of reasonable rates; every 15 under it
// earns a point. Business policy inherited as-is, not a derived invariant.
const RATE_CEILING: f64 = 150.0;
const RATE_STEP: f64 = 15.0;

pub fn compute_score(walker: &Walker, zone: &str, day: DayCode) -> (i32, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        zone_score: if walker.services_zone(zone) { ZONE_POINTS } else { 0 },
        day_score: if walker.works_on(day) { DAY_POINTS } else { 0 },
        price_score: price_score(walker.rate_per_hour),
    };

    (breakdown.total(), breakdown)
}

/// In `[0, PRICE_POINTS_MAX]`. A rate of `0` (or below) means the walker
/// never published one, which contributes nothing rather than penalizing.
fn price_score(rate_per_hour: f64) -> i32 {
    if rate_per_hour <= 0.0 {
        return 0;
    }

    let raw = ((RATE_CEILING - rate_per_hour) / RATE_STEP).round() as i32;
    raw.clamp(0, PRICE_POINTS_MAX)
}

/// Scores every candidate and returns the best one. Ties keep the earlier
/// candidate: only a strictly greater score displaces the running best, so
/// selection is stable in input order.
pub fn select_best(candidates: &[Walker], zone: &str, day: DayCode) -> Option<ScoredWalker> {
    let mut best: Option<ScoredWalker> = None;

    for walker in candidates {
        let (score, score_breakdown) = compute_score(walker, zone, day);

        let replaces = best.as_ref().is_none_or(|current| score > current.score);
        if replaces {
            best = Some(ScoredWalker {
                walker: walker.clone(),
                score,
                score_breakdown,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{compute_score, select_best};
    use crate::models::walker::{AvailabilitySlot, DayCode, Walker};

    fn walker(id_seed: u128, zones: &[&str], days: &[DayCode], rate: f64) -> Walker {
        Walker {
            id: Uuid::from_u128(id_seed),
            name: Some("test-walker".to_string()),
            zones: zones.iter().map(|z| z.to_string()).collect(),
            availability: days
                .iter()
                .map(|day| AvailabilitySlot {
                    day: *day,
                    slots: vec![],
                })
                .collect(),
            rate_per_hour: rate,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_candidate_list_selects_nothing() {
        assert!(select_best(&[], "Roma", DayCode::Sat).is_none());
    }

    #[test]
    fn zone_and_day_match_with_unknown_rate_scores_thirty() {
        let candidate = walker(1, &["Roma"], &[DayCode::Sat], 0.0);
        let (score, breakdown) = compute_score(&candidate, "Roma", DayCode::Sat);

        assert_eq!(score, 30);
        assert_eq!(breakdown.zone_score, 20);
        assert_eq!(breakdown.day_score, 10);
        assert_eq!(breakdown.price_score, 0);
    }

    #[test]
    fn score_never_exceeds_forty() {
        let candidate = walker(1, &["Roma"], &[DayCode::Sat], 0.01);
        let (score, _) = compute_score(&candidate, "Roma", DayCode::Sat);

        assert_eq!(score, 40);
    }

    #[test]
    fn rate_at_ceiling_contributes_nothing() {
        let candidate = walker(1, &[], &[], 150.0);
        let (_, breakdown) = compute_score(&candidate, "Roma", DayCode::Sat);

        assert_eq!(breakdown.price_score, 0);
    }

    #[test]
    fn rate_above_ceiling_clamps_to_zero_not_negative() {
        let candidate = walker(1, &[], &[], 300.0);
        let (score, breakdown) = compute_score(&candidate, "Roma", DayCode::Sat);

        assert_eq!(breakdown.price_score, 0);
        assert_eq!(score, 0);
    }

    #[test]
    fn rate_of_sixty_earns_six_price_points() {
        let candidate = walker(1, &[], &[], 60.0);
        let (_, breakdown) = compute_score(&candidate, "Roma", DayCode::Sat);

        assert_eq!(breakdown.price_score, 6);
    }

    #[test]
    fn negative_rate_is_treated_as_unknown() {
        let candidate = walker(1, &[], &[], -5.0);
        let (_, breakdown) = compute_score(&candidate, "Roma", DayCode::Sat);

        assert_eq!(breakdown.price_score, 0);
    }

    #[test]
    fn zone_match_is_case_sensitive() {
        let candidate = walker(1, &["roma"], &[], 0.0);
        let (score, _) = compute_score(&candidate, "Roma", DayCode::Sat);

        assert_eq!(score, 0);
    }

    #[test]
    fn walker_with_no_zones_or_days_still_scores_the_price_component() {
        let candidate = walker(1, &[], &[], 100.0);
        let (score, breakdown) = compute_score(&candidate, "Roma", DayCode::Sat);

        assert_eq!(breakdown.price_score, 3);
        assert_eq!(score, 3);
    }

    #[test]
    fn worked_example_picks_the_zone_match() {
        let candidates = [
            walker(1, &["Roma"], &[DayCode::Sat], 100.0),
            walker(2, &[], &[DayCode::Sat], 50.0),
        ];

        let best = select_best(&candidates, "Roma", DayCode::Sat).unwrap();

        assert_eq!(best.walker.id, Uuid::from_u128(1));
        assert_eq!(best.score, 33);

        let (runner_up, _) = compute_score(&candidates[1], "Roma", DayCode::Sat);
        assert_eq!(runner_up, 17);
    }

    #[test]
    fn ties_keep_the_first_candidate_seen() {
        let candidates = [
            walker(1, &["Roma"], &[DayCode::Sat], 0.0),
            walker(2, &["Roma"], &[DayCode::Sat], 0.0),
        ];

        let best = select_best(&candidates, "Roma", DayCode::Sat).unwrap();

        assert_eq!(best.walker.id, Uuid::from_u128(1));
    }

    #[test]
    fn later_strictly_better_candidate_wins() {
        let candidates = [
            walker(1, &[], &[DayCode::Sat], 50.0),
            walker(2, &["Roma"], &[DayCode::Sat], 100.0),
        ];

        let best = select_best(&candidates, "Roma", DayCode::Sat).unwrap();

        assert_eq!(best.walker.id, Uuid::from_u128(2));
        assert_eq!(best.score, 33);
    }
}
