//! Time-decayed popularity ranking.
//!
//! A post with `v` votes whose age rounds to `h` whole hours scores
//! `v * exp(-h / 24)`. Listings are ordered by that score, highest first.
//! Scores are compared unrounded; rounding to six places happens only when a
//! score is exposed through [`display_score`].

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Time scale of the decay: after this many hours a vote weighs `1/e`.
pub(crate) const DECAY_HOURS: f64 = 24.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const DISPLAY_SCALE: f64 = 1_000_000.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RankingError {
    #[error("post {post_id} has no created_at")]
    MissingCreatedAt { post_id: i64 },

    #[error("post {post_id} has no vote count")]
    MissingVoteCount { post_id: i64 },

    #[error("post {post_id} has negative vote count {vote_count}")]
    NegativeVoteCount { post_id: i64, vote_count: i64 },
}

/// A post as seen by the ranking: identity, creation time and current votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RankCandidate {
    pub(crate) id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) vote_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoredCandidate {
    pub(crate) candidate: RankCandidate,
    pub(crate) age_hours: i64,
    pub(crate) score: f64,
}

impl ScoredCandidate {
    pub(crate) fn display_score(&self) -> f64 {
        display_score(self.score)
    }
}

/// Whole hours between `created_at` and `now`, halves rounded away from zero.
pub(crate) fn age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_ms = (now - created_at).num_milliseconds();
    (elapsed_ms as f64 / MILLIS_PER_HOUR).round() as i64
}

pub(crate) fn score(vote_count: i64, age_hours: i64) -> f64 {
    vote_count as f64 * (-(age_hours as f64) / DECAY_HOURS).exp()
}

/// Score rounded to six decimal places.
pub(crate) fn display_score(score: f64) -> f64 {
    (score * DISPLAY_SCALE).round() / DISPLAY_SCALE
}

pub(crate) fn score_candidate(candidate: RankCandidate, now: DateTime<Utc>) -> ScoredCandidate {
    let age_hours = age_hours(candidate.created_at, now);
    ScoredCandidate {
        candidate,
        age_hours,
        score: score(candidate.vote_count, age_hours),
    }
}

/// Scores every candidate once and sorts them into listing order.
///
/// Order: score descending, then `created_at` descending, then `id`
/// descending. The result does not depend on the order of `candidates`.
pub(crate) fn score_all(candidates: &[RankCandidate], now: DateTime<Utc>) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|candidate| score_candidate(*candidate, now))
        .collect();

    scored.sort_by(listing_order);
    scored
}

/// Ids of `candidates` in listing order. Same length as the input.
pub(crate) fn rank(candidates: &[RankCandidate], now: DateTime<Utc>) -> Vec<i64> {
    score_all(candidates, now)
        .into_iter()
        .map(|scored| scored.candidate.id)
        .collect()
}

fn listing_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.candidate.created_at.cmp(&a.candidate.created_at))
        .then_with(|| b.candidate.id.cmp(&a.candidate.id))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{
        RankCandidate, age_hours, display_score, rank, score, score_all, score_candidate,
    };

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("fixed timestamp must be valid")
    }

    fn candidate(id: i64, vote_count: i64, hours_ago: i64) -> RankCandidate {
        RankCandidate {
            id,
            created_at: now() - Duration::hours(hours_ago),
            vote_count,
        }
    }

    #[test]
    fn age_hours_rounds_to_nearest_hour() {
        let now = now();
        assert_eq!(age_hours(now, now), 0);
        assert_eq!(age_hours(now - Duration::minutes(29), now), 0);
        assert_eq!(age_hours(now - Duration::minutes(31), now), 1);
        assert_eq!(age_hours(now - Duration::minutes(90), now), 2);
        assert_eq!(age_hours(now - Duration::minutes(150), now), 3);
        assert_eq!(age_hours(now - Duration::hours(240), now), 240);
    }

    #[test]
    fn fresh_post_scores_its_vote_count() {
        let scored = score_candidate(candidate(1, 10, 0), now());
        assert_eq!(scored.age_hours, 0);
        assert!((scored.score - 10.0).abs() < 1e-12);
    }

    #[test]
    fn day_old_post_decays_by_factor_e() {
        let scored = score_candidate(candidate(2, 10, 24), now());
        assert_eq!(scored.display_score(), 3.678794);
    }

    #[test]
    fn very_old_post_decays_below_fresh_small_post() {
        let old = score(100, 240);
        assert!((old - 0.004540).abs() < 1e-6);
        assert!(old < score(3, 0));
    }

    #[test]
    fn score_is_strictly_increasing_in_votes() {
        for hours in [0, 1, 12, 24, 100] {
            for votes in 0..20 {
                assert!(score(votes + 1, hours) > score(votes, hours));
            }
        }
    }

    #[test]
    fn score_is_strictly_decreasing_in_age_for_positive_votes() {
        for votes in [1, 5, 1000] {
            for hours in 0..200 {
                assert!(score(votes, hours + 1) < score(votes, hours));
            }
        }
    }

    #[test]
    fn equal_votes_and_rounded_age_give_equal_scores() {
        let now = now();
        let a = RankCandidate {
            id: 1,
            created_at: now - Duration::minutes(5 * 60 + 10),
            vote_count: 7,
        };
        let b = RankCandidate {
            id: 2,
            created_at: now - Duration::minutes(4 * 60 + 50),
            vote_count: 7,
        };
        assert_eq!(score_candidate(a, now).score, score_candidate(b, now).score);
    }

    #[test]
    fn zero_votes_score_zero_at_any_age() {
        assert_eq!(score(0, 0), 0.0);
        assert_eq!(score(0, 500), 0.0);
    }

    #[test]
    fn display_score_rounds_to_six_places() {
        assert_eq!(display_score(0.123_456_789), 0.123457);
        assert_eq!(display_score(10.0), 10.0);
    }

    #[test]
    fn recent_post_outranks_equally_voted_older_post() {
        let a = candidate(1, 10, 0);
        let b = candidate(2, 10, 24);
        assert_eq!(rank(&[b, a], now()), vec![1, 2]);
    }

    #[test]
    fn decay_dominates_raw_votes_at_extreme_age() {
        let c = candidate(3, 3, 0);
        let d = candidate(4, 100, 240);
        assert_eq!(rank(&[d, c], now()), vec![3, 4]);
    }

    #[test]
    fn empty_input_ranks_to_empty_output() {
        assert!(rank(&[], now()).is_empty());
    }

    #[test]
    fn single_post_is_returned_alone() {
        assert_eq!(rank(&[candidate(9, 0, 1000)], now()), vec![9]);
    }

    #[test]
    fn equal_scores_put_newer_post_first() {
        // zero votes score zero at any age
        let older = candidate(1, 0, 10);
        let newer = candidate(2, 0, 1);
        assert_eq!(rank(&[older, newer], now()), vec![2, 1]);
    }

    #[test]
    fn identical_score_and_creation_time_fall_back_to_higher_id_first() {
        let a = candidate(11, 5, 3);
        let b = candidate(12, 5, 3);
        assert_eq!(rank(&[a, b], now()), vec![12, 11]);
        assert_eq!(rank(&[b, a], now()), vec![12, 11]);
    }

    #[test]
    fn rank_is_idempotent_and_independent_of_input_order() {
        let candidates = vec![
            candidate(1, 4, 2),
            candidate(2, 9, 30),
            candidate(3, 4, 2),
            candidate(4, 0, 0),
            candidate(5, 1, 0),
            candidate(6, 12, 48),
        ];
        let first = rank(&candidates, now());
        let second = rank(&candidates, now());
        assert_eq!(first, second);

        let mut reversed = candidates.clone();
        reversed.reverse();
        assert_eq!(rank(&reversed, now()), first);
    }

    #[test]
    fn rank_keeps_every_input_id_including_duplicates() {
        let candidates = vec![candidate(1, 2, 0), candidate(1, 2, 0), candidate(2, 5, 5)];
        let ranked = rank(&candidates, now());
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked.iter().filter(|id| **id == 1).count(), 2);
    }

    #[test]
    fn score_all_is_sorted_by_descending_score() {
        let candidates = vec![
            candidate(1, 1, 0),
            candidate(2, 50, 72),
            candidate(3, 8, 6),
            candidate(4, 20, 24),
        ];
        let scored = score_all(&candidates, now());
        assert!(scored.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn future_post_is_ranked_without_error() {
        let future = RankCandidate {
            id: 1,
            created_at: now() + Duration::hours(2),
            vote_count: 1,
        };
        let scored = score_candidate(future, now());
        assert_eq!(scored.age_hours, -2);
        assert!(scored.score > 1.0);
    }
}
