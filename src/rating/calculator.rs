//! Point-delta calculation for a single match result
//!
//! The calculator is a pure function over one match record and the player's
//! running rating. It never panics and never returns an error: opponent text
//! with no numeric prefix makes the rating difference NaN, which selects the
//! conservative unbounded band (expected 0, unexpected 40) and still yields
//! a finite delta.

use crate::rating::tables::{coefficient_for, points_for_difference};
use crate::types::{CompetitionClass, MatchOutcome, MatchRecord};
use crate::utils::{parse_rating_text, rating_difference};

/// Defeat penalty factor for club-league results
pub const DEFEAT_FACTOR_CLUB_LEAGUE: f64 = 0.8;
/// Defeat penalty factor for open-tournament results; tournament losses are
/// damped harder by federation rule
pub const DEFEAT_FACTOR_OPEN_TOURNAMENT: f64 = 0.5;

fn defeat_factor(class: CompetitionClass) -> f64 {
    match class {
        CompetitionClass::ClubLeague => DEFEAT_FACTOR_CLUB_LEAGUE,
        CompetitionClass::OpenTournament => DEFEAT_FACTOR_OPEN_TOURNAMENT,
    }
}

/// Unsigned base points before the category coefficient is applied
fn base_points(
    diff: f64,
    outcome: MatchOutcome,
    is_favorite: bool,
    class: CompetitionClass,
) -> f64 {
    let (expected, unexpected) = points_for_difference(diff);

    match outcome {
        MatchOutcome::Victory => {
            if is_favorite {
                expected
            } else {
                unexpected
            }
        }
        // Losing as the favorite costs the unexpected value; losing as the
        // underdog only the expected one.
        MatchOutcome::Defeat => {
            let base = if is_favorite { unexpected } else { expected };
            base * defeat_factor(class)
        }
    }
}

/// Compute the signed point change for one match at the given running rating
///
/// A tie is not a favorite position: under the federation rule, equal ratings
/// take the underdog branch of the base-point selection.
pub fn compute_delta(record: &MatchRecord, current_rating: f64) -> f64 {
    let opponent_rating = parse_rating_text(&record.opponent_rating);
    let diff = rating_difference(current_rating, opponent_rating);
    let is_favorite = current_rating > opponent_rating;

    let base = base_points(diff, record.outcome, is_favorite, record.class);
    let coefficient = coefficient_for(record.class, &record.category).unwrap_or(f64::NAN);
    let final_points = base * coefficient;

    match record.outcome {
        MatchOutcome::Victory => final_points,
        MatchOutcome::Defeat => -final_points,
    }
}
