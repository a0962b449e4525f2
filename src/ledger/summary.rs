//! Derived rating accumulation over a ledger snapshot
//!
//! The summary is a pure recomputation: no caching, no incremental deltas.
//! It folds the point-delta calculator left-to-right over the eligible
//! records, chaining each result's rating into the next.

use crate::rating::calculator::compute_delta;
use crate::types::{CalculationResult, CalculationSummary, MatchRecord};
use crate::utils::parse_rating_text;

/// Compute the rating accumulation for the given current-rating text
///
/// Returns `None` when the text is empty, the ledger is empty, or no record
/// is eligible (complete with a non-empty opponent rating). Current-rating
/// text with no numeric prefix still produces a summary: the starting rating
/// is NaN and stays sticky through every cumulative value, while each
/// per-match delta degrades to the conservative band and remains finite.
/// The fold never filters such entries or substitutes a sentinel.
pub fn compute_summary(
    current_rating_text: &str,
    records: &[MatchRecord],
) -> Option<CalculationSummary> {
    if current_rating_text.is_empty() || records.is_empty() {
        return None;
    }

    let starting_rating = parse_rating_text(current_rating_text);
    let mut running_rating = starting_rating;

    let results: Vec<CalculationResult> = records
        .iter()
        .filter(|record| record.is_eligible())
        .map(|record| {
            let points_delta = compute_delta(record, running_rating);
            let rating_before = running_rating;
            running_rating += points_delta;

            CalculationResult {
                match_id: record.id,
                outcome: record.outcome,
                rating_before,
                points_delta,
                rating_after: running_rating,
            }
        })
        .collect();

    if results.is_empty() {
        return None;
    }

    Some(CalculationSummary {
        starting_rating,
        ending_rating: running_rating,
        total_change: running_rating - starting_rating,
        results,
    })
}
