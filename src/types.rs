//! Common types used throughout the points calculator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for match records within a ledger
pub type MatchId = u64;

/// Reported result of a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Victory,
    Defeat,
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Victory => write!(f, "victory"),
            MatchOutcome::Defeat => write!(f, "defeat"),
        }
    }
}

/// Top-level grouping of competitions; selects the defeat-penalty factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompetitionClass {
    ClubLeague,
    OpenTournament,
}

impl std::fmt::Display for CompetitionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionClass::ClubLeague => write!(f, "club-league"),
            CompetitionClass::OpenTournament => write!(f, "open-tournament"),
        }
    }
}

impl std::str::FromStr for CompetitionClass {
    type Err = crate::error::LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "club-league" => Ok(CompetitionClass::ClubLeague),
            "open-tournament" => Ok(CompetitionClass::OpenTournament),
            other => Err(crate::error::LedgerError::InvalidCommand {
                reason: format!("unknown competition class '{other}'"),
            }),
        }
    }
}

/// One reported result as entered by the user
///
/// `opponent_rating` is kept as raw text: it may be empty or non-numeric while
/// the record is being edited; only parsing at calculation time decides what
/// it is worth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub outcome: MatchOutcome,
    pub class: CompetitionClass,
    /// Category name; always one of the record's class per the rating table
    pub category: String,
    pub opponent_rating: String,
    /// Whether the user has confirmed this record
    pub complete: bool,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Whether this record participates in rating accumulation
    pub fn is_eligible(&self) -> bool {
        self.complete && !self.opponent_rating.is_empty()
    }
}

/// Per-match accumulation step derived from the ledger fold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    pub match_id: MatchId,
    pub outcome: MatchOutcome,
    pub rating_before: f64,
    pub points_delta: f64,
    pub rating_after: f64,
}

/// Ledger-level accumulation derived on demand
///
/// Absent entirely (callers receive `None`) when the current-rating text is
/// empty or no eligible match exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationSummary {
    pub starting_rating: f64,
    pub ending_rating: f64,
    pub total_change: f64,
    pub results: Vec<CalculationResult>,
}
