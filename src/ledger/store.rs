//! Match ledger store: ordered records, lifecycle transitions, active edit
//!
//! The ledger is an explicitly owned state object. All mutations are
//! synchronous and infallible: unknown ids and refused transitions are
//! silent no-ops observed through the queries, never errors.

use crate::ledger::summary::compute_summary;
use crate::rating::tables::{coefficient_for, default_category, DEFAULT_CLASS};
use crate::types::{
    CalculationSummary, CompetitionClass, MatchId, MatchOutcome, MatchRecord,
};
use crate::utils::current_timestamp;
use tracing::{debug, warn};

/// Statistics about ledger operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerStats {
    /// Total number of records created
    pub matches_added: u64,
    /// Total number of confirmations accepted
    pub matches_completed: u64,
    /// Total number of records removed (cancelled or deleted)
    pub matches_removed: u64,
}

/// One field mutation applied to a record mid-edit
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Outcome(MatchOutcome),
    Class(CompetitionClass),
    Category(String),
    OpponentRating(String),
}

/// The ordered collection of match records plus the active-edit pointer
#[derive(Debug, Clone)]
pub struct MatchLedger {
    records: Vec<MatchRecord>,
    editing: Option<MatchId>,
    next_id: MatchId,
    default_class: CompetitionClass,
    default_category: String,
    stats: LedgerStats,
}

impl Default for MatchLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchLedger {
    /// Create an empty ledger with the federation's global defaults
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_CLASS, default_category(DEFAULT_CLASS))
    }

    /// Create an empty ledger with session-specific defaults
    ///
    /// The defaults seed the first record of an empty ledger; later records
    /// inherit from the last record instead. A category that does not belong
    /// to the class falls back to the class default.
    pub fn with_defaults(class: CompetitionClass, category: &str) -> Self {
        let category = if coefficient_for(class, category).is_some() {
            category.to_string()
        } else {
            warn!(
                "Session default category '{}' does not belong to {}, using class default",
                category, class
            );
            default_category(class).to_string()
        };

        Self {
            records: Vec::new(),
            editing: None,
            next_id: 1,
            default_class: class,
            default_category: category,
            stats: LedgerStats::default(),
        }
    }

    /// Ordered read-only view of all records
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Id of the record currently open for editing, if any
    pub fn editing_id(&self) -> Option<MatchId> {
        self.editing
    }

    /// Number of records in the ledger
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Operation counters for this ledger
    pub fn stats(&self) -> LedgerStats {
        self.stats
    }

    fn find(&self, id: MatchId) -> Option<&MatchRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn find_mut(&mut self, id: MatchId) -> Option<&mut MatchRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    /// Append a new incomplete record and make it the edit target
    ///
    /// Class and category are inherited from the current last record so a
    /// user entering many matches of the same type never re-selects them;
    /// an empty ledger uses the session defaults. If another record was
    /// mid-edit, it keeps whatever field values were already applied
    /// (last editor wins).
    pub fn add_match(&mut self) {
        let (class, category) = match self.records.last() {
            Some(last) => (last.class, last.category.clone()),
            None => (self.default_class, self.default_category.clone()),
        };

        let record = MatchRecord {
            id: self.next_id,
            outcome: MatchOutcome::Victory,
            class,
            category,
            opponent_rating: String::new(),
            complete: false,
            created_at: current_timestamp(),
        };

        debug!("Adding match {} ({} / {})", record.id, record.class, record.category);
        self.next_id += 1;
        self.editing = Some(record.id);
        self.records.push(record);
        self.stats.matches_added += 1;
    }

    /// Apply one field edit to a record; no-op for an unknown id
    ///
    /// Changing the class also resets the category to the new class's
    /// default, keeping the category-belongs-to-class invariant without
    /// relying on the caller. A category outside the record's class is
    /// ignored for the same reason.
    pub fn update_match(&mut self, id: MatchId, edit: FieldEdit) {
        let Some(record) = self.find_mut(id) else {
            debug!("Ignoring update for unknown match {}", id);
            return;
        };

        match edit {
            FieldEdit::Outcome(outcome) => record.outcome = outcome,
            FieldEdit::Class(class) => {
                record.class = class;
                record.category = default_category(class).to_string();
            }
            FieldEdit::Category(category) => {
                if coefficient_for(record.class, &category).is_some() {
                    record.category = category;
                } else {
                    warn!(
                        "Ignoring category '{}' not in class {} for match {}",
                        category, record.class, id
                    );
                }
            }
            FieldEdit::OpponentRating(text) => record.opponent_rating = text,
        }
    }

    /// Confirm a record, closing its edit session
    ///
    /// The silent validation gate: a record with an empty opponent rating
    /// stays incomplete and stays the edit target, with no error surfaced.
    pub fn complete_match(&mut self, id: MatchId) {
        let Some(record) = self.find_mut(id) else {
            debug!("Ignoring completion for unknown match {}", id);
            return;
        };

        if record.opponent_rating.is_empty() {
            warn!("Refusing to complete match {} without an opponent rating", id);
            return;
        }

        record.complete = true;
        self.editing = None;
        self.stats.matches_completed += 1;
        debug!("Match {} completed", id);
    }

    /// Re-open a record for editing, regardless of its state
    pub fn edit_match(&mut self, id: MatchId) {
        self.editing = Some(id);
    }

    /// Close the edit session on a record
    ///
    /// A record that was never completed is removed from the ledger; a
    /// previously completed one keeps whatever field values edits already
    /// applied. The edit pointer is always cleared.
    pub fn cancel_edit(&mut self, id: MatchId) {
        let never_completed = self.find(id).is_some_and(|record| !record.complete);
        if never_completed {
            debug!("Cancel removes never-completed match {}", id);
            self.records.retain(|record| record.id != id);
            self.stats.matches_removed += 1;
        }
        self.editing = None;
    }

    /// Delete a record unconditionally
    pub fn remove_match(&mut self, id: MatchId) {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);

        if self.records.len() < before {
            self.stats.matches_removed += 1;
            debug!("Match {} removed", id);
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    /// Derived accumulation over the current ledger snapshot
    pub fn compute_summary(&self, current_rating_text: &str) -> Option<CalculationSummary> {
        compute_summary(current_rating_text, &self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_opponent(ledger: &mut MatchLedger, id: MatchId, text: &str) {
        ledger.update_match(id, FieldEdit::OpponentRating(text.to_string()));
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = MatchLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.editing_id(), None);
    }

    #[test]
    fn test_add_match_defaults() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();

        let record = &ledger.records()[0];
        assert_eq!(record.id, 1);
        assert_eq!(record.outcome, MatchOutcome::Victory);
        assert_eq!(record.class, CompetitionClass::ClubLeague);
        assert_eq!(record.category, "Provincial Lower");
        assert_eq!(record.opponent_rating, "");
        assert!(!record.complete);
        assert_eq!(ledger.editing_id(), Some(1));
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        ledger.add_match();
        ledger.remove_match(2);
        ledger.add_match();

        let ids: Vec<_> = ledger.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_add_inherits_class_and_category_from_last_record() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        ledger.update_match(1, FieldEdit::Class(CompetitionClass::OpenTournament));
        ledger.update_match(1, FieldEdit::Category("Series A".to_string()));
        set_opponent(&mut ledger, 1, "1100");
        ledger.complete_match(1);

        ledger.add_match();
        let second = &ledger.records()[1];
        assert_eq!(second.class, CompetitionClass::OpenTournament);
        assert_eq!(second.category, "Series A");
    }

    #[test]
    fn test_class_change_resets_category_to_class_default() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        ledger.update_match(1, FieldEdit::Class(CompetitionClass::OpenTournament));
        assert_eq!(ledger.records()[0].category, "Series B & C");

        ledger.update_match(1, FieldEdit::Class(CompetitionClass::ClubLeague));
        assert_eq!(ledger.records()[0].category, "Provincial Lower");
    }

    #[test]
    fn test_category_outside_class_is_ignored() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        ledger.update_match(1, FieldEdit::Category("Series A".to_string()));
        assert_eq!(ledger.records()[0].category, "Provincial Lower");
    }

    #[test]
    fn test_complete_refused_without_opponent_rating() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        ledger.complete_match(1);

        // Silent gate: still incomplete, still the edit target
        assert!(!ledger.records()[0].complete);
        assert_eq!(ledger.editing_id(), Some(1));
    }

    #[test]
    fn test_complete_with_opponent_rating() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        set_opponent(&mut ledger, 1, "950");
        ledger.complete_match(1);

        assert!(ledger.records()[0].complete);
        assert_eq!(ledger.editing_id(), None);
    }

    #[test]
    fn test_reedit_keeps_complete_flag() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        set_opponent(&mut ledger, 1, "950");
        ledger.complete_match(1);

        ledger.edit_match(1);
        assert_eq!(ledger.editing_id(), Some(1));
        assert!(ledger.records()[0].complete);

        set_opponent(&mut ledger, 1, "1020");
        assert!(ledger.records()[0].complete);
    }

    #[test]
    fn test_cancel_removes_never_completed_record() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        set_opponent(&mut ledger, 1, "950");
        ledger.cancel_edit(1);

        assert!(ledger.is_empty());
        assert_eq!(ledger.editing_id(), None);
    }

    #[test]
    fn test_cancel_keeps_completed_record() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        set_opponent(&mut ledger, 1, "950");
        ledger.complete_match(1);

        ledger.edit_match(1);
        // Edits already applied persist; cancel only exits edit mode
        set_opponent(&mut ledger, 1, "1020");
        ledger.cancel_edit(1);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].opponent_rating, "1020");
        assert_eq!(ledger.editing_id(), None);
    }

    #[test]
    fn test_remove_clears_edit_pointer() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        assert_eq!(ledger.editing_id(), Some(1));

        ledger.remove_match(1);
        assert!(ledger.is_empty());
        assert_eq!(ledger.editing_id(), None);
    }

    #[test]
    fn test_remove_other_record_keeps_edit_pointer() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        set_opponent(&mut ledger, 1, "950");
        ledger.complete_match(1);
        ledger.add_match();

        ledger.remove_match(1);
        assert_eq!(ledger.editing_id(), Some(2));
    }

    #[test]
    fn test_unknown_id_operations_are_noops() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();

        ledger.update_match(99, FieldEdit::Outcome(MatchOutcome::Defeat));
        ledger.complete_match(99);
        ledger.remove_match(99);
        ledger.cancel_edit(99);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].outcome, MatchOutcome::Victory);
        // cancel_edit always clears the pointer, even for unknown ids
        assert_eq!(ledger.editing_id(), None);
    }

    // Behavior for a second add/edit while another record is mid-edit is not
    // pinned down by the federation tool; observed behavior is "last editor
    // wins" with the prior record's partial edits left in place. This test
    // documents that ambiguity rather than asserting a resolution.
    #[test]
    fn test_second_add_abandons_prior_edit_in_place() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        set_opponent(&mut ledger, 1, "123");

        ledger.add_match();
        assert_eq!(ledger.editing_id(), Some(2));

        // The abandoned record keeps its partial edits and stays incomplete
        let first = &ledger.records()[0];
        assert_eq!(first.opponent_rating, "123");
        assert!(!first.complete);
    }

    #[test]
    fn test_with_defaults_rejects_foreign_category() {
        let ledger =
            MatchLedger::with_defaults(CompetitionClass::OpenTournament, "Provincial Lower");
        assert_eq!(ledger.default_category, "Series B & C");
    }

    #[test]
    fn test_stats_counters() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        set_opponent(&mut ledger, 1, "950");
        ledger.complete_match(1);
        ledger.add_match();
        ledger.cancel_edit(2);

        let stats = ledger.stats();
        assert_eq!(stats.matches_added, 2);
        assert_eq!(stats.matches_completed, 1);
        assert_eq!(stats.matches_removed, 1);
    }

    #[test]
    fn test_compute_summary_delegates_over_snapshot() {
        let mut ledger = MatchLedger::new();
        ledger.add_match();
        set_opponent(&mut ledger, 1, "950");
        ledger.complete_match(1);

        let summary = ledger.compute_summary("1000").unwrap();
        assert!((summary.ending_rating - 1006.8).abs() < 1e-9);
        assert!(ledger.compute_summary("").is_none());
    }
}
