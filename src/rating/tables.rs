//! Static federation tables: competition categories and point bands
//!
//! Both tables are published by the federation and never change at runtime.
//! Categories are grouped by competition class, each carrying a multiplicative
//! coefficient; point bands map an absolute rating difference to the base
//! point values for expected and unexpected outcomes.

use crate::types::CompetitionClass;

/// One named competition category with its coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryEntry {
    pub name: &'static str,
    pub class: CompetitionClass,
    pub coefficient: f64,
}

/// Class used for the very first record of an empty ledger
pub const DEFAULT_CLASS: CompetitionClass = CompetitionClass::ClubLeague;

/// Categories of the club-league class
pub const CLUB_LEAGUE_CATEGORIES: &[CategoryEntry] = &[
    CategoryEntry {
        name: "Super Division",
        class: CompetitionClass::ClubLeague,
        coefficient: 2.2,
    },
    CategoryEntry {
        name: "National Division",
        class: CompetitionClass::ClubLeague,
        coefficient: 1.0,
    },
    CategoryEntry {
        name: "Regional Division",
        class: CompetitionClass::ClubLeague,
        coefficient: 0.95,
    },
    CategoryEntry {
        name: "Provincial 1",
        class: CompetitionClass::ClubLeague,
        coefficient: 0.9,
    },
    CategoryEntry {
        name: "Provincial Lower",
        class: CompetitionClass::ClubLeague,
        coefficient: 0.85,
    },
    CategoryEntry {
        name: "Veterans League",
        class: CompetitionClass::ClubLeague,
        coefficient: 0.65,
    },
];

/// Categories of the open-tournament class
pub const OPEN_TOURNAMENT_CATEGORIES: &[CategoryEntry] = &[
    CategoryEntry {
        name: "National Final",
        class: CompetitionClass::OpenTournament,
        coefficient: 2.5,
    },
    CategoryEntry {
        name: "National Pools",
        class: CompetitionClass::OpenTournament,
        coefficient: 2.2,
    },
    CategoryEntry {
        name: "National Qualifier",
        class: CompetitionClass::OpenTournament,
        coefficient: 1.5,
    },
    CategoryEntry {
        name: "Cup Late Rounds",
        class: CompetitionClass::OpenTournament,
        coefficient: 1.5,
    },
    CategoryEntry {
        name: "Series A",
        class: CompetitionClass::OpenTournament,
        coefficient: 1.5,
    },
    CategoryEntry {
        name: "Youth & Veterans Championship",
        class: CompetitionClass::OpenTournament,
        coefficient: 1.5,
    },
    CategoryEntry {
        name: "Lower Division Championship",
        class: CompetitionClass::OpenTournament,
        coefficient: 1.2,
    },
    CategoryEntry {
        name: "Cup Early Rounds",
        class: CompetitionClass::OpenTournament,
        coefficient: 1.2,
    },
    CategoryEntry {
        name: "Provincial Championship",
        class: CompetitionClass::OpenTournament,
        coefficient: 1.2,
    },
    CategoryEntry {
        name: "Series B & C",
        class: CompetitionClass::OpenTournament,
        coefficient: 1.0,
    },
    CategoryEntry {
        name: "Veterans Tournament",
        class: CompetitionClass::OpenTournament,
        coefficient: 0.65,
    },
];

/// One band of the point-difference table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointBand {
    /// Inclusive upper bound of the absolute rating difference
    pub max_diff: f64,
    /// Base points when the outcome matched the favorite prediction
    pub expected: f64,
    /// Base points when it did not
    pub unexpected: f64,
}

/// Point-difference bands, ascending thresholds, last band unbounded
pub const POINT_BANDS: &[PointBand] = &[
    PointBand {
        max_diff: 25.0,
        expected: 9.0,
        unexpected: 10.0,
    },
    PointBand {
        max_diff: 50.0,
        expected: 8.0,
        unexpected: 12.0,
    },
    PointBand {
        max_diff: 75.0,
        expected: 7.0,
        unexpected: 14.0,
    },
    PointBand {
        max_diff: 100.0,
        expected: 6.0,
        unexpected: 16.0,
    },
    PointBand {
        max_diff: 150.0,
        expected: 5.0,
        unexpected: 18.0,
    },
    PointBand {
        max_diff: 200.0,
        expected: 4.0,
        unexpected: 20.0,
    },
    PointBand {
        max_diff: 250.0,
        expected: 3.0,
        unexpected: 24.0,
    },
    PointBand {
        max_diff: 300.0,
        expected: 2.0,
        unexpected: 28.0,
    },
    PointBand {
        max_diff: 400.0,
        expected: 1.0,
        unexpected: 32.0,
    },
    PointBand {
        max_diff: f64::INFINITY,
        expected: 0.0,
        unexpected: 40.0,
    },
];

/// Get all categories defined for a competition class
pub fn categories_for(class: CompetitionClass) -> &'static [CategoryEntry] {
    match class {
        CompetitionClass::ClubLeague => CLUB_LEAGUE_CATEGORIES,
        CompetitionClass::OpenTournament => OPEN_TOURNAMENT_CATEGORIES,
    }
}

/// Look up the coefficient for a category name within a class
pub fn coefficient_for(class: CompetitionClass, name: &str) -> Option<f64> {
    categories_for(class)
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.coefficient)
}

/// Default category a record falls back to when its class changes
pub fn default_category(class: CompetitionClass) -> &'static str {
    match class {
        CompetitionClass::ClubLeague => "Provincial Lower",
        CompetitionClass::OpenTournament => "Series B & C",
    }
}

/// Base point values for an absolute rating difference
///
/// Selects the first band whose threshold covers the difference. A NaN
/// difference matches no band and degrades to the unbounded case
/// (expected 0, unexpected 40) instead of failing.
pub fn points_for_difference(diff: f64) -> (f64, f64) {
    POINT_BANDS
        .iter()
        .find(|band| diff <= band.max_diff)
        .map(|band| (band.expected, band.unexpected))
        .unwrap_or((0.0, 40.0))
}
