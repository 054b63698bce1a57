use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::models::filter::Scalar;

/// Primitive value types a warehouse column accepts in an equality filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Str,
    Int,
    Float,
}

impl ColumnType {
    pub fn of(value: &Scalar) -> Self {
        match value {
            Scalar::Str(_) => ColumnType::Str,
            Scalar::Int(_) => ColumnType::Int,
            Scalar::Float(_) => ColumnType::Float,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Str => write!(f, "str"),
            ColumnType::Int => write!(f, "int"),
            ColumnType::Float => write!(f, "float"),
        }
    }
}

const STR: &[ColumnType] = &[ColumnType::Str];
const INT: &[ColumnType] = &[ColumnType::Int];
const NUMBER: &[ColumnType] = &[ColumnType::Int, ColumnType::Float];

/// Seasons for which the warehouse holds data.
pub const VALID_SEASONS: RangeInclusive<i64> = 2008..=2025;

pub const VALID_SITUATIONS: &[&str] = &["all", "5on5", "4on5", "5on4", "other"];

/// Team codes as they appear in the source data. Legacy spellings (`N.J`, `L.A`,
/// `S.J`, `T.B`) sit next to the modern ones and are matched literally.
pub const VALID_TEAMS: &[&str] = &[
    "ANA", "ARI", "ATL", "BOS", "BUF", "CAR", "CBJ", "CGY", "CHI", "COL", "DAL", "DET", "EDM",
    "FLA", "L.A", "LAK", "MIN", "MTL", "N.J", "NJD", "NSH", "NYI", "NYR", "OTT", "PHI", "PIT",
    "S.J", "SEA", "SJS", "STL", "T.B", "TBL", "TOR", "UTA", "VAN", "VGK", "WPG", "WSH",
];

/// Accepted value types for a column, or `None` when the column is not part of the
/// warehouse schema.
pub fn column_types(column: &str) -> Option<&'static [ColumnType]> {
    let types = match column {
        "name" | "gameDate" | "team" | "opposingTeam" | "home_or_away" | "state"
        | "situation" | "position" => STR,
        "playerID" | "gameID" | "season" | "gamesPlayed" | "shotsAgainst" | "goalsAgainst"
        | "goals" | "points" | "primaryAssists" | "secondaryAssists" | "shots" | "goalsFor"
        | "corsiFor" | "corsiAgainst" | "lowDangerShots" | "mediumDangerShots"
        | "highDangerShots" | "lowDangerGoals" | "mediumDangerGoals" | "highDangerGoals"
        | "penaltiesTaken" | "penaltiesDrawn" | "faceoffsWon" | "faceoffsLost"
        | "shotsBlocked" | "oZoneShifts" | "dZoneShifts" | "neutralZoneShifts"
        | "flyShifts" => INT,
        "iceTime" | "xGoals" | "xGoalsAgainst" | "lowDangerxGoals" | "mediumDangerxGoals"
        | "highDangerxGoals" | "individualxGoals" | "xGoalsFor" | "xGoalsShare"
        | "corsiShare" | "corsiPercentage" | "xGoalsForPerHour" | "xGoalsAgainstPerHour"
        | "goalsForPerHour" | "goalsAgainstPerHour" | "pointsPerHour" | "goalsPerHour"
        | "averageIceTime" => NUMBER,
        _ => return None,
    };
    Some(types)
}

/// Closed set of values a domain-checked column may take.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueDomain {
    Range(RangeInclusive<i64>),
    Codes(&'static [&'static str]),
}

impl ValueDomain {
    pub fn contains(&self, value: &Scalar) -> bool {
        match (self, value) {
            (ValueDomain::Range(range), Scalar::Int(v)) => range.contains(v),
            (ValueDomain::Codes(codes), Scalar::Str(v)) => codes.contains(&v.as_str()),
            _ => false,
        }
    }

    /// Every valid value, in display order.
    pub fn values(&self) -> Vec<String> {
        match self {
            ValueDomain::Range(range) => range.clone().map(|v| v.to_string()).collect(),
            ValueDomain::Codes(codes) => codes.iter().map(|c| c.to_string()).collect(),
        }
    }
}

pub fn value_domain(column: &str) -> Option<ValueDomain> {
    match column {
        "season" => Some(ValueDomain::Range(VALID_SEASONS)),
        "team" => Some(ValueDomain::Codes(VALID_TEAMS)),
        "situation" => Some(ValueDomain::Codes(VALID_SITUATIONS)),
        _ => None,
    }
}
