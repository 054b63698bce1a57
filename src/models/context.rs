use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::filter::FilterValue;

/// One warehouse row, column name → value.
pub type ResultRow = Map<String, Value>;

/// Everything a table accessor hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub sql: String,
    pub rows: Vec<ResultRow>,
    pub notices: Vec<String>,
    /// Attribution line; `None` when the request asked to be quiet.
    pub disclaimer: Option<String>,
}

fn all_teams() -> FilterValue {
    FilterValue::from(FilterValue::ALL_TEAMS)
}

fn all_situations() -> FilterValue {
    FilterValue::from("all")
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkaterSummaryRequest {
    pub season: FilterValue,
    #[serde(default)]
    pub name: Option<FilterValue>,
    #[serde(default = "all_teams")]
    pub team: FilterValue,
    /// Minimum ice time, in the warehouse's ice-time unit.
    #[serde(default)]
    pub min_icetime: i64,
    #[serde(default = "all_situations")]
    pub situation: FilterValue,
    #[serde(default)]
    pub combine_seasons: bool,
    #[serde(default)]
    pub quiet: bool,
}

impl SkaterSummaryRequest {
    pub fn new(season: impl Into<FilterValue>) -> Self {
        Self {
            season: season.into(),
            name: None,
            team: all_teams(),
            min_icetime: 0,
            situation: all_situations(),
            combine_seasons: false,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalieSummaryRequest {
    pub season: FilterValue,
    #[serde(default = "all_teams")]
    pub team: FilterValue,
    #[serde(default)]
    pub min_games_played: i64,
    #[serde(default = "all_situations")]
    pub situation: FilterValue,
    #[serde(default)]
    pub combine_seasons: bool,
    #[serde(default)]
    pub quiet: bool,
}

impl GoalieSummaryRequest {
    pub fn new(season: impl Into<FilterValue>) -> Self {
        Self {
            season: season.into(),
            team: all_teams(),
            min_games_played: 0,
            situation: all_situations(),
            combine_seasons: false,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamSummaryRequest {
    pub season: FilterValue,
    #[serde(default = "all_teams")]
    pub team: FilterValue,
    #[serde(default = "all_situations")]
    pub situation: FilterValue,
    #[serde(default)]
    pub combine_seasons: bool,
    #[serde(default)]
    pub quiet: bool,
}

impl TeamSummaryRequest {
    pub fn new(season: impl Into<FilterValue>) -> Self {
        Self {
            season: season.into(),
            team: all_teams(),
            situation: all_situations(),
            combine_seasons: false,
            quiet: false,
        }
    }
}

/// Game-by-game logs. `name` only applies to the player tables.
#[derive(Debug, Clone, Deserialize)]
pub struct GameLogRequest {
    #[serde(default)]
    pub season: Option<FilterValue>,
    #[serde(default)]
    pub name: Option<FilterValue>,
    #[serde(default = "all_teams")]
    pub team: FilterValue,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "all_situations")]
    pub situation: FilterValue,
    #[serde(default)]
    pub quiet: bool,
}

impl Default for GameLogRequest {
    fn default() -> Self {
        Self {
            season: None,
            name: None,
            team: all_teams(),
            start_date: None,
            end_date: None,
            situation: all_situations(),
            quiet: false,
        }
    }
}
