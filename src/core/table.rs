//! Shared query pipeline for every warehouse table: build, execute, optionally combine
//! seasons, round.

use tracing::{info, instrument};

use crate::core::aggregate::OutputKind::{Float, Integer};
use crate::core::aggregate::{combine_seasons, round_floats, CombineSpec};
use crate::core::query_builder::build_query;
use crate::error::Result;
use crate::infra::db_external::QueryExecutor;
use crate::infra::disclaimer::{announce, DataSource};
use crate::models::context::QueryOutcome;
use crate::models::filter::{FilterMapping, FilterValue, Qualifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Skaters,
    Goalies,
    Teams,
    TeamGames,
    SkaterGames,
    GoalieGames,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Skaters => "skaters",
            Table::Goalies => "goalies",
            Table::Teams => "teams",
            Table::TeamGames => "team_games",
            Table::SkaterGames => "skater_games",
            Table::GoalieGames => "goalie_games",
        }
    }

    /// How season rows fold together; game logs never combine.
    pub fn combine_spec(&self) -> Option<&'static CombineSpec> {
        match self {
            Table::Skaters => Some(&SKATER_SEASONS),
            Table::Goalies => Some(&GOALIE_SEASONS),
            Table::Teams => Some(&TEAM_SEASONS),
            Table::TeamGames | Table::SkaterGames | Table::GoalieGames => None,
        }
    }

    pub fn source(&self) -> DataSource {
        DataSource::MoneyPuck
    }
}

static SKATER_SEASONS: CombineSpec = CombineSpec {
    entity_key: "playerID",
    identity_columns: &["name", "team", "position", "situation"],
    sum_columns: &[
        ("gamesPlayed", Integer),
        ("iceTime", Float),
        ("points", Integer),
        ("goals", Integer),
        ("individualxGoals", Float),
        ("xGoalsFor", Float),
        ("goalsFor", Integer),
        ("xGoalsAgainst", Float),
        ("goalsAgainst", Integer),
        ("penaltiesTaken", Integer),
        ("penaltiesDrawn", Integer),
        ("faceoffsWon", Integer),
        ("faceoffsLost", Integer),
        ("shotsBlocked", Integer),
        ("oZoneShifts", Integer),
        ("dZoneShifts", Integer),
        ("neutralZoneShifts", Integer),
        ("flyShifts", Integer),
    ],
    rates: &[
        ("goalsFor", "goalsForPerHour"),
        ("goalsAgainst", "goalsAgainstPerHour"),
        ("xGoalsFor", "xGoalsForPerHour"),
        ("xGoalsAgainst", "xGoalsAgainstPerHour"),
        ("points", "pointsPerHour"),
        ("goals", "goalsPerHour"),
    ],
    average_ice_time: true,
};

static GOALIE_SEASONS: CombineSpec = CombineSpec {
    entity_key: "playerID",
    identity_columns: &["name", "team", "situation"],
    sum_columns: &[
        ("gamesPlayed", Integer),
        ("iceTime", Integer),
        ("xGoals", Float),
        ("goals", Integer),
        ("lowDangerShots", Integer),
        ("mediumDangerShots", Integer),
        ("highDangerShots", Integer),
        ("lowDangerxGoals", Float),
        ("mediumDangerxGoals", Float),
        ("highDangerxGoals", Float),
        ("lowDangerGoals", Integer),
        ("mediumDangerGoals", Integer),
        ("highDangerGoals", Integer),
    ],
    rates: &[],
    average_ice_time: false,
};

static TEAM_SEASONS: CombineSpec = CombineSpec {
    entity_key: "team",
    identity_columns: &["situation"],
    sum_columns: &[
        ("gamesPlayed", Integer),
        ("iceTime", Float),
        ("xGoalsFor", Float),
        ("goalsFor", Integer),
        ("xGoalsAgainst", Float),
        ("goalsAgainst", Integer),
    ],
    rates: &[
        ("goalsFor", "goalsForPerHour"),
        ("goalsAgainst", "goalsAgainstPerHour"),
        ("xGoalsFor", "xGoalsForPerHour"),
        ("xGoalsAgainst", "xGoalsAgainstPerHour"),
    ],
    average_ice_time: true,
};

/// Per-call switches that sit beside the filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions<'a> {
    pub order_by: &'a [&'a str],
    pub combine_seasons: bool,
    pub quiet: bool,
}

#[instrument(skip_all, fields(table = table.name()))]
pub async fn query_table<E: QueryExecutor>(
    executor: &E,
    table: Table,
    filters: &FilterMapping,
    qualifiers: &Qualifiers,
    options: QueryOptions<'_>,
) -> Result<QueryOutcome> {
    let built = build_query(table.name(), filters, qualifiers, options.order_by)?;
    let mut notices = built.notices;

    let mut rows = executor.execute(&built.sql).await?;
    info!(rows = rows.len(), "query returned");

    if options.combine_seasons {
        match (filters.get("season"), table.combine_spec()) {
            (Some(FilterValue::List(_)), Some(spec)) => {
                rows = combine_seasons(&rows, spec)?;
            }
            (_, None) => {
                let notice = format!("seasons cannot be combined for {}", table.name());
                info!("{}", notice);
                notices.push(notice);
            }
            (season, Some(_)) => {
                let requested = season.map(|s| s.to_string()).unwrap_or_else(|| "none".into());
                let notice = format!(
                    "combine_seasons was requested, but only one season ({}) was queried. \
                     Returning data for just that season.",
                    requested
                );
                info!("{}", notice);
                notices.push(notice);
            }
        }
    }

    round_floats(&mut rows);

    Ok(QueryOutcome {
        sql: built.sql,
        rows,
        notices,
        disclaimer: announce(table.source(), options.quiet),
    })
}
