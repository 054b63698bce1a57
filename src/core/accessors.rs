//! One entry point per warehouse table. Each turns its request into a filter mapping
//! and qualifiers and hands them to [`query_table`].

use tracing::warn;

use crate::core::query_builder::{END_DATE, START_DATE};
use crate::core::table::{query_table, QueryOptions, Table};
use crate::error::{QueryError, Result};
use crate::infra::db_external::QueryExecutor;
use crate::models::comparison::Comparison;
use crate::models::context::{
    GameLogRequest, GoalieSummaryRequest, QueryOutcome, SkaterSummaryRequest, TeamSummaryRequest,
};
use crate::models::filter::{FilterMapping, FilterValue, Qualifiers};

const SEASON_ORDER: &[&str] = &["team", "season"];
const GAME_ORDER: &[&str] = &["team", "gameDate"];

/// The `"ALL"` sentinel means no team filter at all.
fn insert_team(filters: &mut FilterMapping, team: &FilterValue) {
    if !team.is_all_sentinel() {
        filters.insert("team", team.clone());
    }
}

/// Season summaries for skaters, filtered by a minimum ice time.
pub async fn skater_summary<E: QueryExecutor>(
    executor: &E,
    req: &SkaterSummaryRequest,
) -> Result<QueryOutcome> {
    let mut filters = FilterMapping::new().with("season", req.season.clone());
    insert_team(&mut filters, &req.team);
    if let Some(name) = &req.name {
        filters.insert("name", name.clone());
    }
    filters.insert("situation", req.situation.clone());

    let qualifiers = Qualifiers::new().with("iceTime", Comparison::at_least(req.min_icetime));

    let options = QueryOptions {
        order_by: SEASON_ORDER,
        combine_seasons: req.combine_seasons,
        quiet: req.quiet,
    };
    query_table(executor, Table::Skaters, &filters, &qualifiers, options).await
}

/// Season summaries for goalies, filtered by a minimum number of games played.
pub async fn goalie_summary<E: QueryExecutor>(
    executor: &E,
    req: &GoalieSummaryRequest,
) -> Result<QueryOutcome> {
    let mut filters = FilterMapping::new().with("season", req.season.clone());
    insert_team(&mut filters, &req.team);
    filters.insert("situation", req.situation.clone());

    let qualifiers =
        Qualifiers::new().with("gamesPlayed", Comparison::at_least(req.min_games_played));

    let options = QueryOptions {
        order_by: SEASON_ORDER,
        combine_seasons: req.combine_seasons,
        quiet: req.quiet,
    };
    query_table(executor, Table::Goalies, &filters, &qualifiers, options).await
}

pub async fn team_summary<E: QueryExecutor>(
    executor: &E,
    req: &TeamSummaryRequest,
) -> Result<QueryOutcome> {
    let mut filters = FilterMapping::new().with("season", req.season.clone());
    insert_team(&mut filters, &req.team);
    filters.insert("situation", req.situation.clone());

    let options = QueryOptions {
        order_by: SEASON_ORDER,
        combine_seasons: req.combine_seasons,
        quiet: req.quiet,
    };
    query_table(executor, Table::Teams, &filters, &Qualifiers::new(), options).await
}

pub async fn team_games<E: QueryExecutor>(
    executor: &E,
    req: &GameLogRequest,
) -> Result<QueryOutcome> {
    let mut outcome = game_log(executor, Table::TeamGames, req, false).await?;
    if req.name.is_some() {
        let notice = "Team game logs cannot be filtered by 'name'. Disregarding the input for 'name'.";
        warn!("{}", notice);
        outcome.notices.push(notice.to_string());
    }
    Ok(outcome)
}

pub async fn skater_games<E: QueryExecutor>(
    executor: &E,
    req: &GameLogRequest,
) -> Result<QueryOutcome> {
    game_log(executor, Table::SkaterGames, req, true).await
}

pub async fn goalie_games<E: QueryExecutor>(
    executor: &E,
    req: &GameLogRequest,
) -> Result<QueryOutcome> {
    game_log(executor, Table::GoalieGames, req, true).await
}

async fn game_log<E: QueryExecutor>(
    executor: &E,
    table: Table,
    req: &GameLogRequest,
    by_name: bool,
) -> Result<QueryOutcome> {
    if req.season.is_none() && req.start_date.is_none() && req.end_date.is_none() {
        return Err(QueryError::MissingInput(
            "'season', 'start_date', or 'end_date'".to_string(),
        ));
    }

    let mut qualifiers = Qualifiers::new();
    if let Some(start) = &req.start_date {
        qualifiers.insert(START_DATE, start.as_str());
    }
    if let Some(end) = &req.end_date {
        qualifiers.insert(END_DATE, end.as_str());
    }

    let mut filters = FilterMapping::new();
    if let Some(season) = &req.season {
        filters.insert("season", season.clone());
    }
    insert_team(&mut filters, &req.team);
    if by_name {
        if let Some(name) = &req.name {
            filters.insert("name", name.clone());
        }
    }
    filters.insert("situation", req.situation.clone());

    let options = QueryOptions {
        order_by: GAME_ORDER,
        combine_seasons: false,
        quiet: req.quiet,
    };
    query_table(executor, table, &filters, &qualifiers, options).await
}
