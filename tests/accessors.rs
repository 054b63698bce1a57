//! End-to-end tests for the table accessors against a recording executor.

mod common;

use common::MockWarehouse;
use rinkstats::{
    goalie_games, goalie_summary, skater_games, skater_summary, team_games, team_summary,
    query_table, AggregationError, FilterMapping, FilterValue, GameLogRequest,
    GoalieSummaryRequest, QueryError, QueryOptions, Qualifiers, SkaterSummaryRequest, Table,
    TeamSummaryRequest,
};
use serde_json::json;

#[tokio::test]
async fn skater_summary_defaults() {
    let warehouse = MockWarehouse::default();
    let outcome = skater_summary(&warehouse, &SkaterSummaryRequest::new(2024_i64))
        .await
        .unwrap();

    assert_eq!(
        warehouse.last_query(),
        "SELECT * FROM skaters WHERE iceTime >=0 AND season = 2024 AND situation = 'all' \
         ORDER BY team, season"
    );
    assert_eq!(outcome.sql, warehouse.last_query());
    assert_eq!(
        outcome.disclaimer.as_deref(),
        Some("Data for this query provided by MoneyPuck (https://moneypuck.com).")
    );
}

#[tokio::test]
async fn skater_summary_with_teams_names_and_cutoff() {
    let warehouse = MockWarehouse::default();
    let mut req = SkaterSummaryRequest::new(vec![2023_i64, 2024]);
    req.team = FilterValue::from(vec!["TOR", "MTL"]);
    req.name = Some(FilterValue::from("Matthews"));
    req.min_icetime = 500;
    req.quiet = true;

    let outcome = skater_summary(&warehouse, &req).await.unwrap();
    assert_eq!(
        outcome.sql,
        "SELECT * FROM skaters WHERE iceTime >=500 \
         AND (season = 2023 OR season = 2024) \
         AND (team = 'TOR' OR team = 'MTL') \
         AND name = 'Matthews' \
         AND situation = 'all' \
         ORDER BY team, season"
    );
    assert_eq!(outcome.disclaimer, None);
}

#[tokio::test]
async fn combined_goalie_summary_sums_seasons() {
    let warehouse = MockWarehouse::with_rows(vec![
        json!({"playerID": 8476932, "name": "Joseph Woll", "team": "TOR", "situation": "all",
               "season": 2023, "gamesPlayed": 50, "iceTime": 2900, "xGoals": 130.123, "goals": 120,
               "lowDangerShots": 600, "mediumDangerShots": 200, "highDangerShots": 150,
               "lowDangerxGoals": 20.0, "mediumDangerxGoals": 30.0, "highDangerxGoals": 80.123,
               "lowDangerGoals": 15, "mediumDangerGoals": 30, "highDangerGoals": 75}),
        json!({"playerID": 8476932, "name": "Joseph Woll", "team": "TOR", "situation": "all",
               "season": 2024, "gamesPlayed": 60, "iceTime": 3400, "xGoals": 150.5, "goals": 140,
               "lowDangerShots": 700, "mediumDangerShots": 250, "highDangerShots": 160,
               "lowDangerxGoals": 25.0, "mediumDangerxGoals": 35.0, "highDangerxGoals": 90.5,
               "lowDangerGoals": 20, "mediumDangerGoals": 35, "highDangerGoals": 85}),
        json!({"playerID": 8475683, "name": "Sam Montembeault", "team": "MTL", "situation": "all",
               "season": 2024, "gamesPlayed": 62, "iceTime": 3600, "xGoals": 170.0, "goals": 165,
               "lowDangerShots": 720, "mediumDangerShots": 260, "highDangerShots": 170,
               "lowDangerxGoals": 26.0, "mediumDangerxGoals": 40.0, "highDangerxGoals": 104.0,
               "lowDangerGoals": 22, "mediumDangerGoals": 40, "highDangerGoals": 103}),
    ]);
    let mut req = GoalieSummaryRequest::new(vec![2023_i64, 2024]);
    req.team = FilterValue::from(vec!["TOR", "MTL"]);
    req.min_games_played = 10;
    req.combine_seasons = true;

    let outcome = goalie_summary(&warehouse, &req).await.unwrap();
    assert_eq!(
        outcome.sql,
        "SELECT * FROM goalies WHERE gamesPlayed >=10 \
         AND (season = 2023 OR season = 2024) \
         AND (team = 'TOR' OR team = 'MTL') \
         AND situation = 'all' \
         ORDER BY team, season"
    );

    assert_eq!(outcome.rows.len(), 2);
    let (mtl, tor) = (&outcome.rows[0], &outcome.rows[1]);
    assert_eq!(mtl["team"], json!("MTL"));
    assert_eq!(mtl["season"], json!("2024"));
    assert_eq!(tor["season"], json!("2023,2024"));
    assert_eq!(tor["gamesPlayed"], json!(110));
    assert_eq!(tor["goals"], json!(260));
    assert_eq!(tor["highDangerxGoals"], json!(170.62));
    assert!(outcome.notices.is_empty());
}

#[tokio::test]
async fn combine_with_single_season_is_a_noop() {
    let rows = vec![json!({"team": "TOR", "situation": "all", "season": 2023, "gamesPlayed": 82,
                           "iceTime": 4980.0, "xGoalsFor": 250.456, "goalsFor": 300,
                           "xGoalsAgainst": 230.0, "goalsAgainst": 250})];
    let warehouse = MockWarehouse::with_rows(rows);
    let mut req = TeamSummaryRequest::new(2023_i64);
    req.combine_seasons = true;

    let outcome = team_summary(&warehouse, &req).await.unwrap();
    assert_eq!(
        outcome.sql,
        "SELECT * FROM teams WHERE season = 2023 AND situation = 'all' ORDER BY team, season"
    );
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0]["season"], json!(2023));
    assert_eq!(outcome.rows[0]["xGoalsFor"], json!(250.46));
    assert_eq!(outcome.notices.len(), 1);
    assert!(outcome.notices[0].contains("only one season (2023)"));
}

#[tokio::test]
async fn combined_team_summary_derives_rates() {
    let warehouse = MockWarehouse::with_rows(vec![
        json!({"team": "TOR", "situation": "5on5", "season": 2023, "gamesPlayed": 82,
               "iceTime": 3000.0, "xGoalsFor": 150.0, "goalsFor": 160,
               "xGoalsAgainst": 140.0, "goalsAgainst": 130}),
        json!({"team": "TOR", "situation": "5on5", "season": 2024, "gamesPlayed": 82,
               "iceTime": 3000.0, "xGoalsFor": 160.0, "goalsFor": 170,
               "xGoalsAgainst": 150.0, "goalsAgainst": 140}),
    ]);
    let mut req = TeamSummaryRequest::new(vec![2023_i64, 2024]);
    req.team = FilterValue::from("TOR");
    req.situation = FilterValue::from("5on5");
    req.combine_seasons = true;

    let outcome = team_summary(&warehouse, &req).await.unwrap();
    let tor = &outcome.rows[0];
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(tor["season"], json!("2023,2024"));
    assert_eq!(tor["goalsFor"], json!(330));
    assert_eq!(tor["goalsForPerHour"], json!(3.3));
    assert_eq!(tor["xGoalsAgainstPerHour"], json!(2.9));
    assert_eq!(tor["averageIceTime"], json!(36.59));
}

#[tokio::test]
async fn zero_ice_time_fails_the_combination() {
    let warehouse = MockWarehouse::with_rows(vec![
        json!({"team": "SEA", "situation": "4on5", "season": 2023, "gamesPlayed": 0,
               "iceTime": 0, "xGoalsFor": 0.0, "goalsFor": 0, "xGoalsAgainst": 0.0, "goalsAgainst": 0}),
        json!({"team": "SEA", "situation": "4on5", "season": 2024, "gamesPlayed": 0,
               "iceTime": 0, "xGoalsFor": 0.0, "goalsFor": 0, "xGoalsAgainst": 0.0, "goalsAgainst": 0}),
    ]);
    let mut req = TeamSummaryRequest::new(vec![2023_i64, 2024]);
    req.combine_seasons = true;

    let err = team_summary(&warehouse, &req).await.unwrap_err();
    assert!(matches!(
        err,
        QueryError::Aggregation(AggregationError::DivideByZero { .. })
    ));
}

#[tokio::test]
async fn invalid_season_never_reaches_the_warehouse() {
    let warehouse = MockWarehouse::default();
    let err = skater_summary(&warehouse, &SkaterSummaryRequest::new(1999_i64))
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::Domain { .. }));
    assert!(err.to_string().contains("2008"));
    assert!(warehouse.queries().is_empty());
}

#[tokio::test]
async fn all_sentinel_inside_a_list_is_rejected() {
    let warehouse = MockWarehouse::default();
    let mut req = TeamSummaryRequest::new(2024_i64);
    req.team = FilterValue::from(vec!["ALL", "TOR"]);

    let err = team_summary(&warehouse, &req).await.unwrap_err();
    assert!(matches!(err, QueryError::Domain { ref column, .. } if column == "team"));
}

#[tokio::test]
async fn team_games_by_date_range() {
    let warehouse = MockWarehouse::default();
    let req = GameLogRequest {
        team: FilterValue::from("TOR"),
        start_date: Some("2024-10-01".into()),
        end_date: Some("2025-01-23".into()),
        ..Default::default()
    };

    let outcome = team_games(&warehouse, &req).await.unwrap();
    assert_eq!(
        outcome.sql,
        "SELECT * FROM team_games WHERE gameDate >= '2024-10-01' AND gameDate <= '2025-01-23' \
         AND team = 'TOR' AND situation = 'all' ORDER BY team, gameDate"
    );
    assert!(outcome.notices.is_empty());
}

#[tokio::test]
async fn team_games_date_range_overrides_season() {
    let warehouse = MockWarehouse::default();
    let req = GameLogRequest {
        season: Some(FilterValue::from(2024_i64)),
        start_date: Some("2024-10-01".into()),
        end_date: Some("2024-12-31".into()),
        ..Default::default()
    };

    let outcome = team_games(&warehouse, &req).await.unwrap();
    assert!(!outcome.sql.contains("season"));
    assert_eq!(outcome.notices.len(), 1);
}

#[tokio::test]
async fn team_games_needs_season_or_dates() {
    let warehouse = MockWarehouse::default();
    let err = team_games(&warehouse, &GameLogRequest::default()).await.unwrap_err();

    assert!(matches!(err, QueryError::MissingInput(_)));
    assert!(warehouse.queries().is_empty());
}

#[tokio::test]
async fn malformed_date_is_a_format_error() {
    let warehouse = MockWarehouse::default();
    let req = GameLogRequest {
        start_date: Some("2024-13-01".into()),
        ..Default::default()
    };

    let err = team_games(&warehouse, &req).await.unwrap_err();
    assert!(matches!(err, QueryError::Format { ref field, .. } if field == "start_date"));
    assert!(warehouse.queries().is_empty());
}

#[tokio::test]
async fn player_game_logs_filter_by_name() {
    let warehouse = MockWarehouse::default();
    let req = GameLogRequest {
        name: Some(FilterValue::from(vec!["Nylander", "Matthews"])),
        start_date: Some("2025-10-01".into()),
        end_date: Some("2025-10-25".into()),
        ..Default::default()
    };

    skater_games(&warehouse, &req).await.unwrap();
    goalie_games(&warehouse, &req).await.unwrap();

    let queries = warehouse.queries();
    assert_eq!(
        queries[0],
        "SELECT * FROM skater_games WHERE gameDate >= '2025-10-01' AND gameDate <= '2025-10-25' \
         AND (name = 'Nylander' OR name = 'Matthews') AND situation = 'all' \
         ORDER BY team, gameDate"
    );
    assert!(queries[1].starts_with("SELECT * FROM goalie_games WHERE "));
}

#[tokio::test]
async fn execution_errors_propagate() {
    let warehouse = MockWarehouse::failing();
    let err = goalie_summary(&warehouse, &GoalieSummaryRequest::new(2024_i64))
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::Execution(_)));
    assert_eq!(warehouse.queries().len(), 1);
}

#[tokio::test]
async fn apostrophes_in_names_are_escaped() {
    let warehouse = MockWarehouse::default();
    let mut req = SkaterSummaryRequest::new(2024_i64);
    req.name = Some(FilterValue::from(vec!["Ryan O'Reilly", "x' OR '1'='1"]));

    let outcome = skater_summary(&warehouse, &req).await.unwrap();
    assert_eq!(
        outcome.sql,
        "SELECT * FROM skaters WHERE iceTime >=0 AND season = 2024 \
         AND (name = 'Ryan O''Reilly' OR name = 'x'' OR ''1''=''1') \
         AND situation = 'all' ORDER BY team, season"
    );
}

#[tokio::test]
async fn combined_team_summary_keeps_situations_apart() {
    let season_row = |season: i64, situation: &str, goals_for: i64| {
        json!({"team": "TOR", "situation": situation, "season": season, "gamesPlayed": 82,
               "iceTime": 4800.0, "xGoalsFor": 200.0, "goalsFor": goals_for,
               "xGoalsAgainst": 180.0, "goalsAgainst": 200})
    };
    let warehouse = MockWarehouse::with_rows(vec![
        season_row(2023, "all", 300),
        season_row(2023, "5on5", 200),
        season_row(2024, "all", 320),
        season_row(2024, "5on5", 200),
    ]);
    let mut req = TeamSummaryRequest::new(vec![2023_i64, 2024]);
    req.team = FilterValue::from("TOR");
    req.situation = FilterValue::from(vec!["all", "5on5"]);
    req.combine_seasons = true;

    let outcome = team_summary(&warehouse, &req).await.unwrap();
    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(outcome.rows[0]["situation"], json!("5on5"));
    assert_eq!(outcome.rows[0]["goalsFor"], json!(400));
    assert_eq!(outcome.rows[1]["situation"], json!("all"));
    assert_eq!(outcome.rows[1]["goalsFor"], json!(620));
    assert!(outcome.rows.iter().all(|r| r["gamesPlayed"] == json!(164)));
}

#[tokio::test]
async fn one_element_season_list_still_combines() {
    let warehouse = MockWarehouse::with_rows(vec![json!({
        "playerID": 8476932, "name": "Joseph Woll", "team": "TOR", "situation": "all",
        "season": 2024, "gamesPlayed": 60, "iceTime": 3400, "xGoals": 150.5, "goals": 140,
        "lowDangerShots": 700, "mediumDangerShots": 250, "highDangerShots": 160,
        "lowDangerxGoals": 25.0, "mediumDangerxGoals": 35.0, "highDangerxGoals": 90.5,
        "lowDangerGoals": 20, "mediumDangerGoals": 35, "highDangerGoals": 85})]);
    let mut req = GoalieSummaryRequest::new(vec![2024_i64]);
    req.combine_seasons = true;

    let outcome = goalie_summary(&warehouse, &req).await.unwrap();
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0]["season"], json!("2024"));
    assert_eq!(outcome.rows[0]["gamesPlayed"], json!(60));
    assert!(outcome.notices.is_empty());
}

#[tokio::test]
async fn game_log_tables_do_not_combine() {
    let rows = vec![json!({"team": "TOR", "season": 2024, "gameDate": "2024-10-09", "goalsFor": 1})];
    let warehouse = MockWarehouse::with_rows(rows);
    let filters = FilterMapping::new().with("season", vec![2023_i64, 2024]);
    let options = QueryOptions {
        order_by: &["team", "gameDate"],
        combine_seasons: true,
        quiet: true,
    };

    let outcome = query_table(&warehouse, Table::TeamGames, &filters, &Qualifiers::new(), options)
        .await
        .unwrap();
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0]["season"], json!(2024));
    assert_eq!(outcome.notices, ["seasons cannot be combined for team_games"]);
}

#[tokio::test]
async fn team_games_reports_ignored_name() {
    let warehouse = MockWarehouse::default();
    let req = GameLogRequest {
        season: Some(FilterValue::from(2024_i64)),
        name: Some(FilterValue::from("Matthews")),
        ..Default::default()
    };

    let outcome = team_games(&warehouse, &req).await.unwrap();
    assert!(!outcome.sql.contains("name"));
    assert_eq!(outcome.notices.len(), 1);
    assert!(outcome.notices[0].contains("'name'"));
}
