//! rinkstats - validated, schema-driven queries over a hosted hockey statistics warehouse.
//!
//! - `models/` - filter values, the column schema and value domains, request/outcome types
//! - `core/` - validation, query building, season combination, per-table accessors
//! - `infra/` - warehouse connection, row decoding, configuration, data attribution
//! - `api/` - axum routes exposing the accessors over HTTP
//!
//! ```ignore
//! let warehouse = Warehouse::connect(&WarehouseConfig::from_env()?).await?;
//! let mut req = SkaterSummaryRequest::new(vec![2023_i64, 2024]);
//! req.team = FilterValue::from("TOR");
//! req.combine_seasons = true;
//! let outcome = skater_summary(&warehouse, &req).await?;
//! ```

pub mod api;
pub mod core;
pub mod error;
pub mod infra;
pub mod models;

pub use crate::core::accessors::{
    goalie_games, goalie_summary, skater_games, skater_summary, team_games, team_summary,
};
pub use crate::core::aggregate::{combine_seasons, CombineSpec, OutputKind};
pub use crate::core::query_builder::{build_query, BuiltQuery};
pub use crate::core::table::{query_table, QueryOptions, Table};
pub use crate::core::validation::{validate_domain, validate_types};
pub use crate::error::{AggregationError, QueryError};
pub use crate::infra::config::WarehouseConfig;
pub use crate::infra::db_external::{QueryExecutor, Warehouse};
pub use crate::infra::disclaimer::DataSource;
pub use crate::models::context::{
    GameLogRequest, GoalieSummaryRequest, QueryOutcome, ResultRow, SkaterSummaryRequest,
    TeamSummaryRequest,
};
pub use crate::models::filter::{FilterMapping, FilterValue, Qualifiers, Scalar};
