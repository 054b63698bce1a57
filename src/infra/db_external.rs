use std::future::Future;

use sqlx::{mysql::MySqlPoolOptions, postgres::PgPoolOptions, Executor, MySql, Pool, Postgres};
use tracing::{debug, info};

use crate::infra::config::{Backend, WarehouseConfig};
use crate::infra::utils::{mysql_row_to_json, pg_row_to_json};
use crate::models::context::ResultRow;

/// Runs a finished SQL string against the warehouse and returns its rows.
pub trait QueryExecutor {
    fn execute(&self, sql: &str) -> impl Future<Output = Result<Vec<ResultRow>, sqlx::Error>> + Send;
}

enum DynamicPool {
    Postgres(Pool<Postgres>),
    MySql(Pool<MySql>),
}

/// Read-only handle on the hosted statistics warehouse.
pub struct Warehouse {
    pool: DynamicPool,
}

impl Warehouse {
    pub async fn connect(config: &WarehouseConfig) -> anyhow::Result<Self> {
        let pool = match config.backend {
            Backend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(&config.url)
                    .await?;
                DynamicPool::Postgres(pool)
            }
            Backend::MySql => {
                // literals are escaped by doubling quotes only, so backslashes must stay plain
                let pool = MySqlPoolOptions::new()
                    .max_connections(config.max_connections)
                    .after_connect(|conn, _meta| {
                        Box::pin(async move {
                            conn.execute(
                                "SET SESSION sql_mode = CONCAT(@@sql_mode, ',NO_BACKSLASH_ESCAPES')",
                            )
                            .await?;
                            Ok(())
                        })
                    })
                    .connect(&config.url)
                    .await?;
                DynamicPool::MySql(pool)
            }
        };
        info!(backend = ?config.backend, "warehouse pool ready");
        Ok(Self { pool })
    }
}

impl QueryExecutor for Warehouse {
    async fn execute(&self, sql: &str) -> Result<Vec<ResultRow>, sqlx::Error> {
        debug!(%sql, "executing");
        match &self.pool {
            DynamicPool::Postgres(p) => {
                let rows = sqlx::query(sql).fetch_all(p).await?;
                Ok(rows.iter().map(pg_row_to_json).collect())
            }
            DynamicPool::MySql(p) => {
                let rows = sqlx::query(sql).fetch_all(p).await?;
                Ok(rows.iter().map(mysql_row_to_json).collect())
            }
        }
    }
}
