//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::sync::Mutex;

use rinkstats::{QueryExecutor, ResultRow};
use serde_json::Value;

/// Executor that records every SQL string it receives and answers with canned rows.
#[derive(Default)]
pub struct MockWarehouse {
    rows: Vec<ResultRow>,
    fail: bool,
    seen: Mutex<Vec<String>>,
}

impl MockWarehouse {
    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            rows: rows.into_iter().map(object).collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// SQL strings executed so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> String {
        self.queries().pop().expect("no query was executed")
    }
}

impl QueryExecutor for MockWarehouse {
    async fn execute(&self, sql: &str) -> Result<Vec<ResultRow>, sqlx::Error> {
        self.seen.lock().unwrap().push(sql.to_string());
        if self.fail {
            return Err(sqlx::Error::Protocol("connection reset by warehouse".into()));
        }
        Ok(self.rows.clone())
    }
}

pub fn object(value: Value) -> ResultRow {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
