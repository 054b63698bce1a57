use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde_json::{json, Value};
use sqlx::{mysql::MySqlRow, postgres::PgRow, Column, Row, TypeInfo};

use crate::models::context::ResultRow;

/// Decodes a Postgres-wire row column by column. Undecodable cells become `null`.
pub fn pg_row_to_json(row: &PgRow) -> ResultRow {
    let mut map = ResultRow::new();

    for col in row.columns() {
        let name = col.name();
        let type_name = col.type_info().name(); // native type name, e.g. "INT4", "NUMERIC"

        let val = match type_name {
            "INT2" => json!(row.try_get::<Option<i16>, _>(name).unwrap_or(None)),
            "INT4" => json!(row.try_get::<Option<i32>, _>(name).unwrap_or(None)),
            "INT8" => json!(row.try_get::<Option<i64>, _>(name).unwrap_or(None)),
            "FLOAT4" => json!(row
                .try_get::<Option<f32>, _>(name)
                .unwrap_or(None)
                .map(f64::from)),
            "FLOAT8" => json!(row.try_get::<Option<f64>, _>(name).unwrap_or(None)),
            "NUMERIC" => {
                let v: Option<rust_decimal::Decimal> = row.try_get(name).unwrap_or(None);
                // summed and divided downstream, so numbers rather than strings
                json!(v.and_then(|d| d.to_f64()))
            }
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                json!(row.try_get::<Option<String>, _>(name).unwrap_or(None))
            }
            "BOOL" => json!(row.try_get::<Option<bool>, _>(name).unwrap_or(None)),
            "DATE" => {
                let v: Option<NaiveDate> = row.try_get(name).unwrap_or(None);
                json!(v.map(|d| d.to_string()))
            }
            "TIMESTAMP" => {
                let v: Option<NaiveDateTime> = row.try_get(name).unwrap_or(None);
                json!(v.map(|dt| dt.to_string()))
            }
            "TIMESTAMPTZ" => {
                let v: Option<DateTime<Utc>> = row.try_get(name).unwrap_or(None);
                json!(v.map(|dt| dt.to_rfc3339()))
            }
            "JSON" | "JSONB" => row
                .try_get::<Option<Value>, _>(name)
                .unwrap_or(None)
                .unwrap_or(Value::Null),
            _ => json!(row.try_get::<Option<String>, _>(name).unwrap_or(None)),
        };

        map.insert(name.to_string(), val);
    }

    map
}

pub fn mysql_row_to_json(row: &MySqlRow) -> ResultRow {
    let mut map = ResultRow::new();

    for col in row.columns() {
        let name = col.name();
        let type_name = col.type_info().name(); // e.g. "INT", "DECIMAL", "VARCHAR", "DATE"

        let val = match type_name {
            "TINYINT" | "SMALLINT" | "INT" | "MEDIUMINT" | "BIGINT" => {
                json!(row.try_get::<Option<i64>, _>(name).unwrap_or(None))
            }
            "FLOAT" | "DOUBLE" => json!(row.try_get::<Option<f64>, _>(name).unwrap_or(None)),
            "DECIMAL" | "NEWDECIMAL" => {
                let v: Option<rust_decimal::Decimal> = row.try_get(name).unwrap_or(None);
                json!(v.and_then(|d| d.to_f64()))
            }
            "CHAR" | "VARCHAR" | "TEXT" | "LONGTEXT" => {
                json!(row.try_get::<Option<String>, _>(name).unwrap_or(None))
            }
            "DATE" => {
                let v: Option<NaiveDate> = row.try_get(name).unwrap_or(None);
                json!(v.map(|d| d.to_string()))
            }
            "DATETIME" | "TIMESTAMP" => {
                let v: Option<NaiveDateTime> = row.try_get(name).unwrap_or(None);
                json!(v.map(|dt| dt.to_string()))
            }
            _ => json!(row.try_get::<Option<String>, _>(name).unwrap_or(None)),
        };

        map.insert(name.to_string(), val);
    }

    map
}
