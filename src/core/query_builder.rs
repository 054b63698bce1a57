//! Turns a validated filter mapping into a `SELECT` statement.
//!
//! Clause order is fixed: qualifier fragments first, in insertion order, then equality
//! filters, in insertion order. List-valued filters become a parenthesized `OR` group.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, info};

use crate::core::validation::{validate_domain, validate_types};
use crate::error::{QueryError, Result};
use crate::models::filter::{FilterMapping, FilterValue, Qualifiers};
use crate::models::schema::column_types;

pub const START_DATE: &str = "start_date";
pub const END_DATE: &str = "end_date";
const DATE_COLUMN: &str = "gameDate";

/// SQL text plus anything the caller should be told about how it was derived.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub notices: Vec<String>,
}

pub fn build_query(
    table: &str,
    filters: &FilterMapping,
    qualifiers: &Qualifiers,
    order_by: &[&str],
) -> Result<BuiltQuery> {
    validate_types(filters)?;
    validate_domain(filters)?;

    for (column, _) in qualifiers.iter() {
        if column != START_DATE && column != END_DATE {
            ensure_schematized(column)?;
        }
    }
    for column in order_by {
        ensure_schematized(column)?;
    }

    let mut notices = Vec::new();
    let filters = resolve_date_range(filters, qualifiers, &mut notices)?;

    let mut conditions: Vec<String> = qualifiers
        .iter()
        .map(|(column, fragment)| match column {
            START_DATE => format!("{} >= '{}'", DATE_COLUMN, fragment),
            END_DATE => format!("{} <= '{}'", DATE_COLUMN, fragment),
            _ => format!("{} {}", column, fragment),
        })
        .collect();
    conditions.extend(filters.iter().map(|(column, value)| condition(column, value)));

    let mut sql = format!("SELECT * FROM {}", table);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    if !order_by.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order_by.join(", "));
    }

    debug!(%sql, "built query");
    Ok(BuiltQuery { sql, notices })
}

fn condition(column: &str, value: &FilterValue) -> String {
    match value {
        FilterValue::Scalar(v) => format!("{} = {}", column, v.to_sql()),
        FilterValue::List(values) => {
            let group: Vec<String> = values
                .iter()
                .map(|v| format!("{} = {}", column, v.to_sql()))
                .collect();
            format!("({})", group.join(" OR "))
        }
    }
}

fn ensure_schematized(column: &str) -> Result<()> {
    column_types(column)
        .map(|_| ())
        .ok_or_else(|| QueryError::UnknownColumn(column.to_string()))
}

/// Validates `start_date` / `end_date` and drops `season` when a full date range
/// is given alongside it.
fn resolve_date_range(
    filters: &FilterMapping,
    qualifiers: &Qualifiers,
    notices: &mut Vec<String>,
) -> Result<FilterMapping> {
    let start = qualifiers.get(START_DATE);
    let end = qualifiers.get(END_DATE);

    if let Some(value) = start {
        check_date(START_DATE, value)?;
    }
    if let Some(value) = end {
        check_date(END_DATE, value)?;
    }

    let mut filters = filters.clone();
    if let (Some(start), Some(end)) = (start, end) {
        if filters.remove("season").is_some() {
            let notice = format!(
                "Input values were provided for 'start_date', 'end_date', and 'season'. \
                 Disregarding the input for 'season' and returning all games between {} and {}.",
                start, end
            );
            info!("{}", notice);
            notices.push(notice);
        }
    }
    Ok(filters)
}

fn date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"))
}

/// Strict `YYYY-MM-DD` that must also name a real calendar day.
pub fn check_date(field: &str, value: &str) -> Result<NaiveDate> {
    let parsed = date_shape()
        .is_match(value)
        .then(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .flatten();
    parsed.ok_or_else(|| QueryError::Format {
        field: field.to_string(),
        value: value.to_string(),
    })
}
