use tracing::debug;

use crate::error::{QueryError, Result};
use crate::models::filter::{FilterMapping, FilterValue, Scalar};
use crate::models::schema::{column_types, value_domain, ColumnType};

/// Checks every filter value (or every list element) against the column's accepted
/// types. Stops at the first mismatch.
pub fn validate_types(filters: &FilterMapping) -> Result<()> {
    for (column, value) in filters.iter() {
        let accepted =
            column_types(column).ok_or_else(|| QueryError::UnknownColumn(column.to_string()))?;

        match value {
            FilterValue::Scalar(v) => check_type(column, accepted, v)?,
            FilterValue::List(values) => {
                if values.is_empty() {
                    return Err(QueryError::EmptyList(column.to_string()));
                }
                for v in values {
                    check_type(column, accepted, v)?;
                }
            }
        }
    }
    Ok(())
}

fn check_type(column: &str, accepted: &[ColumnType], value: &Scalar) -> Result<()> {
    let actual = ColumnType::of(value);
    if accepted.contains(&actual) {
        return Ok(());
    }
    let expected: Vec<String> = accepted.iter().map(|t| t.to_string()).collect();
    Err(QueryError::Type {
        column: column.to_string(),
        expected: expected.join(" | "),
        actual_type: actual.to_string(),
        actual_value: value.to_string(),
    })
}

/// Checks that values for `season`, `team` and `situation` lie inside their domain.
/// Other columns pass through untouched.
pub fn validate_domain(filters: &FilterMapping) -> Result<()> {
    for (column, value) in filters.iter() {
        let Some(domain) = value_domain(column) else {
            continue;
        };

        let valid = match value {
            FilterValue::Scalar(v) => domain.contains(v),
            FilterValue::List(values) => values.iter().all(|v| domain.contains(v)),
        };

        if !valid {
            debug!("rejecting {} = {} (outside domain)", column, value);
            return Err(QueryError::Domain {
                column: column.to_string(),
                value: value.to_string(),
                valid: domain.values(),
            });
        }
    }
    Ok(())
}
