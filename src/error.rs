//! Error types for query construction, validation, aggregation and execution.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("values provided for {column} must be {expected}, received {actual_type}: {actual_value}")]
    Type {
        column: String,
        expected: String,
        actual_type: String,
        actual_value: String,
    },

    #[error("invalid input '{value}' provided for {column}. Valid inputs are [{}]", .valid.join(", "))]
    Domain {
        column: String,
        value: String,
        valid: Vec<String>,
    },

    #[error("no values provided in the list for {0}")]
    EmptyList(String),

    #[error("'{field}' provided in unsupported format. Must be YYYY-MM-DD, received {value}")]
    Format { field: String, value: String },

    #[error("column '{0}' is not part of the warehouse schema")]
    UnknownColumn(String),

    #[error("no value provided for {0}; at least one of them is required")]
    MissingInput(String),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("query execution failed: {0}")]
    Execution(#[from] sqlx::Error),
}

impl QueryError {
    /// True for errors caused by caller input rather than by the crate or the warehouse.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            QueryError::Type { .. }
                | QueryError::Domain { .. }
                | QueryError::EmptyList(_)
                | QueryError::Format { .. }
                | QueryError::MissingInput(_)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    #[error("cannot derive {column} for {entity}: denominator is zero")]
    DivideByZero { entity: String, column: String },

    #[error("row for {entity} has no usable value in column {column}")]
    MissingColumn { entity: String, column: String },
}

pub type Result<T, E = QueryError> = std::result::Result<T, E>;
