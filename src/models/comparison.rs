use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operator used in qualifier fragments.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl Operator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
        }
    }
}

/// Operator plus right-hand value, rendered as the raw fragment a qualifier carries,
/// e.g. `>=500`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Comparison {
    pub operator: Operator,
    pub value: String,
}

impl Comparison {
    pub fn new(operator: Operator, value: impl ToString) -> Self {
        Self {
            operator,
            value: value.to_string(),
        }
    }

    pub fn at_least(value: impl ToString) -> Self {
        Self::new(Operator::Gte, value)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.as_sql(), self.value)
    }
}

impl From<Comparison> for String {
    fn from(c: Comparison) -> Self {
        c.to_string()
    }
}
