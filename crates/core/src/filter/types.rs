use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::FilterError;
use crate::item::Scalar;

/// A filter operation as spelled in an event payload.
///
/// Spellings are matched case-insensitively. `Between` parses so the
/// compiler can reject it with a useful message instead of a generic
/// deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
    BeginsWith,
    Null,
    NotNull,
    Exists,
    NotExists,
    Between,
}

impl FilterOp {
    /// Returns true for operations that compare against a value through a
    /// comparison operator rather than a function call.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            FilterOp::Eq | FilterOp::Ne | FilterOp::Le | FilterOp::Lt | FilterOp::Ge | FilterOp::Gt
        )
    }

    /// The store-side spelling: the operator symbol for comparisons, the
    /// function name for everything else. `null`/`not null` and
    /// `exists`/`not exists` collapse onto the same two functions.
    pub fn store_spelling(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
            FilterOp::Le => "<=",
            FilterOp::Lt => "<",
            FilterOp::Ge => ">=",
            FilterOp::Gt => ">",
            FilterOp::BeginsWith => "begins_with",
            FilterOp::Null | FilterOp::NotExists => "attribute_not_exists",
            FilterOp::NotNull | FilterOp::Exists => "attribute_exists",
            FilterOp::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelling = match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
            FilterOp::Le => "<=",
            FilterOp::Lt => "<",
            FilterOp::Ge => ">=",
            FilterOp::Gt => ">",
            FilterOp::BeginsWith => "begins with",
            FilterOp::Null => "null",
            FilterOp::NotNull => "not null",
            FilterOp::Exists => "exists",
            FilterOp::NotExists => "not exists",
            FilterOp::Between => "BETWEEN",
        };
        f.write_str(spelling)
    }
}

impl FromStr for FilterOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "=" => Ok(FilterOp::Eq),
            "<>" => Ok(FilterOp::Ne),
            "<=" => Ok(FilterOp::Le),
            "<" => Ok(FilterOp::Lt),
            ">=" => Ok(FilterOp::Ge),
            ">" => Ok(FilterOp::Gt),
            "begins with" => Ok(FilterOp::BeginsWith),
            "null" => Ok(FilterOp::Null),
            "not null" => Ok(FilterOp::NotNull),
            "exists" => Ok(FilterOp::Exists),
            "not exists" => Ok(FilterOp::NotExists),
            "between" => Ok(FilterOp::Between),
            other => Err(FilterError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl Serialize for FilterOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FilterOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One declarative attribute filter from an event payload.
///
/// `compare_value` is absent for the unary operations (`null`, `not null`,
/// `exists`, `not exists`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    #[serde(rename = "Attribute")]
    pub attribute: String,
    #[serde(rename = "Operation")]
    pub operation: FilterOp,
    #[serde(rename = "CompareValue", skip_serializing_if = "Option::is_none")]
    pub compare_value: Option<Scalar>,
}

impl FilterClause {
    pub fn new(attribute: impl Into<String>, operation: FilterOp) -> Self {
        Self {
            attribute: attribute.into(),
            operation,
            compare_value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Scalar>) -> Self {
        self.compare_value = Some(value.into());
        self
    }

    /// Returns true for the one filter shape that can be served as a point
    /// lookup on the primary key: a single `id = value` equality.
    pub fn is_id_equality(&self) -> bool {
        self.attribute == "id" && self.operation == FilterOp::Eq
    }
}
