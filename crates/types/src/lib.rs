//! Tagged literal values used as comparison arguments in the predicate algebra.
//!
//! `ValueLiteral` carries no rendering or validation behavior of its own —
//! callers that need to turn one into engine-facing text (with its escape
//! policy) use `predicate::render_literal`, which depends on this crate the
//! same way `expr` depends on `types` in the teacher workspace.


use chrono::{DateTime, Utc};

/// A single comparison argument: string, timestamp, integer, or floating-point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ValueLiteral {
    Str(String),
    Timestamp(DateTime<Utc>),
    Int(i64),
    Float(f64),
}

impl ValueLiteral {
    /// True for the types that render as single-quoted text (string, timestamp).
    pub fn is_quoted(&self) -> bool {
        matches!(self, ValueLiteral::Str(_) | ValueLiteral::Timestamp(_))
    }
}

impl From<&str> for ValueLiteral {
    fn from(s: &str) -> Self {
        ValueLiteral::Str(s.to_string())
    }
}

impl From<String> for ValueLiteral {
    fn from(s: String) -> Self {
        ValueLiteral::Str(s)
    }
}

impl From<i64> for ValueLiteral {
    fn from(v: i64) -> Self {
        ValueLiteral::Int(v)
    }
}

impl From<f64> for ValueLiteral {
    fn from(v: f64) -> Self {
        ValueLiteral::Float(v)
    }
}

impl From<DateTime<Utc>> for ValueLiteral {
    fn from(v: DateTime<Utc>) -> Self {
        ValueLiteral::Timestamp(v)
    }
}
