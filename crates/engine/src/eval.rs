//! Structured predicate evaluation against materialized rows.
//!
//! Mirrors the teacher's `expr::EvalContext::eval` (column lookup +
//! `Value::cmp_same_type`), but evaluates `predicate::Predicate` directly
//! rather than a general expression tree, since the merge engine only ever
//! needs to know whether a row satisfies the compiled row restriction.

use common::{Cell, ReadError, ReadResult, Row};
use predicate::{ComparisonOp, Predicate, PredicateArg};
use std::cmp::Ordering;
use types::ValueLiteral;

pub fn eval(predicate: &Predicate, columns: &[String], row: &Row) -> ReadResult<bool> {
    match predicate {
        Predicate::Leaf { column, op, arg, .. } => {
            let idx = columns.iter().position(|c| c == column).ok_or_else(|| {
                ReadError::EngineError(format!("unknown column '{column}' in predicate"))
            })?;
            eval_leaf(&row.0[idx], *op, arg)
        }
        Predicate::And(p, q) => Ok(eval(p, columns, row)? && eval(q, columns, row)?),
        Predicate::Or(p, q) => Ok(eval(p, columns, row)? || eval(q, columns, row)?),
    }
}

fn eval_leaf(cell: &Cell, op: ComparisonOp, arg: &PredicateArg) -> ReadResult<bool> {
    match (op, arg) {
        (ComparisonOp::Eq, PredicateArg::Bool(b)) => Ok(cell.as_bool() == Some(*b)),
        (ComparisonOp::Ne, PredicateArg::Bool(b)) => Ok(cell.as_bool() != Some(*b)),
        (ComparisonOp::Eq, PredicateArg::Single(v)) => Ok(cmp(cell, v) == Some(Ordering::Equal)),
        (ComparisonOp::Ne, PredicateArg::Single(v)) => Ok(cmp(cell, v) != Some(Ordering::Equal)),
        (ComparisonOp::Lt, PredicateArg::Single(v)) => Ok(cmp(cell, v) == Some(Ordering::Less)),
        (ComparisonOp::Le, PredicateArg::Single(v)) => Ok(matches!(cmp(cell, v), Some(Ordering::Less | Ordering::Equal))),
        (ComparisonOp::Gt, PredicateArg::Single(v)) => Ok(cmp(cell, v) == Some(Ordering::Greater)),
        (ComparisonOp::Ge, PredicateArg::Single(v)) => Ok(matches!(cmp(cell, v), Some(Ordering::Greater | Ordering::Equal))),
        (ComparisonOp::Between, PredicateArg::Pair(a, b)) => Ok(matches!(cmp(cell, a), Some(Ordering::Greater | Ordering::Equal))
            && matches!(cmp(cell, b), Some(Ordering::Less | Ordering::Equal))),
        (ComparisonOp::NotBetween, PredicateArg::Pair(a, b)) => Ok(!(matches!(cmp(cell, a), Some(Ordering::Greater | Ordering::Equal))
            && matches!(cmp(cell, b), Some(Ordering::Less | Ordering::Equal)))),
        (ComparisonOp::In, PredicateArg::List(items)) => {
            Ok(items.iter().any(|v| cmp(cell, v) == Some(Ordering::Equal)))
        }
        (ComparisonOp::NotIn, PredicateArg::List(items)) => {
            Ok(!items.iter().any(|v| cmp(cell, v) == Some(Ordering::Equal)))
        }
        _ => Err(ReadError::EngineError(format!(
            "operator {op:?} does not accept argument shape {arg:?}"
        ))),
    }
}

fn cmp(cell: &Cell, lit: &ValueLiteral) -> Option<Ordering> {
    match (cell, lit) {
        (Cell::Int(a), ValueLiteral::Int(b)) => Some(a.cmp(b)),
        (Cell::Float(a), ValueLiteral::Float(b)) => a.partial_cmp(b),
        (Cell::Str(a), ValueLiteral::Str(b)) => Some(a.cmp(b)),
        (Cell::Timestamp(a), ValueLiteral::Timestamp(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
