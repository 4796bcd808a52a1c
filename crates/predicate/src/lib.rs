//! The predicate algebra: column references, comparison leaves, and the
//! And/Or/Not combinators that fold into a predicate clause (§4.2, §4.3).
//!
//! Mirrors the shape of the teacher's `expr` crate (`Expr`/`BinaryOp`), but
//! the leaves here are always `column <op> literal` comparisons rather than
//! arbitrary sub-expressions, and the tree renders to templated SQL text
//! instead of being evaluated directly — evaluation against materialized
//! rows happens in `engine`, which borrows the same operator set.

#[cfg(test)]
mod tests;

use common::{ReadError, ReadResult, VersionId};
use types::ValueLiteral;

/// Comparison operators available on a predicate leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Between,
    NotBetween,
    In,
    NotIn,
}

impl ComparisonOp {
    /// The De Morgan complement used by structural negation (§4.2).
    pub fn complement(self) -> ComparisonOp {
        use ComparisonOp::*;
        match self {
            Eq => Ne,
            Ne => Eq,
            Lt => Ge,
            Ge => Lt,
            Le => Gt,
            Gt => Le,
            Between => NotBetween,
            NotBetween => Between,
            In => NotIn,
            NotIn => In,
        }
    }

    fn symbol(self) -> &'static str {
        use ComparisonOp::*;
        match self {
            Eq => "=",
            Ne => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Between => "BETWEEN",
            NotBetween => "NOT BETWEEN",
            In => "IN",
            NotIn => "NOT IN",
        }
    }
}

/// The argument shape carried by a predicate leaf.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PredicateArg {
    Single(ValueLiteral),
    Pair(ValueLiteral, ValueLiteral),
    List(Vec<ValueLiteral>),
    /// Bare `TRUE`/`FALSE` token used only by the boolean-column shortcut
    /// (§4.3); never quoted, unlike a string `ValueLiteral`.
    Bool(bool),
}

/// An immutable tagged tree of boolean expressions (§3, §4.2).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Predicate {
    Leaf {
        version: VersionId,
        column: String,
        op: ComparisonOp,
        arg: PredicateArg,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    /// Structural negation: leaves complement their operator, And/Or swap
    /// per De Morgan (§4.2).
    pub fn not(&self) -> Predicate {
        match self {
            Predicate::Leaf { version, column, op, arg } => Predicate::Leaf {
                version: *version,
                column: column.clone(),
                op: op.complement(),
                arg: arg.clone(),
            },
            Predicate::And(p, q) => Predicate::Or(Box::new(p.not()), Box::new(q.not())),
            Predicate::Or(p, q) => Predicate::And(Box::new(p.not()), Box::new(q.not())),
        }
    }

    /// Checks every leaf's `VersionId` equals `expected`, failing with
    /// `CrossTableReference` on the first mismatch (§4.2 cross-version rule).
    pub fn validate_version(&self, expected: VersionId) -> ReadResult<()> {
        match self {
            Predicate::Leaf { version, .. } => {
                if *version == expected {
                    Ok(())
                } else {
                    Err(ReadError::CrossTableReference { leaf: *version, expected })
                }
            }
            Predicate::And(p, q) | Predicate::Or(p, q) => {
                p.validate_version(expected)?;
                q.validate_version(expected)
            }
        }
    }

    /// Renders to a predicate-clause *template*: alias-qualified columns
    /// carry the literal placeholder `{alias}`, substituted once per
    /// fragment by `render` (§4.2, §4.4, §6).
    pub fn render_template(&self) -> ReadResult<String> {
        match self {
            Predicate::Leaf { column, op, arg, .. } => {
                let col = format!("{{alias}}.\"{column}\"");
                render_leaf(&col, *op, arg)
            }
            Predicate::And(p, q) => {
                Ok(format!("({} AND {})", p.render_template()?, q.render_template()?))
            }
            Predicate::Or(p, q) => {
                Ok(format!("({} OR {})", p.render_template()?, q.render_template()?))
            }
        }
    }

    /// Renders the predicate clause with `alias` substituted for the
    /// per-fragment placeholder.
    pub fn render(&self, alias: &str) -> ReadResult<String> {
        Ok(self.render_template()?.replace("{alias}", alias))
    }
}

fn render_leaf(col: &str, op: ComparisonOp, arg: &PredicateArg) -> ReadResult<String> {
    match (op, arg) {
        (ComparisonOp::Between, PredicateArg::Pair(a, b))
        | (ComparisonOp::NotBetween, PredicateArg::Pair(a, b)) => Ok(format!(
            "({col} {} {} AND {})",
            op.symbol(),
            render_literal(a)?,
            render_literal(b)?
        )),
        (ComparisonOp::In, PredicateArg::List(items))
        | (ComparisonOp::NotIn, PredicateArg::List(items)) => {
            let rendered: ReadResult<Vec<String>> = items.iter().map(render_literal).collect();
            Ok(format!("({col} {} ({}))", op.symbol(), rendered?.join(", ")))
        }
        (ComparisonOp::Eq, PredicateArg::Bool(b)) | (ComparisonOp::Ne, PredicateArg::Bool(b)) => {
            Ok(format!("({col} {} {})", op.symbol(), if *b { "TRUE" } else { "FALSE" }))
        }
        (_, PredicateArg::Single(v)) => Ok(format!("({col} {} {})", op.symbol(), render_literal(v)?)),
        _ => Err(ReadError::InvalidLiteral(format!(
            "operator {op:?} does not accept argument shape {arg:?}"
        ))),
    }
}

/// Renders a `ValueLiteral` to the execution engine's literal syntax.
///
/// Strings and timestamps are single-quoted; this is the minimum escape
/// contract from spec §4.2 — an unescaped single quote fails rather than
/// being silently interpolated (open question in spec §9: "Literal
/// escaping"). Timestamps use a fixed RFC 3339 profile with microsecond
/// precision (spec §9: "Timestamp rendering precision").
pub fn render_literal(v: &ValueLiteral) -> ReadResult<String> {
    match v {
        ValueLiteral::Str(s) => {
            if s.contains('\'') {
                return Err(ReadError::InvalidLiteral(format!(
                    "unescaped single quote in string literal: {s:?}"
                )));
            }
            Ok(format!("'{s}'"))
        }
        ValueLiteral::Timestamp(t) => {
            Ok(format!("'{}'", t.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)))
        }
        ValueLiteral::Int(i) => Ok(i.to_string()),
        ValueLiteral::Float(f) => Ok(f.to_string()),
    }
}

/// A bound reference to a `(table_version, column_name)` pair (§4.3).
///
/// Comparison methods return predicate leaves carrying this column's
/// version; the plan compiler checks that against the materializing
/// handle's own version (§4.2 cross-version rule).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    version: VersionId,
    name: String,
}

impl Column {
    pub fn new(version: VersionId, name: impl Into<String>) -> Self {
        Self { version, name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> VersionId {
        self.version
    }

    fn leaf(&self, op: ComparisonOp, arg: PredicateArg) -> Predicate {
        Predicate::Leaf { version: self.version, column: self.name.clone(), op, arg }
    }

    pub fn eq(&self, v: impl Into<ValueLiteral>) -> Predicate {
        self.leaf(ComparisonOp::Eq, PredicateArg::Single(v.into()))
    }

    pub fn ne(&self, v: impl Into<ValueLiteral>) -> Predicate {
        self.leaf(ComparisonOp::Ne, PredicateArg::Single(v.into()))
    }

    pub fn lt(&self, v: impl Into<ValueLiteral>) -> Predicate {
        self.leaf(ComparisonOp::Lt, PredicateArg::Single(v.into()))
    }

    pub fn le(&self, v: impl Into<ValueLiteral>) -> Predicate {
        self.leaf(ComparisonOp::Le, PredicateArg::Single(v.into()))
    }

    pub fn gt(&self, v: impl Into<ValueLiteral>) -> Predicate {
        self.leaf(ComparisonOp::Gt, PredicateArg::Single(v.into()))
    }

    pub fn ge(&self, v: impl Into<ValueLiteral>) -> Predicate {
        self.leaf(ComparisonOp::Ge, PredicateArg::Single(v.into()))
    }

    pub fn between(&self, a: impl Into<ValueLiteral>, b: impl Into<ValueLiteral>) -> Predicate {
        self.leaf(ComparisonOp::Between, PredicateArg::Pair(a.into(), b.into()))
    }

    pub fn not_between(&self, a: impl Into<ValueLiteral>, b: impl Into<ValueLiteral>) -> Predicate {
        self.leaf(ComparisonOp::NotBetween, PredicateArg::Pair(a.into(), b.into()))
    }

    pub fn is_in<I, T>(&self, items: I) -> Predicate
    where
        I: IntoIterator<Item = T>,
        T: Into<ValueLiteral>,
    {
        self.leaf(
            ComparisonOp::In,
            PredicateArg::List(items.into_iter().map(Into::into).collect()),
        )
    }

    pub fn not_in<I, T>(&self, items: I) -> Predicate
    where
        I: IntoIterator<Item = T>,
        T: Into<ValueLiteral>,
    {
        self.leaf(
            ComparisonOp::NotIn,
            PredicateArg::List(items.into_iter().map(Into::into).collect()),
        )
    }

    /// Reinterprets this column as a boolean: `column = TRUE` (§4.1, §4.3).
    pub fn as_bool_predicate(&self) -> Predicate {
        self.leaf(ComparisonOp::Eq, PredicateArg::Bool(true))
    }

    /// `~column`, i.e. the raw-column shortcut for `NOT (column = TRUE)` (§9 supplement).
    pub fn not(&self) -> Predicate {
        self.as_bool_predicate().not()
    }

    /// `column & other`: implicitly reinterprets `self` as boolean before
    /// combining (§4.3).
    pub fn and(&self, other: Predicate) -> Predicate {
        self.as_bool_predicate().and(other)
    }

    /// `column | other`: implicitly reinterprets `self` as boolean before
    /// combining (§4.3).
    pub fn or(&self, other: Predicate) -> Predicate {
        self.as_bool_predicate().or(other)
    }
}
