//! `TableHandle::select`: the single polymorphic entry point spec §4.1
//! describes ("selector is either a single column name ... an ordered list
//! of names ... a predicate ... or a Column handle"). Per REDESIGN FLAGS
//! §9 ("Dynamic dispatch over selectors: replace runtime type tests ... with
//! a tagged variant"), `Selector` is that tagged variant, built via `Into`
//! conversions so callers write `handle.select("col")` or
//! `handle.select(vec!["a".into(), "b".into()])` without naming the enum.

use crate::handle::TableHandle;
use common::{ReadError, ReadResult};
use predicate::{Column, Predicate};

/// The tagged selector variant (§4.1, §9).
#[derive(Clone, Debug)]
pub enum Selector {
    Name(String),
    Names(Vec<String>),
    Predicate(Predicate),
    Column(Column),
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Selector::Name(s.to_string())
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Selector::Name(s)
    }
}

impl From<Vec<String>> for Selector {
    fn from(v: Vec<String>) -> Self {
        Selector::Names(v)
    }
}

impl<const N: usize> From<[&str; N]> for Selector {
    fn from(v: [&str; N]) -> Self {
        Selector::Names(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Predicate> for Selector {
    fn from(p: Predicate) -> Self {
        Selector::Predicate(p)
    }
}

impl From<Column> for Selector {
    fn from(c: Column) -> Self {
        Selector::Column(c)
    }
}

/// What `select` produces: a bound column, or a new handle with one more op
/// appended (§4.1).
#[derive(Clone, Debug)]
pub enum Selected {
    Column(Column),
    Table(TableHandle),
}

impl Selected {
    pub fn into_table(self) -> ReadResult<TableHandle> {
        match self {
            Selected::Table(t) => Ok(t),
            Selected::Column(c) => Err(ReadError::InvalidSelector(format!(
                "selector produced column '{}', not a table",
                c.name()
            ))),
        }
    }

    pub fn into_column(self) -> ReadResult<Column> {
        match self {
            Selected::Column(c) => Ok(c),
            Selected::Table(_) => {
                Err(ReadError::InvalidSelector("selector produced a table, not a column".into()))
            }
        }
    }
}

impl TableHandle {
    /// The polymorphic projection operator (§4.1).
    pub fn select(&self, selector: impl Into<Selector>) -> ReadResult<Selected> {
        match selector.into() {
            Selector::Name(name) => Ok(Selected::Column(self.column(name))),
            Selector::Names(names) => Ok(Selected::Table(self.project_columns(names))),
            Selector::Predicate(p) => Ok(Selected::Table(self.filter(p))),
            Selector::Column(c) => Ok(Selected::Table(self.filter(c.as_bool_predicate()))),
        }
    }

    /// `select`'s escape hatch for callers holding an untyped selector value
    /// (e.g. deserialized from outside Rust's type system, rather than built
    /// through `Column`/`Predicate`). Unlike the typed `Selector` enum —
    /// which is exhaustive and so can never itself be "some other kind" —
    /// this is where `InvalidSelector` is actually reachable, matching
    /// spec §4.1's "any other selector kind fails with InvalidSelector".
    pub fn select_dynamic(&self, value: &serde_json::Value) -> ReadResult<Selected> {
        match value {
            serde_json::Value::String(s) => self.select(s.as_str()),
            serde_json::Value::Array(items) => {
                let names = items
                    .iter()
                    .map(|v| {
                        v.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| ReadError::InvalidSelector(format!("non-string entry in list selector: {v}")))
                    })
                    .collect::<ReadResult<Vec<String>>>()?;
                self.select(names)
            }
            other => Err(ReadError::InvalidSelector(format!("unsupported selector value: {other}"))),
        }
    }
}
