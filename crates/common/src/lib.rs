#[cfg(test)]
mod tests;

use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use thiserror::Error;

/// Opaque, totally-ordered identifier of a table version.
///
/// Stable over the life of a `TableHandle`; two handles built from the
/// same `read()` call share one `VersionId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct VersionId(pub u64);

/// The reserved indicator column name added to the `Seen`/`Deletes`
/// accumulator relations so a left-join-with-NULL-filter acts as an anti-join.
///
/// Source data bearing this column name is undefined behavior per spec §3;
/// `catalog` rejects it at fragment registration time (see
/// `VersionCatalog`/engine registration in the `reader` crate).
pub const INDICATOR_COLUMN: &str = "__ndb_reserved_indicator__";

/// Canonical error type for the table read path.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("table not found: {namespace}/{table_name}")]
    TableNotFound { namespace: String, table_name: String },

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("projection widens selection, columns not previously selected: {0:?}")]
    ProjectionWidensSelection(Vec<String>),

    #[error("predicate leaf references version {leaf:?}, expected {expected:?}")]
    CrossTableReference { leaf: VersionId, expected: VersionId },

    #[error("invalid literal: {0}")]
    InvalidLiteral(String),

    #[error("heterogeneous deletes: fragment columns {found:?} do not match prior deletes {expected:?}")]
    HeterogeneousDeletes { expected: Vec<String>, found: Vec<String> },

    #[error("unknown fragment kind: {0}")]
    UnknownFragmentKind(String),

    #[error("materialize cancelled")]
    Cancelled,

    #[error("engine error: {0}")]
    EngineError(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias that carries a `ReadError`.
pub type ReadResult<T> = Result<T, ReadError>;

/// A single materialized cell value.
///
/// Distinct from `types::ValueLiteral` (a predicate comparison argument):
/// this is the shape of data actually stored in a columnar fragment, which
/// the source leaves to pandas/parquet to define and we widen slightly to
/// include `Bool`/`Null` so comparisons against boolean shortcut columns
/// (§4.3) and absent values round-trip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Cell {
    Str(String),
    Timestamp(chrono::DateTime<chrono::Utc>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Cell {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<types::ValueLiteral> for Cell {
    fn from(lit: types::ValueLiteral) -> Self {
        match lit {
            types::ValueLiteral::Str(s) => Cell::Str(s),
            types::ValueLiteral::Timestamp(t) => Cell::Timestamp(t),
            types::ValueLiteral::Int(i) => Cell::Int(i),
            types::ValueLiteral::Float(f) => Cell::Float(f),
        }
    }
}

/// A positional row of materialized cells.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row(pub Vec<Cell>);

/// A rectangular, fully materialized result set: column labels plus rows.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Relation {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Relation {
    pub fn empty() -> Self {
        Self { columns: Vec::new(), rows: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Runtime configuration for a `materialize()` call.
///
/// # Example
/// ```
/// use common::ReaderConfig;
///
/// let config = ReaderConfig::builder()
///     .check_cancellation(true)
///     .build();
/// assert_eq!(config.indicator_column, "__ndb_reserved_indicator__");
/// ```
#[derive(Clone, Debug, bon::Builder)]
pub struct ReaderConfig {
    /// Whether materialize checks a `CancellationToken` between fragments (§5).
    #[builder(default = true)]
    pub check_cancellation: bool,
    /// Overridable reserved indicator column name (default: `INDICATOR_COLUMN`).
    #[builder(default = INDICATOR_COLUMN.to_string())]
    pub indicator_column: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            check_cancellation: true,
            indicator_column: INDICATOR_COLUMN.to_string(),
        }
    }
}

/// Cooperative cancellation flag, checked by the merge engine between fragments.
///
/// Cloning shares the underlying flag; `cancel()` from any clone is observed
/// by every other clone's `is_cancelled()`.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-call counters describing how a `materialize()` traversed the manifest.
///
/// Mirrors the teacher's `common::ExecutionStats`: returned data rather than
/// logged, since neither the source nor the teacher workspace logs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterializeStats {
    pub write_fragments_read: u64,
    pub delete_fragments_read: u64,
    pub rows_returned: u64,
}

/// Convenient re-exports for downstream crates.
pub mod prelude {
    pub use crate::{
        CancellationToken, Cell, MaterializeStats, ReadError, ReadResult, ReaderConfig, Relation,
        Row, VersionId, INDICATOR_COLUMN,
    };
}
