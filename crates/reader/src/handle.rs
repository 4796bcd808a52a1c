//! `TableHandle`: the immutable builder value at the center of the query
//! algebra (§3, §4.1). Every builder method shares the handle's first three
//! fields and appends one op.

use catalog::{DataFileEntry, Schema};
use common::VersionId;
use predicate::{Column, Predicate};
use std::sync::Arc;

/// One queued operation, appended by a builder method (§3).
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    ProjectColumns(Vec<String>),
    RestrictRows(Predicate),
}

/// An immutable value carrying `(version_id, schema, data_file list,
/// op list)` (§3, §4.1). Cheap to clone: the manifest and schema are shared
/// via `Arc`, and each builder call clones and extends only the (typically
/// short) op list.
#[derive(Clone, Debug, PartialEq)]
pub struct TableHandle {
    pub(crate) version_id: VersionId,
    pub(crate) schema: Arc<Schema>,
    pub(crate) data_files: Arc<Vec<DataFileEntry>>,
    pub(crate) ops: Arc<Vec<Op>>,
}

impl TableHandle {
    /// Constructs a handle with no ops queued — the starting point `read()`
    /// hands back after resolving the version catalog (§6).
    pub fn new(version_id: VersionId, schema: Schema, data_files: Vec<DataFileEntry>) -> Self {
        Self {
            version_id,
            schema: Arc::new(schema),
            data_files: Arc::new(data_files),
            ops: Arc::new(Vec::new()),
        }
    }

    pub fn version_id(&self) -> VersionId {
        self.version_id
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn data_files(&self) -> &[DataFileEntry] {
        &self.data_files
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    fn with_op(&self, op: Op) -> Self {
        let mut ops = (*self.ops).clone();
        ops.push(op);
        Self {
            version_id: self.version_id,
            schema: Arc::clone(&self.schema),
            data_files: Arc::clone(&self.data_files),
            ops: Arc::new(ops),
        }
    }

    /// A bound reference to `name`, usable to build comparison predicates
    /// (§4.3). Does not itself queue an op.
    pub fn column(&self, name: impl Into<String>) -> Column {
        Column::new(self.version_id, name)
    }

    /// Appends a `ProjectColumns` op, narrowing (never widening — enforced
    /// at compile time, §4.4) the selected columns.
    pub fn project_columns<I, T>(&self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.with_op(Op::ProjectColumns(columns.into_iter().map(Into::into).collect()))
    }

    /// Appends a `RestrictRows` op.
    pub fn filter(&self, predicate: Predicate) -> Self {
        self.with_op(Op::RestrictRows(predicate))
    }
}
