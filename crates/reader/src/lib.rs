//! The read path of a versioned, append-structured table store (spec §1).
//!
//! # Example
//!
//! ```
//! use catalog::{DataFileEntry, InMemoryVersionCatalog, Schema, TableVersion};
//! use common::{Cell, Relation, Row, VersionId};
//! use engine::{InMemoryEngine, InMemoryFileReader};
//!
//! let mut catalog = InMemoryVersionCatalog::new();
//! catalog.register(
//!     "ns",
//!     "events",
//!     TableVersion {
//!         version_id: VersionId(1),
//!         schema: Schema::without_dedup(),
//!         data_files: vec![DataFileEntry::write("w1")],
//!     },
//! );
//!
//! let mut files = InMemoryFileReader::new();
//! files.register(
//!     "w1",
//!     Relation {
//!         columns: vec!["id".into(), "a".into()],
//!         rows: vec![Row(vec![Cell::Int(1), Cell::Int(10)])],
//!     },
//! );
//!
//! let handle = reader::read(&catalog, "ns", "events").unwrap();
//! let result = handle.materialize(&files, &InMemoryEngine).unwrap();
//! assert_eq!(result.rows.len(), 1);
//! ```

mod handle;
mod materialize;
mod merge;
mod plan;
mod selector;


pub use handle::{Op, TableHandle};
pub use plan::{compile, CompiledPlan};
pub use selector::{Selected, Selector};

use catalog::{DataFileEntry, VersionCatalog};
use common::{ReadError, ReadResult};

/// Resolves `(namespace, table_name)`'s current version through `catalog`
/// and returns a fresh `TableHandle` with no ops queued (§6).
///
/// # Errors
///
/// Returns `ReadError::TableNotFound` if the catalog has no current version
/// for the requested table.
pub fn read(catalog: &dyn VersionCatalog, namespace: &str, table_name: &str) -> ReadResult<TableHandle> {
    let version = catalog.current_version(namespace, table_name)?.ok_or_else(|| {
        ReadError::TableNotFound { namespace: namespace.to_string(), table_name: table_name.to_string() }
    })?;

    let mut data_files = Vec::with_capacity(version.data_files.len());
    for entry in version.data_files {
        let resolved = catalog.resolve(&entry.location)?;
        data_files.push(DataFileEntry { kind: entry.kind, location: resolved });
    }

    Ok(TableHandle::new(version.version_id, version.schema, data_files))
}
