//! The version-catalog collaborator (§1, §6): maps `(namespace, table_name)`
//! to a manifest of data files plus a schema.
//!
//! Out of scope per spec §1 ("the version-catalog service that maps
//! (namespace, table_name) → manifest ... is not specified here"). This
//! crate defines the trait boundary `reader` builds against and an
//! in-memory reference implementation, in the style of the teacher's
//! `catalog::Catalog` (JSON-serializable, name-indexed lookups via
//! `ahash`/`hashbrown`).


use ahash::RandomState;
use common::{ReadError, ReadResult, VersionId};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

type Map<K, V> = HashMap<K, V, RandomState>;

/// The kind of a manifest entry: a fragment of new rows, or of suppressed
/// key tuples (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Write,
    Delete,
}

/// One manifest entry. Position within the manifest's `Vec` encodes
/// temporal order (earlier = older), per §3.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataFileEntry {
    pub kind: FileKind,
    pub location: String,
}

impl DataFileEntry {
    pub fn write(location: impl Into<String>) -> Self {
        Self { kind: FileKind::Write, location: location.into() }
    }

    pub fn delete(location: impl Into<String>) -> Self {
        Self { kind: FileKind::Delete, location: location.into() }
    }
}

impl FileKind {
    /// Parses a manifest's on-disk `data_file_type` string.
    ///
    /// `FileKind` itself is a closed enum (WRITE/DELETE), so a manifest
    /// deserialized straight into it can never carry a third kind — but a
    /// loader reading the collaborator-owned on-disk format (spec §6) deals
    /// in raw strings first, and this is where an unrecognized one is
    /// rejected (§4.6, §7: `UnknownFragmentKind`).
    pub fn parse(raw: &str) -> ReadResult<FileKind> {
        match raw {
            "write" => Ok(FileKind::Write),
            "delete" => Ok(FileKind::Delete),
            other => Err(ReadError::UnknownFragmentKind(other.to_string())),
        }
    }
}

/// A table's schema: at minimum, a possibly-absent ordered set of
/// deduplication-key columns (§3). An empty list is normalized to absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    dedup_keys: Option<Vec<String>>,
}

impl Schema {
    pub fn new(dedup_keys: Option<Vec<String>>) -> Self {
        let dedup_keys = match dedup_keys {
            Some(keys) if keys.is_empty() => None,
            other => other,
        };
        Self { dedup_keys }
    }

    pub fn without_dedup() -> Self {
        Self { dedup_keys: None }
    }

    pub fn dedup_keys(&self) -> Option<&[String]> {
        self.dedup_keys.as_deref()
    }
}

/// The resolved (version, schema, manifest) triple for a table's current
/// version, as returned by `VersionCatalog::current_version` (§6).
#[derive(Clone, Debug, PartialEq)]
pub struct TableVersion {
    pub version_id: VersionId,
    pub schema: Schema,
    pub data_files: Vec<DataFileEntry>,
}

/// The external collaborator boundary: resolves a table's current version
/// and translates manifest locations into something the file reader can
/// open. Implementations own the on-disk schema/data-list serialization
/// format, which spec §6 leaves collaborator-owned.
pub trait VersionCatalog {
    fn current_version(&self, namespace: &str, table_name: &str) -> ReadResult<Option<TableVersion>>;

    fn resolve(&self, location: &str) -> ReadResult<String>;
}

/// In-memory reference implementation, standing in for the real
/// version-catalog service during tests (and for embedders that keep
/// manifests in memory rather than behind a service).
#[derive(Default)]
pub struct InMemoryVersionCatalog {
    tables: Map<(String, String), TableVersion>,
}

impl InMemoryVersionCatalog {
    pub fn new() -> Self {
        Self { tables: Map::default() }
    }

    pub fn register(&mut self, namespace: &str, table_name: &str, version: TableVersion) {
        self.tables.insert((namespace.to_string(), table_name.to_string()), version);
    }
}

impl VersionCatalog for InMemoryVersionCatalog {
    fn current_version(&self, namespace: &str, table_name: &str) -> ReadResult<Option<TableVersion>> {
        Ok(self.tables.get(&(namespace.to_string(), table_name.to_string())).cloned())
    }

    fn resolve(&self, location: &str) -> ReadResult<String> {
        Ok(location.to_string())
    }
}
