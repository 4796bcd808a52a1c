//! The columnar file reader collaborator (§1, §6): "reads a data file into a
//! relation that can be joined/filtered". Out of scope per spec §1; this
//! module defines the trait boundary plus an in-memory reference
//! implementation used by `reader`'s own tests.

use common::{ReadError, ReadResult, Relation};
use hashbrown::HashMap;

pub trait ColumnarFileReader {
    /// Opens `location` (already resolved by the version catalog) as a
    /// relation with a stable column set.
    fn open(&self, location: &str) -> ReadResult<Relation>;
}

/// Register fragments ahead of time and serve them back by location.
#[derive(Default)]
pub struct InMemoryFileReader {
    files: HashMap<String, Relation>,
}

impl InMemoryFileReader {
    pub fn new() -> Self {
        Self { files: HashMap::new() }
    }

    pub fn register(&mut self, location: impl Into<String>, relation: Relation) {
        self.files.insert(location.into(), relation);
    }
}

impl ColumnarFileReader for InMemoryFileReader {
    fn open(&self, location: &str) -> ReadResult<Relation> {
        self.files
            .get(location)
            .cloned()
            .ok_or_else(|| ReadError::EngineError(format!("no such fragment: {location}")))
    }
}
