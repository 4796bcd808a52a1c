//! `TableHandle::materialize`: compiles the op list once (§4.4) then drives
//! the merge engine (§4.5, §4.6) over the manifest.

use crate::handle::TableHandle;
use crate::plan;
use common::{CancellationToken, MaterializeStats, ReadResult, ReaderConfig, Relation};
use engine::{ColumnarFileReader, RelationalEngine};

impl TableHandle {
    /// Materializes with default configuration and no cancellation support.
    pub fn materialize(
        &self,
        file_reader: &dyn ColumnarFileReader,
        relational_engine: &dyn RelationalEngine,
    ) -> ReadResult<Relation> {
        self.materialize_with(file_reader, relational_engine, &ReaderConfig::default(), None)
            .map(|(relation, _)| relation)
    }

    /// Materializes with explicit configuration and an optional cancellation
    /// token, returning the result alongside traversal stats (§5).
    pub fn materialize_with(
        &self,
        file_reader: &dyn ColumnarFileReader,
        relational_engine: &dyn RelationalEngine,
        config: &ReaderConfig,
        cancel: Option<&CancellationToken>,
    ) -> ReadResult<(Relation, MaterializeStats)> {
        let compiled = plan::compile(self.ops(), self.version_id())?;
        crate::merge::merge(self, &compiled, file_reader, relational_engine, config, cancel)
    }
}
