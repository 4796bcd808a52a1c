//! The merge engine (§4.5, §4.6): walks the manifest newest-first,
//! accumulates suppression state, and joins each WRITE against it.

use crate::plan::CompiledPlan;
use catalog::FileKind;
use common::{Cell, MaterializeStats, ReadError, ReadResult, ReaderConfig, Relation, Row};
use engine::{AntiJoinSpec, ColumnarFileReader, RelationalEngine};

use crate::handle::TableHandle;

pub(crate) fn merge(
    handle: &TableHandle,
    plan: &CompiledPlan,
    file_reader: &dyn ColumnarFileReader,
    relational_engine: &dyn RelationalEngine,
    config: &ReaderConfig,
    cancel: Option<&common::CancellationToken>,
) -> ReadResult<(Relation, MaterializeStats)> {
    let dedup_keys = handle.schema().dedup_keys().map(|k| k.to_vec());

    let mut seen = Relation::empty();
    let mut deletes = Relation::empty();
    let mut fragment_results: Vec<Relation> = Vec::new();
    let mut stats = MaterializeStats::default();

    for entry in handle.data_files().iter().rev() {
        if config.check_cancellation {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    return Err(ReadError::Cancelled);
                }
            }
        }

        match entry.kind {
            FileKind::Write => {
                let relation = file_reader.open(&entry.location)?;
                reject_reserved_column(&relation, &config.indicator_column)?;

                let delete_join_columns: Vec<String> = deletes
                    .columns
                    .iter()
                    .filter(|c| *c != &config.indicator_column)
                    .cloned()
                    .collect();
                let seen_join_columns = dedup_keys.clone().unwrap_or_default();

                let mut anti_joins = Vec::new();
                if !deletes.is_empty() {
                    anti_joins.push(AntiJoinSpec { relation: &deletes, join_columns: &delete_join_columns });
                }
                if !seen.is_empty() {
                    anti_joins.push(AntiJoinSpec { relation: &seen, join_columns: &seen_join_columns });
                }

                // Seen is extended from every row that survives the anti-joins
                // against Deletes/Seen, independent of the user's predicate: a
                // row the predicate would exclude still shadows older rows on
                // the dedup key (§4.6 — "A row produced by a WRITE that does
                // not satisfy the user predicate is still recorded in Seen").
                // Queried separately from `result` below (which additionally
                // applies the predicate), and stashed rather than merged into
                // `seen` immediately: `anti_joins` still borrows `seen`/`deletes`
                // and is reused for the `result` query right after.
                let seen_addition = match &dedup_keys {
                    Some(keys) => {
                        let seen_projection = engine::Projection::Columns(keys.clone());
                        Some(relational_engine.query(&relation, &seen_projection, None, &anti_joins)?)
                    }
                    None => None,
                };

                let result = relational_engine.query(
                    &relation,
                    &plan.projection,
                    plan.predicate.as_ref(),
                    &anti_joins,
                )?;

                stats.write_fragments_read += 1;
                stats.rows_returned += result.rows.len() as u64;

                if let Some(pre_predicate) = seen_addition {
                    seen = append_with_indicator(seen, pre_predicate, &config.indicator_column);
                }

                fragment_results.push(result);
            }
            FileKind::Delete => {
                let relation = file_reader.open(&entry.location)?;
                reject_reserved_column(&relation, &config.indicator_column)?;

                if !deletes.is_empty() {
                    let mut expected: Vec<String> = deletes
                        .columns
                        .iter()
                        .filter(|c| *c != &config.indicator_column)
                        .cloned()
                        .collect();
                    let mut found = relation.columns.clone();
                    expected.sort();
                    found.sort();
                    if expected != found {
                        return Err(ReadError::HeterogeneousDeletes { expected, found });
                    }
                }

                stats.delete_fragments_read += 1;
                deletes = append_with_indicator(deletes, relation, &config.indicator_column);
            }
        }
    }

    fragment_results.reverse();
    let result = concat_fragments(fragment_results);
    Ok((result, stats))
}

fn reject_reserved_column(relation: &Relation, indicator_column: &str) -> ReadResult<()> {
    if relation.columns.iter().any(|c| c == indicator_column) {
        return Err(ReadError::EngineError(format!(
            "source column uses reserved indicator name '{indicator_column}'"
        )));
    }
    Ok(())
}

fn append_with_indicator(accumulator: Relation, fragment: Relation, indicator_column: &str) -> Relation {
    let mut fragment = fragment;
    fragment.columns.push(indicator_column.to_string());
    for row in fragment.rows.iter_mut() {
        row.0.push(Cell::Int(1));
    }

    if accumulator.columns.is_empty() {
        fragment
    } else {
        let mut accumulator = accumulator;
        accumulator.rows.extend(fragment.rows);
        accumulator
    }
}

fn concat_fragments(fragments: Vec<Relation>) -> Relation {
    match fragments.split_first() {
        None => Relation::empty(),
        Some((first, _)) => {
            let columns = first.columns.clone();
            let rows: Vec<Row> = fragments.into_iter().flat_map(|r| r.rows).collect();
            Relation { columns, rows }
        }
    }
}
