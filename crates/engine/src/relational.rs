//! The execution-engine collaborator (§1, §6): accepts "a single relational
//! query with equi-joins, IS NULL filters, and the predicate operator set of
//! §4.2." Out of scope per spec §1; this module is the trait boundary
//! `reader`'s merge engine drives, plus an in-memory reference
//! implementation.
//!
//! Per the REDESIGN FLAGS (§9, "Source pattern of constructing queries by
//! string substitution ... replace with a structured query-builder"), the
//! anti-joins and predicate are passed here as structured values rather than
//! interpolated SQL text. `predicate::Predicate::render`/`render_template`
//! remain available separately for producing the textual
//! projection_clause/predicate_clause the spec's external interface (§6)
//! names, for engines that only accept SQL text.

use crate::eval;
use common::{ReadError, ReadResult, Relation, Row};
use predicate::Predicate;

/// The folded projection: either "all columns" or an explicit ordered list.
#[derive(Clone, Debug, PartialEq)]
pub enum Projection {
    All,
    Columns(Vec<String>),
}

impl Projection {
    pub fn apply(&self, relation: &Relation) -> ReadResult<Relation> {
        match self {
            Projection::All => Ok(relation.clone()),
            Projection::Columns(cols) => {
                let idxs = cols
                    .iter()
                    .map(|c| {
                        relation
                            .column_index(c)
                            .ok_or_else(|| ReadError::EngineError(format!("unknown column '{c}' in projection")))
                    })
                    .collect::<ReadResult<Vec<usize>>>()?;
                let rows = relation
                    .rows
                    .iter()
                    .map(|r| Row(idxs.iter().map(|&i| r.0[i].clone()).collect()))
                    .collect();
                Ok(Relation { columns: cols.clone(), rows })
            }
        }
    }
}

/// One anti-join input: exclude rows of the base relation that match a row
/// of `relation` on every column named in `join_columns` (§4.6 — "Deletes":
/// every non-indicator column; "Seen": every column in D).
pub struct AntiJoinSpec<'a> {
    pub relation: &'a Relation,
    pub join_columns: &'a [String],
}

/// The relational-query surface the merge engine drives per fragment.
pub trait RelationalEngine {
    /// Applies `anti_joins` (in order), then `predicate`, then `projection`
    /// to `relation`, returning the result (§4.6).
    fn query(
        &self,
        relation: &Relation,
        projection: &Projection,
        predicate: Option<&Predicate>,
        anti_joins: &[AntiJoinSpec],
    ) -> ReadResult<Relation>;
}

/// In-memory reference implementation. Evaluates anti-joins and the
/// predicate directly against materialized rows rather than compiling SQL.
pub struct InMemoryEngine;

impl RelationalEngine for InMemoryEngine {
    fn query(
        &self,
        relation: &Relation,
        projection: &Projection,
        predicate: Option<&Predicate>,
        anti_joins: &[AntiJoinSpec],
    ) -> ReadResult<Relation> {
        let mut keep = vec![true; relation.rows.len()];

        for spec in anti_joins {
            let mask = anti_join_mask(relation, spec.relation, spec.join_columns)?;
            for (k, m) in keep.iter_mut().zip(mask) {
                *k = *k && m;
            }
        }

        if let Some(predicate) = predicate {
            for (i, row) in relation.rows.iter().enumerate() {
                if keep[i] {
                    keep[i] = eval::eval(predicate, &relation.columns, row)?;
                }
            }
        }

        let filtered = Relation {
            columns: relation.columns.clone(),
            rows: relation
                .rows
                .iter()
                .zip(keep.iter())
                .filter_map(|(row, k)| k.then(|| row.clone()))
                .collect(),
        };

        projection.apply(&filtered)
    }
}

/// `true` at index `i` means row `i` of `base` has NO match in `anti` on
/// `join_columns` — i.e. it survives the anti-join (the `IS NULL` branch of
/// the left join, §4.6).
fn anti_join_mask(base: &Relation, anti: &Relation, join_columns: &[String]) -> ReadResult<Vec<bool>> {
    if anti.is_empty() {
        return Ok(vec![true; base.rows.len()]);
    }

    let base_idxs = resolve_columns(base, join_columns)?;
    let anti_idxs = resolve_columns(anti, join_columns)?;

    Ok(base
        .rows
        .iter()
        .map(|row| {
            !anti.rows.iter().any(|other| {
                base_idxs
                    .iter()
                    .zip(anti_idxs.iter())
                    .all(|(&bi, &ai)| row.0[bi] == other.0[ai])
            })
        })
        .collect())
}

fn resolve_columns(relation: &Relation, names: &[String]) -> ReadResult<Vec<usize>> {
    names
        .iter()
        .map(|c| {
            relation
                .column_index(c)
                .ok_or_else(|| ReadError::EngineError(format!("unknown join column '{c}'")))
        })
        .collect()
}
