//! The plan compiler (§4.4): folds a `TableHandle`'s op list into a
//! projection and a predicate, enforcing that no projection re-adds a
//! previously dropped column and that every predicate leaf's version
//! matches the handle being compiled.

use crate::handle::Op;
use common::{ReadError, ReadResult, VersionId};
use engine::Projection;
use predicate::Predicate;

/// The folded result of `compile`: a structured projection/predicate pair
/// the merge engine drives the execution-engine collaborator with, plus
/// clause-string rendering for the textual contract spec §4.4/§6 names.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledPlan {
    pub projection: Projection,
    /// `None` means the folded conjunction is the literal truth `TRUE`
    /// (zero `RestrictRows` ops, §4.4).
    pub predicate: Option<Predicate>,
}

impl CompiledPlan {
    /// "SELECT {alias}.*" or "SELECT {alias}.\"a\", {alias}.\"b\", ..." (§4.4).
    pub fn projection_clause(&self) -> String {
        match &self.projection {
            Projection::All => "SELECT {alias}.*".to_string(),
            Projection::Columns(cols) => {
                let rendered: Vec<String> =
                    cols.iter().map(|c| format!("{{alias}}.\"{c}\"")).collect();
                format!("SELECT {}", rendered.join(", "))
            }
        }
    }

    /// The left-associative AND-fold of every `RestrictRows` predicate, or
    /// the literal `TRUE` if there were none (§4.4).
    pub fn predicate_clause(&self) -> ReadResult<String> {
        match &self.predicate {
            None => Ok("TRUE".to_string()),
            Some(p) => p.render_template(),
        }
    }
}

/// Folds `ops` into a `CompiledPlan`, validating against `version_id` (§4.4).
pub fn compile(ops: &[Op], version_id: VersionId) -> ReadResult<CompiledPlan> {
    let mut projection = Projection::All;

    for op in ops {
        let Op::ProjectColumns(cols) = op else { continue };
        projection = match projection {
            Projection::All => Projection::Columns(cols.clone()),
            Projection::Columns(current) => {
                let offending: Vec<String> =
                    cols.iter().filter(|c| !current.contains(c)).cloned().collect();
                if !offending.is_empty() {
                    return Err(ReadError::ProjectionWidensSelection(offending));
                }
                Projection::Columns(cols.clone())
            }
        };
    }

    let mut predicate: Option<Predicate> = None;
    for op in ops {
        let Op::RestrictRows(p) = op else { continue };
        p.validate_version(version_id)?;
        predicate = Some(match predicate {
            None => p.clone(),
            Some(acc) => acc.and(p.clone()),
        });
    }

    Ok(CompiledPlan { projection, predicate })
}
