//! Incremental clause bookkeeping for gluing searches over potential edges.
//!
//! A [`Propagator`] owns a set of tri-state edge variables and a set of clique
//! and independent-set clauses over them. Assigning a variable updates the
//! counters of every clause it belongs to in constant time per clause, so a
//! search driver can tell right away when a clause has hit its fail state and
//! roll the assignment back with [`Propagator::unassign`] or
//! [`Propagator::backtrack`].

pub mod error;
pub mod formula;
mod matrix;
mod propagator;

#[cfg(test)]
mod reference;

/// Outcome of a single assignment.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Propagation {
    /// The assignment put this clause into its fail state.
    Conflict(ClauseId),
    NoConflict,
}

pub use error::Error;
pub use formula::{ClauseId, ClauseKind, Coord, EdgeValue, VariableId};
pub use matrix::EdgeMatrix;
pub use propagator::{Clause, Propagator, Variable};
