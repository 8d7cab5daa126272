use crate::formula::{ClauseId, VariableId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("variable {0} is already assigned")]
    AlreadyAssigned(VariableId),
    #[error("variable {0} is not assigned")]
    NotAssigned(VariableId),
    #[error("cannot register clause {clause} on {variable}: {reason}")]
    PreconditionViolated {
        variable: VariableId,
        clause: ClauseId,
        reason: &'static str,
    },
    #[error("clause has no members")]
    EmptyClause,
    #[error("variable {0} does not belong to this propagator")]
    UnknownVariable(VariableId),
    #[error("invalid matrix dimensions: {0}")]
    InvalidDimensions(String),
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
