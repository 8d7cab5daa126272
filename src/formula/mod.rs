pub mod problem;

use std::fmt::{self, Display, Formatter};

/// Index of a potential edge inside a [`Propagator`](crate::Propagator).
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct VariableId(pub usize);

/// Index of a clause inside a [`Propagator`](crate::Propagator).
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct ClauseId(pub usize);

/// Current state of a potential edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeValue {
    Unknown,
    True,
    False,
}

impl EdgeValue {
    pub fn is_assigned(self) -> bool {
        self != EdgeValue::Unknown
    }
}

impl Default for EdgeValue {
    fn default() -> Self {
        EdgeValue::Unknown
    }
}

impl From<bool> for EdgeValue {
    fn from(exists: bool) -> Self {
        if exists {
            EdgeValue::True
        } else {
            EdgeValue::False
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClauseKind {
    /// Violated once every member edge exists.
    Clique,
    /// Violated once every member edge is absent.
    IndependentSet,
}

impl ClauseKind {
    /// The assigned value that moves a clause of this kind towards its fail state.
    pub fn undesired(self) -> bool {
        match self {
            ClauseKind::Clique => true,
            ClauseKind::IndependentSet => false,
        }
    }

    pub fn is_clique(self) -> bool {
        self == ClauseKind::Clique
    }
}

/// Coordinates of a potential edge: a vertex of G and a vertex of H.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "x{}", self.0)
    }
}

impl Display for ClauseId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "c{}", self.0)
    }
}

impl Display for EdgeValue {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str(match self {
            EdgeValue::Unknown => "?",
            EdgeValue::True => "T",
            EdgeValue::False => "F",
        })
    }
}

impl Display for ClauseKind {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str(match self {
            ClauseKind::Clique => "clique",
            ClauseKind::IndependentSet => "ind-set",
        })
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "({}, {})", self.row, self.col)
    }
}
