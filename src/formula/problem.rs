use crate::error::Error;
use crate::formula::ClauseKind;
use crate::matrix::EdgeMatrix;
use crate::propagator::Propagator;
use crate::Propagation;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A clause set over an edge matrix plus an assignment sequence to replay.
///
/// Cells are numbered from 1 in row-major order, so cell `(row, col)` is
/// `row * cols + col + 1` in the text format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub rows: usize,
    pub cols: usize,
    pub clauses: Vec<(ClauseKind, Vec<(usize, usize)>)>,
    pub assignments: Vec<((usize, usize), bool)>,
}

#[derive(thiserror::Error, Debug)]
pub enum ProblemParseError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("format error: {0}")]
    Format(String),
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Problem, ProblemParseError> {
    let file = File::open(path)?;
    parse(file)
}

pub fn parse<R: Read>(reader: R) -> Result<Problem, ProblemParseError> {
    let reader = BufReader::new(reader);

    let mut dims: Option<(usize, usize)> = None;
    let mut clauses = vec![];
    let mut assignments = vec![];

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if dims.is_some() {
                    return Err(ProblemParseError::Format("duplicate 'p' line".into()));
                }
                if line.next() != Some("glue") {
                    return Err(ProblemParseError::Format("missing 'glue'".into()));
                }
                let rows = parse_usize(line.next(), "invalid rows")?;
                let cols = parse_usize(line.next(), "invalid cols")?;
                if rows.checked_mul(cols).is_none() {
                    return Err(ProblemParseError::Format("matrix too large".into()));
                }
                dims = Some((rows, cols));
            }
            Some(&tag) => {
                let (rows, cols) =
                    dims.ok_or_else(|| ProblemParseError::Format("missing 'p' line before clauses".into()))?;
                let _ = line.next();

                let mut literals = vec![];
                for x in line {
                    match parse_literal(x, rows * cols)? {
                        Some((cell, positive)) => literals.push(((cell / cols, cell % cols), positive)),
                        None => break,
                    }
                }

                match tag {
                    "k" | "i" => {
                        if literals.iter().any(|(_, positive)| !positive) {
                            return Err(ProblemParseError::Format("negative literal in clause".into()));
                        }
                        let kind = if tag == "k" {
                            ClauseKind::Clique
                        } else {
                            ClauseKind::IndependentSet
                        };
                        clauses.push((kind, literals.into_iter().map(|(cell, _)| cell).collect()));
                    }
                    "a" => assignments.extend(literals),
                    _ => return Err(ProblemParseError::Format(format!("unknown line tag '{}'", tag))),
                }
            }
        }
    }

    let (rows, cols) = dims.ok_or_else(|| ProblemParseError::Format("missing 'p' line".into()))?;
    Ok(Problem {
        rows,
        cols,
        clauses,
        assignments,
    })
}

fn parse_usize(s: Option<&str>, what: &str) -> Result<usize, ProblemParseError> {
    s.and_then(|c| c.parse::<usize>().ok())
        .ok_or_else(|| ProblemParseError::Format(what.into()))
}

// Returns the 0-based cell and polarity, or None for the terminating 0
fn parse_literal(s: &str, num_cells: usize) -> Result<Option<(usize, bool)>, ProblemParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| ProblemParseError::Format(format!("invalid literal '{}'", s)))?;
    if l == 0 {
        return Ok(None);
    }
    let cell = l.unsigned_abs();
    if cell > num_cells {
        return Err(ProblemParseError::Format(format!(
            "variable {} outside a matrix of {} cells",
            cell, num_cells
        )));
    }
    Ok(Some((cell - 1, l > 0)))
}

impl Problem {
    /// Allocates the matrix and adds every clause, without assigning anything.
    pub fn load(&self) -> Result<(Propagator, EdgeMatrix), Error> {
        let mut propagator = Propagator::new();
        let matrix = EdgeMatrix::new(&mut propagator, self.rows, self.cols)?;
        for (kind, cells) in &self.clauses {
            let members = cells
                .iter()
                .map(|&(row, col)| matrix.at(row, col))
                .collect::<Result<Vec<_>, _>>()?;
            propagator.add_clause(members, *kind)?;
        }
        debug!(
            "loaded {} clauses over {} variables",
            propagator.num_clauses(),
            propagator.num_variables()
        );
        Ok((propagator, matrix))
    }

    /// Applies the assignments in order, stopping at the first conflict.
    pub fn replay(&self, propagator: &mut Propagator, matrix: &EdgeMatrix) -> Result<Propagation, Error> {
        for &((row, col), exists) in &self.assignments {
            let var = matrix.at(row, col)?;
            if let Propagation::Conflict(clause) = propagator.assign(var, exists)? {
                return Ok(Propagation::Conflict(clause));
            }
        }
        Ok(Propagation::NoConflict)
    }
}
