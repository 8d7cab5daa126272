use crate::error::Error;
use crate::formula::VariableId;
use crate::propagator::Propagator;
use log::debug;
use std::collections::TryReserveError;

/// Dense grid of potential edges between the non-shared vertices of G and H.
///
/// The matrix only remembers ids; the variables themselves live in the
/// [`Propagator`] that allocated them.
#[derive(Debug, Clone)]
pub struct EdgeMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<VariableId>,
}

impl EdgeMatrix {
    /// Allocates `rows * cols` fresh variables in `propagator`, row-major, each
    /// tagged with its own (row, col).
    pub fn new(propagator: &mut Propagator, rows: usize, cols: usize) -> Result<Self, Error> {
        let len = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::InvalidDimensions(format!("{} x {} overflows", rows, cols)))?;

        let too_large = |_: TryReserveError| {
            Error::InvalidDimensions(format!("{} x {} cells cannot be allocated", rows, cols))
        };
        let mut cells: Vec<VariableId> = Vec::new();
        cells.try_reserve_exact(len).map_err(too_large)?;
        propagator.reserve_variables(len).map_err(too_large)?;

        for row in 0..rows {
            for col in 0..cols {
                cells.push(propagator.new_variable(row, col));
            }
        }
        debug!("allocated {}x{} edge matrix", rows, cols);
        Ok(Self { rows, cols, cells })
    }

    /// Sizes the matrix for gluing G and H along a common subgraph K:
    /// `|V(G)| - |V(K)| - 1` rows by `|V(H)| - |V(K)| - 1` columns.
    pub fn for_gluing(
        propagator: &mut Propagator,
        g_order: usize,
        h_order: usize,
        k_order: usize,
    ) -> Result<Self, Error> {
        let side = |order: usize, name: &str| {
            order
                .checked_sub(k_order)
                .and_then(|d| d.checked_sub(1))
                .ok_or_else(|| {
                    Error::InvalidDimensions(format!(
                        "|V({})| = {} leaves no room for |V(K)| = {} plus the gluing vertex",
                        name, order, k_order
                    ))
                })
        };
        let rows = side(g_order, "G")?;
        let cols = side(h_order, "H")?;
        Self::new(propagator, rows, cols)
    }

    pub fn at(&self, row: usize, col: usize) -> Result<VariableId, Error> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.cells[row * self.cols + col])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, VariableId)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &var)| (i / cols, i % cols, var))
    }
}
