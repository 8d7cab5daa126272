use crate::error::Error;
use crate::formula::{ClauseId, ClauseKind, Coord, EdgeValue, VariableId};
use crate::Propagation;
use log::{debug, trace};
use std::collections::{HashSet, TryReserveError};
use std::ops::Index;

/// A potential edge and the clauses that mention it.
#[derive(Debug, Clone)]
pub struct Variable {
    coord: Coord,
    value: EdgeValue,
    clique_clauses: Vec<ClauseId>,
    ind_set_clauses: Vec<ClauseId>,
}

impl Variable {
    fn new(row: usize, col: usize) -> Self {
        Self {
            coord: Coord { row, col },
            value: EdgeValue::Unknown,
            clique_clauses: vec![],
            ind_set_clauses: vec![],
        }
    }

    fn register(&mut self, clause: ClauseId, is_clique: bool) {
        if is_clique {
            self.clique_clauses.push(clause);
        } else {
            self.ind_set_clauses.push(clause);
        }
    }

    fn clauses(&self) -> impl Iterator<Item = &ClauseId> {
        self.clique_clauses.iter().chain(self.ind_set_clauses.iter())
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn value(&self) -> EdgeValue {
        self.value
    }

    pub fn clique_clauses(&self) -> &[ClauseId] {
        &self.clique_clauses
    }

    pub fn ind_set_clauses(&self) -> &[ClauseId] {
        &self.ind_set_clauses
    }
}

/// A clique or independent-set constraint with counters kept in step with its members.
#[derive(Debug, Clone)]
pub struct Clause {
    members: Vec<VariableId>,
    kind: ClauseKind,
    count_unknown: usize,
    // members assigned the clause's undesired polarity
    count_undesired: usize,
}

impl Clause {
    fn new(members: Vec<VariableId>, kind: ClauseKind) -> Self {
        let count_unknown = members.len();
        Self {
            members,
            kind,
            count_unknown,
            count_undesired: 0,
        }
    }

    fn notify_assigned(&mut self, exists: bool) {
        debug_assert!(self.count_unknown > 0);
        self.count_unknown -= 1;
        if exists == self.kind.undesired() {
            self.count_undesired += 1;
        }
    }

    fn notify_unassigned(&mut self, exists: bool) {
        debug_assert!(self.count_unknown < self.members.len());
        self.count_unknown += 1;
        if exists == self.kind.undesired() {
            debug_assert!(self.count_undesired > 0);
            self.count_undesired -= 1;
        }
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn members(&self) -> &[VariableId] {
        &self.members
    }

    pub fn count_unknown(&self) -> usize {
        self.count_unknown
    }

    pub fn count_undesired(&self) -> usize {
        self.count_undesired
    }

    pub fn total_member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_full(&self) -> bool {
        self.count_unknown == 0
    }

    /// Every member is assigned and all of them landed on the undesired side.
    pub fn is_violated(&self) -> bool {
        self.count_unknown == 0 && self.count_undesired == self.members.len()
    }
}

/// Owns every variable and clause of one search episode.
///
/// Variables and clauses refer to each other by index, so the propagator can be
/// cloned wholesale when a driver wants to explore branches independently.
#[derive(Debug, Clone, Default)]
pub struct Propagator {
    variables: Vec<Variable>,
    clauses: Vec<Clause>,
    trail: Vec<VariableId>,
}

impl Propagator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn new_variable(&mut self, row: usize, col: usize) -> VariableId {
        let id = VariableId(self.variables.len());
        self.variables.push(Variable::new(row, col));
        id
    }

    pub(crate) fn reserve_variables(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.variables.try_reserve_exact(additional)
    }

    /// Adds a clause over `members` and registers it with each of them.
    ///
    /// Fails without touching any state if the clause is empty, names a variable
    /// twice, names a variable from elsewhere, or names a variable that has
    /// already been assigned.
    pub fn add_clause(
        &mut self,
        members: impl IntoIterator<Item = VariableId>,
        kind: ClauseKind,
    ) -> Result<ClauseId, Error> {
        let members: Vec<VariableId> = members.into_iter().collect();
        if members.is_empty() {
            return Err(Error::EmptyClause);
        }

        let id = ClauseId(self.clauses.len());
        let mut seen = HashSet::with_capacity(members.len());
        for &member in &members {
            let var = self.variables.get(member.0).ok_or(Error::UnknownVariable(member))?;
            if !seen.insert(member) {
                return Err(Error::PreconditionViolated {
                    variable: member,
                    clause: id,
                    reason: "variable appears twice in the clause",
                });
            }
            if var.value.is_assigned() {
                return Err(Error::PreconditionViolated {
                    variable: member,
                    clause: id,
                    reason: "variable is already assigned",
                });
            }
        }

        for &member in &members {
            self.variables[member.0].register(id, kind.is_clique());
        }
        debug!("{} clause {} over {} variables", kind, id, members.len());
        self.clauses.push(Clause::new(members, kind));
        Ok(id)
    }

    /// Assigns `var` and updates every clause that contains it.
    ///
    /// Returns the first clause driven into its fail state by this assignment,
    /// if any. All clauses are updated either way.
    pub fn assign(&mut self, var: VariableId, exists: bool) -> Result<Propagation, Error> {
        let state = self.variables.get_mut(var.0).ok_or(Error::UnknownVariable(var))?;
        if state.value.is_assigned() {
            return Err(Error::AlreadyAssigned(var));
        }
        state.value = EdgeValue::from(exists);
        self.trail.push(var);
        trace!("assign {} {} = {}", var, state.coord, state.value);

        let mut result = Propagation::NoConflict;
        for &idx in self.variables[var.0].clauses() {
            let clause = &mut self.clauses[idx.0];
            clause.notify_assigned(exists);
            if result == Propagation::NoConflict && clause.is_violated() {
                trace!("conflict in {} clause {}", clause.kind, idx);
                result = Propagation::Conflict(idx);
            }
        }
        Ok(result)
    }

    /// Reverts `var` to unknown, undoing its contribution to every clause.
    pub fn unassign(&mut self, var: VariableId) -> Result<(), Error> {
        let state = self.variables.get(var.0).ok_or(Error::UnknownVariable(var))?;
        if !state.value.is_assigned() {
            return Err(Error::NotAssigned(var));
        }
        let pos = self
            .trail
            .iter()
            .rposition(|v| *v == var)
            .expect("assigned variable should be on the trail");
        self.trail.remove(pos);
        self.clear(var);
        Ok(())
    }

    /// Unassigns the most recent assignments until only `len` remain.
    pub fn backtrack(&mut self, len: usize) {
        if len >= self.trail.len() {
            return;
        }
        trace!("backtrack: dropping to {} from {}", len, self.trail.len());
        let dropped = self.trail.split_off(len);
        for var in dropped.into_iter().rev() {
            self.clear(var);
        }
    }

    fn clear(&mut self, var: VariableId) {
        let state = &mut self.variables[var.0];
        let exists = match state.value {
            EdgeValue::True => true,
            EdgeValue::False => false,
            EdgeValue::Unknown => unreachable!("clearing unassigned variable {}", var),
        };
        state.value = EdgeValue::Unknown;
        trace!("unassign {} {}", var, state.coord);
        for &idx in self.variables[var.0].clauses() {
            self.clauses[idx.0].notify_unassigned(exists);
        }
    }

    pub fn value(&self, var: VariableId) -> Result<EdgeValue, Error> {
        self.variables
            .get(var.0)
            .map(Variable::value)
            .ok_or(Error::UnknownVariable(var))
    }

    pub fn variable(&self, var: VariableId) -> Option<&Variable> {
        self.variables.get(var.0)
    }

    pub fn clause(&self, clause: ClauseId) -> Option<&Clause> {
        self.clauses.get(clause.0)
    }

    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables.iter().enumerate().map(|(i, v)| (VariableId(i), v))
    }

    pub fn clauses(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.clauses.iter().enumerate().map(|(i, c)| (ClauseId(i), c))
    }

    pub fn violated_clauses(&self) -> impl Iterator<Item = ClauseId> + '_ {
        self.clauses().filter(|(_, c)| c.is_violated()).map(|(id, _)| id)
    }

    /// Assigned variables, oldest first.
    pub fn trail(&self) -> &[VariableId] {
        &self.trail
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// True when no clause has an unknown member. Variables outside every
    /// clause are not consulted, so a propagator without clauses is trivially full.
    pub fn all_clauses_full(&self) -> bool {
        self.clauses.iter().all(Clause::is_full)
    }

    pub fn is_failed(&self) -> bool {
        self.clauses.iter().any(Clause::is_violated)
    }
}

impl Index<VariableId> for Propagator {
    type Output = Variable;

    fn index(&self, var: VariableId) -> &Variable {
        &self.variables[var.0]
    }
}

impl Index<ClauseId> for Propagator {
    type Output = Clause;

    fn index(&self, clause: ClauseId) -> &Clause {
        &self.clauses[clause.0]
    }
}
