use crate::*;
use proptest::prelude::*;

// Recount a clause's counters from its members' current values, ignoring the
// incremental bookkeeping entirely.
pub(crate) fn recount(p: &Propagator, clause: &Clause) -> (usize, usize) {
    let mut unknown = 0;
    let mut undesired = 0;
    for &member in clause.members() {
        match p[member].value() {
            EdgeValue::Unknown => unknown += 1,
            value => {
                if value == EdgeValue::from(clause.kind().undesired()) {
                    undesired += 1;
                }
            }
        }
    }
    (unknown, undesired)
}

/// Panics if any clause's counters disagree with a recount, or if the
/// variable/clause links are not mirror images of each other.
pub(crate) fn check_invariants(p: &Propagator) {
    for (id, clause) in p.clauses() {
        let (unknown, undesired) = recount(p, clause);
        assert_eq!(clause.count_unknown(), unknown, "unknown count of {}", id);
        assert_eq!(clause.count_undesired(), undesired, "undesired count of {}", id);
        assert_eq!(clause.is_full(), unknown == 0);

        let all_undesired = clause
            .members()
            .iter()
            .all(|&m| p[m].value() == EdgeValue::from(clause.kind().undesired()));
        assert_eq!(clause.is_violated(), all_undesired, "violation of {}", id);

        for &member in clause.members() {
            let links = match clause.kind() {
                ClauseKind::Clique => p[member].clique_clauses(),
                ClauseKind::IndependentSet => p[member].ind_set_clauses(),
            };
            assert_eq!(links.iter().filter(|c| **c == id).count(), 1, "{} not linked from {}", id, member);
        }
    }

    for (var, state) in p.variables() {
        for &c in state.clique_clauses() {
            assert_eq!(p[c].kind(), ClauseKind::Clique);
            assert!(p[c].members().contains(&var));
        }
        for &c in state.ind_set_clauses() {
            assert_eq!(p[c].kind(), ClauseKind::IndependentSet);
            assert!(p[c].members().contains(&var));
        }
        assert_eq!(state.value().is_assigned(), p.trail().contains(&var));
    }
}

/// A propagator with random clauses over up to 8 variables, plus a sequence of
/// (variable, value, undo-afterwards) operations to replay against it.
pub(crate) fn problem_strategy() -> impl Strategy<Value = (Propagator, Vec<(VariableId, bool, bool)>)> {
    (1usize..=8)
        .prop_flat_map(|num_vars| {
            let clause = (
                any::<bool>(),
                proptest::sample::subsequence((0..num_vars).collect::<Vec<_>>(), 1..=num_vars),
            );
            let op = (0..num_vars, any::<bool>(), proptest::bool::weighted(0.2));
            (
                Just(num_vars),
                proptest::collection::vec(clause, 1..12),
                proptest::collection::vec(op, 0..24),
            )
        })
        .prop_map(|(num_vars, clauses, ops)| {
            let mut p = Propagator::new();
            let vars: Vec<_> = (0..num_vars).map(|i| p.new_variable(i / 3, i % 3)).collect();
            for (clique, members) in clauses {
                let kind = if clique {
                    ClauseKind::Clique
                } else {
                    ClauseKind::IndependentSet
                };
                p.add_clause(members.into_iter().map(|i| vars[i]), kind)
                    .expect("generated clause should be well formed");
            }
            let ops = ops.into_iter().map(|(i, exists, undo)| (vars[i], exists, undo)).collect();
            (p, ops)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recount_ignores_counters() {
        let mut p = Propagator::new();
        let a = p.new_variable(0, 0);
        let b = p.new_variable(0, 1);
        let c = p.add_clause(vec![a, b], ClauseKind::IndependentSet).unwrap();
        p.assign(a, false).unwrap();
        p.assign(b, true).unwrap();

        assert_eq!(recount(&p, &p[c]), (0, 1));
        check_invariants(&p);
    }
}
