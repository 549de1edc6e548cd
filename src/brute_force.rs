use crate::formula::{Cnf, Proposition, Variable};
use std::collections::HashMap;

// Simple brute-force satisfiability checks for use in tests
const MAX_VARIABLES: usize = 16;

fn exists_assignment<F>(variables: &[Variable], satisfied: F) -> bool
where
    F: Fn(&dyn Fn(&Variable) -> bool) -> bool,
{
    assert!(variables.len() <= MAX_VARIABLES); // just for safety

    let index: HashMap<&Variable, usize> =
        variables.iter().enumerate().map(|(i, v)| (v, i)).collect();

    for assignment in 0..(1u32 << variables.len()) {
        let value = |v: &Variable| assignment & (1 << index[v]) != 0;
        if satisfied(&value) {
            return true;
        }
    }
    // no assignment is valid
    false
}

pub(crate) fn solve_brute_force(cnf: &Cnf) -> bool {
    exists_assignment(&cnf.variables(), |value| {
        'clauses: for clause in cnf.clauses() {
            for literal in clause.literals() {
                let (variable, positive) = literal.as_literal().expect("clauses hold literals");
                if value(variable) == positive {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            return false;
        }
        true
    })
}

pub(crate) fn formula_is_satisfiable(formula: &Proposition) -> bool {
    exists_assignment(&formula.variables(), |value| formula.evaluate(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p, Clause};

    #[test]
    fn solve_bcp_sat() {
        let c1 = Clause::from_literals(vec![p("a"), p("b")]);
        let c2 = Clause::new(n("a"));
        let f = Cnf::new(vec![c1, c2]);

        assert!(solve_brute_force(&f));
    }

    #[test]
    fn solve_bcp_unsat() {
        let c1 = Clause::from_literals(vec![p("a"), p("b")]);
        let c2 = Clause::new(n("a"));
        let c3 = Clause::new(n("b"));
        let f = Cnf::new(vec![c1, c2, c3]);

        assert!(!solve_brute_force(&f));
    }

    #[test]
    fn empty_clause_is_unsat() {
        let f = Cnf::new(vec![Clause::new(p("a")), Clause::empty()]);
        assert!(!solve_brute_force(&f));
        assert!(solve_brute_force(&Cnf::default()));
    }

    #[test]
    fn formulas() {
        assert!(formula_is_satisfiable(&(p("a") & n("b"))));
        assert!(!formula_is_satisfiable(&(p("a") & n("a"))));
        assert!(formula_is_satisfiable(&Proposition::constant(true)));
        assert!(!formula_is_satisfiable(&Proposition::constant(false)));
    }
}
