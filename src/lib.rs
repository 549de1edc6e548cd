//! Propositional satisfiability: formulas are turned into CNF with the Tseitin
//! encoding ([`transform`]) and decided with plain DPLL ([`solve`]).
//!
//! ```
//! use propsat::{solve, transform, Model, Proposition, SatResult};
//!
//! let q1 = Proposition::variable("q1");
//! let f = q1.clone() & q1.negate().negate();
//! match solve(transform(&f), Model::new()) {
//!     SatResult::Satisfiable(model) => assert_eq!(model.value_of("q1"), Some(true)),
//!     SatResult::Unsatisfiable(_) => unreachable!(),
//! }
//! ```

pub mod error;
pub mod formula;
pub mod model;
pub mod solver;
pub mod tseitin;

#[cfg(test)]
mod brute_force;

pub use error::{Error, Result};
pub use formula::{Clause, Cnf, Proposition, Variable};
pub use model::Model;
pub use solver::{solve, Propagation, Solver, SolverOptions, Stats};
pub use tseitin::{transform, Transformer};

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    /// Carries the clauses left when the last branch failed; they include `□`.
    Unsatisfiable(Cnf),
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};
    use test_env_log::test;

    fn solve_formula(f: &Proposition) -> SatResult {
        solve(transform(f), Model::new())
    }

    #[test]
    fn contradiction_is_unsat() {
        let f = p("q1") & n("q1");
        match solve_formula(&f) {
            SatResult::Unsatisfiable(residual) => assert!(residual.has_empty_clause()),
            other => panic!("expected UNSAT, got {:?}", other),
        }
    }

    #[test]
    fn double_negation_is_sat() {
        let f = p("q1") & p("q1").negate().negate();
        let result = solve_formula(&f);
        let model = result.model().expect("expected SAT");
        assert_eq!(model.value_of("q1"), Some(true));
        assert!(model.satisfies(&f));
    }

    #[test]
    fn classic_eight_clauses() {
        let (a, b, c, d) = (p("a"), p("b"), p("c"), p("d"));
        let clause =
            |literals: Vec<&Proposition>| Clause::from_literals(literals.into_iter().cloned());
        let cnf = Cnf::new(vec![
            clause(vec![&a.negate(), &b, &c]),
            clause(vec![&a, &c, &d]),
            clause(vec![&a, &c, &d.negate()]),
            clause(vec![&a, &c.negate(), &d]),
            clause(vec![&a, &c.negate(), &d.negate()]),
            clause(vec![&b.negate(), &c.negate(), &d]),
            clause(vec![&a.negate(), &b, &c.negate()]),
            clause(vec![&a.negate(), &b.negate(), &c]),
        ]);

        match solve(cnf.clone(), Model::new()) {
            SatResult::Satisfiable(model) => {
                for name in &["a", "b", "c", "d"] {
                    assert_eq!(model.value_of(name), Some(true), "{}", name);
                }
                assert_eq!(model.len(), 4);
                assert!(model.satisfies_cnf(&cnf));
            }
            other => panic!("expected SAT, got {:?}", other),
        }
    }

    #[test]
    fn negated_nested_formula() {
        // !(q1 ^ (q2 v !q3))
        let f = Proposition::negation(p("q1") & (p("q2") | n("q3")));
        let cnf = transform(&f);
        assert_eq!(cnf.len(), 7);

        let result = solve(cnf.clone(), Model::new());
        let model = result.model().expect("expected SAT");
        assert!(model.satisfies(&f));
        assert!(model.satisfies_cnf(&cnf));
    }

    #[test]
    fn vacuous_truth() {
        assert!(solve_formula(&Proposition::all(Vec::new())).is_satisfiable());
        assert!(!solve_formula(&Proposition::any(Vec::new())).is_satisfiable());
        assert!(!solve_formula(&(p("a") & Proposition::constant(false))).is_satisfiable());
    }

    #[test]
    fn triangle_colouring() {
        // Colour the three edges of a triangle with one colour so that no triangle is
        // monochromatic: impossible.
        let edges = ["e_ab", "e_bc", "e_ac"];
        let coloured = Proposition::all(edges.iter().map(|e| p(e)));
        let no_monochrome = Proposition::all(edges.iter().enumerate().map(|(i, e)| {
            let others: Vec<_> = edges
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, o)| n(o))
                .collect();
            Proposition::implies(p(e), Proposition::any(others))
        }));
        assert!(!solve_formula(&(coloured.clone() & no_monochrome.clone())).is_satisfiable());

        // Dropping one edge's colour requirement makes it satisfiable.
        let relaxed = p("e_ab") & p("e_bc") & no_monochrome;
        let result = solve_formula(&relaxed);
        let model = result.model().expect("expected SAT");
        assert!(model.satisfies(&relaxed));
        assert_eq!(model.value_of("e_ac"), Some(false));
    }
}
