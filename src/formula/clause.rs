use super::{Proposition, Variable};
use crate::Error;
use std::collections::HashSet;
use std::iter::FromIterator;

/// An Or-tree of literals, or `□` once every literal has been falsified. The tree
/// order decides which literal the solver branches on first.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Clause(Option<Proposition>);

impl Clause {
    pub fn new(proposition: Proposition) -> Self {
        Self(Some(proposition))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    /// Builds a right-nested Or-tree `(l1 v (l2 v (...)))`. No literals gives `□`.
    pub fn from_literals(literals: impl IntoIterator<Item = Proposition>) -> Self {
        let mut literals: Vec<_> = literals.into_iter().collect();
        let last = match literals.pop() {
            Some(last) => last,
            None => return Self::empty(),
        };
        let tree = literals
            .into_iter()
            .rev()
            .fold(last, |rest, literal| Proposition::disjunction(literal, rest));
        Self::new(tree)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn proposition(&self) -> Option<&Proposition> {
        self.0.as_ref()
    }

    pub fn as_unit(&self) -> Option<&Proposition> {
        self.0.as_ref().filter(|p| p.is_literal())
    }

    pub fn is_unit(&self) -> bool {
        self.as_unit().is_some()
    }

    // distinct, in left-to-right order
    pub fn literals(&self) -> Vec<Proposition> {
        fn walk(p: &Proposition, seen: &mut HashSet<Proposition>, out: &mut Vec<Proposition>) {
            match p {
                Proposition::Variable(_) => {
                    if seen.insert(p.clone()) {
                        out.push(p.clone());
                    }
                }
                Proposition::Negation(inner) => {
                    if p.is_literal() {
                        if seen.insert(p.clone()) {
                            out.push(p.clone());
                        }
                    } else {
                        walk(inner, seen, out);
                    }
                }
                Proposition::Conjunction(l, r) | Proposition::Disjunction(l, r) => {
                    walk(l, seen, out);
                    walk(r, seen, out);
                }
                Proposition::Constant(_) => {}
            }
        }

        let mut seen = HashSet::new();
        let mut out = vec![];
        if let Some(p) = &self.0 {
            walk(p, &mut seen, &mut out);
        }
        out
    }

    pub fn first_literal(&self) -> Option<Proposition> {
        fn walk(p: &Proposition) -> Option<Proposition> {
            match p {
                Proposition::Conjunction(l, r) | Proposition::Disjunction(l, r) => {
                    walk(l).or_else(|| walk(r))
                }
                Proposition::Negation(inner) if !p.is_literal() => walk(inner),
                Proposition::Constant(_) => None,
                _ => Some(p.clone()),
            }
        }

        self.0.as_ref().and_then(walk)
    }

    pub fn contains(&self, literal: &Proposition) -> bool {
        fn walk(p: &Proposition, literal: &Proposition) -> bool {
            match p {
                Proposition::Conjunction(l, r) | Proposition::Disjunction(l, r) => {
                    walk(l, literal) || walk(r, literal)
                }
                Proposition::Negation(inner) if !p.is_literal() => walk(inner, literal),
                _ => p == literal,
            }
        }

        self.0.as_ref().map_or(false, |p| walk(p, literal))
    }

    /// Removes every leaf equal to `literal`. A node left with one child collapses
    /// into that child; a clause left with nothing becomes `□`.
    pub fn without(&self, literal: &Proposition) -> Clause {
        fn remove(p: &Proposition, literal: &Proposition) -> Option<Proposition> {
            match p {
                Proposition::Conjunction(l, r) => rebuild(l, r, literal, Proposition::conjunction),
                Proposition::Disjunction(l, r) => rebuild(l, r, literal, Proposition::disjunction),
                _ if p == literal => None,
                _ => Some(p.clone()),
            }
        }

        fn rebuild(
            l: &Proposition,
            r: &Proposition,
            literal: &Proposition,
            join: fn(Proposition, Proposition) -> Proposition,
        ) -> Option<Proposition> {
            match (remove(l, literal), remove(r, literal)) {
                (None, None) => None,
                (None, Some(right)) => Some(right),
                (Some(left), None) => Some(left),
                (Some(left), Some(right)) => Some(join(left, right)),
            }
        }

        Clause(self.0.as_ref().and_then(|p| remove(p, literal)))
    }

    // `□` counts as well formed
    pub fn is_well_formed(&self) -> bool {
        fn or_tree(p: &Proposition) -> bool {
            match p {
                Proposition::Disjunction(l, r) => or_tree(l) && or_tree(r),
                _ => p.is_literal(),
            }
        }

        self.0.as_ref().map_or(true, or_tree)
    }

    pub fn evaluate<F: Fn(&Variable) -> bool>(&self, assignment: &F) -> bool {
        self.0.as_ref().map_or(false, |p| p.evaluate(assignment))
    }
}

impl From<Proposition> for Clause {
    fn from(p: Proposition) -> Self {
        Clause::new(p)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new<I>(conjuncts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Clause>,
    {
        Self {
            clauses: conjuncts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn push(&mut self, clause: impl Into<Clause>) {
        self.clauses.push(clause.into());
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        self.clauses
            .iter()
            .filter_map(Clause::proposition)
            .flat_map(Proposition::variables)
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }

    /// Checks that every clause is a literal, an Or-tree of literals, or `□`.
    pub fn check_shape(&self) -> Result<(), Error> {
        match self.clauses.iter().position(|c| !c.is_well_formed()) {
            Some(index) => Err(Error::MalformedClause {
                index,
                clause: self.clauses[index].to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn evaluate<F: Fn(&Variable) -> bool>(&self, assignment: &F) -> bool {
        self.clauses.iter().all(|c| c.evaluate(assignment))
    }

    pub(crate) fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Cnf::new(iter)
    }
}

impl IntoIterator for Cnf {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

#[cfg(test)]
pub(crate) fn cnf_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Cnf> {
    use proptest::prelude::*;

    const MAX_VARS: usize = 8;
    const MAX_CLAUSES: usize = 16;

    let literal = (0..MAX_VARS, any::<bool>()).prop_map(|(v, positive)| {
        let var = Proposition::variable(&format!("x{}", v));
        if positive {
            var
        } else {
            var.negate()
        }
    });
    prop::collection::vec(prop::collection::vec(literal, 1..=3), 1..MAX_CLAUSES)
        .prop_map(|clauses| clauses.into_iter().map(Clause::from_literals).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};
    use test_env_log::test;

    #[test]
    fn literals_in_walk_order() {
        let clause = Clause::from_literals(vec![p("q2"), n("q1"), p("q3"), n("q1")]);
        assert_eq!(clause.literals(), vec![p("q2"), n("q1"), p("q3")]);
    }

    #[test]
    fn literals_look_through_compound_negation() {
        let formula = Proposition::negation(p("q1") & (p("q2") | n("q3")));
        let clause = Clause::new(formula);
        assert_eq!(clause.literals(), vec![p("q1"), p("q2"), n("q3")]);
    }

    #[test]
    fn first_literal_is_leftmost() {
        let clause = Clause::new((n("c") | p("a")) | p("b"));
        assert_eq!(clause.first_literal(), Some(n("c")));
        assert_eq!(clause.first_literal(), clause.literals().into_iter().next());
        assert_eq!(Clause::empty().first_literal(), None);
    }

    #[test]
    fn literals_of_empty_clause() {
        assert!(Clause::empty().literals().is_empty());
        assert!(!Clause::empty().contains(&p("a")));
    }

    #[test]
    fn contains_respects_polarity() {
        let clause = Clause::from_literals(vec![p("a"), n("b")]);
        assert!(clause.contains(&p("a")));
        assert!(clause.contains(&n("b")));
        assert!(!clause.contains(&n("a")));
        assert!(!clause.contains(&p("b")));
    }

    #[test]
    fn without_collapses_single_children() {
        let clause = Clause::from_literals(vec![p("a"), n("b"), p("c")]);
        assert_eq!(
            clause.without(&n("b")),
            Clause::from_literals(vec![p("a"), p("c")])
        );
        assert_eq!(clause.without(&p("a")).without(&p("c")), Clause::new(n("b")));
        assert_eq!(clause.without(&p("z")), clause);
    }

    #[test]
    fn without_last_literal_is_empty() {
        let clause = Clause::from_literals(vec![p("a"), p("a")]);
        assert!(clause.without(&p("a")).is_empty());
        assert!(Clause::new(n("a")).without(&n("a")).is_empty());
        assert!(Clause::empty().without(&p("a")).is_empty());
    }

    #[test]
    fn units() {
        assert_eq!(Clause::new(p("a")).as_unit(), Some(&p("a")));
        assert_eq!(Clause::new(n("a")).as_unit(), Some(&n("a")));
        assert_eq!(Clause::from_literals(vec![p("a"), p("b")]).as_unit(), None);
        assert_eq!(Clause::empty().as_unit(), None);
        assert!(Clause::new(n("a")).is_unit());
        assert!(!Clause::empty().is_unit());
    }

    #[test]
    fn shape_check() {
        let good = Cnf::new(vec![
            Clause::new(p("a")),
            Clause::from_literals(vec![n("a"), p("b")]),
            Clause::new((n("a") | n("b")) | p("c")),
            Clause::empty(),
        ]);
        assert!(good.check_shape().is_ok());

        let bad = Cnf::new(vec![p("a"), p("a") | (p("b") & p("c"))]);
        match bad.check_shape() {
            Err(Error::MalformedClause { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {:?}", other),
        }

        let nested = Cnf::new(vec![Proposition::negation(n("a"))]);
        assert!(nested.check_shape().is_err());
    }

    #[test]
    fn cnf_variables_in_order() {
        let cnf = Cnf::new(vec![
            Clause::from_literals(vec![n("b"), p("a")]),
            Clause::from_literals(vec![p("c"), p("b")]),
        ]);
        let names: Vec<_> = cnf.variables().iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn evaluate() {
        let cnf = Cnf::new(vec![
            Clause::from_literals(vec![p("a"), p("b")]),
            Clause::new(n("a")),
        ]);
        assert!(cnf.evaluate(&|v: &Variable| v.name() == "b"));
        assert!(!cnf.evaluate(&|v: &Variable| v.name() == "a"));

        let with_empty = Cnf::new(vec![Clause::empty()]);
        assert!(!with_empty.evaluate(&|_: &Variable| true));
    }
}
