pub mod clause;
pub mod dimacs;
mod display;
pub mod parse;

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

pub use clause::{Clause, Cnf};

#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(Arc<str>);

impl Variable {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Equality is not structural: negation chains compare by parity (`!!a == a`), and
/// conjunction/disjunction compare their children as an unordered pair.
#[derive(Clone, Debug)]
pub enum Proposition {
    Variable(Variable),
    Negation(Arc<Proposition>),
    Conjunction(Arc<Proposition>, Arc<Proposition>),
    Disjunction(Arc<Proposition>, Arc<Proposition>),
    Constant(bool),
}

impl Proposition {
    pub fn variable(name: &str) -> Self {
        Proposition::Variable(Variable::new(name))
    }

    // nests as-is; `negate` cancels double negation instead
    pub fn negation(p: Proposition) -> Self {
        Proposition::Negation(Arc::new(p))
    }

    pub fn conjunction(left: Proposition, right: Proposition) -> Self {
        Proposition::Conjunction(Arc::new(left), Arc::new(right))
    }

    pub fn disjunction(left: Proposition, right: Proposition) -> Self {
        Proposition::Disjunction(Arc::new(left), Arc::new(right))
    }

    pub fn constant(value: bool) -> Self {
        Proposition::Constant(value)
    }

    pub fn implies(antecedent: Proposition, consequent: Proposition) -> Self {
        Proposition::disjunction(antecedent.negate(), consequent)
    }

    pub fn iff(left: Proposition, right: Proposition) -> Self {
        Proposition::conjunction(
            Proposition::implies(left.clone(), right.clone()),
            Proposition::implies(right, left),
        )
    }

    // empty is `true`
    pub fn all(conjuncts: impl IntoIterator<Item = Proposition>) -> Self {
        conjuncts
            .into_iter()
            .reduce(Proposition::conjunction)
            .unwrap_or(Proposition::Constant(true))
    }

    // empty is `false`
    pub fn any(disjuncts: impl IntoIterator<Item = Proposition>) -> Self {
        disjuncts
            .into_iter()
            .reduce(Proposition::disjunction)
            .unwrap_or(Proposition::Constant(false))
    }

    /// `negate(!p) = p`; anything else gets wrapped in one negation.
    pub fn negate(&self) -> Self {
        match self {
            Proposition::Negation(inner) => inner.as_ref().clone(),
            _ => Proposition::Negation(Arc::new(self.clone())),
        }
    }

    pub fn as_literal(&self) -> Option<(&Variable, bool)> {
        match self {
            Proposition::Variable(v) => Some((v, true)),
            Proposition::Negation(inner) => match inner.as_ref() {
                Proposition::Variable(v) => Some((v, false)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        self.as_literal().is_some()
    }

    // first-occurrence order
    pub fn variables(&self) -> Vec<Variable> {
        fn walk(p: &Proposition, seen: &mut HashSet<Variable>, out: &mut Vec<Variable>) {
            match p {
                Proposition::Variable(v) => {
                    if seen.insert(v.clone()) {
                        out.push(v.clone());
                    }
                }
                Proposition::Negation(inner) => walk(inner, seen, out),
                Proposition::Conjunction(l, r) | Proposition::Disjunction(l, r) => {
                    walk(l, seen, out);
                    walk(r, seen, out);
                }
                Proposition::Constant(_) => {}
            }
        }

        let mut seen = HashSet::new();
        let mut out = vec![];
        walk(self, &mut seen, &mut out);
        out
    }

    pub fn connective_count(&self) -> usize {
        match self {
            Proposition::Variable(_) | Proposition::Constant(_) => 0,
            Proposition::Negation(inner) => inner.connective_count(),
            Proposition::Conjunction(l, r) | Proposition::Disjunction(l, r) => {
                1 + l.connective_count() + r.connective_count()
            }
        }
    }

    pub fn constant_count(&self) -> usize {
        match self {
            Proposition::Variable(_) => 0,
            Proposition::Constant(_) => 1,
            Proposition::Negation(inner) => inner.constant_count(),
            Proposition::Conjunction(l, r) | Proposition::Disjunction(l, r) => {
                l.constant_count() + r.constant_count()
            }
        }
    }

    pub fn evaluate<F: Fn(&Variable) -> bool>(&self, assignment: &F) -> bool {
        match self {
            Proposition::Variable(v) => assignment(v),
            Proposition::Negation(inner) => !inner.evaluate(assignment),
            Proposition::Conjunction(l, r) => l.evaluate(assignment) && r.evaluate(assignment),
            Proposition::Disjunction(l, r) => l.evaluate(assignment) || r.evaluate(assignment),
            Proposition::Constant(value) => *value,
        }
    }

    // Peels off every leading negation. The flag is true for an odd count.
    fn strip_negations(&self) -> (&Proposition, bool) {
        let mut core = self;
        let mut negated = false;
        while let Proposition::Negation(inner) = core {
            core = inner;
            negated = !negated;
        }
        (core, negated)
    }
}

impl PartialEq for Proposition {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, lhs_negated) = self.strip_negations();
        let (rhs, rhs_negated) = other.strip_negations();
        if lhs_negated != rhs_negated {
            return false;
        }
        match (lhs, rhs) {
            (Proposition::Variable(a), Proposition::Variable(b)) => a == b,
            (Proposition::Constant(a), Proposition::Constant(b)) => a == b,
            (Proposition::Conjunction(a1, a2), Proposition::Conjunction(b1, b2))
            | (Proposition::Disjunction(a1, a2), Proposition::Disjunction(b1, b2)) => {
                (a1 == b1 && a2 == b2) || (a1 == b2 && a2 == b1)
            }
            _ => false,
        }
    }
}

impl Eq for Proposition {}

impl Hash for Proposition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (core, negated) = self.strip_negations();
        negated.hash(state);
        match core {
            Proposition::Variable(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Proposition::Constant(value) => {
                1u8.hash(state);
                value.hash(state);
            }
            Proposition::Conjunction(l, r) => {
                2u8.hash(state);
                hash_unordered(l, r, state);
            }
            Proposition::Disjunction(l, r) => {
                3u8.hash(state);
                hash_unordered(l, r, state);
            }
            Proposition::Negation(_) => unreachable!("negations were stripped"),
        }
    }
}

fn hash_unordered<H: Hasher>(left: &Proposition, right: &Proposition, state: &mut H) {
    let fingerprint = |p: &Proposition| {
        let mut hasher = DefaultHasher::new();
        p.hash(&mut hasher);
        hasher.finish()
    };
    let (a, b) = (fingerprint(left), fingerprint(right));
    (a.min(b), a.max(b)).hash(state);
}

impl From<Variable> for Proposition {
    fn from(v: Variable) -> Self {
        Proposition::Variable(v)
    }
}

impl Not for Proposition {
    type Output = Proposition;

    fn not(self) -> Proposition {
        self.negate()
    }
}

impl Not for &Proposition {
    type Output = Proposition;

    fn not(self) -> Proposition {
        self.negate()
    }
}

impl BitAnd for Proposition {
    type Output = Proposition;

    fn bitand(self, rhs: Proposition) -> Proposition {
        Proposition::conjunction(self, rhs)
    }
}

impl BitOr for Proposition {
    type Output = Proposition;

    fn bitor(self, rhs: Proposition) -> Proposition {
        Proposition::disjunction(self, rhs)
    }
}

#[cfg(test)]
pub(crate) fn p(name: &str) -> Proposition {
    Proposition::variable(name)
}

#[cfg(test)]
pub(crate) fn n(name: &str) -> Proposition {
    Proposition::negation(Proposition::variable(name))
}

#[cfg(test)]
pub(crate) fn proposition_strategy() -> impl proptest::strategy::Strategy<Value = Proposition> {
    sized_proposition_strategy(5, 32)
}

// small enough for the brute-force CNF check
#[cfg(test)]
pub(crate) fn small_proposition_strategy(
) -> impl proptest::strategy::Strategy<Value = Proposition> {
    sized_proposition_strategy(3, 8)
}

#[cfg(test)]
fn sized_proposition_strategy(
    depth: u32,
    size: u32,
) -> impl proptest::strategy::Strategy<Value = Proposition> {
    use proptest::prelude::*;

    let leaf = prop_oneof![
        8 => (0..5usize).prop_map(|i| Proposition::variable(&format!("v{}", i))),
        1 => any::<bool>().prop_map(Proposition::constant),
    ];
    leaf.prop_recursive(depth, size, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Proposition::negation),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Proposition::conjunction(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Proposition::disjunction(l, r)),
        ]
    })
}
