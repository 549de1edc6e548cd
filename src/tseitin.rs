//! Tseitin encoding of arbitrary formulas into equisatisfiable CNF.
//!
//! Every conjunction and disjunction node gets a fresh auxiliary variable `p` and
//! three clauses defining `p <-> (l1 op l2)`, where `l1` and `l2` are the literals
//! standing for the node's children. Negations cost nothing: the child's literal is
//! negated in place. The result grows linearly with the formula.

use crate::formula::{Clause, Cnf, Proposition, Variable};
use log::{debug, trace};
use std::collections::HashSet;

/// Encodes `formula` as `[top, definitions...]`, where the unit clause `top` forces
/// the literal standing for the whole formula to be true.
pub fn transform(formula: &Proposition) -> Cnf {
    let mut transformer = Transformer::new();
    transformer.assert(formula);
    transformer.into_cnf()
}

/// Hands out auxiliary variable names `{prefix}1`, `{prefix}2`, ..., skipping names
/// that are reserved because the input already uses them.
#[derive(Debug, Clone)]
pub struct FreshNames {
    prefix: String,
    counter: usize,
    reserved: HashSet<Variable>,
}

impl FreshNames {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: 0,
            reserved: HashSet::new(),
        }
    }

    pub fn reserve(&mut self, variables: impl IntoIterator<Item = Variable>) {
        self.reserved.extend(variables);
    }

    pub fn fresh(&mut self) -> Variable {
        loop {
            self.counter += 1;
            let candidate = Variable::new(&format!("{}{}", self.prefix, self.counter));
            if !self.reserved.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Encodes several formulas into one CNF instance with a shared name counter.
/// `reserve` every formula before asserting any of them.
#[derive(Debug, Clone)]
pub struct Transformer {
    names: FreshNames,
    tops: Vec<Clause>,
    definitions: Vec<Clause>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer {
    pub fn new() -> Self {
        Self::with_prefix("p")
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            names: FreshNames::new(prefix),
            tops: vec![],
            definitions: vec![],
        }
    }

    pub fn reserve(&mut self, formula: &Proposition) {
        self.names.reserve(formula.variables());
    }

    /// Adds `formula` to the instance: its defining clauses, plus a unit clause
    /// asserting its top literal. Returns that literal.
    pub fn assert(&mut self, formula: &Proposition) -> Proposition {
        self.reserve(formula);
        let top = self.encode(formula);
        self.tops.push(Clause::new(top.clone()));
        top
    }

    /// Adds the defining clauses for `formula` without asserting it, and returns the
    /// literal that is equivalent to it in every model of those clauses.
    pub fn encode(&mut self, formula: &Proposition) -> Proposition {
        match formula {
            Proposition::Variable(_) => formula.clone(),
            Proposition::Negation(inner) => self.encode(inner).negate(),
            Proposition::Conjunction(left, right) => {
                let l1 = self.encode(left);
                let l2 = self.encode(right);
                let p = Proposition::from(self.names.fresh());
                trace!("{} <-> ({} ^ {})", p, l1, l2);
                self.define(vec![
                    Proposition::disjunction(p.negate(), l1.clone()),
                    Proposition::disjunction(p.negate(), l2.clone()),
                    (l1.negate() | l2.negate()) | p.clone(),
                ]);
                p
            }
            Proposition::Disjunction(left, right) => {
                let l1 = self.encode(left);
                let l2 = self.encode(right);
                let p = Proposition::from(self.names.fresh());
                trace!("{} <-> ({} v {})", p, l1, l2);
                self.define(vec![
                    (l1.clone() | l2.clone()) | p.negate(),
                    Proposition::disjunction(l1.negate(), p.clone()),
                    Proposition::disjunction(l2.negate(), p.clone()),
                ]);
                p
            }
            Proposition::Constant(value) => {
                let p = Proposition::from(self.names.fresh());
                trace!("{} <-> {}", p, value);
                let unit = if *value { p.clone() } else { p.negate() };
                self.define(vec![unit]);
                p
            }
        }
    }

    fn define(&mut self, clauses: Vec<Proposition>) {
        self.definitions.extend(clauses.into_iter().map(Clause::new));
    }

    pub fn into_cnf(self) -> Cnf {
        debug!(
            "tseitin: {} asserted, {} defining clauses",
            self.tops.len(),
            self.definitions.len()
        );
        Cnf::new(self.tops.into_iter().chain(self.definitions))
    }
}
