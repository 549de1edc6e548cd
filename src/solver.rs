use crate::formula::{Clause, Cnf, Proposition};
use crate::model::Model;
use crate::{Error, SatResult};
use im::Vector;
use log::{debug, trace};
use std::collections::HashSet;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Propagation {
    // units created during a step wait for the next one
    SinglePass,
    Fixpoint,
}

impl Default for Propagation {
    fn default() -> Self {
        Propagation::SinglePass
    }
}

#[derive(Clone, Debug, Default)]
pub struct SolverOptions {
    pub timeout: Option<Duration>,
    pub propagation: Propagation,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Stats {
    pub activations: usize,
    pub decisions: usize,
    pub unit_propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
    pub max_depth: usize,
}

/// Clauses must be literals, Or-trees of literals, or `□`; `Solver` checks that.
/// Variables `model` already assigns are propagated as units first.
pub fn solve(cnf: Cnf, model: Model) -> SatResult {
    let mut search = Search::new(Propagation::SinglePass, None);
    match search.run(cnf, model) {
        Ok(result) => result,
        Err(Interrupted) => unreachable!("a search without a deadline can't be interrupted"),
    }
}

pub struct Solver {
    clauses: Cnf,
    model: Model,
    options: SolverOptions,
    stats: Stats,
}

impl Solver {
    pub fn new(cnf: Cnf) -> Self {
        Self {
            clauses: cnf,
            model: Model::new(),
            options: SolverOptions::default(),
            stats: Stats::default(),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn solve(&mut self) -> Result<SatResult, Error> {
        self.clauses.check_shape()?;

        let deadline = self.options.timeout.map(|timeout| Instant::now() + timeout);
        let mut search = Search::new(self.options.propagation, deadline);
        let result = search.run(self.clauses.clone(), self.model.clone());
        self.stats = search.stats;

        result.map_err(|Interrupted| Error::Timeout(self.options.timeout.unwrap_or_default()))
    }
}

#[derive(Debug)]
struct Interrupted;

struct Search {
    propagation: Propagation,
    deadline: Option<Instant>,
    stats: Stats,
}

impl Search {
    fn new(propagation: Propagation, deadline: Option<Instant>) -> Self {
        Self {
            propagation,
            deadline,
            stats: Stats::default(),
        }
    }

    fn run(&mut self, cnf: Cnf, model: Model) -> Result<SatResult, Interrupted> {
        let mut clauses = Vector::from(cnf.into_clauses());
        for (variable, value) in model.iter() {
            let literal = Proposition::from(variable.clone());
            let literal = if value { literal } else { literal.negate() };
            clauses = unit_propagate(clauses, &literal);
        }

        let result = self.dpll(clauses, model, 0);
        debug!("dpll: {:?}", self.stats);
        result
    }

    fn dpll(
        &mut self,
        mut clauses: Vector<Clause>,
        mut model: Model,
        depth: usize,
    ) -> Result<SatResult, Interrupted> {
        self.stats.activations += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Interrupted);
            }
        }

        if let Some(result) = self.terminal(&clauses) {
            return Ok(result.into_result(clauses, model));
        }

        clauses = self.propagate_units(clauses, &mut model);
        if !clauses.iter().any(Clause::is_empty) {
            clauses = self.eliminate_pure_literals(clauses, &mut model);
        }

        if let Some(result) = self.terminal(&clauses) {
            return Ok(result.into_result(clauses, model));
        }

        let literal = clauses[0]
            .first_literal()
            .expect("a non-empty clause has a literal");
        self.stats.decisions += 1;
        trace!("decision {} at depth {}", literal, depth);

        let mut positive_model = model.clone();
        positive_model.add(&literal, true);
        let mut positive_clauses = clauses.clone();
        positive_clauses.push_back(Clause::new(literal.clone()));
        let positive = self.dpll(positive_clauses, positive_model, depth + 1)?;
        if positive.is_satisfiable() {
            return Ok(positive);
        }

        trace!("backtrack: {} is false at depth {}", literal, depth);
        model.add(&literal, false);
        clauses.push_back(Clause::new(literal.negate()));
        self.dpll(clauses, model, depth + 1)
    }

    fn terminal(&mut self, clauses: &Vector<Clause>) -> Option<Terminal> {
        if clauses.is_empty() {
            Some(Terminal::Sat)
        } else if clauses.iter().any(Clause::is_empty) {
            self.stats.conflicts += 1;
            Some(Terminal::Unsat)
        } else {
            None
        }
    }

    fn propagate_units(
        &mut self,
        mut clauses: Vector<Clause>,
        model: &mut Model,
    ) -> Vector<Clause> {
        loop {
            let units: Vec<Proposition> =
                clauses.iter().filter_map(Clause::as_unit).cloned().collect();
            if units.is_empty() {
                return clauses;
            }

            for literal in units {
                clauses = unit_propagate(clauses, &literal);
                // A falsified clause ends the search here; don't record the assignment
                // that falsified it.
                if clauses.iter().any(Clause::is_empty) {
                    trace!("conflict propagating {}", literal);
                    return clauses;
                }
                trace!("unit {}", literal);
                model.add(&literal, true);
                self.stats.unit_propagations += 1;
            }

            if self.propagation == Propagation::SinglePass {
                return clauses;
            }
        }
    }

    fn eliminate_pure_literals(
        &mut self,
        clauses: Vector<Clause>,
        model: &mut Model,
    ) -> Vector<Clause> {
        let pure = pure_literals(&clauses);
        if pure.is_empty() {
            return clauses;
        }

        for literal in &pure {
            trace!("pure {}", literal);
            model.add(literal, true);
        }
        self.stats.pure_literals += pure.len();

        clauses
            .into_iter()
            .filter(|clause| !pure.iter().any(|literal| clause.contains(literal)))
            .collect()
    }
}

enum Terminal {
    Sat,
    Unsat,
}

impl Terminal {
    fn into_result(self, clauses: Vector<Clause>, model: Model) -> SatResult {
        match self {
            Terminal::Sat => SatResult::Satisfiable(model),
            Terminal::Unsat => SatResult::Unsatisfiable(Cnf::new(clauses)),
        }
    }
}

// Drops the clauses `literal` satisfies and deletes its negation from the rest.
pub(crate) fn unit_propagate(clauses: Vector<Clause>, literal: &Proposition) -> Vector<Clause> {
    let negated = literal.negate();
    clauses
        .into_iter()
        .filter(|clause| !clause.contains(literal))
        .map(|clause| clause.without(&negated))
        .collect()
}

// Literals whose negation appears nowhere, in order of first occurrence.
pub(crate) fn pure_literals<'a>(clauses: impl IntoIterator<Item = &'a Clause>) -> Vec<Proposition> {
    let mut seen = HashSet::new();
    let mut literals = vec![];
    for literal in clauses.into_iter().flat_map(Clause::literals) {
        if seen.insert(literal.clone()) {
            literals.push(literal);
        }
    }
    literals.retain(|literal| !seen.contains(&literal.negate()));
    literals
}
