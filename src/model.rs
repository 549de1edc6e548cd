use crate::formula::{Cnf, Proposition, Variable};
use im::OrdMap;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Model {
    assignments: OrdMap<Variable, bool>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panics if `literal` is not a literal or contradicts an earlier assignment.
    pub fn add(&mut self, literal: &Proposition, value: bool) {
        let (variable, positive) = literal
            .as_literal()
            .unwrap_or_else(|| panic!("can only assign literals, got {}", literal));
        let stored = if positive { value } else { !value };
        let previous = self.assignments.insert(variable.clone(), stored);
        assert!(
            previous.map_or(true, |previous| previous == stored),
            "conflicting assignment for {}",
            variable
        );
    }

    pub fn get(&self, variable: &Variable) -> Option<bool> {
        self.assignments.get(variable).copied()
    }

    pub fn value_of(&self, name: &str) -> Option<bool> {
        self.get(&Variable::new(name))
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, bool)> {
        self.assignments.iter().map(|(v, value)| (v, *value))
    }

    // Variables the search never had to fix are free; false is as good as anything.
    fn value_or_false(&self, variable: &Variable) -> bool {
        self.get(variable).unwrap_or(false)
    }

    pub fn satisfies(&self, formula: &Proposition) -> bool {
        formula.evaluate(&|v: &Variable| self.value_or_false(v))
    }

    pub fn satisfies_cnf(&self, cnf: &Cnf) -> bool {
        cnf.evaluate(&|v: &Variable| self.value_or_false(v))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        for (variable, value) in self.iter() {
            writeln!(f, "{} -> {}", variable, value)?;
        }
        Ok(())
    }
}
