use super::{Clause, Cnf, Proposition, Variable};
use std::fmt::{self, Display, Formatter};

// Names the reader would take for an operator or constant, or that aren't
// identifiers at all, get quoted.
fn is_bare_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !matches!(name, "v" | "true" | "false")
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if is_bare_name(self.name()) {
            f.write_str(self.name())
        } else {
            write!(f, "'{}'", self.name())
        }
    }
}

impl Display for Proposition {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Proposition::Variable(v) => write!(f, "{}", v),
            Proposition::Negation(inner) => write!(f, "!{}", inner),
            Proposition::Conjunction(l, r) => write!(f, "({} ^ {})", l, r),
            Proposition::Disjunction(l, r) => write!(f, "({} v {})", l, r),
            Proposition::Constant(value) => write!(f, "{}", value),
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self.proposition() {
            Some(p) => write!(f, "{}", p),
            None => f.write_str("□"),
        }
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in self.clauses() {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" ^ ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
