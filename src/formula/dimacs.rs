use crate::formula::{Clause, Cnf, Proposition};
use crate::Error;
use std::io::{BufRead, BufReader, Read};

/// Reads a DIMACS CNF file. Variable `k` becomes `x{k}`, and each clause becomes a
/// right-nested disjunction in file order.
pub fn parse<R: Read>(reader: R) -> Result<Cnf, Error> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut num_clauses = None;
    let mut clause = vec![];

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | Some(&"%") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(Error::Dimacs("missing 'cnf'".into()));
                }

                let _num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| Error::Dimacs("invalid num_variables".into()))?;

                num_clauses = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| Error::Dimacs("invalid num_clauses".into()))?,
                );
            }
            Some(_) => {
                let expected = num_clauses
                    .ok_or_else(|| Error::Dimacs("missing 'p' line before clauses".into()))?;

                // Clauses end at `0` and may span lines.
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(l),
                        None => clauses.push(Clause::from_literals(clause.drain(..))),
                    }
                }

                if clauses.len() >= expected {
                    break;
                }
            }
        }
    }

    if num_clauses.is_none() {
        return Err(Error::Dimacs("missing 'p' line before clauses".into()));
    }
    if !clause.is_empty() {
        clauses.push(Clause::from_literals(clause));
    }

    Ok(Cnf::new(clauses))
}

fn parse_literal(s: &str) -> Result<Option<Proposition>, Error> {
    let l = s
        .parse::<i64>()
        .map_err(|_| Error::Dimacs(format!("invalid literal '{}'", s)))?;
    let var = Proposition::variable(&format!("x{}", l.unsigned_abs()));
    if l > 0 {
        Ok(Some(var))
    } else if l < 0 {
        Ok(Some(var.negate()))
    } else {
        Ok(None)
    }
}
