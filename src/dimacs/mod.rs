use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num,
    path::Path,
};

use log::{debug, warn};
use thiserror::Error;

use crate::instance::*;

#[derive(Error, Debug)]
pub enum DimacsError {
    #[error("malformed header")]
    MalformedHeader,
    #[error("io error")]
    IO(#[from] io::Error),
    #[error("not a valid value")]
    ParseError(#[from] num::ParseIntError),
}

type Result<T> = std::result::Result<T, DimacsError>;

/// Reads a DIMACS CNF file. Variable `n` becomes the variable named `"n"`.
pub fn parse<P: AsRef<Path>>(filename: P) -> Result<ClauseSet> {
    let file = File::open(filename.as_ref())?;
    parse_reader(BufReader::new(file))
}

pub fn parse_str(input: &str) -> Result<ClauseSet> {
    parse_reader(input.as_bytes())
}

fn parse_reader<R: BufRead>(reader: R) -> Result<ClauseSet> {
    let mut words = reader
        .lines()
        // Comments start with c
        .filter(|l| match l {
            Ok(line) => !line.trim_start().starts_with('c'),
            // Keep errors so they surface immediately
            _ => true,
        })
        .flat_map(|line| match line {
            Ok(line) => line
                .split_ascii_whitespace()
                .map(|w| Ok(w.to_string()))
                .collect::<Vec<Result<String>>>(),
            Err(err) => vec![Err(err.into())],
        });

    let header = DimacsHeader::parse(&mut words)?;

    let mut cnf: Vec<Clause> = vec![];
    let mut current_clause: Vec<Literal> = vec![];
    for word in words {
        let word = word?;
        // Some benchmark sets end with a `%` line
        if word == "%" {
            break;
        }
        match word.parse::<i64>()? {
            0 => {
                cnf.push(Clause::new(current_clause.drain(..)));
            }
            encoded => {
                let var = Variable::new(&encoded.unsigned_abs().to_string());
                current_clause.push(Literal::new(var, encoded > 0));
            }
        }
    }
    if !current_clause.is_empty() {
        warn!("last clause is missing its terminating 0");
        cnf.push(Clause::new(current_clause));
    }

    if cnf.len() as u64 != header.clause_count {
        warn!(
            "header declares {} clauses, found {}",
            header.clause_count,
            cnf.len()
        );
    }
    let clauses = ClauseSet::new(cnf);
    let var_count = clauses.variables().len() as u64;
    if var_count > header.var_count {
        warn!(
            "header declares {} variables, found {}",
            header.var_count, var_count
        );
    }
    debug!("parsed {} clauses over {} variables", clauses.len(), var_count);
    Ok(clauses)
}

#[derive(Debug, Clone)]
struct DimacsHeader {
    var_count: u64,
    clause_count: u64,
}

impl DimacsHeader {
    fn parse<I>(words: &mut I) -> Result<Self>
    where
        I: Iterator<Item = Result<String>>,
    {
        let mut next = || match words.next() {
            Some(x) => x,
            None => Err(DimacsError::MalformedHeader),
        };

        let p = next()?;
        let cnf = next()?;
        if p != "p" || cnf != "cnf" {
            return Err(DimacsError::MalformedHeader);
        }
        let var_count = next()?;
        let clause_count = next()?;
        Ok(Self {
            var_count: var_count.parse::<u64>()?,
            clause_count: clause_count.parse::<u64>()?,
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    fn lit(name: &str, polarity: bool) -> Literal {
        Literal::new(Variable::new(name), polarity)
    }

    #[test]
    fn test_parse_str() {
        let cs = parse_str("c a comment\np cnf 3 2\n1 -2 0\n2 3\n-1 0\n").unwrap();
        assert_eq!(cs.len(), 2);
        assert!(cs.contains(&Clause::new(vec![lit("1", true), lit("2", false)])));
        assert!(cs.contains(&Clause::new(vec![
            lit("2", true),
            lit("3", true),
            lit("1", false)
        ])));
    }

    #[test]
    fn test_trailing_clause_and_percent() {
        let cs = parse_str("p cnf 2 2\n1 0\n-2\n").unwrap();
        assert!(cs.contains(&Clause::unit(lit("2", false))));

        let cs = parse_str("p cnf 2 1\n1 2 0\n%\n0\n").unwrap();
        assert_eq!(cs.len(), 1);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            parse_str("p dnf 1 1\n1 0\n"),
            Err(DimacsError::MalformedHeader)
        ));
        assert!(matches!(parse_str(""), Err(DimacsError::MalformedHeader)));
        assert!(matches!(
            parse_str("p cnf 1 1\n1 x 0\n"),
            Err(DimacsError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "p cnf 2 3").unwrap();
        writeln!(file, "1 2 0").unwrap();
        writeln!(file, "-1 0").unwrap();
        writeln!(file, "-2 1 0").unwrap();
        let cs = parse(file.path()).unwrap();
        assert_eq!(cs.len(), 3);

        let solution = crate::solver::solve(&cs);
        assert!(!solution.is_satisfiable());

        assert!(matches!(
            parse(file.path().with_extension("missing")),
            Err(DimacsError::IO(_))
        ));
    }
}
