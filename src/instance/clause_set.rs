use core::fmt;
use std::rc::Rc;

use itertools::Itertools;

use crate::structural::{RecursiveSet, Value};

use super::{Clause, MalformedInputError};

/// A conjunction of clauses, stored as a frozen structural set of clause sets.
///
/// The empty `ClauseSet` is trivially true. The set holding only the empty clause is the falsum
/// sentinel the solver returns for unsatisfiable input; the two must never be confused.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClauseSet {
    clauses: Rc<RecursiveSet>,
}

impl ClauseSet {
    pub fn new<I: IntoIterator<Item = Clause>>(clauses: I) -> ClauseSet {
        let clauses = clauses.into_iter();
        let mut set = RecursiveSet::with_capacity(clauses.size_hint().0);
        for clause in clauses {
            set.add_frozen(clause.as_value());
        }
        ClauseSet {
            clauses: Rc::new(set.frozen()),
        }
    }

    pub fn empty() -> ClauseSet {
        Self::new(std::iter::empty())
    }

    /// `{∅}`
    pub fn falsum() -> ClauseSet {
        Self::new(std::iter::once(Clause::empty()))
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(&clause.as_value())
    }

    pub fn contains_empty_clause(&self) -> bool {
        self.contains(&Clause::empty())
    }

    /// Exactly the falsum sentinel.
    pub fn is_falsum(&self) -> bool {
        self.len() == 1 && self.contains_empty_clause()
    }

    /// True when every clause is a unit, i.e. the set reads as a variable assignment.
    pub fn is_assignment(&self) -> bool {
        self.clauses().all(|c| c.is_unit())
    }

    pub fn clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        self.clauses.iter().map(|v| {
            let set = v.as_set().expect("clause sets only hold clauses");
            Clause::from_shared(set.clone())
        })
    }

    /// This clause set with `clause` added.
    pub fn with_clause(&self, clause: Clause) -> ClauseSet {
        let mut set = self.clauses.thaw();
        set.add_frozen(clause.as_value());
        ClauseSet {
            clauses: Rc::new(set.frozen()),
        }
    }

    pub fn union(&self, other: &ClauseSet) -> ClauseSet {
        ClauseSet {
            clauses: Rc::new(self.clauses.union(&other.clauses).frozen()),
        }
    }

    /// Every variable mentioned by any literal of any clause, as a frozen set of symbols.
    pub fn variables(&self) -> RecursiveSet {
        let mut variables = RecursiveSet::new();
        for clause in self.clauses() {
            for lit in clause.literals() {
                variables.add_frozen(lit.var().to_value());
            }
        }
        variables.frozen()
    }

    pub fn as_value(&self) -> Value {
        Value::Set(self.clauses.clone())
    }

    pub fn as_set(&self) -> &RecursiveSet {
        &self.clauses
    }
}

impl FromIterator<Clause> for ClauseSet {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        ClauseSet::new(iter)
    }
}

impl TryFrom<&Value> for ClauseSet {
    type Error = MalformedInputError;

    fn try_from(value: &Value) -> Result<ClauseSet, Self::Error> {
        let set = value
            .as_set()
            .ok_or_else(|| MalformedInputError::NotASet("clause set", value.to_string()))?;
        let clauses = set
            .iter()
            .map(Clause::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ClauseSet::new(clauses))
    }
}

impl fmt::Debug for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let clauses = self.clauses().map(|c| c.to_string()).sorted().join(", ");
        write!(f, "{{{}}}", clauses)
    }
}
