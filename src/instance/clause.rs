use core::fmt;
use std::rc::Rc;

use itertools::Itertools;

use crate::structural::{RecursiveSet, Value};

use super::{Literal, MalformedInputError};

/// A disjunction of literals, stored as a frozen structural set. Cloning shares the set.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Rc<RecursiveSet>,
}

impl Clause {
    pub fn new<I: IntoIterator<Item = Literal>>(lits: I) -> Clause {
        let lits = lits.into_iter();
        let mut set = RecursiveSet::with_capacity(lits.size_hint().0);
        for lit in lits {
            set.add_frozen(lit.to_value());
        }
        Clause {
            literals: Rc::new(set.frozen()),
        }
    }

    /// The falsum clause.
    pub fn empty() -> Clause {
        Self::new(std::iter::empty())
    }

    pub fn unit(lit: Literal) -> Clause {
        Self::new(std::iter::once(lit))
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    pub fn contains(&self, lit: &Literal) -> bool {
        self.literals.contains(lit.as_value())
    }

    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals
            .iter()
            .map(|v| Literal::try_from(v).expect("clauses only hold literals"))
    }

    /// The literal in a unit clause. Panics if the clause is not a unit
    pub fn unit_literal(&self) -> Literal {
        match self.literals.first() {
            Some(v) if self.is_unit() => {
                Literal::try_from(v).expect("clauses only hold literals")
            }
            _ => panic!("not a unit clause: {}", self),
        }
    }

    /// This clause with `lit` removed.
    pub fn without(&self, lit: &Literal) -> Clause {
        let mut set = RecursiveSet::with_capacity(self.len());
        for v in self.literals.iter().filter(|&v| v != lit.as_value()) {
            set.add_frozen(v.clone());
        }
        Clause {
            literals: Rc::new(set.frozen()),
        }
    }

    pub fn as_value(&self) -> Value {
        Value::Set(self.literals.clone())
    }

    pub fn as_set(&self) -> &RecursiveSet {
        &self.literals
    }

    // Only for sets already known to hold literals.
    pub(crate) fn from_shared(literals: Rc<RecursiveSet>) -> Clause {
        debug_assert!(literals.is_frozen());
        Clause { literals }
    }
}

impl TryFrom<&Value> for Clause {
    type Error = MalformedInputError;

    fn try_from(value: &Value) -> Result<Clause, Self::Error> {
        let set = value
            .as_set()
            .ok_or_else(|| MalformedInputError::NotASet("clause", value.to_string()))?;
        for v in set.iter() {
            Literal::try_from(v)?;
        }
        let literals = if set.is_frozen() {
            set.clone()
        } else {
            Rc::new(set.thaw().frozen())
        };
        Ok(Clause { literals })
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lits = self.literals().map(|l| l.to_string()).sorted().join(", ");
        write!(f, "{{{}}}", lits)
    }
}
