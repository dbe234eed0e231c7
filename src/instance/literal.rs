use std::fmt;
use std::hash::{Hash, Hasher};

use crate::structural::{RecursiveTuple, Value};

use super::{MalformedLiteralError, Variable};

/// The tag that marks a negated variable: `¬p` is the tuple `(¬, p)`.
pub const NEGATION: &str = "¬";

/// A variable or its negation. Carries its structural encoding so clause lookups need not
/// rebuild it.
#[derive(Clone)]
pub struct Literal {
    var: Variable,
    polarity: bool,
    value: Value,
}

impl Literal {
    pub fn new(var: Variable, polarity: bool) -> Literal {
        let value = if polarity {
            var.to_value()
        } else {
            RecursiveTuple::pair(Value::symbol(NEGATION), var.to_value()).into_value()
        };
        Literal {
            var,
            polarity,
            value,
        }
    }

    pub fn positive(var: Variable) -> Literal {
        Self::new(var, true)
    }

    pub fn negative(var: Variable) -> Literal {
        Self::new(var, false)
    }

    pub fn var(&self) -> &Variable {
        &self.var
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    /// `p` for `¬p` and `¬p` for `p`.
    pub fn complement(&self) -> Literal {
        Self::new(self.var.clone(), !self.polarity)
    }

    pub fn to_value(&self) -> Value {
        self.value.clone()
    }

    pub(crate) fn as_value(&self) -> &Value {
        &self.value
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.polarity == other.polarity && self.var == other.var
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.var.hash(state);
        self.polarity.hash(state);
    }
}

impl TryFrom<&Value> for Literal {
    type Error = MalformedLiteralError;

    /// Accepts a bare symbol, or a pair of the negation tag and a symbol.
    fn try_from(value: &Value) -> Result<Literal, Self::Error> {
        let malformed = || MalformedLiteralError(value.to_string());
        match value {
            Value::Symbol(sym) => Ok(Literal::positive(Variable::from(sym.clone()))),
            Value::Tuple(tuple) if tuple.len() == 2 => {
                let tag = tuple.get(0).and_then(Value::as_symbol).ok_or_else(malformed)?;
                if tag.name() != NEGATION {
                    return Err(malformed());
                }
                let var = tuple.get(1).and_then(Value::as_symbol).ok_or_else(malformed)?;
                Ok(Literal {
                    var: Variable::from(var.clone()),
                    polarity: false,
                    value: value.clone(),
                })
            }
            _ => Err(malformed()),
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.polarity {
            write!(f, "{}", self.var)
        } else {
            write!(f, "{}{}", NEGATION, self.var)
        }
    }
}
