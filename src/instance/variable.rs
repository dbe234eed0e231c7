use std::fmt;

use crate::structural::{Symbol, Value};

#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Variable(Symbol);

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable(Symbol::new(name))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn to_value(&self) -> Value {
        Value::Symbol(self.0.clone())
    }
}

impl From<Symbol> for Variable {
    fn from(sym: Symbol) -> Variable {
        Variable(sym)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
