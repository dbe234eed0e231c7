use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use super::{Result, StructuralError, Value};

const SEED: u64 = 1;
const MULTIPLIER: u64 = 31;

/// An ordered sequence of structural values. Its hash depends on element order.
#[derive(Clone)]
pub struct RecursiveTuple {
    elements: Vec<Value>,
    hash: u64,
    frozen: bool,
}

impl RecursiveTuple {
    pub fn new() -> RecursiveTuple {
        RecursiveTuple {
            elements: vec![],
            hash: SEED,
            frozen: false,
        }
    }

    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Result<RecursiveTuple> {
        let mut tuple = Self::new();
        for value in values {
            tuple.push(value)?;
        }
        Ok(tuple)
    }

    /// An unfrozen two-element tuple. Both elements must already be frozen; only callers that
    /// obtained them from another container may use this.
    pub(crate) fn pair(a: Value, b: Value) -> RecursiveTuple {
        let mut tuple = Self::new();
        tuple.append(a);
        tuple.append(b);
        tuple
    }

    /// Appends `value` to the end of the tuple.
    pub fn push(&mut self, value: Value) -> Result<()> {
        if self.frozen {
            return Err(StructuralError::Frozen("tuple"));
        }
        if !value.is_frozen() {
            return Err(StructuralError::UnfrozenElement(value.kind()));
        }
        self.append(value);
        Ok(())
    }

    fn append(&mut self, value: Value) {
        debug_assert!(value.is_frozen());
        self.hash = self
            .hash
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(value.hash_code());
        self.elements.push(value);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn frozen(mut self) -> RecursiveTuple {
        self.freeze();
        self
    }

    pub fn into_value(self) -> Value {
        Value::from(self.frozen())
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    pub fn hash_code(&self) -> u64 {
        self.hash
    }
}

impl Default for RecursiveTuple {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for RecursiveTuple {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.hash == other.hash && self.elements == other.elements
    }
}

impl Eq for RecursiveTuple {}

impl Hash for RecursiveTuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for RecursiveTuple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut tuple = f.debug_tuple("");
        for element in self.elements.iter() {
            tuple.field(element);
        }
        tuple.finish()
    }
}

impl fmt::Display for RecursiveTuple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.elements.iter().join(", "))
    }
}
