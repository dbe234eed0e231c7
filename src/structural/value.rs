use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use fnv::FnvHasher;

use super::{RecursiveSet, RecursiveTuple};

/// An atomic, interned-by-content name. Two symbols are equal iff their text is.
#[derive(Clone, Eq)]
pub struct Symbol {
    name: Rc<str>,
    hash: u64,
}

impl Symbol {
    pub fn new(name: &str) -> Symbol {
        let mut hasher = FnvHasher::default();
        hasher.write(name.as_bytes());
        Symbol {
            name: Rc::from(name),
            hash: hasher.finish(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn hash_code(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.name == other.name
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Anything that can live inside a structural container.
///
/// Compound values are reference counted: cloning a `Value` shares the underlying container rather
/// than copying it, which is only sound because nested containers must be frozen.
#[derive(Clone)]
pub enum Value {
    Symbol(Symbol),
    Int(i64),
    Set(Rc<RecursiveSet>),
    Tuple(Rc<RecursiveTuple>),
}

impl Value {
    pub fn symbol(name: &str) -> Value {
        Value::Symbol(Symbol::new(name))
    }

    pub fn int(value: i64) -> Value {
        Value::Int(value)
    }

    /// Primitives are always frozen; compound values report the state of their container.
    pub fn is_frozen(&self) -> bool {
        match self {
            Value::Symbol(_) | Value::Int(_) => true,
            Value::Set(set) => set.is_frozen(),
            Value::Tuple(tuple) => tuple.is_frozen(),
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Value::Set(_) | Value::Tuple(_))
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Symbol(_) => "symbol",
            Value::Int(_) => "int",
            Value::Set(_) => "set",
            Value::Tuple(_) => "tuple",
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Rc<RecursiveSet>> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&Rc<RecursiveTuple>> {
        match self {
            Value::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }

    /// The deep structural hash. Stable for as long as the value is frozen.
    pub fn hash_code(&self) -> u64 {
        match self {
            Value::Symbol(sym) => sym.hash_code(),
            Value::Int(i) => mix_int(*i),
            Value::Set(set) => set.hash_code(),
            Value::Tuple(tuple) => tuple.hash_code(),
        }
    }
}

// splitmix64 finalizer
fn mix_int(i: i64) -> u64 {
    let mut h = i as u64;
    h = (h ^ (h >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94d049bb133111eb);
    h ^ (h >> 31)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => Rc::ptr_eq(a, b) || **a == **b,
            (Value::Tuple(a), Value::Tuple(b)) => Rc::ptr_eq(a, b) || **a == **b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Value {
        Value::Symbol(sym)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(name: &str) -> Value {
        Value::symbol(name)
    }
}

impl From<RecursiveSet> for Value {
    fn from(set: RecursiveSet) -> Value {
        Value::Set(Rc::new(set))
    }
}

impl From<RecursiveTuple> for Value {
    fn from(tuple: RecursiveTuple) -> Value {
        Value::Tuple(Rc::new(tuple))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Symbol(sym) => write!(f, "{:?}", sym),
            Value::Int(i) => write!(f, "{}", i),
            Value::Set(set) => write!(f, "{:?}", set),
            Value::Tuple(tuple) => write!(f, "{:?}", tuple),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Symbol(sym) => write!(f, "{}", sym),
            Value::Int(i) => write!(f, "{}", i),
            Value::Set(set) => write!(f, "{}", set),
            Value::Tuple(tuple) => write!(f, "{}", tuple),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_symbols_compare_by_text() {
        let a = Symbol::new("a");
        assert_eq!(a, Symbol::new("a"));
        assert_ne!(a, Symbol::new("b"));
        assert_eq!(a.hash_code(), Symbol::new("a").hash_code());
    }

    #[test]
    fn test_values_of_different_kinds_are_unequal() {
        assert_ne!(Value::symbol("1"), Value::int(1));
        let empty_set = Value::from(RecursiveSet::new().frozen());
        let empty_tuple = Value::from(RecursiveTuple::new().frozen());
        assert_ne!(empty_set, empty_tuple);
    }

    #[test]
    fn test_primitives_are_frozen() {
        assert!(Value::symbol("p").is_frozen());
        assert!(Value::int(3).is_frozen());
        assert!(!Value::from(RecursiveSet::new()).is_frozen());
    }
}
