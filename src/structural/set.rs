use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use rand::Rng;

use super::table::{Probe, SlotTable};
use super::{RecursiveTuple, Result, StructuralError, Value};

/// A set of structural values with deep equality and an order-independent hash.
///
/// Values live densely in insertion order (modulo swap-removal) and are indexed by an
/// open-addressed slot table, so iterating an unmodified set always yields the same sequence.
/// Once frozen, a set never changes again.
#[derive(Clone)]
pub struct RecursiveSet {
    values: Vec<Value>,
    hashes: Vec<u64>,
    table: SlotTable,
    hash: u64,
    frozen: bool,
}

impl RecursiveSet {
    pub fn new() -> RecursiveSet {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> RecursiveSet {
        RecursiveSet {
            values: Vec::with_capacity(capacity),
            hashes: Vec::with_capacity(capacity),
            table: SlotTable::with_capacity(capacity),
            hash: 0,
            frozen: false,
        }
    }

    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Result<RecursiveSet> {
        let values = values.into_iter();
        let mut set = Self::with_capacity(values.size_hint().0);
        for value in values {
            set.add(value)?;
        }
        Ok(set)
    }

    pub fn singleton(value: Value) -> Result<RecursiveSet> {
        let mut set = Self::with_capacity(1);
        set.add(value)?;
        Ok(set)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Marks the set permanently read-only. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Builder-style `freeze`.
    pub fn frozen(mut self) -> RecursiveSet {
        self.freeze();
        self
    }

    /// Freezes the set and wraps it as a value ready for nesting.
    pub fn into_value(self) -> Value {
        Value::from(self.frozen())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// XOR of the element hashes, maintained incrementally.
    pub fn hash_code(&self) -> u64 {
        self.hash
    }

    /// Inserts `value` unless a structurally equal element is already present. Returns whether the
    /// set changed.
    pub fn add(&mut self, value: Value) -> Result<bool> {
        if self.frozen {
            return Err(StructuralError::Frozen("set"));
        }
        if !value.is_frozen() {
            return Err(StructuralError::UnfrozenElement(value.kind()));
        }
        let hash = value.hash_code();
        Ok(self.insert(value, hash))
    }

    /// `add` for crate code that holds a fresh, unfrozen set and an already frozen value, where
    /// neither rejection can occur.
    pub(crate) fn add_frozen(&mut self, value: Value) -> bool {
        debug_assert!(!self.frozen, "add_frozen on a frozen set");
        debug_assert!(value.is_frozen(), "add_frozen with an unfrozen value");
        let hash = value.hash_code();
        self.insert(value, hash)
    }

    /// Removes the element structurally equal to `value`, if any. Returns whether the set changed.
    pub fn remove(&mut self, value: &Value) -> Result<bool> {
        if self.frozen {
            return Err(StructuralError::Frozen("set"));
        }
        if self.values.is_empty() {
            return Ok(false);
        }
        let hash = value.hash_code();
        let (slot, entry) = match self.find(value, hash) {
            Probe::Found { slot, entry } => (slot, entry),
            Probe::Vacant { .. } => return Ok(false),
        };

        self.hash ^= hash;
        let hashes = &self.hashes;
        self.table.vacate(slot, |e| hashes[e]);

        let last = self.values.len() - 1;
        self.values.swap_remove(entry);
        self.hashes.swap_remove(entry);
        if entry != last {
            self.table.relocate(self.hashes[entry], last, entry);
        }
        Ok(true)
    }

    pub fn contains(&self, value: &Value) -> bool {
        matches!(self.find(value, value.hash_code()), Probe::Found { .. })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Some element of the set; the same one for as long as the set is unmodified.
    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    /// A uniformly random element, in constant time.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Value> {
        if self.values.is_empty() {
            return None;
        }
        Some(&self.values[rng.gen_range(0..self.values.len())])
    }

    /// A mutable copy of this set, whether or not the set itself is frozen.
    pub fn thaw(&self) -> RecursiveSet {
        let mut copy = self.clone();
        copy.frozen = false;
        copy
    }

    pub fn union(&self, other: &RecursiveSet) -> RecursiveSet {
        let mut result = self.thaw();
        for (value, &hash) in other.values.iter().zip(other.hashes.iter()) {
            result.insert(value.clone(), hash);
        }
        result
    }

    pub fn intersection(&self, other: &RecursiveSet) -> RecursiveSet {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut result = RecursiveSet::with_capacity(small.len());
        for (value, &hash) in small.values.iter().zip(small.hashes.iter()) {
            if large.contains(value) {
                result.insert(value.clone(), hash);
            }
        }
        result
    }

    pub fn difference(&self, other: &RecursiveSet) -> RecursiveSet {
        let mut result = RecursiveSet::new();
        for (value, &hash) in self.values.iter().zip(self.hashes.iter()) {
            if !other.contains(value) {
                result.insert(value.clone(), hash);
            }
        }
        result
    }

    pub fn is_subset(&self, other: &RecursiveSet) -> bool {
        self.len() <= other.len() && self.values.iter().all(|v| other.contains(v))
    }

    pub fn is_superset(&self, other: &RecursiveSet) -> bool {
        other.is_subset(self)
    }

    /// The set of all (frozen) subsets. Panics if the set has more elements than a `usize` has
    /// bits, since the result could not be held in memory anyway.
    pub fn power_set(&self) -> RecursiveSet {
        let n = self.values.len();
        assert!(n < usize::BITS as usize, "power set of {} elements", n);
        let count = 1usize << n;
        let mut result = RecursiveSet::with_capacity(count);
        for mask in 0..count {
            let mut subset = RecursiveSet::new();
            for (ix, (value, &hash)) in self.values.iter().zip(self.hashes.iter()).enumerate() {
                if mask & (1 << ix) != 0 {
                    subset.insert(value.clone(), hash);
                }
            }
            let subset = subset.into_value();
            let hash = subset.hash_code();
            result.insert(subset, hash);
        }
        result
    }

    /// The set of frozen pairs `(a, b)` for `a` in this set and `b` in `other`.
    pub fn cartesian_product(&self, other: &RecursiveSet) -> RecursiveSet {
        let mut result = RecursiveSet::with_capacity(self.len() * other.len());
        for a in self.values.iter() {
            for b in other.values.iter() {
                let pair = RecursiveTuple::pair(a.clone(), b.clone()).into_value();
                let hash = pair.hash_code();
                result.insert(pair, hash);
            }
        }
        result
    }

    fn find(&self, value: &Value, hash: u64) -> Probe {
        self.table.probe(hash, |entry| {
            self.hashes[entry] == hash && self.values[entry] == *value
        })
    }

    // Callers guarantee `value` is frozen and `hash` is its hash code.
    fn insert(&mut self, value: Value, hash: u64) -> bool {
        if self.table.is_full(self.values.len()) {
            self.table.grow(&self.hashes);
        }
        match self.find(&value, hash) {
            Probe::Found { .. } => false,
            Probe::Vacant { slot } => {
                self.table.occupy(slot, self.values.len());
                self.values.push(value);
                self.hashes.push(hash);
                self.hash ^= hash;
                true
            }
        }
    }
}

impl Default for RecursiveSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a RecursiveSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for RecursiveSet {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.len() == other.len()
            && self.hash == other.hash
            && self.values.iter().all(|v| other.contains(v))
    }
}

impl Eq for RecursiveSet {}

impl Hash for RecursiveSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for RecursiveSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.values.iter()).finish()
    }
}

// Elements render sorted by their text so equal sets print identically.
impl fmt::Display for RecursiveSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let items = self.values.iter().map(|v| v.to_string()).sorted().join(", ");
        write!(f, "{{{}}}", items)
    }
}
