// Open-addressed slot index for the compact set layout. The slots only hold positions into the
// owning set's dense value vector; the set supplies equality and hashes on demand.

const EMPTY: usize = usize::MAX;

pub(crate) const MIN_SLOTS: usize = 16;

// Load factor 3/4
const LOAD_NUMERATOR: usize = 3;
const LOAD_DENOMINATOR: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    Found { slot: usize, entry: usize },
    Vacant { slot: usize },
}

#[derive(Debug, Clone)]
pub(crate) struct SlotTable {
    slots: Vec<usize>,
    mask: usize,
}

impl SlotTable {
    /// A table large enough to hold `entries` without growing.
    pub(crate) fn with_capacity(entries: usize) -> SlotTable {
        let slot_count = Self::slots_for(entries);
        SlotTable {
            slots: vec![EMPTY; slot_count],
            mask: slot_count - 1,
        }
    }

    fn slots_for(entries: usize) -> usize {
        let target = (entries * LOAD_DENOMINATOR).div_ceil(LOAD_NUMERATOR);
        let mut slot_count = MIN_SLOTS;
        while slot_count < target {
            slot_count <<= 1;
        }
        slot_count
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// True when inserting one more entry would push the table past its load factor.
    pub(crate) fn is_full(&self, entries: usize) -> bool {
        entries * LOAD_DENOMINATOR >= self.slots.len() * LOAD_NUMERATOR
    }

    fn home(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    fn next(&self, slot: usize) -> usize {
        (slot + 1) & self.mask
    }

    /// Walks the probe run starting at the home slot of `hash` until either an entry satisfies
    /// `is_match` or an empty slot ends the run.
    pub(crate) fn probe(&self, hash: u64, mut is_match: impl FnMut(usize) -> bool) -> Probe {
        let mut slot = self.home(hash);
        loop {
            let entry = self.slots[slot];
            if entry == EMPTY {
                return Probe::Vacant { slot };
            }
            if is_match(entry) {
                return Probe::Found { slot, entry };
            }
            slot = self.next(slot);
        }
    }

    pub(crate) fn occupy(&mut self, slot: usize, entry: usize) {
        debug_assert_eq!(self.slots[slot], EMPTY);
        self.slots[slot] = entry;
    }

    /// Empties `slot` using backward-shift deletion: later members of the probe run move into the
    /// hole whenever that keeps them reachable from their home slot. No tombstones are left.
    pub(crate) fn vacate(&mut self, slot: usize, hash_of: impl Fn(usize) -> u64) {
        let mut hole = slot;
        let mut cursor = self.next(hole);
        while self.slots[cursor] != EMPTY {
            let entry = self.slots[cursor];
            let home = self.home(hash_of(entry));
            let dist_to_hole = hole.wrapping_sub(home) & self.mask;
            let dist_to_cursor = cursor.wrapping_sub(home) & self.mask;
            if dist_to_hole < dist_to_cursor {
                self.slots[hole] = entry;
                hole = cursor;
            }
            cursor = self.next(cursor);
        }
        self.slots[hole] = EMPTY;
    }

    /// Re-points the slot that refers to entry `from` at entry `to`. Used after the dense vector
    /// swap-removes, moving its last value into the gap.
    pub(crate) fn relocate(&mut self, hash: u64, from: usize, to: usize) {
        let mut slot = self.home(hash);
        while self.slots[slot] != from {
            debug_assert_ne!(self.slots[slot], EMPTY, "relocated entry missing from table");
            slot = self.next(slot);
        }
        self.slots[slot] = to;
    }

    /// Doubles the slot count and reinserts every entry by its hash. Entries are known to be
    /// distinct, so no equality checks are needed.
    pub(crate) fn grow(&mut self, hashes: &[u64]) {
        let slot_count = self.slots.len() * 2;
        self.rebuild(slot_count, hashes);
    }

    fn rebuild(&mut self, slot_count: usize, hashes: &[u64]) {
        self.slots = vec![EMPTY; slot_count];
        self.mask = slot_count - 1;
        for (entry, &hash) in hashes.iter().enumerate() {
            let mut slot = self.home(hash);
            while self.slots[slot] != EMPTY {
                slot = self.next(slot);
            }
            self.slots[slot] = entry;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_capacity_rounds_to_power_of_two() {
        assert_eq!(SlotTable::with_capacity(0).slot_count(), MIN_SLOTS);
        assert_eq!(SlotTable::with_capacity(12).slot_count(), 16);
        assert_eq!(SlotTable::with_capacity(13).slot_count(), 32);
        assert_eq!(SlotTable::with_capacity(100).slot_count(), 256);
    }

    #[test]
    fn test_is_full_at_three_quarters() {
        let table = SlotTable::with_capacity(0);
        assert!(!table.is_full(11));
        assert!(table.is_full(12));
    }

    // Every entry hashes to the same home slot, so each removal has to shift the rest of the run
    // back for lookups to keep working.
    #[test]
    fn test_vacate_shifts_colliding_run() {
        let hashes = vec![3u64, 3, 3, 3];
        let mut table = SlotTable::with_capacity(hashes.len());
        for entry in 0..hashes.len() {
            match table.probe(hashes[entry], |_| false) {
                Probe::Vacant { slot } => table.occupy(slot, entry),
                Probe::Found { .. } => panic!("unexpected match"),
            }
        }

        let slot = match table.probe(3, |e| e == 1) {
            Probe::Found { slot, entry } => {
                assert_eq!(entry, 1);
                slot
            }
            Probe::Vacant { .. } => panic!("entry 1 missing"),
        };
        table.vacate(slot, |e| hashes[e]);

        for entry in [0, 2, 3] {
            assert!(matches!(
                table.probe(3, |e| e == entry),
                Probe::Found { entry: found, .. } if found == entry
            ));
        }
        assert!(matches!(table.probe(3, |e| e == 1), Probe::Vacant { .. }));
    }

    #[test]
    fn test_vacate_keeps_entries_at_home() {
        // entry 0 lives at slot 5, entry 1 at its home slot 6; removing 0 must not move 1
        let hashes = vec![5u64, 6];
        let mut table = SlotTable::with_capacity(2);
        table.occupy(5, 0);
        table.occupy(6, 1);
        table.vacate(5, |e| hashes[e]);
        assert_eq!(table.probe(6, |e| e == 1), Probe::Found { slot: 6, entry: 1 });
        assert_eq!(table.probe(5, |_| true), Probe::Vacant { slot: 5 });
    }

    #[test]
    fn test_grow_rehashes_entries() {
        let hashes: Vec<u64> = (0..12).map(|i| i * 16 + 1).collect();
        let mut table = SlotTable::with_capacity(0);
        for (entry, &hash) in hashes.iter().enumerate() {
            if let Probe::Vacant { slot } = table.probe(hash, |_| false) {
                table.occupy(slot, entry);
            }
        }
        table.grow(&hashes);
        assert_eq!(table.slot_count(), 32);
        for (entry, &hash) in hashes.iter().enumerate() {
            assert!(matches!(
                table.probe(hash, |e| e == entry),
                Probe::Found { .. }
            ));
        }
    }
}
