//! Open-addressing string dictionaries.
//!
//! Keys are hashed with 64-bit FNV-1a and probed linearly. Deleted entries
//! leave tombstones so later probe sequences still find what follows them;
//! a run of tombstones that ends at an empty slot is turned back into empty
//! slots as soon as it appears. The table doubles, rebuilding every live
//! entry, whenever an insertion would leave fewer than two empty slots.

use std::fmt;

const INIT_DICT_SIZE: usize = 2;

const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
const FNV_PRIME: u64 = 1_099_511_628_211;

/// Number of empty slots a table of `n` slots may consume before growing.
const fn remain(n: usize) -> usize {
    n * 2 / 3
}

/// FNV-1a over the bytes of `a` followed by the bytes of `b`.
pub fn fnv1a(a: &str, b: &str) -> u64 {
    a.bytes().chain(b.bytes()).fold(FNV_OFFSET_BASIS, |h, byte| {
        (h ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

enum Slot<V> {
    Empty,
    Deleted,
    Occupied { name: Box<str>, value: V },
}

impl<V> Slot<V> {
    fn holds(&self, a: &str, b: &str) -> bool {
        match self {
            Slot::Occupied { name, .. } => {
                let name = name.as_bytes();
                name.len() == a.len() + b.len()
                    && &name[..a.len()] == a.as_bytes()
                    && &name[a.len()..] == b.as_bytes()
            }
            _ => false,
        }
    }
}

/// A string-keyed hash table.
pub struct Dict<V> {
    remain: usize,
    table: Vec<Slot<V>>,
}

impl<V> Dict<V> {
    pub fn new() -> Self {
        Self::with_size(INIT_DICT_SIZE)
    }

    fn with_size(size: usize) -> Self {
        debug_assert!(size.is_power_of_two());
        let mut table = Vec::with_capacity(size);
        table.resize_with(size, || Slot::Empty);
        Dict {
            remain: remain(size),
            table,
        }
    }

    /// Number of slots in the table. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Empty slots left before the next insertion forces growth.
    pub fn remain(&self) -> usize {
        self.remain
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn mask(&self) -> usize {
        self.table.len() - 1
    }

    /// Slot index holding `a ++ b`, probing from its hash.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "only the low bits of the hash select a slot"
    )]
    fn find(&self, a: &str, b: &str) -> Option<usize> {
        let mask = self.mask();
        let mut n = fnv1a(a, b) as usize;
        loop {
            let pos = n & mask;
            match &self.table[pos] {
                Slot::Empty => return None,
                slot if slot.holds(a, b) => return Some(pos),
                _ => n = n.wrapping_add(1),
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.get2(key, "")
    }

    /// Look up the key `a ++ b` without building it.
    pub fn get2(&self, a: &str, b: &str) -> Option<&V> {
        match &self.table[self.find(a, b)?] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Insert, update, or with `None`, delete.
    pub fn put(&mut self, key: &str, value: Option<V>) {
        match (self.find(key, ""), value) {
            (Some(pos), Some(value)) => {
                if let Slot::Occupied { value: slot, .. } = &mut self.table[pos] {
                    *slot = value;
                }
            }
            (None, Some(value)) => self.insert_new(key.into(), value),
            (Some(pos), None) => self.remove_at(pos),
            (None, None) => {}
        }
    }

    pub fn insert(&mut self, key: &str, value: V) {
        self.put(key, Some(value));
    }

    pub fn remove(&mut self, key: &str) {
        self.put(key, None);
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "only the low bits of the hash select a slot"
    )]
    fn insert_new(&mut self, name: Box<str>, value: V) {
        if self.remain <= 1 {
            self.grow();
        }
        let mask = self.mask();
        let mut n = fnv1a(&name, "") as usize;
        while matches!(self.table[n & mask], Slot::Occupied { .. }) {
            n = n.wrapping_add(1);
        }
        let pos = n & mask;
        if matches!(self.table[pos], Slot::Empty) {
            self.remain -= 1;
        }
        self.table[pos] = Slot::Occupied { name, value };
    }

    fn grow(&mut self) {
        let mut bigger = Dict::with_size(self.table.len() * 2);
        for slot in std::mem::take(&mut self.table) {
            if let Slot::Occupied { name, value } = slot {
                bigger.insert_new(name, value);
            }
        }
        tracing::trace!(size = bigger.capacity(), "dict grown");
        *self = bigger;
    }

    fn remove_at(&mut self, pos: usize) {
        let mask = self.mask();
        self.table[pos] = Slot::Deleted;

        let mut n = pos.wrapping_add(1);
        while matches!(self.table[n & mask], Slot::Deleted) {
            n = n.wrapping_add(1);
        }
        if !matches!(self.table[n & mask], Slot::Empty) {
            return;
        }
        n = n.wrapping_sub(1);
        while matches!(self.table[n & mask], Slot::Deleted) {
            self.table[n & mask] = Slot::Empty;
            self.remain += 1;
            n = n.wrapping_sub(1);
        }
    }

    /// Visit every live entry in slot order.
    pub fn for_each(&self, mut f: impl FnMut(&str, &V)) {
        for (name, value) in self.iter() {
            f(name, value);
        }
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.table.iter().filter_map(|slot| match slot {
            Slot::Occupied { name, value } => Some((&**name, value)),
            _ => None,
        })
    }

    /// Number of tombstones currently in the table.
    pub fn tombstones(&self) -> usize {
        self.table
            .iter()
            .filter(|s| matches!(s, Slot::Deleted))
            .count()
    }
}

impl<V> Default for Dict<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Dict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
