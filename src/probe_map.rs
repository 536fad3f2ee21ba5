//! ProbeMap: open-addressing hash map with linear probing and tombstones.
//!
//! All entries live directly in one slot array. A lookup hashes the key to
//! its home slot and walks forward one slot at a time (wrapping via bitmask,
//! which is why capacity must stay a power of two) until it finds the key,
//! a never-occupied slot, or has inspected the whole table. Deletion marks
//! the slot as a tombstone instead of emptying it, so probe chains that run
//! through the slot stay intact for other keys. Growth doubles the array,
//! re-seats live entries against the new mask, and discards tombstones.

use crate::fnv::Fnv1aBuildHasher;
use core::fmt;
use core::hash::{BuildHasher, Hasher};
use std::io;

/// Default slot count for [`ProbeMap::new`].
pub const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug)]
struct OccupiedEntry<V> {
    key: Box<str>,
    value: V,
}

/// Three-state slot. A tombstone carries nothing: once an entry is
/// logically deleted its key and value cannot be read, by construction.
#[derive(Debug)]
enum Slot<V> {
    Empty,
    Tombstone,
    Occupied(OccupiedEntry<V>),
}

/// Construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateError {
    /// Capacity was zero or not a power of two.
    InvalidCapacity,
    /// The slot array could not be allocated.
    AllocationFailed,
}

/// Insertion failure. An absent key on `get`/`remove` is not an error; it
/// is reported as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// Keys must be non-empty.
    EmptyKey,
    /// Growth could not allocate the doubled slot array. The map is
    /// unchanged and remains fully usable at its current capacity.
    AllocationFailed,
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateError::InvalidCapacity => {
                f.write_str("capacity must be a non-zero power of two")
            }
            CreateError::AllocationFailed => f.write_str("slot array allocation failed"),
        }
    }
}

impl std::error::Error for CreateError {}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::EmptyKey => f.write_str("key must be non-empty"),
            InsertError::AllocationFailed => {
                f.write_str("growth allocation failed; the map is unchanged")
            }
        }
    }
}

impl std::error::Error for InsertError {}

/// Where an insertion walk resolved.
enum Target {
    /// A live entry with this key exists at the index: overwrite in place.
    Overwrite(usize),
    /// Write a fresh entry at the index (an empty slot, or the first
    /// tombstone recorded on the walk).
    Place(usize),
}

fn alloc_slots<V>(capacity: usize) -> Option<Box<[Slot<V>]>> {
    let mut slots: Vec<Slot<V>> = Vec::new();
    slots.try_reserve_exact(capacity).ok()?;
    slots.resize_with(capacity, || Slot::Empty);
    Some(slots.into_boxed_slice())
}

/// Open-addressing map from text keys to `V`, hashed with `S`
/// (FNV-1a by default).
pub struct ProbeMap<V, S = Fnv1aBuildHasher> {
    hasher: S,
    slots: Box<[Slot<V>]>,
    len: usize,
}

impl<V> ProbeMap<V> {
    /// Create a map at [`DEFAULT_CAPACITY`] with the FNV-1a hasher.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY).expect("default capacity is a valid power of two")
    }

    /// Create a map with an explicit initial capacity, which must be a
    /// power of two (that constraint is what lets the probe wraparound be
    /// a bitmask instead of a modulo).
    pub fn with_capacity(capacity: usize) -> Result<Self, CreateError> {
        Self::with_capacity_and_hasher(capacity, Fnv1aBuildHasher::default())
    }
}

impl<V> Default for ProbeMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S: BuildHasher> ProbeMap<V, S> {
    /// Create a map with an explicit capacity and hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CreateError> {
        if !capacity.is_power_of_two() {
            return Err(CreateError::InvalidCapacity);
        }
        let slots = alloc_slots(capacity).ok_or(CreateError::AllocationFailed)?;
        Ok(Self {
            hasher,
            slots,
            len: 0,
        })
    }

    /// Number of live entries. Tombstones are not counted.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot count; always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn make_hash(&self, key: &str) -> u64 {
        let mut h = self.hasher.build_hasher();
        h.write(key.as_bytes());
        h.finish()
    }

    fn home_index(&self, key: &str) -> usize {
        self.make_hash(key) as usize & (self.slots.len() - 1)
    }

    /// Walk the probe sequence for `key` and return the index of the live
    /// entry holding it, if any. Bounded by a full wraparound or by
    /// `capacity` probes, whichever comes first.
    fn probe(&self, key: &str) -> Option<usize> {
        let capacity = self.slots.len();
        let mask = capacity - 1;
        let home = self.home_index(key);
        let mut idx = home;
        let mut probes = 0;
        loop {
            match &self.slots[idx] {
                // Never-occupied slot: the key cannot be further along.
                Slot::Empty => return None,
                // Deleted or colliding entry: keep walking.
                Slot::Tombstone => {}
                Slot::Occupied(entry) if &*entry.key == key => return Some(idx),
                Slot::Occupied(_) => {}
            }
            idx = (idx + 1) & mask;
            probes += 1;
            if idx == home || probes >= capacity {
                return None;
            }
        }
    }

    /// Borrow the value for `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_entry(key).map(|(_, v)| v)
    }

    /// Borrow the stored key and value for `key`.
    pub fn get_entry(&self, key: &str) -> Option<(&str, &V)> {
        let idx = self.probe(key)?;
        match &self.slots[idx] {
            Slot::Occupied(entry) => Some((&*entry.key, &entry.value)),
            _ => unreachable!("probe returned a non-occupied slot"),
        }
    }

    /// Mutably borrow the value for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.probe(key)?;
        match &mut self.slots[idx] {
            Slot::Occupied(entry) => Some(&mut entry.value),
            _ => unreachable!("probe returned a non-occupied slot"),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.probe(key).is_some()
    }

    /// Insert `key -> value`, overwriting the value in place if a live
    /// entry for `key` already exists (an overwrite does not change
    /// `len`). Growth runs before the insertion when the load factor
    /// exceeds 0.5, so the probe walk below always has slack.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), InsertError> {
        if key.is_empty() {
            return Err(InsertError::EmptyKey);
        }
        if self.len > self.slots.len() / 2 {
            self.grow()?;
        }
        match self.find_insert_target(key) {
            Target::Overwrite(idx) => match &mut self.slots[idx] {
                Slot::Occupied(entry) => entry.value = value,
                _ => unreachable!("overwrite target must be occupied"),
            },
            Target::Place(idx) => {
                self.slots[idx] = Slot::Occupied(OccupiedEntry {
                    key: key.into(),
                    value,
                });
                self.len += 1;
            }
        }
        Ok(())
    }

    /// Resolve where an insertion for `key` lands.
    ///
    /// A tombstone seen on the walk is recorded but the walk continues: a
    /// live entry for the same key may still sit further along the chain
    /// from before that slot was deleted, and an overwrite must win over
    /// tombstone reuse. Once the walk reaches an empty slot (or exhausts
    /// the bound) with no live duplicate found, the first recorded
    /// tombstone takes priority over the empty slot.
    fn find_insert_target(&self, key: &str) -> Target {
        let capacity = self.slots.len();
        let mask = capacity - 1;
        let home = self.home_index(key);
        let mut idx = home;
        let mut probes = 0;
        let mut first_tombstone = None;
        loop {
            match &self.slots[idx] {
                Slot::Empty => return Target::Place(first_tombstone.unwrap_or(idx)),
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(idx);
                    }
                }
                Slot::Occupied(entry) if &*entry.key == key => return Target::Overwrite(idx),
                Slot::Occupied(_) => {}
            }
            idx = (idx + 1) & mask;
            probes += 1;
            if idx == home || probes >= capacity {
                return match first_tombstone {
                    Some(t) => Target::Place(t),
                    // The 0.5 load-factor guard keeps at least half the
                    // slots non-live; reaching this means the guard or the
                    // rehash is broken, not that the table is "full".
                    None => panic!("probe sequence exhausted on insert: load-factor invariant violated"),
                };
            }
        }
    }

    /// Logically delete `key`, returning its value. The slot becomes a
    /// tombstone so probe chains through it stay valid; the slot is
    /// reclaimed on the next growth. Absent keys return `None` and leave
    /// `len` untouched.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.probe(key)?;
        match core::mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.len -= 1;
                Some(entry.value)
            }
            _ => unreachable!("probe returned a non-occupied slot"),
        }
    }

    /// Double the slot array and re-seat every live entry against the new
    /// mask. Tombstones are dropped, so `len` is unchanged but the table
    /// comes out clean. All-or-nothing: the old array is only replaced
    /// after the new one is allocated, so a failed allocation leaves the
    /// map exactly as it was.
    fn grow(&mut self) -> Result<(), InsertError> {
        let new_capacity = self.slots.len() * 2;
        let new_slots = alloc_slots(new_capacity).ok_or(InsertError::AllocationFailed)?;
        let mask = new_capacity - 1;
        let old = core::mem::replace(&mut self.slots, new_slots);
        for slot in old.into_vec() {
            if let Slot::Occupied(entry) = slot {
                let mut idx = self.make_hash(&entry.key) as usize & mask;
                // Fresh array: no tombstones yet, first empty slot wins.
                while !matches!(self.slots[idx], Slot::Empty) {
                    idx = (idx + 1) & mask;
                }
                self.slots[idx] = Slot::Occupied(entry);
            }
        }
        debug_assert!(self.slots.len().is_power_of_two());
        Ok(())
    }

    /// Iterate over live entries in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Iterate over live entries with mutable access to values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots.iter_mut(),
        }
    }
}

impl<V: fmt::Display, S: BuildHasher> ProbeMap<V, S> {
    /// Write one diagnostic line for `key` if it is live. Returns whether
    /// anything was written.
    pub fn dump_entry<W: io::Write>(&self, key: &str, w: &mut W) -> io::Result<bool> {
        match self.get_entry(key) {
            Some((k, v)) => {
                writeln!(w, "{{ key:{k}, value:{v} }}")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write one diagnostic line per live entry, skipping tombstones.
    pub fn dump_all<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        for (key, value) in self.iter() {
            writeln!(w, "{{ key:{key}, value:{value} }}")?;
        }
        Ok(())
    }
}

impl<V: fmt::Debug, S> fmt::Debug for ProbeMap<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(entry) => Some((&*entry.key, &entry.value)),
            _ => None,
        });
        f.debug_map().entries(live).finish()
    }
}

/// Iterator over live entries of a [`ProbeMap`].
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(entry) = slot {
                return Some((&*entry.key, &entry.value));
            }
        }
        None
    }
}

/// Iterator over live entries of a [`ProbeMap`] with mutable values.
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(entry) = slot {
                let OccupiedEntry { key, value } = entry;
                return Some((&**key, value));
            }
        }
        None
    }
}
