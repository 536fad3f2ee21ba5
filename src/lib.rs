//! probemap: a single-threaded, open-addressing hash map with linear
//! probing, tombstone-based deletion, and load-factor-triggered growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the whole collision story in one flat slot array that can
//!   be reasoned about slot by slot.
//! - Pieces:
//!   - `fnv::Fnv1aHasher`: deterministic 64-bit FNV-1a digest; the home
//!     slot is `digest & (capacity - 1)`, which is why capacity is pinned
//!     to powers of two.
//!   - `probe_map::ProbeMap<V, S>`: the slot table. Each slot is
//!     `Empty | Tombstone | Occupied`, so "reading a deleted entry" is
//!     unrepresentable rather than merely forbidden.
//!   - `value::Value`: the typed diagnostic payload (text or integer
//!     slices behind `Cow`), for callers that want the classic
//!     heterogeneous-value table instead of a concrete `V`.
//!
//! Constraints
//! - Single-threaded: `&mut self` for all mutation, no interior
//!   mutability, no atomics. Concurrent use needs external locking.
//! - Capacity is always a non-zero power of two; checked at construction
//!   and preserved by growth.
//! - Growth runs before insertion whenever `len > capacity / 2`, so a
//!   probe walk always finds an empty slot or a reusable tombstone.
//! - Probing is bounded by a full wraparound or `capacity` steps; an
//!   insert that exhausts the bound without a landing slot panics, since
//!   it can only mean the load-factor invariant is broken.
//!
//! Deletion policy
//! - `remove` tombstones the slot instead of emptying it: linear probing
//!   depends on the unbroken run of occupied-or-tombstone slots between a
//!   key's home index and wherever collisions pushed it. Tombstones are
//!   skipped by lookups, reused by inserts (first tombstone on the walk
//!   wins once a live duplicate is ruled out), and discarded wholesale by
//!   the next rehash.
//!
//! Hashing
//! - FNV-1a is unseeded and non-cryptographic: fast, evenly distributed,
//!   and trivially collidable by an adversary who picks the keys. The
//!   hasher is a `BuildHasher` parameter, so callers with hostile inputs
//!   can swap in a keyed hasher without touching the table logic.
//!
//! Notes and non-goals
//! - Keys are text only (`&str` in, owned `Box<str>` inside).
//! - No persistence or serialization of the table.
//! - No entry API or stable handles; lookups re-probe by key.

mod fnv;
mod probe_map;
mod probe_map_proptest;
mod value;

// Public surface
pub use fnv::{Fnv1aBuildHasher, Fnv1aHasher};
pub use probe_map::{CreateError, InsertError, Iter, IterMut, ProbeMap, DEFAULT_CAPACITY};
pub use value::{Value, ValueKind};
