//! chained-hash-table: a single-threaded map from unique keys to values,
//! built on separate chaining with a bucket array that doubles under load.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small symbol-table style container with amortized O(1)
//!   `put`/`get`/`delete`/`contains` and enumeration of all keys.
//! - Pieces:
//!   - HashTable<K, V, S>: owns a `Vec` of buckets, each bucket a `Vec`
//!     of entries. All operations route through it.
//!   - TableOptions: constructor configuration (starting bucket count).
//!   - TableError: the single error kind, raised by the `try_*` operations
//!     for an absent key.
//!   - commands: handlers behind the `symtab` binary's menu.
//!
//! Hashing and buckets
//! - Bucket index is `hash(key) mod capacity`, with the `u64` hash from the
//!   table's `BuildHasher` (hashbrown's `DefaultHashBuilder` unless one is
//!   supplied).
//! - Each entry caches its hash. Growth redistributes by the cached hash and
//!   never calls `K: Hash` again; chain scans compare hashes before keys.
//!
//! Growth policy
//! - `put` checks `len >= 0.75 * capacity` before looking at the key and, if
//!   so, doubles the bucket array first. Updating an existing key on a table
//!   at the threshold therefore still grows it.
//! - Capacity never shrinks. `delete` leaves buckets in place and `clear`
//!   rebuilds the bucket array at the current capacity.
//!
//! Absent keys
//! - `put`/`get`/`delete`/`contains` take `K`/`&Q` and cannot see an absent
//!   key. Callers holding an `Option` key use `try_put`/`try_get`/
//!   `try_delete`/`try_contains`, which return
//!   `TableError::InvalidArgument` before touching the table.
//! - A missing key is not an error: lookups return `None` and deleting it
//!   is a no-op.
//!
//! Concurrency and reentrancy
//! - No locking. The table is `Send` but not `Sync`; share it across
//!   threads behind a `Mutex`.
//! - In debug builds, a user `Hash`/`Eq` that re-enters the table during a
//!   probe panics instead of observing a lookup in progress.
//!
//! Notes and non-goals
//! - Enumeration order (bucket order, then insertion order within a chain)
//!   is an artifact of the layout and changes across growth.
//! - No persistence, no sorted traversal, no shrink policy.

pub mod commands;
mod error;
pub mod hash_table;
mod hash_table_proptest;
mod options;
mod reentrancy;

// Public surface
pub use error::TableError;
pub use hash_table::{HashTable, Iter, IterMut, Keys, Values};
pub use options::{TableOptions, DEFAULT_CAPACITY};
