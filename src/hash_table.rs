//! HashTable: separate-chaining table with load-factor driven doubling.

use crate::error::TableError;
use crate::options::TableOptions;
use crate::reentrancy::ActorCheck;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::{Flatten, FusedIterator};
use core::mem;
use core::slice;
use hashbrown::hash_map::DefaultHashBuilder;

/// Growth is checked before every insertion against this ratio of entries to
/// buckets.
const MAX_LOAD_FACTOR: f64 = 0.75;
const GROWTH_FACTOR: usize = 2;

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

pub(crate) type Bucket<K, V> = Vec<Entry<K, V>>;

fn empty_buckets<K, V>(count: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::with_capacity(count);
    buckets.resize_with(count, Vec::new);
    buckets
}

#[inline]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// A map from unique keys to values, stored as chains of entries in a
/// bucket array that doubles whenever the table is at least three quarters
/// full at the start of a `put`.
///
/// Capacity never shrinks: neither `delete` nor `clear` gives buckets back.
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    pub(crate) buckets: Vec<Bucket<K, V>>,
    len: usize,
    actor: ActorCheck,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Empty table with the default 10 buckets.
    pub fn new() -> Self {
        Self::with_options(TableOptions::default())
    }

    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::with_options(TableOptions::new().with_initial_capacity(initial_capacity))
    }

    pub fn with_options(options: TableOptions) -> Self {
        Self::with_options_and_hasher(options, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Visits every key: buckets in index order, each chain in insertion
    /// order. The order is not stable across growth.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.buckets.iter().flatten(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.buckets.iter_mut().flatten(),
            remaining: self.len,
        }
    }

    /// Drops every entry. The bucket array is rebuilt at the current
    /// capacity, so a grown table stays grown.
    pub fn clear(&mut self) {
        let capacity = self.buckets.len();
        let dropped = mem::replace(&mut self.len, 0);
        self.buckets = empty_buckets(capacity);
        log::trace!("cleared {} entries, keeping {} buckets", dropped, capacity);
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_options_and_hasher(TableOptions::default(), hasher)
    }

    pub fn with_options_and_hasher(options: TableOptions, hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(options.bucket_count()),
            len: 0,
            actor: ActorCheck::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Bucket and chain position of the entry equal to `q`.
    fn locate<Q>(&self, q: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _s = self.actor.enter();
        let hash = self.make_hash(q);
        let b = bucket_index(hash, self.buckets.len());
        self.buckets[b]
            .iter()
            .position(|e| e.hash == hash && e.key.borrow() == q)
            .map(|i| (b, i))
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// The load check runs before the key is looked up, so a table at the
    /// threshold grows even when `key` is already present.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.len as f64 >= self.buckets.len() as f64 * MAX_LOAD_FACTOR {
            self.grow();
        }

        let _s = self.actor.enter();
        let hash = self.make_hash(&key);
        let b = bucket_index(hash, self.buckets.len());
        let chain = &mut self.buckets[b];
        if let Some(entry) = chain
            .iter_mut()
            .find(|e| e.hash == hash && e.key == key)
        {
            return Some(mem::replace(&mut entry.value, value));
        }
        chain.push(Entry { key, value, hash });
        self.len += 1;
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (b, i) = self.locate(key)?;
        Some(&self.buckets[b][i].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (b, i) = self.locate(key)?;
        Some(&mut self.buckets[b][i].value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key).is_some()
    }

    /// Removes the entry for `key` and returns its value. Deleting a missing
    /// key does nothing.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (b, i) = self.locate(key)?;
        let entry = self.buckets[b].remove(i);
        self.len -= 1;
        Some(entry.value)
    }

    /// [`put`](Self::put) for a key that may be absent.
    pub fn try_put(&mut self, key: Option<K>, value: V) -> Result<Option<V>, TableError> {
        let key = key.ok_or(TableError::absent_key())?;
        Ok(self.put(key, value))
    }

    pub fn try_get<Q>(&self, key: Option<&Q>) -> Result<Option<&V>, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = key.ok_or(TableError::absent_key())?;
        Ok(self.get(key))
    }

    pub fn try_contains<Q>(&self, key: Option<&Q>) -> Result<bool, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = key.ok_or(TableError::absent_key())?;
        Ok(self.contains(key))
    }

    pub fn try_delete<Q>(&mut self, key: Option<&Q>) -> Result<Option<V>, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = key.ok_or(TableError::absent_key())?;
        Ok(self.delete(key))
    }

    // Entries carry their hash, so redistribution never calls `K: Hash`.
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * GROWTH_FACTOR;
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old.into_iter().flatten() {
            self.buckets[bucket_index(entry.hash, new_capacity)].push(entry);
        }
        log::debug!(
            "grew hash table from {} to {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.len
        );
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_options_and_hasher(TableOptions::default(), S::default());
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashTable<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Iterator over `(&K, &V)` in bucket order.
pub struct Iter<'a, K, V> {
    inner: Flatten<slice::Iter<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.inner.next()?;
        self.remaining -= 1;
        Some((&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` in bucket order.
pub struct IterMut<'a, K, V> {
    inner: Flatten<slice::IterMut<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.inner.next()?;
        self.remaining -= 1;
        Some((&e.key, &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Iterator returned by [`HashTable::keys`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}
