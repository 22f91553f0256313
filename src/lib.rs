/* SPDX-License-Identifier: MPL-2.0 */
/*! Minimal perfect hash tables over byte keys, built with compress-hash-displace.
 *
 * A fixed set of `n` distinct keys is mapped onto slots `0..n` with no collisions and
 * no unused slots. A lookup costs one hash evaluation, two small table reads and one
 * key comparison, independent of `n`. Tables serialize to a flat little-endian
 * format that can be queried in place, e.g. over a memory map, via [TableView].
 *
 * ```
 * use chdmap::{Builder, MphTable, TableView};
 *
 * let mut builder = Builder::new();
 * builder.add("alpha", "1").unwrap();
 * builder.add("beta", "2").unwrap();
 * let table = builder.build().unwrap();
 * assert_eq!(table.get(b"alpha"), Some(&b"1"[..]));
 *
 * let mut bytes = Vec::new();
 * table.write_to(&mut bytes).unwrap();
 * let view = TableView::alias(&bytes).unwrap();
 * assert_eq!(view.get(b"beta"), Some(&b"2"[..]));
 * assert_eq!(view.get(b"gamma"), None);
 * ```
 */

use std::iter::FusedIterator;

pub mod builder;
pub mod codec;
mod error;
pub mod hash;
pub mod util;

pub use builder::{BuildConfig, Builder};
pub use codec::TableView;
pub use error::{Error, Result};

/** Query interface shared by owned tables and views over serialized bytes.
 *
 * Implementors only expose the stored layout (seed pool, bucket index, slots);
 * lookup, iteration, verification and serialization are derived from it. */
pub trait MphTable {
    /** Length of the seed pool; always at least 1 (the global seed) */
    fn seed_count(&self) -> usize;
    /** Seed pool entry `i`, for `i < seed_count()` */
    fn seed(&self, i: usize) -> u64;
    /** Number of buckets in the index; at least 1 whenever the table has entries */
    fn bucket_count(&self) -> usize;
    /** Pool pointer of bucket `i`; values `>= seed_count()` mark an empty bucket */
    fn bucket_pointer(&self, i: usize) -> u16;
    /** Number of entries, which is also the number of slots */
    fn len(&self) -> usize;
    /** The (key, value) pair at `slot < len()` */
    fn entry(&self, slot: usize) -> (&[u8], &[u8]);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /** The only slot that can hold `key`, or `None` if the key's bucket is empty.
     * The slot's key still has to be compared to rule out non-members. */
    fn locate(&self, key: &[u8]) -> Option<usize> {
        let n = self.len();
        if n == 0 || self.bucket_count() == 0 {
            return None;
        }
        let h = hash::hash(self.seed(0), key);
        let ri = self.bucket_pointer(hash::bucket(h, self.bucket_count())) as usize;
        if ri >= self.seed_count() {
            return None;
        }
        Some(hash::slot(h, self.seed(ri), n))
    }

    /** The value stored for `key`, or `None` if `key` is not in the table */
    fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let (k, v) = self.entry(self.locate(key)?);
        if k == key {
            Some(v)
        } else {
            None
        }
    }

    /** Entries in slot order */
    fn iter(&self) -> Entries<'_, Self> {
        Entries {
            table: self,
            pos: 0,
        }
    }

    /** Check that every stored key resolves to the slot holding it. Keys are
     * unique iff this holds, since a key resolves to exactly one slot. */
    fn verify(&self) -> Result<()> {
        for slot in 0..self.len() {
            if self.locate(self.entry(slot).0) != Some(slot) {
                return Err(Error::Misplaced { slot });
            }
        }
        Ok(())
    }

    /** Serialize in the format read by [Table::read] and [TableView::alias] */
    fn write_to<W: std::io::Write>(&self, sink: W) -> Result<()> {
        codec::write(self, sink)
    }
}

/** Iterator over the entries of a table, in slot order */
pub struct Entries<'t, T: ?Sized> {
    table: &'t T,
    pos: usize,
}

impl<'t, T: MphTable + ?Sized> Iterator for Entries<'t, T> {
    type Item = (&'t [u8], &'t [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let table: &'t T = self.table;
        if self.pos >= table.len() {
            return None;
        }
        self.pos += 1;
        Some(table.entry(self.pos - 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.table.len().saturating_sub(self.pos);
        (rest, Some(rest))
    }
}

impl<T: MphTable + ?Sized> ExactSizeIterator for Entries<'_, T> {}
impl<T: MphTable + ?Sized> FusedIterator for Entries<'_, T> {}

/* ---------------------------------------------------------------------------- */

/** A table owning its seed pool, bucket index and entries. Produced by
 * [Builder::build] and [Table::read]. */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    seeds: Vec<u64>,
    indices: Vec<u16>,
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Table {
    pub(crate) fn from_parts(
        seeds: Vec<u64>,
        indices: Vec<u16>,
        entries: Vec<(Vec<u8>, Vec<u8>)>,
    ) -> Table {
        debug_assert!(!seeds.is_empty());
        Table {
            seeds,
            indices,
            entries,
        }
    }
}

impl MphTable for Table {
    fn seed_count(&self) -> usize {
        self.seeds.len()
    }
    fn seed(&self, i: usize) -> u64 {
        self.seeds[i]
    }
    fn bucket_count(&self) -> usize {
        self.indices.len()
    }
    fn bucket_pointer(&self, i: usize) -> u16 {
        self.indices[i]
    }
    fn len(&self) -> usize {
        self.entries.len()
    }
    fn entry(&self, slot: usize) -> (&[u8], &[u8]) {
        let (k, v) = &self.entries[slot];
        (&k[..], &v[..])
    }
}

impl<'t> IntoIterator for &'t Table {
    type Item = (&'t [u8], &'t [u8]);
    type IntoIter = Entries<'t, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/* ---------------------------------------------------------------------------- */

/** Check every query property of `table` against the source mapping `data`, plus
 * a batch of keys that are not in it. */
#[cfg(test)]
pub(crate) fn check_table<T: MphTable + ?Sized>(table: &T, data: &[(Vec<u8>, Vec<u8>)]) {
    assert_eq!(table.len(), data.len());
    assert!(table.seed_count() >= 1);
    assert!(table.seed_count() <= table.bucket_count() + 1);
    table.verify().unwrap();

    for (k, v) in data {
        assert_eq!(table.get(k), Some(&v[..]), "key {:?}", k);
    }
    let mut slots: Vec<usize> = data.iter().map(|(k, _)| table.locate(k).unwrap()).collect();
    slots.sort_unstable();
    assert!(slots.iter().copied().eq(0..data.len()), "not a bijection");

    let members: std::collections::HashSet<&[u8]> = data.iter().map(|(k, _)| &k[..]).collect();
    for i in 0..1000u32 {
        let probe = format!("absent-{}", i).into_bytes();
        if !members.contains(&probe[..]) {
            assert_eq!(table.get(&probe), None);
        }
    }

    let mut seen: Vec<(&[u8], &[u8])> = table.iter().collect();
    assert_eq!(seen.len(), data.len());
    for (slot, (k, _)) in seen.iter().enumerate() {
        assert_eq!(table.locate(k), Some(slot));
    }
    seen.sort_unstable();
    let mut expected: Vec<(&[u8], &[u8])> = data.iter().map(|(k, v)| (&k[..], &v[..])).collect();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}

#[cfg(test)]
fn build_from(data: &[(Vec<u8>, Vec<u8>)]) -> Table {
    let mut b = Builder::with_capacity(data.len());
    for (k, v) in data {
        b.add(k.clone(), v.clone()).unwrap();
    }
    b.build().unwrap()
}

#[test]
fn test_small_table() {
    let mut b = Builder::new();
    for (k, v) in [("alpha", "1"), ("beta", "2"), ("gamma", "3")] {
        b.add(k, v).unwrap();
    }
    let t = b.build().unwrap();
    assert_eq!(t.get(b"alpha"), Some(&b"1"[..]));
    assert_eq!(t.get(b"beta"), Some(&b"2"[..]));
    assert_eq!(t.get(b"gamma"), Some(&b"3"[..]));
    assert_eq!(t.get(b"delta"), None);
    assert_eq!(t.get(b""), None);
    assert_eq!(t.len(), 3);
}

#[test]
fn test_empty_table() {
    let t = Builder::new().build().unwrap();
    assert_eq!(t.len(), 0);
    assert!(t.is_empty());
    assert_eq!(t.iter().next(), None);
    assert_eq!(t.iter().len(), 0);
    assert_eq!(t.get(b"anything"), None);
    assert_eq!(t.get(b""), None);
    assert_eq!(t.seed_count(), 1);
    t.verify().unwrap();
}

#[test]
fn test_single_entry() {
    let data = vec![(b"only".to_vec(), b"one".to_vec())];
    let t = build_from(&data);
    check_table(&t, &data);
    assert_eq!(t.locate(b"only"), Some(0));
}

#[test]
fn test_table_sizes() {
    let mut sizes: Vec<usize> = vec![0, 1, 2, 3];
    for j in 2..12 {
        sizes.push(2 << j);
        sizes.push(3 << j);
    }
    for s in sizes {
        let data = util::make_dataset(s, 16, s as u64);
        let t = build_from(&data);
        check_table(&t, &data);
    }
}

#[test]
fn test_empty_keys_and_values() {
    let data = vec![
        (Vec::new(), b"empty key".to_vec()),
        (b"empty value".to_vec(), Vec::new()),
        (vec![0], vec![0]),
        (vec![0, 0], Vec::new()),
    ];
    let t = build_from(&data);
    check_table(&t, &data);
    assert_eq!(t.get(b""), Some(&b"empty key"[..]));
    assert_eq!(t.get(b"empty value"), Some(&b""[..]));
    assert_eq!(t.get(&[0, 0, 0]), None);
}

#[test]
fn test_lookup_purity() {
    let data = util::make_dataset(500, 8, 3);
    let t = build_from(&data);
    let before = t.clone();
    for (k, v) in data.iter().take(50) {
        for _ in 0..3 {
            assert_eq!(t.get(k), Some(&v[..]));
            assert_eq!(t.get(b"missing"), None);
        }
    }
    assert_eq!(t, before);
}

#[test]
fn test_iteration_restartable() {
    let data = util::make_dataset(100, 4, 9);
    let t = build_from(&data);
    let first: Vec<_> = t.iter().collect();
    let second: Vec<_> = (&t).into_iter().collect();
    assert_eq!(first, second);
    let mut it = t.iter();
    assert_eq!(it.len(), 100);
    it.next();
    assert_eq!(it.size_hint(), (99, Some(99)));
    assert_eq!(it.count(), 99);
}

#[test]
fn test_no_false_positives_shared_chain() {
    /* Absent keys that land in occupied buckets must be rejected by the key
     * comparison, not by the bucket index. */
    let data = util::make_dataset(2000, 6, 21);
    let t = build_from(&data);
    let mut resolved = 0;
    for i in 0..20_000u32 {
        let probe = format!("probe{}", i).into_bytes();
        if t.locate(&probe).is_some() {
            resolved += 1;
        }
        assert_eq!(t.get(&probe), None);
    }
    assert!(resolved > 0);
}

#[test]
fn test_table_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Table>();
    assert_send_sync::<TableView<'static>>();

    let data = util::make_dataset(1000, 10, 4);
    let t = build_from(&data);
    std::thread::scope(|s| {
        for chunk in data.chunks(250) {
            let t = &t;
            s.spawn(move || {
                for (k, v) in chunk {
                    assert_eq!(t.get(k), Some(&v[..]));
                }
            });
        }
    });
}
