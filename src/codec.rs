/* SPDX-License-Identifier: MPL-2.0 */
/*! Binary format of a table.
 *
 * All integers are little-endian and nothing is padded:
 *
 * ```text
 * u32 R, R x u64        seed pool (entry 0 is the global seed)
 * u32 B, B x u16        bucket index
 * u32 N
 * N x { u32 key length, u32 value length, key bytes, value bytes }   in slot order
 * ```
 *
 * The format has no alignment requirements, so a [TableView] can be placed over any
 * byte region, e.g. a memory map of a file. Pool and index entries are decoded on
 * access rather than reinterpreted as `u64`/`u16` slices.
 */

use crate::{Error, MphTable, Result, Table};
use std::io::{Read, Write};

fn len32(len: usize, what: &'static str) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::TooLarge { what, len })
}

/** Stream `table` into `sink`. Each entry is written with separate calls, so an
 * unbuffered sink such as a `File` should be wrapped in a `BufWriter`. */
pub(crate) fn write<T: MphTable + ?Sized, W: Write>(table: &T, mut sink: W) -> Result<()> {
    let (r, b) = (table.seed_count(), table.bucket_count());
    let mut head = Vec::with_capacity(12 + 8 * r + 2 * b);
    head.extend_from_slice(&len32(r, "seed pool")?.to_le_bytes());
    for i in 0..r {
        head.extend_from_slice(&table.seed(i).to_le_bytes());
    }
    head.extend_from_slice(&len32(b, "bucket index")?.to_le_bytes());
    for i in 0..b {
        head.extend_from_slice(&table.bucket_pointer(i).to_le_bytes());
    }
    head.extend_from_slice(&len32(table.len(), "entry count")?.to_le_bytes());
    sink.write_all(&head)?;

    for (k, v) in table.iter() {
        let mut lens = [0u8; 8];
        lens[..4].copy_from_slice(&len32(k.len(), "key")?.to_le_bytes());
        lens[4..].copy_from_slice(&len32(v.len(), "value")?.to_le_bytes());
        sink.write_all(&lens)?;
        sink.write_all(k)?;
        sink.write_all(v)?;
    }
    sink.flush()?;
    Ok(())
}

/** Bounds-checked reader over the serialized region */
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::corrupt(
                self.pos,
                format!(
                    "{} needs {} bytes, {} remain",
                    what,
                    len,
                    self.remaining()
                ),
            ));
        }
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn u32(&mut self, what: &str) -> Result<usize> {
        let mut b = [0u8; 4];
        b.copy_from_slice(self.take(4, what)?);
        Ok(u32::from_le_bytes(b) as usize)
    }

    /** `count` fixed-width items, length checked without overflow */
    fn array(&mut self, count: usize, width: usize, what: &str) -> Result<&'a [u8]> {
        match count.checked_mul(width) {
            Some(len) => self.take(len, what),
            None => Err(Error::corrupt(
                self.pos,
                format!("{} of {} entries overflows", what, count),
            )),
        }
    }
}

fn le_u64(b: &[u8]) -> u64 {
    let mut a = [0u8; 8];
    a.copy_from_slice(&b[..8]);
    u64::from_le_bytes(a)
}

fn le_u16(b: &[u8]) -> u16 {
    u16::from_le_bytes([b[0], b[1]])
}

/* ---------------------------------------------------------------------------- */

/** A table aliased over serialized bytes, without copying the seed pool, the bucket
 * index, or any key or value. The borrow keeps the region alive and unmodified for
 * as long as the view exists. Only the per-entry slice table is allocated. */
#[derive(Clone, Debug)]
pub struct TableView<'a> {
    seeds: &'a [u8],
    indices: &'a [u8],
    entries: Vec<(&'a [u8], &'a [u8])>,
}

impl<'a> TableView<'a> {
    /** View the table occupying all of `bytes` */
    pub fn alias(bytes: &'a [u8]) -> Result<TableView<'a>> {
        let (view, used) = TableView::alias_prefix(bytes)?;
        if used != bytes.len() {
            return Err(Error::corrupt(
                used,
                format!("{} trailing bytes after the last entry", bytes.len() - used),
            ));
        }
        Ok(view)
    }

    /** View the table at the start of `bytes`, which may continue with unrelated
     * data; also returns the number of bytes the table occupies. */
    pub fn alias_prefix(bytes: &'a [u8]) -> Result<(TableView<'a>, usize)> {
        let mut c = Cursor { bytes, pos: 0 };

        let r = c.u32("seed pool length")?;
        if r == 0 {
            return Err(Error::corrupt(0, "seed pool lacks the global seed"));
        }
        let seeds = c.array(r, 8, "seed pool")?;

        let b = c.u32("bucket index length")?;
        let indices = c.array(b, 2, "bucket index")?;

        let n_pos = c.pos;
        let n = c.u32("entry count")?;
        if n > 0 && b == 0 {
            return Err(Error::corrupt(n_pos, "entries without a bucket index"));
        }
        /* Each entry takes at least its two length fields */
        if n > c.remaining() / 8 {
            return Err(Error::corrupt(
                n_pos,
                format!("{} entries cannot fit in {} bytes", n, c.remaining()),
            ));
        }

        let mut entries = Vec::with_capacity(n);
        for _ in 0..n {
            let klen = c.u32("key length")?;
            let vlen = c.u32("value length")?;
            let key = c.take(klen, "key")?;
            let value = c.take(vlen, "value")?;
            entries.push((key, value));
        }

        Ok((
            TableView {
                seeds,
                indices,
                entries,
            },
            c.pos,
        ))
    }

    /** Copy into an owned [Table] */
    pub fn to_table(&self) -> Table {
        Table::from_parts(
            (0..self.seed_count()).map(|i| self.seed(i)).collect(),
            (0..self.bucket_count())
                .map(|i| self.bucket_pointer(i))
                .collect(),
            self.entries
                .iter()
                .map(|(k, v)| (k.to_vec(), v.to_vec()))
                .collect(),
        )
    }
}

impl MphTable for TableView<'_> {
    fn seed_count(&self) -> usize {
        self.seeds.len() / 8
    }
    fn seed(&self, i: usize) -> u64 {
        le_u64(&self.seeds[8 * i..])
    }
    fn bucket_count(&self) -> usize {
        self.indices.len() / 2
    }
    fn bucket_pointer(&self, i: usize) -> u16 {
        le_u16(&self.indices[2 * i..])
    }
    fn len(&self) -> usize {
        self.entries.len()
    }
    fn entry(&self, slot: usize) -> (&[u8], &[u8]) {
        self.entries[slot]
    }
}

impl<'v, 'a> IntoIterator for &'v TableView<'a> {
    type Item = (&'v [u8], &'v [u8]);
    type IntoIter = crate::Entries<'v, TableView<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Table {
    /** Read a whole serialized table from `source` into memory */
    pub fn read<R: Read>(mut source: R) -> Result<Table> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        Ok(TableView::alias(&bytes)?.to_table())
    }
}

/* ---------------------------------------------------------------------------- */

#[cfg(test)]
fn serialize<T: MphTable>(table: &T) -> Vec<u8> {
    let mut out = Vec::new();
    table.write_to(&mut out).unwrap();
    out
}

#[cfg(test)]
fn sample_table(n: usize, seed: u64) -> (Vec<(Vec<u8>, Vec<u8>)>, Table) {
    let data = crate::util::make_dataset(n, 12, seed);
    let mut b = crate::Builder::new();
    for (k, v) in data.iter() {
        b.add(k.clone(), v.clone()).unwrap();
    }
    (data, b.build().unwrap())
}

#[test]
fn test_layout() {
    let t = Table::from_parts(
        vec![0x0102_0304_0506_0708, 9],
        vec![1, crate::builder::UNASSIGNED],
        vec![(b"ab".to_vec(), b"c".to_vec()), (b"d".to_vec(), Vec::new())],
    );
    let expected: Vec<u8> = [
        &[2, 0, 0, 0][..],
        &[8, 7, 6, 5, 4, 3, 2, 1][..],
        &[9, 0, 0, 0, 0, 0, 0, 0][..],
        &[2, 0, 0, 0][..],
        &[1, 0, 0xff, 0xff][..],
        &[2, 0, 0, 0][..],
        &[2, 0, 0, 0, 1, 0, 0, 0][..],
        &b"abc"[..],
        &[1, 0, 0, 0, 0, 0, 0, 0][..],
        &b"d"[..],
    ]
    .concat();
    assert_eq!(serialize(&t), expected);

    let view = TableView::alias(&expected).unwrap();
    assert_eq!(view.seed(0), 0x0102_0304_0506_0708);
    assert_eq!(view.bucket_pointer(1), u16::MAX);
    assert_eq!(view.entry(0), (&b"ab"[..], &b"c"[..]));
    assert_eq!(view.to_table(), t);
}

#[test]
fn test_empty_layout() {
    let t = crate::Builder::new().build().unwrap();
    let bytes = serialize(&t);
    assert_eq!(bytes.len(), 4 + 8 + 4 + 2 + 4);
    assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
    let view = TableView::alias(&bytes).unwrap();
    assert_eq!(view.len(), 0);
    assert_eq!(view.iter().count(), 0);
    assert_eq!(view.get(b"anything"), None);
    assert_eq!(Table::read(&bytes[..]).unwrap(), t);
}

#[test]
fn test_read_round_trip() {
    let (data, t) = sample_table(3000, 17);
    let bytes = serialize(&t);
    let back = Table::read(&bytes[..]).unwrap();
    assert_eq!(back, t);
    crate::check_table(&back, &data);
    assert_eq!(serialize(&back), bytes);
}

#[test]
fn test_alias_round_trip() {
    let (data, t) = sample_table(3000, 18);
    let bytes = serialize(&t);
    let view = TableView::alias(&bytes).unwrap();
    crate::check_table(&view, &data);

    /* Keys and values point into the region */
    let range = bytes.as_ptr_range();
    for (k, v) in view.iter() {
        assert!(range.contains(&k.as_ptr()) || k.is_empty());
        assert!(range.contains(&v.as_ptr()) || v.is_empty());
    }
    assert_eq!(serialize(&view), bytes);
}

#[test]
fn test_alias_unaligned() {
    let (data, t) = sample_table(200, 19);
    let mut bytes = vec![0u8];
    t.write_to(&mut bytes).unwrap();
    crate::check_table(&TableView::alias(&bytes[1..]).unwrap(), &data);
}

#[test]
fn test_truncated() {
    let (_, t) = sample_table(500, 20);
    let bytes = serialize(&t);
    for cut in [10, 1] {
        let short = &bytes[..bytes.len() - cut];
        assert!(matches!(
            Table::read(short),
            Err(Error::CorruptFormat { .. })
        ));
        assert!(matches!(
            TableView::alias(short),
            Err(Error::CorruptFormat { .. })
        ));
    }
}

#[test]
fn test_every_truncation() {
    let (_, t) = sample_table(20, 21);
    let bytes = serialize(&t);
    for len in 0..bytes.len() {
        match TableView::alias(&bytes[..len]) {
            Err(Error::CorruptFormat { offset, .. }) => assert!(offset <= len),
            other => panic!("prefix of {} bytes gave {:?}", len, other.map(|v| v.len())),
        }
    }
}

#[test]
fn test_corrupt_lengths() {
    let (_, t) = sample_table(10, 22);
    let bytes = serialize(&t);
    let r = t.seed_count();
    let b = t.bucket_count();
    let n_at = 4 + 8 * r + 4 + 2 * b;

    let patched = |at: usize, value: u32| {
        let mut c = bytes.clone();
        c[at..at + 4].copy_from_slice(&value.to_le_bytes());
        c
    };
    for bad in [
        patched(0, 0),
        patched(0, u32::MAX),
        patched(4 + 8 * r, u32::MAX),
        patched(n_at, u32::MAX),
        patched(n_at, 11),
        patched(n_at + 4, u32::MAX),
        patched(n_at + 8, u32::MAX),
    ] {
        assert!(
            matches!(TableView::alias(&bad), Err(Error::CorruptFormat { .. })),
            "accepted corrupt input"
        );
    }

    /* Entries require a bucket index */
    let no_buckets = [
        &[1, 0, 0, 0][..],
        &[0; 8][..],
        &[0; 4][..],
        &[1, 0, 0, 0][..],
        &[0; 8][..],
    ]
    .concat();
    assert!(matches!(
        TableView::alias(&no_buckets),
        Err(Error::CorruptFormat { .. })
    ));
}

#[test]
fn test_trailing_bytes() {
    let (data, t) = sample_table(50, 23);
    let mut bytes = serialize(&t);
    let len = bytes.len();
    bytes.extend_from_slice(b"more data");
    assert!(matches!(
        TableView::alias(&bytes),
        Err(Error::CorruptFormat { offset, .. }) if offset == len
    ));
    let (view, used) = TableView::alias_prefix(&bytes).unwrap();
    assert_eq!(used, len);
    crate::check_table(&view, &data);
}

#[test]
fn test_verify_detects_tampering() {
    let (data, t) = sample_table(1000, 24);
    assert!(t.seed_count() >= 2);
    let mut bytes = serialize(&t);
    /* Flip the low bit of the first displacement */
    bytes[4 + 8] ^= 1;
    let view = TableView::alias(&bytes).unwrap();
    assert!(matches!(view.verify(), Err(Error::Misplaced { .. })));

    let mut moved = 0;
    for (k, v) in data.iter() {
        match view.get(k) {
            Some(found) => assert_eq!(found, &v[..]),
            None => moved += 1,
        }
    }
    assert!(moved > 0);
}
