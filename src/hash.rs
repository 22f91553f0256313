/* SPDX-License-Identifier: MPL-2.0 */
/*! The seeded byte hash underlying bucket selection, slot placement and the
 * displacement candidate sequence.
 *
 * Tables store only the seed; a table written on one machine must resolve keys
 * identically on every other one, so this must never depend on the process, the
 * platform's endianness or pointer width. XXH3 is specified on bytes and meets this. */

use xxhash_rust::xxh3::xxh3_64_with_seed;

/** Digest of `key` under `seed`. Distinct seeds give effectively independent
 * digests for the same key. */
#[inline]
pub fn hash(seed: u64, key: &[u8]) -> u64 {
    xxh3_64_with_seed(key, seed)
}

/** Bucket for a key digest, with `buckets` > 0 */
#[inline(always)]
pub fn bucket(h: u64, buckets: usize) -> usize {
    (h % buckets as u64) as usize
}

/** Final position for a key digest displaced by `d`, with `n` > 0 */
#[inline(always)]
pub fn slot(h: u64, d: u64, n: usize) -> usize {
    ((h ^ d) % n as u64) as usize
}

/** The `j`th displacement candidate of the sequence keyed by `key`. */
#[inline]
pub fn candidate(key: u64, j: u64) -> u64 {
    hash(key, &j.to_le_bytes())
}

#[test]
fn test_hash_deterministic() {
    let keys: [&[u8]; 4] = [b"", b"a", b"alpha", &[0xff; 300]];
    for k in keys {
        assert_eq!(hash(7, k), hash(7, k));
        assert_eq!(hash(7, k), xxh3_64_with_seed(k, 7));
    }
}

#[test]
fn test_hash_seed_sensitivity() {
    /* Over many seeds, a fixed key should essentially never repeat a digest, and
     * roughly half the output bits should flip between consecutive seeds. */
    let key = b"some key";
    let mut seen = std::collections::BTreeSet::new();
    let mut flipped = 0u64;
    let mut prev = hash(0, key);
    for s in 1..4096u64 {
        let h = hash(s, key);
        assert!(seen.insert(h), "repeated digest for seed {}", s);
        flipped += (h ^ prev).count_ones() as u64;
        prev = h;
    }
    let mean = flipped as f64 / 4095.0;
    assert!((28.0..36.0).contains(&mean), "mean bit flips {}", mean);
}

#[test]
fn test_slot_range() {
    for n in [1usize, 2, 3, 7, 1000, 1 << 20] {
        for d in [0, 1, u64::MAX, 0x5555_5555_5555_5555] {
            assert!(slot(hash(1, b"k"), d, n) < n);
        }
        assert!(bucket(hash(2, b"k"), n) < n);
    }
    assert_eq!(slot(0b1010, 0b0110, 1 << 10), 0b1100);
}
