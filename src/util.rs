/* SPDX-License-Identifier: MPL-2.0 */
/*! Data generation and query loops for tests and benchmarks. */

use crate::MphTable;
use rand::{seq::SliceRandom, RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::collections::BTreeSet;

/** `n` distinct uniformly random keys of `key_len` bytes, in random order */
pub fn make_random_keys(n: usize, key_len: usize, seed: u64) -> Vec<Vec<u8>> {
    /* Rejection sampling is only fast while the key space is much larger than n */
    assert!(
        key_len >= 8 || (n as u128) <= (1u128 << (8 * key_len)) / 2,
        "{} keys of {} bytes",
        n,
        key_len
    );
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let mut s = BTreeSet::new();
    while s.len() < n {
        let mut k = vec![0u8; key_len];
        rng.fill_bytes(&mut k);
        s.insert(k);
    }
    let mut v: Vec<Vec<u8>> = s.into_iter().collect();
    v.shuffle(&mut rng);
    v
}

/** `n` random keys, each mapped to its position in the returned list, as decimal */
pub fn make_dataset(n: usize, key_len: usize, seed: u64) -> Vec<(Vec<u8>, Vec<u8>)> {
    make_random_keys(n, key_len, seed)
        .into_iter()
        .enumerate()
        .map(|(i, k)| (k, i.to_string().into_bytes()))
        .collect()
}

/** Return a (k,v) sequence with the property that, following the k->v=k->v=k->v ...
 * chain from any key will eventually cycle back to it after `n` steps. */
pub fn make_random_chain(
    n: usize,
    key_len: usize,
    seed_vals: u64,
    seed_order: u64,
) -> Vec<(Vec<u8>, Vec<u8>)> {
    let mut rng_order = ChaCha12Rng::seed_from_u64(seed_order);
    let keys = make_random_keys(n, key_len, seed_vals);
    let mut chain: Vec<(Vec<u8>, Vec<u8>)> = keys
        .iter()
        .zip(keys.iter().cycle().skip(1))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    chain.shuffle(&mut rng_order);
    chain
}

/** Measure the non-amortized latency of the table, by chasing the pointer chain formed
 * by following the key->value=key->value=key->... sequence from a
 * [make_random_chain] input. Each query depends on the previous one. */
pub fn chain_query<T: MphTable + ?Sized>(t: &T, steps: u64, start: &[u8]) -> usize {
    let mut k = start;
    let mut total = 0;
    for _ in 0..steps {
        k = t.get(k).unwrap();
        total += k.len();
    }
    total
}

/** A simple approximate throughput test: independent queries for every key in
 * `data`, checking each value. */
pub fn parallel_query<T: MphTable + ?Sized>(t: &T, data: &[(Vec<u8>, Vec<u8>)]) -> u64 {
    let mut x = 0;
    for (k, v) in data {
        let found = t.get(k).unwrap();
        assert!(found == &v[..]);
        x += found.len() as u64;
    }
    x
}

#[test]
fn test_random_keys() {
    let keys = make_random_keys(1000, 3, 5);
    assert_eq!(keys.len(), 1000);
    assert_eq!(BTreeSet::from_iter(keys.iter()).len(), 1000);
    assert!(keys.iter().all(|k| k.len() == 3));
    assert_eq!(keys, make_random_keys(1000, 3, 5));
    assert_ne!(keys, make_random_keys(1000, 3, 6));
    assert!(make_random_keys(0, 0, 1).is_empty());
}

#[test]
fn test_random_chain() {
    let chain = make_random_chain(300, 8, 1, 2);
    let mut b = crate::Builder::new();
    for (k, v) in chain.iter() {
        b.add(k.clone(), v.clone()).unwrap();
    }
    let t = b.build().unwrap();
    let start = &chain[0].0;
    /* A full cycle visits every key once */
    assert_eq!(chain_query(&t, 300, start), 300 * 8);
    let mut k: &[u8] = start;
    for _ in 0..300 {
        k = t.get(k).unwrap();
    }
    assert_eq!(k, &start[..]);
    assert_eq!(parallel_query(&t, &chain), 300 * 8);
}
