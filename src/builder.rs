/* SPDX-License-Identifier: MPL-2.0 */
/*! Construction of CHD tables.
 *
 * Keys are hashed once per attempt under a global seed `r0`, grouped into buckets by
 * `h mod B`, and the buckets are placed largest first. Each bucket walks the same
 * deterministic sequence of displacement candidates and takes the first one that
 * sends all its keys to free, distinct slots `(h ^ d) mod n`. Accepted displacements
 * are interned into a small seed pool, so that the per-bucket pointer stays 16 bits
 * wide. A bucket that cannot be placed abandons the whole attempt; a new `r0` is
 * drawn and planning starts over.
 */

use crate::hash::{self, hash};
use crate::{Error, Result, Table};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::collections::hash_map::{Entry, HashMap};
use std::time::Instant;
use tracing::{debug, info, warn};

/** Pool pointer for a bucket that received no keys. Readers treat any pointer
 * `>=` the pool length as unassigned; the builder always writes this one. */
pub const UNASSIGNED: u16 = u16::MAX;

/** Largest seed pool addressable without colliding with [UNASSIGNED] */
pub const MAX_SEEDS: usize = UNASSIGNED as usize;

const EMPTY: u32 = u32::MAX;

/** Tuning for [Builder::build_with]. */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    /** Mean number of keys per bucket. Larger values shrink the bucket index
     * (2 bytes per bucket) but make each bucket harder to place; since every slot
     * gets filled, values above 4 usually need a larger `max_bucket_trials`.
     * When `n` is a power of two, a bucket of k keys holds an inseparable pair with
     * probability about k^2 / 2n, so most attempts restart at larger values and
     * `max_attempts` has to grow as well. */
    pub keys_per_bucket: u32,
    /** Displacement candidates tried per bucket before the attempt is abandoned.
     * `None` scales with the key count: max(4096, 16 n). The last buckets placed
     * see a nearly full table, so a fixed small cap fails on large inputs. */
    pub max_bucket_trials: Option<u64>,
    /** Number of global seeds tried before giving up */
    pub max_attempts: u32,
    /** Seed for the generator that draws global seeds; equal inputs and equal
     * configurations produce byte-identical tables. */
    pub seed: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            keys_per_bucket: 2,
            max_bucket_trials: None,
            max_attempts: 64,
            seed: 0x243f_6a88_85a3_08d3,
        }
    }
}

impl BuildConfig {
    pub fn keys_per_bucket(mut self, keys_per_bucket: u32) -> Self {
        self.keys_per_bucket = keys_per_bucket;
        self
    }
    pub fn max_bucket_trials(mut self, trials: u64) -> Self {
        self.max_bucket_trials = Some(trials);
        self
    }
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.keys_per_bucket == 0 {
            return Err(Error::InvalidConfig("keys_per_bucket must be positive"));
        }
        if self.max_bucket_trials == Some(0) {
            return Err(Error::InvalidConfig("max_bucket_trials must be positive"));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be positive"));
        }
        Ok(())
    }

    /** Per-bucket candidate budget for a table of `n` keys */
    pub fn bucket_trials(&self, n: usize) -> u64 {
        self.max_bucket_trials
            .unwrap_or_else(|| (n as u64).saturating_mul(16).max(4096))
    }

    /** Number of buckets for a table of `n` keys: about `n / keys_per_bucket`,
     * raised until it shares no factor with `n`. A common factor would make
     * `h mod B` partly determine `h mod n`, so keys in the same bucket would start
     * out much more likely to collide. */
    pub fn bucket_count(&self, n: usize) -> Result<usize> {
        let mut b = n.div_ceil(self.keys_per_bucket.max(1) as usize).max(1);
        while gcd(b, n) != 1 {
            b += 1;
        }
        if b > u32::MAX as usize {
            return Err(Error::TooLarge {
                what: "bucket count",
                len: b,
            });
        }
        Ok(b)
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/* ---------------------------------------------------------------------------- */

/** Why a single attempt (one global seed) was abandoned */
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
enum Restart {
    #[error("bucket {bucket} holds two keys no displacement can separate")]
    Inseparable { bucket: u32 },
    #[error("bucket {bucket} with {size} keys found no free slots in {trials} trials")]
    TrialsExhausted { bucket: u32, size: usize, trials: u64 },
    #[error("seed pool exceeded {limit} entries")]
    SeedPoolFull { limit: usize },
}

/** A bucket, as a range of [Plan::members] */
#[derive(Debug, PartialEq, Eq)]
struct PlannedBucket {
    id: u32,
    start: usize,
    len: usize,
}

/** Buckets in solving order */
#[derive(Debug)]
struct Plan {
    /** Key indices grouped by bucket, groups in the order of `buckets` */
    members: Vec<u32>,
    buckets: Vec<PlannedBucket>,
    bucket_count: usize,
}

impl Plan {
    fn members(&self, b: &PlannedBucket) -> &[u32] {
        &self.members[b.start..b.start + b.len]
    }
}

/** True if `(a ^ d) mod n == (b ^ d) mod n` for every displacement `d`. For a power
 * of two `n`, XOR commutes with the reduction, so only the low bits matter. */
fn inseparable(a: u64, b: u64, n: usize) -> bool {
    a == b || (n.is_power_of_two() && (a ^ b) & (n as u64 - 1) == 0)
}

/** Group keys (given by their digests) into `bucket_count` buckets, and order the
 * non-empty buckets by descending size, then ascending id. */
fn plan_buckets(hashes: &[u64], bucket_count: usize) -> std::result::Result<Plan, Restart> {
    let n = hashes.len();
    let mut counts = vec![0usize; bucket_count];
    for h in hashes {
        counts[hash::bucket(*h, bucket_count)] += 1;
    }

    let mut order: Vec<u32> = (0..bucket_count as u32)
        .filter(|b| counts[*b as usize] > 0)
        .collect();
    order.sort_unstable_by(|x, y| {
        counts[*y as usize]
            .cmp(&counts[*x as usize])
            .then(x.cmp(y))
    });

    let mut fill = vec![0usize; bucket_count];
    let mut buckets = Vec::with_capacity(order.len());
    let mut pos = 0;
    for id in order {
        let len = counts[id as usize];
        fill[id as usize] = pos;
        buckets.push(PlannedBucket { id, start: pos, len });
        pos += len;
    }
    let mut members = vec![0u32; n];
    for (k, h) in hashes.iter().enumerate() {
        let b = hash::bucket(*h, bucket_count);
        members[fill[b]] = k as u32;
        fill[b] += 1;
    }

    let plan = Plan {
        members,
        buckets,
        bucket_count,
    };
    for b in plan.buckets.iter().take_while(|b| b.len > 1) {
        let keys = plan.members(b);
        for (i, x) in keys.iter().enumerate() {
            if keys[..i]
                .iter()
                .any(|y| inseparable(hashes[*x as usize], hashes[*y as usize], n))
            {
                return Err(Restart::Inseparable { bucket: b.id });
            }
        }
    }
    Ok(plan)
}

/** Can all keys of a bucket be displaced by `d` into distinct free slots? */
fn fits(bucket_hashes: &[u64], d: u64, occupant: &[u32]) -> bool {
    let n = occupant.len();
    for (i, h) in bucket_hashes.iter().enumerate() {
        let s = hash::slot(*h, d, n);
        if occupant[s] != EMPTY
            || bucket_hashes[..i]
                .iter()
                .any(|p| hash::slot(*p, d, n) == s)
        {
            return false;
        }
    }
    true
}

/** Finds the first candidate in `1..=trials` under which a bucket fits */
type Search =
    fn(bucket_hashes: &[u64], occupant: &[u32], candidate_key: u64, trials: u64) -> Option<u64>;

#[cfg(not(feature = "parallel"))]
const SEARCH: Search = search_sequential;
#[cfg(feature = "parallel")]
const SEARCH: Search = search_parallel;

fn search_sequential(
    bucket_hashes: &[u64],
    occupant: &[u32],
    candidate_key: u64,
    trials: u64,
) -> Option<u64> {
    (1..=trials)
        .map(|j| hash::candidate(candidate_key, j))
        .find(|d| fits(bucket_hashes, *d, occupant))
}

/** Same result as [search_sequential]. Most buckets succeed within a few
 * trials, so only longer searches are split into chunks for the thread pool;
 * `position_first` keeps the canonical order. */
#[cfg(feature = "parallel")]
fn search_parallel(
    bucket_hashes: &[u64],
    occupant: &[u32],
    candidate_key: u64,
    trials: u64,
) -> Option<u64> {
    use rayon::prelude::*;
    const SEQUENTIAL: u64 = 64;
    const CHUNK: u64 = 4096;

    let head = trials.min(SEQUENTIAL);
    if let Some(d) = search_sequential(bucket_hashes, occupant, candidate_key, head) {
        return Some(d);
    }
    let mut lo = head + 1;
    while lo <= trials {
        let hi = trials.min(lo.saturating_add(CHUNK - 1));
        let width = (hi - lo + 1) as usize;
        let found = (0..width).into_par_iter().position_first(|i| {
            fits(
                bucket_hashes,
                hash::candidate(candidate_key, lo + i as u64),
                occupant,
            )
        });
        if let Some(i) = found {
            return Some(hash::candidate(candidate_key, lo + i as u64));
        }
        if hi == u64::MAX {
            break;
        }
        lo = hi + 1;
    }
    None
}

/** Bounds on a single attempt */
#[derive(Clone, Copy)]
struct Limits {
    /** Candidates tried per bucket */
    trials: u64,
    /** Seed pool capacity, including the global seed */
    max_seeds: usize,
    search: Search,
}

impl Limits {
    fn new(trials: u64) -> Limits {
        Limits {
            trials,
            max_seeds: MAX_SEEDS,
            search: SEARCH,
        }
    }
}

/** Outcome of a successful attempt */
struct Solution {
    seeds: Vec<u64>,
    indices: Vec<u16>,
    /** Key index stored at each slot */
    occupant: Vec<u32>,
}

fn solve(
    hashes: &[u64],
    plan: &Plan,
    r0: u64,
    candidate_key: u64,
    limits: &Limits,
) -> std::result::Result<Solution, Restart> {
    let n = hashes.len();
    let mut occupant = vec![EMPTY; n];
    let mut seeds = vec![r0];
    let mut interned: HashMap<u64, u16> = HashMap::from([(r0, 0)]);
    let mut indices = vec![UNASSIGNED; plan.bucket_count];

    let mut bucket_hashes = Vec::new();
    for b in plan.buckets.iter() {
        let members = plan.members(b);
        bucket_hashes.clear();
        bucket_hashes.extend(members.iter().map(|k| hashes[*k as usize]));

        let Some(d) = (limits.search)(&bucket_hashes, &occupant, candidate_key, limits.trials)
        else {
            return Err(Restart::TrialsExhausted {
                bucket: b.id,
                size: b.len,
                trials: limits.trials,
            });
        };
        let ri = match interned.entry(d) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                if seeds.len() >= limits.max_seeds {
                    return Err(Restart::SeedPoolFull {
                        limit: limits.max_seeds,
                    });
                }
                seeds.push(d);
                *e.insert((seeds.len() - 1) as u16)
            }
        };
        indices[b.id as usize] = ri;
        for (k, h) in members.iter().zip(bucket_hashes.iter()) {
            occupant[hash::slot(*h, d, n)] = *k;
        }
    }

    debug_assert!(occupant.iter().all(|k| *k != EMPTY));
    Ok(Solution {
        seeds,
        indices,
        occupant,
    })
}

impl Solution {
    fn into_table(self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Table {
        let mut slot_of = vec![0usize; entries.len()];
        for (s, k) in self.occupant.iter().enumerate() {
            slot_of[*k as usize] = s;
        }
        let mut table = vec![(Vec::new(), Vec::new()); entries.len()];
        for (k, entry) in entries.into_iter().enumerate() {
            table[slot_of[k]] = entry;
        }
        Table::from_parts(self.seeds, self.indices, table)
    }
}

/* ---------------------------------------------------------------------------- */

/** Accumulates the (key, value) pairs of a table. Duplicate keys are rejected;
 * the value added first is kept. */
#[derive(Default, Debug)]
pub struct Builder {
    entries: HashMap<Vec<u8>, Vec<u8>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn with_capacity(capacity: usize) -> Builder {
        Builder {
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Result<()> {
        let (key, value) = (key.into(), value.into());
        for (what, len) in [("key", key.len()), ("value", value.len())] {
            if len > u32::MAX as usize {
                return Err(Error::TooLarge { what, len });
            }
        }
        /* Keeps key indices clear of the EMPTY marker */
        if self.entries.len() >= u32::MAX as usize {
            return Err(Error::TooLarge {
                what: "entry count",
                len: self.entries.len() + 1,
            });
        }
        match self.entries.entry(key) {
            Entry::Occupied(e) => Err(Error::DuplicateKey {
                key: e.key().clone(),
            }),
            Entry::Vacant(e) => {
                e.insert(value);
                Ok(())
            }
        }
    }

    /** Build with [BuildConfig::default] */
    pub fn build(self) -> Result<Table> {
        self.build_with(&BuildConfig::default())
    }

    pub fn build_with(self, config: &BuildConfig) -> Result<Table> {
        config.validate()?;
        let entries: Vec<(Vec<u8>, Vec<u8>)> = self.entries.into_iter().collect();
        let n = entries.len();
        let bucket_count = config.bucket_count(n)?;
        let limits = Limits::new(config.bucket_trials(n));

        let start = Instant::now();
        let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
        for attempt in 1..=config.max_attempts {
            let r0 = rng.next_u64();
            let candidate_key = rng.next_u64();
            let hashes: Vec<u64> = entries.iter().map(|(k, _)| hash(r0, k)).collect();

            let solved = plan_buckets(&hashes, bucket_count)
                .and_then(|plan| solve(&hashes, &plan, r0, candidate_key, &limits));
            match solved {
                Ok(solution) => {
                    info!(
                        keys = n,
                        buckets = bucket_count,
                        seeds = solution.seeds.len(),
                        attempts = attempt,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "built table"
                    );
                    return Ok(solution.into_table(entries));
                }
                Err(reason) => debug!(attempt, %reason, "abandoning global seed"),
            }
        }

        warn!(
            keys = n,
            attempts = config.max_attempts,
            "table construction failed"
        );
        Err(Error::ConstructionFailure {
            attempts: config.max_attempts,
            keys: n,
        })
    }
}

/* ---------------------------------------------------------------------------- */

#[test]
fn test_bucket_count() {
    let cfg = BuildConfig::default();
    assert_eq!(cfg.bucket_count(0).unwrap(), 1);
    assert_eq!(cfg.bucket_count(1).unwrap(), 1);
    for n in [2usize, 3, 10, 64, 100, 1 << 16, 999_999] {
        let b = cfg.bucket_count(n).unwrap();
        assert!(b >= n.div_ceil(2), "{} {}", n, b);
        assert_eq!(gcd(b, n), 1, "{} {}", n, b);
    }
    /* 1024/2 = 512 shares a factor with 1024 */
    assert_eq!(cfg.bucket_count(1024).unwrap(), 513);
    assert_eq!(cfg.clone().keys_per_bucket(5).bucket_count(101).unwrap(), 21);
}

#[test]
fn test_config_validation() {
    let bad = [
        BuildConfig::default().keys_per_bucket(0),
        BuildConfig::default().max_bucket_trials(0),
        BuildConfig::default().max_attempts(0),
    ];
    for cfg in bad {
        let mut b = Builder::new();
        b.add("k", "v").unwrap();
        assert!(matches!(b.build_with(&cfg), Err(Error::InvalidConfig(_))));
    }
}

#[test]
fn test_plan_order() {
    /* With 5 buckets: ids 3,3,1,1,0 */
    let hashes = [3, 8, 1, 6, 0];
    let plan = plan_buckets(&hashes, 5).unwrap();
    let ids: Vec<u32> = plan.buckets.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3, 0]);
    assert_eq!(plan.members(&plan.buckets[0]), &[2, 3]);
    assert_eq!(plan.members(&plan.buckets[1]), &[0, 1]);
    assert_eq!(plan.members(&plan.buckets[2]), &[4]);

    let plan = plan_buckets(&[], 1).unwrap();
    assert!(plan.buckets.is_empty());
}

#[test]
fn test_plan_inseparable() {
    assert_eq!(
        plan_buckets(&[7, 7, 3], 3).unwrap_err(),
        Restart::Inseparable { bucket: 1 }
    );
    /* n = 4 is a power of two: 1 and 5 agree in the low two bits */
    assert_eq!(
        plan_buckets(&[1, 5, 2, 3], 1).unwrap_err(),
        Restart::Inseparable { bucket: 0 }
    );
    /* n = 3 is not, so XOR can still split 1 and 4 */
    assert!(plan_buckets(&[1, 4, 2], 1).is_ok());
}

#[test]
fn test_solve_bijection() {
    let hashes: Vec<u64> = (0..1000u64).map(|i| hash(99, &i.to_le_bytes())).collect();
    let cfg = BuildConfig::default();
    let b = cfg.bucket_count(hashes.len()).unwrap();
    let plan = plan_buckets(&hashes, b).unwrap();
    let limits = Limits::new(cfg.bucket_trials(hashes.len()));
    let sol = solve(&hashes, &plan, 99, 12345, &limits).unwrap();

    assert!(sol.seeds.len() <= b + 1);
    assert_eq!(sol.seeds[0], 99);
    let mut seen = vec![false; hashes.len()];
    for k in sol.occupant.iter() {
        assert!(!std::mem::replace(&mut seen[*k as usize], true));
    }
    for (i, h) in hashes.iter().enumerate() {
        let ri = sol.indices[hash::bucket(*h, b)] as usize;
        assert!(ri < sol.seeds.len());
        let s = hash::slot(*h, sol.seeds[ri], hashes.len());
        assert_eq!(sol.occupant[s], i as u32);
    }
    /* Empty buckets keep the sentinel */
    for (id, ri) in sol.indices.iter().enumerate() {
        let used = hashes.iter().any(|h| hash::bucket(*h, b) == id);
        assert_eq!(*ri != UNASSIGNED, used);
    }
}

#[test]
fn test_solve_trials_exhausted() {
    /* 60 keys in one bucket, one candidate: essentially never fits */
    let hashes: Vec<u64> = (0..60u64).map(|i| hash(5, &i.to_le_bytes())).collect();
    let plan = plan_buckets(&hashes, 1).unwrap();
    assert!(matches!(
        solve(&hashes, &plan, 5, 6, &Limits::new(1)),
        Err(Restart::TrialsExhausted {
            bucket: 0,
            size: 60,
            trials: 1
        })
    ));
}

#[test]
fn test_solve_seed_pool_full() {
    let hashes: Vec<u64> = (0..300u64).map(|i| hash(17, &i.to_le_bytes())).collect();
    let cfg = BuildConfig::default();
    let b = cfg.bucket_count(hashes.len()).unwrap();
    let plan = plan_buckets(&hashes, b).unwrap();
    let limits = Limits::new(cfg.bucket_trials(hashes.len()));

    let tiny = Limits {
        max_seeds: 2,
        ..limits
    };
    assert!(matches!(
        solve(&hashes, &plan, 17, 3, &tiny),
        Err(Restart::SeedPoolFull { limit: 2 })
    ));

    /* A pool of exactly the size the attempt needs suffices; one less does not */
    let pool = solve(&hashes, &plan, 17, 3, &limits).unwrap().seeds.len();
    assert!(pool > 2 && pool < MAX_SEEDS);
    let exact = Limits {
        max_seeds: pool,
        ..limits
    };
    let sol = solve(&hashes, &plan, 17, 3, &exact).unwrap();
    assert_eq!(sol.seeds.len(), pool);
    assert!(sol
        .indices
        .iter()
        .all(|ri| *ri == UNASSIGNED || (*ri as usize) < pool));
    let short = Limits {
        max_seeds: pool - 1,
        ..limits
    };
    assert!(matches!(
        solve(&hashes, &plan, 17, 3, &short),
        Err(Restart::SeedPoolFull { limit }) if limit == pool - 1
    ));
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_search_matches_sequential() {
    let n = 30_000;
    let hashes: Vec<u64> = (0..n as u64).map(|i| hash(41, &i.to_le_bytes())).collect();
    let cfg = BuildConfig::default();
    let b = cfg.bucket_count(n).unwrap();
    let plan = plan_buckets(&hashes, b).unwrap();
    let seq = Limits {
        search: search_sequential,
        ..Limits::new(cfg.bucket_trials(n))
    };
    let par = Limits {
        search: search_parallel,
        ..seq
    };

    let a = solve(&hashes, &plan, 41, 42, &seq).unwrap();
    let c = solve(&hashes, &plan, 41, 42, &par).unwrap();
    /* Pool entries are distinct candidates, so over 65 of them means some bucket
     * went past the sequential prefix into the chunked search */
    assert!(a.seeds.len() > 65);
    assert_eq!(a.seeds, c.seeds);
    assert_eq!(a.indices, c.indices);
    assert_eq!(a.occupant, c.occupant);

    /* A single free slot: the answer lies deep in the candidate sequence */
    let mut occupant = a.occupant.clone();
    let h = hashes[occupant[0] as usize];
    occupant[0] = EMPTY;
    let trials = cfg.bucket_trials(n);
    let d = search_sequential(&[h], &occupant, 42, trials).unwrap();
    assert_eq!(hash::slot(h, d, n), 0);
    assert_eq!(search_parallel(&[h], &occupant, 42, trials), Some(d));
    assert_eq!(
        search_parallel(&[h], &occupant, 42, 100),
        search_sequential(&[h], &occupant, 42, 100)
    );
}

#[test]
fn test_duplicate_key() {
    let mut b = Builder::new();
    b.add("alpha", "1").unwrap();
    match b.add("alpha", "2") {
        Err(Error::DuplicateKey { key }) => assert_eq!(key, b"alpha"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(b.len(), 1);
    let t = b.build().unwrap();
    assert_eq!(crate::MphTable::get(&t, b"alpha"), Some(&b"1"[..]));
}

#[test]
fn test_construction_failure() {
    /* One trial per bucket and a single attempt cannot place 2000 keys */
    let mut b = Builder::new();
    for i in 0..2000u32 {
        b.add(i.to_le_bytes(), Vec::new()).unwrap();
    }
    let cfg = BuildConfig::default().max_bucket_trials(1).max_attempts(3);
    match b.build_with(&cfg) {
        Err(Error::ConstructionFailure { attempts, keys }) => {
            assert_eq!((attempts, keys), (3, 2000));
        }
        other => panic!("unexpected {:?}", other.map(|t| crate::MphTable::len(&t))),
    }
}

#[test]
fn test_deterministic_build() {
    let build = |order: &mut dyn Iterator<Item = u32>| {
        let mut b = Builder::new();
        for i in order {
            b.add(format!("key{}", i), format!("{}", i)).unwrap();
        }
        b.build().unwrap()
    };
    let a = build(&mut (0..5000));
    let b = build(&mut (0..5000).rev());
    assert_eq!(a, b);
    let c = Builder::new().build_with(&BuildConfig::default().seed(1));
    let d = Builder::new().build_with(&BuildConfig::default().seed(2));
    assert_ne!(c.unwrap(), d.unwrap());
}
