/* SPDX-License-Identifier: MPL-2.0 */
/* Benchmarks for table construction, serialization and queries.
 *
 * Each size class runs a setup phase (build, write, alias) and two query phases:
 * `chainq` follows a key->value chain so every lookup depends on the previous one,
 * and `parq` issues independent lookups. Results are printed as one JSON object per
 * benchmark.
 */

use chdmap::*;
use clap::{Arg, ArgAction};

struct BenchConfig<'a> {
    name: &'a str,
    min_time_sec: f64,
    key_len: usize,
    sz: usize,
    config: BuildConfig,
}

struct TableCycleResults {
    average_time_per_build: f64,
    average_time_per_write: f64,
    average_time_per_alias: f64,
    average_time_per_chainq: f64,
    average_time_per_parq: f64,
    seeds: usize,
    bytes: usize,
}

struct ParameterInfo {
    samples: u64,
    min: f64,
    median: f64,
    max: f64,
}

impl ParameterInfo {
    fn from_iter<I: Iterator<Item = f64>>(x: I) -> ParameterInfo {
        let mut v: Vec<f64> = x.collect();
        v.sort_by(f64::total_cmp);
        let median = (v[v.len() / 2] + v[v.len() - 1 - v.len() / 2]) / 2.0;
        ParameterInfo {
            samples: v.len() as u64,
            min: v[0],
            median,
            max: v[v.len() - 1],
        }
    }
    fn to_string(&self) -> String {
        format!(
            "{{ \"samples\": {}, \"min\": {}, \"median\": {}, \"max\": {} }}",
            self.samples, self.min, self.median, self.max
        )
    }
}

fn run_table_cycle(iterations: u64, cfg: &BenchConfig, seed: u64) -> TableCycleResults {
    let data = std::hint::black_box(util::make_random_chain(
        cfg.sz,
        cfg.key_len,
        seed,
        seed + 1,
    ));

    let start_time = std::time::Instant::now();
    let mut table = None;
    for _ in 0..iterations {
        let mut b = Builder::with_capacity(data.len());
        for (k, v) in data.iter() {
            b.add(k.clone(), v.clone()).unwrap();
        }
        table = Some(std::hint::black_box(b.build_with(&cfg.config).unwrap()));
    }
    let table = table.unwrap();
    let build_time = std::time::Instant::now();

    let mut bytes = Vec::new();
    for _ in 0..iterations {
        bytes.clear();
        table.write_to(&mut bytes).unwrap();
    }
    let write_time = std::time::Instant::now();

    for _ in 0..iterations {
        std::hint::black_box(TableView::alias(&bytes).unwrap());
    }
    let alias_time = std::time::Instant::now();

    /* Load the view into cache before the query phases */
    let view = TableView::alias(&bytes).unwrap();
    util::parallel_query(&view, &data);
    let warmup_time = std::time::Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(util::chain_query(&view, cfg.sz as u64, &data[0].0));
    }
    let chain_query_time = std::time::Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(util::parallel_query(&view, &data));
    }
    let parallel_query_time = std::time::Instant::now();

    let per = |a: std::time::Instant, b: std::time::Instant| {
        b.duration_since(a).as_secs_f64() / (iterations as f64)
    };
    TableCycleResults {
        average_time_per_build: per(start_time, build_time),
        average_time_per_write: per(build_time, write_time),
        average_time_per_alias: per(write_time, alias_time),
        average_time_per_chainq: per(warmup_time, chain_query_time),
        average_time_per_parq: per(chain_query_time, parallel_query_time),
        seeds: table.seed_count(),
        bytes: bytes.len(),
    }
}

fn run_bench(cfg: &BenchConfig) {
    /* Warm up code and allocator on a small instance first */
    run_table_cycle(
        1,
        &BenchConfig {
            sz: 64,
            config: cfg.config.clone(),
            ..*cfg
        },
        0x1,
    );

    let mut seed = 0x1234;
    let seed_start = std::time::Instant::now();
    let first = run_table_cycle(1, cfg, seed);
    let seed_elapsed = seed_start.elapsed().as_secs_f64();

    let iterations = ((cfg.min_time_sec / (10.0 * seed_elapsed)).ceil() as u64).max(1);
    let (seeds, bytes) = (first.seeds, first.bytes);
    let mut measurements = vec![first];
    /* Slow sizes are repeated a couple of times, fast ones ten times */
    let repeats = if iterations == 1 { 2 } else { 10 };
    for _ in 0..repeats {
        seed += 2;
        measurements.push(run_table_cycle(iterations, cfg, seed));
    }

    let fields: [(&str, fn(&TableCycleResults) -> f64); 5] = [
        ("build", |x| x.average_time_per_build),
        ("write", |x| x.average_time_per_write),
        ("alias", |x| x.average_time_per_alias),
        ("chainq", |x| x.average_time_per_chainq),
        ("parq", |x| x.average_time_per_parq),
    ];
    let mut message = format!(
        "{{\"bench\": \"{}\", \"n_elements\": {}, \"key_len\": {}, \"seeds\": {}, \"bytes\": {}, \"measurements\": {{",
        cfg.name, cfg.sz, cfg.key_len, seeds, bytes
    );
    for (i, (name, f)) in fields.iter().enumerate() {
        let info = ParameterInfo::from_iter(measurements.iter().map(f));
        if i > 0 {
            message += ", ";
        }
        message += &format!("\"{}\": {}", name, info.to_string());
    }
    message += "} }";
    println!("{}", message);
}

fn main() {
    let cmd = clap::Command::new("bench-all")
        .about("Benchmarks for CHD table construction and lookup")
        .arg(
            Arg::new("bench")
                .long("bench")
                .action(ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("keys-per-bucket")
                .long("keys-per-bucket")
                .value_parser(clap::value_parser!(u32))
                .default_value("2"),
        )
        .arg(Arg::new("filters").action(ArgAction::Append));

    let matches = cmd.get_matches();
    let keys_per_bucket = *matches.get_one::<u32>("keys-per-bucket").unwrap();

    let mut names = Vec::new();
    for key_len in [8, 32] {
        for sz_bits in [10, 14, 17, 20] {
            names.push((format!("chd_{}_{}", key_len, sz_bits), key_len, sz_bits));
        }
    }

    if matches.get_flag("list") {
        for (name, _, _) in names.iter() {
            println!("{}: benchmark", name);
        }
        return;
    }

    let filters: Vec<&String> = matches
        .get_many::<String>("filters")
        .map(|x| x.collect())
        .unwrap_or_default();
    for (name, key_len, sz_bits) in names.iter() {
        if !filters.is_empty() && !filters.iter().any(|f| name.contains(f.as_str())) {
            continue;
        }
        run_bench(&BenchConfig {
            name,
            min_time_sec: 0.1,
            key_len: *key_len,
            sz: 1 << sz_bits,
            config: BuildConfig::default().keys_per_bucket(keys_per_bucket),
        });
    }
}
