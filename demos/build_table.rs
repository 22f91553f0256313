/* SPDX-License-Identifier: MPL-2.0 */
/*! Demo program: build a table from tab-separated `key<TAB>value` lines, write it
 * to a file, then memory-map the file and query it.
 *
 * cargo run --example build_table -- input.tsv output.chd [query ...]
 *
 * Set RUST_LOG=chdmap=debug to see abandoned seed attempts. */

use chdmap::{BuildConfig, Builder, MphTable, TableView};
use clap::{Arg, ArgAction};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> chdmap::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chdmap=info")),
        )
        .init();

    let matches = clap::Command::new("build_table")
        .about("Build a minimal perfect hash table from key<TAB>value lines")
        .arg(Arg::new("input").required(true))
        .arg(Arg::new("output").required(true))
        .arg(
            Arg::new("keys-per-bucket")
                .long("keys-per-bucket")
                .value_parser(clap::value_parser!(u32))
                .default_value("2"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(Arg::new("query").action(ArgAction::Append))
        .get_matches();

    let input = matches.get_one::<String>("input").unwrap();
    let output = matches.get_one::<String>("output").unwrap();
    let mut config = BuildConfig::default()
        .keys_per_bucket(*matches.get_one::<u32>("keys-per-bucket").unwrap());
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config = config.seed(*seed);
    }

    let t0 = Instant::now();
    let mut builder = Builder::new();
    for line in BufReader::new(std::fs::File::open(input)?).lines() {
        let line = line?;
        let (key, value) = line.split_once('\t').unwrap_or((line.as_str(), ""));
        builder.add(key, value)?;
    }
    let table = builder.build_with(&config)?;
    let t1 = Instant::now();

    let file = std::fs::File::create(output)?;
    let mut w = BufWriter::new(file);
    table.write_to(&mut w)?;
    w.flush()?;
    drop(table);
    let t2 = Instant::now();

    let file = std::fs::File::open(output)?;
    let map = unsafe { memmap2::Mmap::map(&file)? };
    let view = TableView::alias(&map)?;
    view.verify()?;
    let t3 = Instant::now();

    println!(
        "entries: {}; buckets: {}; seeds: {}; file size: {} bytes",
        view.len(),
        view.bucket_count(),
        view.seed_count(),
        map.len()
    );
    println!(
        "build time: {} secs; write time: {} secs; map+verify time: {} secs",
        t1.duration_since(t0).as_secs_f64(),
        t2.duration_since(t1).as_secs_f64(),
        t3.duration_since(t2).as_secs_f64()
    );

    for q in matches.get_many::<String>("query").into_iter().flatten() {
        match view.get(q.as_bytes()) {
            Some(v) => println!("{}\t{}", q, String::from_utf8_lossy(v)),
            None => println!("{}\t<not found>", q),
        }
    }
    Ok(())
}
