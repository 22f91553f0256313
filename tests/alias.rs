/* SPDX-License-Identifier: MPL-2.0 */
/*! Large tables aliased over written buffers and memory-mapped files. */

use chdmap::{util, BuildConfig, Builder, Error, MphTable, Table, TableView};
use std::io::{BufWriter, Write};

fn build(data: &[(Vec<u8>, Vec<u8>)], config: &BuildConfig) -> Table {
    let mut b = Builder::with_capacity(data.len());
    for (k, v) in data {
        b.add(k.clone(), v.clone()).unwrap();
    }
    b.build_with(config).unwrap()
}

fn check_members<T: MphTable>(t: &T, data: &[(Vec<u8>, Vec<u8>)]) {
    assert_eq!(t.len(), data.len());
    for (k, v) in data {
        assert_eq!(t.get(k), Some(&v[..]));
    }
}

#[test]
fn alias_100k_random_keys() {
    let data = util::make_dataset(100_000, 16, 0xabc);
    let t = build(&data, &BuildConfig::default());
    let mut bytes = Vec::new();
    t.write_to(&mut bytes).unwrap();
    drop(t);

    let view = TableView::alias(&bytes).unwrap();
    check_members(&view, &data);

    /* Nothing was copied out of the buffer */
    let region = bytes.as_ptr_range();
    for (k, v) in view.iter() {
        assert!(region.contains(&k.as_ptr()));
        assert!(region.contains(&v.as_ptr()));
    }

    for probe in util::make_random_keys(10_000, 15, 0xdef) {
        assert_eq!(view.get(&probe), None);
    }
    view.verify().unwrap();
}

#[test]
fn alias_memory_mapped_file() {
    let data = util::make_dataset(20_000, 24, 77);
    let t = build(&data, &BuildConfig::default());

    let mut file = tempfile::tempfile().unwrap();
    {
        let mut w = BufWriter::new(&mut file);
        t.write_to(&mut w).unwrap();
        w.flush().unwrap();
    }
    let map = unsafe { memmap2::Mmap::map(&file).unwrap() };
    let view = TableView::alias(&map).unwrap();
    check_members(&view, &data);
    assert_eq!(view.to_table(), t);

    let read_back = Table::read(std::io::Cursor::new(&map[..])).unwrap();
    assert_eq!(read_back, t);
}

#[test]
fn truncated_read_fails() {
    let data = util::make_dataset(1000, 16, 5);
    let t = build(&data, &BuildConfig::default());
    let mut bytes = Vec::new();
    t.write_to(&mut bytes).unwrap();
    bytes.truncate(bytes.len() - 10);
    assert!(matches!(
        Table::read(&bytes[..]),
        Err(Error::CorruptFormat { .. })
    ));
}

#[test]
fn rebuild_is_byte_identical() {
    let data = util::make_dataset(30_000, 10, 11);
    let config = BuildConfig::default().seed(99);
    let mut a = Vec::new();
    build(&data, &config).write_to(&mut a).unwrap();
    let mut reversed = data.clone();
    reversed.reverse();
    let mut b = Vec::new();
    build(&reversed, &config).write_to(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn tuned_configurations() {
    let data = util::make_dataset(5000, 8, 12);
    for config in [
        BuildConfig::default().keys_per_bucket(1),
        BuildConfig::default().keys_per_bucket(3),
        BuildConfig::default().keys_per_bucket(4).max_attempts(200),
    ] {
        let t = build(&data, &config);
        check_members(&t, &data);
        t.verify().unwrap();
        assert_eq!(t.bucket_count(), config.bucket_count(data.len()).unwrap());
    }
}
