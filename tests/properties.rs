/* SPDX-License-Identifier: MPL-2.0 */
/*! Randomized checks of the table invariants. */

use chdmap::{Builder, Error, MphTable, Table, TableView};
use itertools::Itertools;
use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use std::collections::HashMap;

fn entries() -> impl Strategy<Value = HashMap<Vec<u8>, Vec<u8>>> {
    hash_map(vec(any::<u8>(), 0..12), vec(any::<u8>(), 0..8), 0..300)
}

fn build(data: &HashMap<Vec<u8>, Vec<u8>>) -> Table {
    let mut b = Builder::new();
    for (k, v) in data {
        b.add(k.clone(), v.clone()).unwrap();
    }
    b.build().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn slots_form_a_bijection(data in entries()) {
        let t = build(&data);
        prop_assert_eq!(t.len(), data.len());
        let slots: Vec<usize> = data.keys().map(|k| t.locate(k).unwrap()).collect();
        prop_assert!(slots.iter().all_unique());
        prop_assert!(slots.iter().all(|s| *s < data.len()));
        prop_assert!(t.verify().is_ok());
    }

    #[test]
    fn round_trip_preserves_lookups(data in entries(), absent in vec(vec(any::<u8>(), 0..12), 0..50)) {
        let t = build(&data);
        let mut bytes = Vec::new();
        t.write_to(&mut bytes).unwrap();
        let read = Table::read(&bytes[..]).unwrap();
        let view = TableView::alias(&bytes).unwrap();

        for (k, v) in data.iter() {
            prop_assert_eq!(t.get(k), Some(&v[..]));
            prop_assert_eq!(read.get(k), Some(&v[..]));
            prop_assert_eq!(view.get(k), Some(&v[..]));
        }
        for k in absent.iter().filter(|k| !data.contains_key(*k)) {
            prop_assert_eq!(t.get(k), None);
            prop_assert_eq!(view.get(k), None);
        }
    }

    #[test]
    fn iteration_is_complete_in_slot_order(data in entries()) {
        let t = build(&data);
        let items: Vec<(&[u8], &[u8])> = t.iter().collect();
        prop_assert_eq!(items.len(), data.len());
        for (slot, (k, v)) in items.iter().enumerate() {
            prop_assert_eq!(t.locate(k), Some(slot));
            prop_assert_eq!(data.get(*k).map(|x| &x[..]), Some(*v));
        }
        prop_assert!(items.iter().map(|(k, _)| k).all_unique());
    }

    #[test]
    fn truncation_is_detected(data in entries(), cut in 1usize..64) {
        let t = build(&data);
        let mut bytes = Vec::new();
        t.write_to(&mut bytes).unwrap();
        let keep = bytes.len().saturating_sub(cut);
        let is_corrupt = matches!(
            TableView::alias(&bytes[..keep]),
            Err(Error::CorruptFormat { .. })
        );
        prop_assert!(is_corrupt);
    }
}
