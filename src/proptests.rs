use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use crate::tree::Trie;

#[derive(Clone, Debug)]
enum Op {
    Add(String, u64),
    Remove(String),
    Find(String),
}

// A small alphabet keeps keys colliding and sharing prefixes, which is where pruning and mask
// repair get exercised.
fn key_strategy() -> impl Strategy<Value = String> + Clone {
    "[a-f]{0,8}"
}

fn any_key_strategy() -> impl Strategy<Value = String> + Clone {
    "[a-zA-Z0-9 ]{0,8}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Add(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        20 => key.prop_map(Op::Find),
    ];
    prop::collection::vec(op, 0..=500)
}

fn letter_set(s: &str) -> BTreeSet<char> {
    s.chars().collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: Trie<u64> = Trie::new();
        let mut m: BTreeMap<String, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    let old_t = t.insert(&key, value).unwrap();
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key).ok();
                    let old_m = m.remove(&key);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Find(key) => {
                    let got_t = t.find(&key).ok().and_then(|n| n.value().copied());
                    let got_m = m.get(&key).copied();
                    prop_assert_eq!(got_t, got_m);
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        t.check_invariants();
        let got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_mask_invariant_after_each_step(ops in ops_strategy()) {
        let mut t: Trie<u64> = Trie::new();
        for op in ops {
            match op {
                Op::Add(key, value) => {
                    t.add(&key, value).unwrap();
                }
                Op::Remove(key) => {
                    let _ = t.remove(&key);
                }
                Op::Find(_) => {}
            }
            t.check_invariants();
        }
    }

    #[test]
    fn prop_prefix_search(
        keys in prop::collection::btree_set(key_strategy(), 0..64),
        prefix in "[a-f]{0,3}",
    ) {
        let t: Trie<()> = keys.iter().map(|k| (k.as_str(), ())).collect();
        let expected: Vec<String> = keys
            .iter()
            .filter(|k| k.starts_with(prefix.as_str()))
            .cloned()
            .collect();
        prop_assert_eq!(t.prefix_search(&prefix), expected);
        prop_assert_eq!(t.keys(), keys.iter().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn prop_fuzzy_is_superset_match(
        keys in prop::collection::btree_set(key_strategy(), 0..64),
        query in "[a-g]{0,4}",
    ) {
        let t: Trie<()> = keys.iter().map(|k| (k.as_str(), ())).collect();
        let wanted = letter_set(&query);
        let expected: Vec<String> = keys
            .iter()
            .filter(|k| letter_set(k).is_superset(&wanted))
            .cloned()
            .collect();
        prop_assert_eq!(t.fuzzy_search(&query), expected);
    }

    #[test]
    fn prop_invalid_keys_rejected(key in any_key_strategy()) {
        let mut t: Trie<()> = Trie::new();
        let valid = key.chars().all(|c| c.is_ascii_lowercase());
        prop_assert_eq!(t.add(&key, ()).is_ok(), valid);
        if !valid {
            prop_assert_eq!(t.num_nodes(), 1);
            prop_assert!(t.is_empty());
        }
        t.check_invariants();
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = ["a", "ab", "abc", "b", "ba", "bac"];

    for_each_permutation(&keys, |perm| {
        let mut t: Trie<usize> = Trie::new();
        for (i, k) in keys.iter().enumerate() {
            t.add(k, i).unwrap();
        }

        let mut remaining: BTreeSet<&str> = keys.iter().copied().collect();
        for k in perm {
            assert!(t.remove(k).is_ok());
            remaining.remove(k);
            t.check_invariants();
            assert_eq!(t.keys(), remaining.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        }
        assert!(t.is_empty());
        assert_eq!(t.num_nodes(), 1);
        assert!(t.root().mask().is_empty());
    });
}
