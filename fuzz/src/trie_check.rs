#![no_main]

use std::collections::{BTreeMap, BTreeSet};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bitmask_trie::Trie;

#[derive(Arbitrary, Debug)]
enum TrieMethod {
    Add { key: Vec<u8>, val: u16 },
    Find { key: Vec<u8> },
    Remove { key: Vec<u8> },
    Prefix { prefix: Vec<u8> },
    Fuzzy { query: Vec<u8> },
}

// Fold arbitrary bytes onto a few letters so keys collide. Bytes >= 0xf0 become 'A', which
// must be rejected.
fn to_key(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(12)
        .map(|b| if *b >= 0xf0 { 'A' } else { (b'a' + b % 5) as char })
        .collect()
}

fuzz_target!(|methods: Vec<TrieMethod>| {
    let mut trie = Trie::<u16>::new();
    let mut bt_map = BTreeMap::<String, u16>::new();

    for m in methods {
        match m {
            TrieMethod::Add { key, val } => {
                let key = to_key(&key);
                let valid = key.chars().all(|c| c.is_ascii_lowercase());
                let t = trie.insert(&key, val);
                if valid {
                    assert_eq!(t, Ok(bt_map.insert(key, val)));
                } else {
                    assert!(t.is_err());
                }
            }
            TrieMethod::Find { key } => {
                let key = to_key(&key);
                let t = trie.find(&key).ok().and_then(|n| n.value().copied());
                assert_eq!(t, bt_map.get(&key).copied());
            }
            TrieMethod::Remove { key } => {
                let key = to_key(&key);
                assert_eq!(trie.remove(&key).ok(), bt_map.remove(&key));
            }
            TrieMethod::Prefix { prefix } => {
                let prefix = to_key(&prefix);
                let expected: Vec<String> = bt_map
                    .keys()
                    .filter(|k| k.starts_with(&prefix))
                    .cloned()
                    .collect();
                assert_eq!(trie.prefix_search(&prefix), expected);
            }
            TrieMethod::Fuzzy { query } => {
                let query = to_key(&query);
                let expected: Vec<String> = if query.chars().all(|c| c.is_ascii_lowercase()) {
                    let wanted: BTreeSet<char> = query.chars().collect();
                    bt_map
                        .keys()
                        .filter(|k| k.chars().collect::<BTreeSet<_>>().is_superset(&wanted))
                        .cloned()
                        .collect()
                } else {
                    vec![]
                };
                assert_eq!(trie.fuzzy_search(&query), expected);
            }
        }
        assert_eq!(trie.len(), bt_map.len());
    }

    let keys: Vec<String> = bt_map.keys().cloned().collect();
    assert_eq!(trie.keys(), keys);
    for k in keys {
        trie.remove(&k).unwrap();
    }
    assert_eq!(trie.num_nodes(), 1);
    assert!(trie.root().mask().is_empty());
});
