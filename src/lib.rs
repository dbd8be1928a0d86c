//! A character trie over `'a'..='z'` keeping a 64-bit alphabet reachability mask on every node.
//!
//! Besides insertion, exact lookup, removal and prefix enumeration, the masks make a cheap
//! character-set search possible: [`Trie::fuzzy_search`] finds every key containing all the
//! letters of a query, skipping any subtree whose mask shows a letter is missing.
//!
//! ```
//! use bitmask_trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.add("act", 1).unwrap();
//! trie.add("cat", 2).unwrap();
//! trie.add("dog", 3).unwrap();
//!
//! assert_eq!(trie.get("cat"), Some(&2));
//! assert_eq!(trie.prefix_search("ca"), vec!["cat"]);
//! assert_eq!(trie.fuzzy_search("tac"), vec!["act", "cat"]);
//! ```

pub mod config;
pub mod error;
pub mod iter;
pub mod keys;
pub mod mapping;
mod node;
pub mod stats;
mod store;
pub mod tree;
pub mod utils;

#[cfg(test)]
mod proptests;

pub use config::TrieConfig;
pub use error::TrieError;
pub use node::{NodeId, NodeRef};
pub use tree::Trie;
