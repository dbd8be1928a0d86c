pub mod letter;
pub mod trie_key;

pub use letter::{Letter, ALPHABET_SIZE};
pub use trie_key::TrieKey;
