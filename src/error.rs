use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    /// The key holds a character outside `'a'..='z'`. `position` counts characters, not bytes.
    #[error("invalid character {character:?} at position {position} in key {key:?}: only 'a'..='z' are supported")]
    InvalidKey {
        key: String,
        character: char,
        position: usize,
    },
    #[error("could not find key {key:?} in trie")]
    NotFound { key: String },
}

impl TrieError {
    pub(crate) fn not_found(key: &str) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }
}
