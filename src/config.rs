/// Construction-time settings for a [`crate::Trie`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrieConfig {
    /// Number of node slots reserved up front, root included.
    pub initial_capacity: usize,
}

impl TrieConfig {
    pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        // Always room for the root.
        self.initial_capacity = initial_capacity.max(1);
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self::new()
    }
}
