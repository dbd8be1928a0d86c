use tracing::{debug, warn};

use crate::config::TrieConfig;
use crate::error::TrieError;
use crate::iter::Iter;
use crate::keys::{Letter, TrieKey};
use crate::mapping::NodeMapping;
use crate::node::{NodeId, NodeRef};
use crate::store::NodeStore;

/// A prefix tree over the letters `'a'..='z'`, with a value attached to every stored key.
///
/// Every node carries a reachability mask: the set of letters on its own edge and anywhere
/// below it. Insertion keeps the masks exact on the way down; removal prunes dead branches and
/// repairs the masks on the way back up. Fuzzy search uses the masks to skip subtrees that
/// cannot contain a match.
pub struct Trie<V> {
    pub(crate) store: NodeStore<V>,
    pub(crate) root: NodeId,
    size: usize,
    config: TrieConfig,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        let mut store = NodeStore::with_capacity(config.initial_capacity);
        let root = store.new_root();
        Self {
            store,
            root,
            size: 0,
            config,
        }
    }

    pub fn config(&self) -> TrieConfig {
        self.config
    }

    pub fn root(&self) -> NodeRef<'_, V> {
        NodeRef::at(&self.store, self.root)
    }

    /// Resolve a handle returned by [`Trie::add`]. `None` once the node has been pruned.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, V>> {
        NodeRef::new(&self.store, id)
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of live nodes, root included.
    pub fn num_nodes(&self) -> usize {
        self.store.num_nodes()
    }

    /// Store `key` with `value`, returning a handle to the node the key ends at.
    /// Re-adding a stored key replaces its value and leaves the key count unchanged.
    pub fn add(&mut self, key: &str, value: V) -> Result<NodeId, TrieError> {
        let key = TrieKey::parse(key)?;
        Ok(self.insert_key(&key, value).0)
    }

    /// Like [`Trie::add`], but returns the value previously stored under `key`.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, TrieError> {
        let key = TrieKey::parse(key)?;
        Ok(self.insert_key(&key, value).1)
    }

    pub fn insert_key(&mut self, key: &TrieKey, value: V) -> (NodeId, Option<V>) {
        let suffix_masks = key.suffix_masks();

        let mut cur = self.root;
        if let Some(m) = suffix_masks.first() {
            self.store[cur].mask |= *m;
        }
        for (depth, letter) in key.as_slice().iter().enumerate() {
            let mask = suffix_masks[depth];
            cur = match self.store[cur].seek_child(*letter) {
                Some(child) => {
                    self.store[child].mask |= mask;
                    child
                }
                None => self.store.new_child(cur, *letter, mask),
            };
        }

        let old = self.store[cur].value.replace(value);
        if old.is_none() {
            self.size += 1;
        }
        debug!(key = %key, replaced = old.is_some(), size = self.size, "inserted key");
        (cur, old)
    }

    /// Node at the end of the path spelled by `path`, terminal or not.
    fn node_at_path(&self, path: &str) -> Option<NodeId> {
        let mut cur = self.root;
        for c in path.chars() {
            cur = self.store[cur].seek_child(Letter::new(c)?)?;
        }
        Some(cur)
    }

    fn locate(&self, key: &str) -> Option<NodeId> {
        self.node_at_path(key)
            .filter(|id| self.store[*id].is_terminal())
    }

    /// Find the node a stored key ends at. Fails with `NotFound` when the key is absent, including
    /// when it is only a prefix of stored keys.
    pub fn find(&self, key: &str) -> Result<NodeRef<'_, V>, TrieError> {
        let id = self.locate(key).ok_or_else(|| TrieError::not_found(key))?;
        Ok(NodeRef::at(&self.store, id))
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let id = self.locate(key)?;
        self.store[id].value.as_ref()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let id = self.locate(key)?;
        self.store[id].value.as_mut()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Remove `key`, returning its value. Nodes left without a key beneath them are pruned and
    /// the masks of every remaining ancestor are recomputed.
    pub fn remove(&mut self, key: &str) -> Result<V, TrieError> {
        let id = self.locate(key).ok_or_else(|| TrieError::not_found(key))?;
        let value = self.store[id]
            .value
            .take()
            .ok_or_else(|| TrieError::not_found(key))?;
        self.size -= 1;

        let freed = self.prune_from(id);
        debug!(key, freed, size = self.size, "removed key");
        Ok(value)
    }

    // Detach the longest chain of nodes ending at `id` that no longer leads to any key. Stops
    // below the root, a terminal node, or a node that still has another child.
    fn prune_from(&mut self, id: NodeId) -> usize {
        if id == self.root || !self.store[id].is_leaf() || self.store[id].is_terminal() {
            return 0;
        }

        let mut top = id;
        loop {
            let Some(parent) = self.store[top].parent else {
                return 0;
            };
            let p = &self.store[parent];
            if parent == self.root || p.is_terminal() || p.children.num_children() > 1 {
                let Some(letter) = self.store[top].character else {
                    return 0;
                };
                return self.store.remove_child(parent, letter);
            }
            top = parent;
        }
    }

    /// Every stored key, in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.prefix_search("")
    }

    /// Every stored key starting with `prefix`, in ascending order. Empty when no key does,
    /// including when `prefix` holds characters outside the alphabet.
    pub fn prefix_search(&self, prefix: &str) -> Vec<String> {
        self.prefix_iter(prefix).map(|(k, _)| k).collect()
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.prefix_iter("")
    }

    pub fn prefix_iter(&self, prefix: &str) -> Iter<'_, V> {
        match self.node_at_path(prefix) {
            Some(start) => Iter::new(&self.store, start, prefix.to_string(), Default::default()),
            None => Iter::empty(&self.store),
        }
    }

    /// Every stored key whose set of distinct letters contains every distinct letter of `query`,
    /// regardless of order or repetition. `"tac"` matches both `"act"` and `"cat"`; `"aa"`
    /// matches anything containing an `a`. An empty query matches every key.
    pub fn fuzzy_search(&self, query: &str) -> Vec<String> {
        self.fuzzy_iter(query).map(|(k, _)| k).collect()
    }

    pub fn fuzzy_iter(&self, query: &str) -> Iter<'_, V> {
        match TrieKey::parse(query) {
            Ok(q) => Iter::new(&self.store, self.root, String::new(), q.mask()),
            Err(_) => Iter::empty(&self.store),
        }
    }

    /// Drop every key, keeping only a fresh root.
    pub fn clear(&mut self) {
        self.store.clear();
        self.root = self.store.new_root();
        self.size = 0;
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Keys outside the alphabet are skipped with a warning.
impl<K: AsRef<str>, V> Extend<(K, V)> for Trie<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            if let Err(e) = self.insert(k.as_ref(), v) {
                warn!(error = %e, "skipping key");
            }
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

#[cfg(test)]
impl<V> Trie<V> {
    /// Walk the whole structure and assert every structural invariant.
    pub(crate) fn check_invariants(&self) {
        let root = &self.store[self.root];
        assert!(root.character.is_none(), "root has a letter");
        assert!(root.parent.is_none(), "root has a parent");

        let mut reachable = 0;
        let mut terminals = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = &self.store[id];
            if node.is_terminal() {
                terminals += 1;
            }
            if id != self.root {
                assert!(
                    node.is_terminal() || !node.is_leaf(),
                    "dead non-terminal leaf {id:?} left behind"
                );
            }

            let mut expected = node.own_mask();
            for (letter, child) in node.children.iter() {
                let c = &self.store[*child];
                assert_eq!(c.parent, Some(id), "broken parent link");
                assert_eq!(c.character, Some(letter), "edge letter mismatch");
                expected |= c.mask;
                stack.push(*child);
            }
            assert_eq!(node.mask, expected, "mask invariant broken at {id:?}");
            assert!(node.children.num_children() <= node.children.width());
        }

        assert_eq!(terminals, self.size, "size does not match terminal count");
        assert_eq!(reachable, self.store.num_nodes(), "unreachable nodes leaked");
    }
}
