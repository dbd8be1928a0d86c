//! Structural statistics for a [`Trie`], for judging shape and memory use.

use std::collections::BTreeMap;

use crate::keys::ALPHABET_SIZE;
use crate::mapping::NodeMapping;
use crate::tree::Trie;

pub trait TrieStatsTrait {
    fn get_trie_stats(&self) -> TrieStats;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrieStats {
    /// Live nodes, root included.
    pub num_nodes: usize,
    /// Nodes a stored key ends at.
    pub num_terminals: usize,
    /// Nodes with no children.
    pub num_leaves: usize,
    /// Nodes with at least one child.
    pub num_inner_nodes: usize,
    /// Number of children -> number of nodes with that many children.
    pub fanout: BTreeMap<usize, usize>,
    /// Mean fraction of the 26 possible edges that inner nodes actually use.
    pub total_density: f64,
    /// Length of the longest path from the root.
    pub max_height: usize,
}

impl<V> TrieStatsTrait for Trie<V> {
    fn get_trie_stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.store[id];
            let num_children = node.children.num_children();

            stats.num_nodes += 1;
            stats.max_height = stats.max_height.max(depth);
            if node.is_terminal() {
                stats.num_terminals += 1;
            }
            if num_children == 0 {
                stats.num_leaves += 1;
            } else {
                stats.num_inner_nodes += 1;
                stats.total_density += num_children as f64 / ALPHABET_SIZE as f64;
            }
            *stats.fanout.entry(num_children).or_insert(0) += 1;

            stack.extend(node.children.values().map(|c| (*c, depth + 1)));
        }
        if stats.num_inner_nodes > 0 {
            stats.total_density /= stats.num_inner_nodes as f64;
        }
        stats
    }
}
