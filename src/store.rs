use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::keys::Letter;
use crate::mapping::NodeMapping;
use crate::node::{Node, NodeId};
use crate::utils::arena::Arena;
use crate::utils::bitset::CharMask;

/// Owns every node of a trie. Children hold owning handles, parents hold plain back handles, so
/// there is no reference cycle to manage.
pub(crate) struct NodeStore<V> {
    nodes: Arena<Node<V>>,
}

impl<V> NodeStore<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
        }
    }

    pub(crate) fn new_root(&mut self) -> NodeId {
        NodeId(self.nodes.add(|_| Node::new_root()))
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(id.0)
    }

    pub(crate) fn num_nodes(&self) -> usize {
        self.nodes.size()
    }

    /// Create a node under `parent` on edge `character`, with the given initial mask.
    /// Ancestor masks are left alone.
    pub(crate) fn new_child(
        &mut self,
        parent: NodeId,
        character: Letter,
        mask: CharMask,
    ) -> NodeId {
        let child = NodeId(self.nodes.add(|_| Node::new_inner(parent, character, mask)));
        self[parent].children.add_child(character, child);
        trace!(?parent, ?child, %character, "created node");
        child
    }

    /// Detach the child of `parent` on edge `character` and free its whole subtree, then repair
    /// the masks from `parent` up to the root. Returns the number of nodes freed.
    pub(crate) fn remove_child(&mut self, parent: NodeId, character: Letter) -> usize {
        let Some(child) = self[parent].children.delete_child(character) else {
            return 0;
        };

        let mut freed = 0;
        let mut stack = vec![child];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.free(id.0) {
                stack.extend(node.children.values().copied());
                freed += 1;
            }
        }
        trace!(?parent, %character, freed, "pruned subtree");

        self.recompute_masks_from(parent);
        freed
    }

    /// Recompute the mask of `id` from its own letter and its current children.
    pub(crate) fn recompute_mask(&mut self, id: NodeId) -> CharMask {
        let node = &self[id];
        let mask = node
            .children
            .values()
            .fold(node.own_mask(), |m, c| m | self[*c].mask);
        self[id].mask = mask;
        mask
    }

    /// Recompute masks on `start` and every ancestor up to the root.
    pub(crate) fn recompute_masks_from(&mut self, start: NodeId) {
        let mut cur = Some(start);
        while let Some(id) = cur {
            self.recompute_mask(id);
            cur = self[id].parent;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<V> Index<NodeId> for NodeStore<V> {
    type Output = Node<V>;

    #[inline]
    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}

impl<V> IndexMut<NodeId> for NodeStore<V> {
    #[inline]
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        &mut self.nodes[index.0]
    }
}
