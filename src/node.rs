use crate::keys::Letter;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::mapping::NodeMapping;
use crate::store::NodeStore;
use crate::utils::arena::ArenaIndex;
use crate::utils::bitset::CharMask;

/// Handle to a node inside a [`crate::Trie`]. Handles stay valid until the node is pruned by a
/// removal; after that they no longer resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) ArenaIndex);

pub(crate) struct Node<V> {
    /// Letter on the edge leading here. `None` only for the root.
    pub(crate) character: Option<Letter>,
    /// Present iff a stored key ends exactly at this node.
    pub(crate) value: Option<V>,
    /// Own letter bit OR the masks of all children.
    pub(crate) mask: CharMask,
    pub(crate) children: SortedKeyedMapping<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new_root() -> Self {
        Self {
            character: None,
            value: None,
            mask: CharMask::new(),
            children: SortedKeyedMapping::new(),
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn new_inner(parent: NodeId, character: Letter, mask: CharMask) -> Self {
        Self {
            character: Some(character),
            value: None,
            mask,
            children: SortedKeyedMapping::new(),
            parent: Some(parent),
        }
    }

    /// The bit contributed by this node's own letter (empty for the root).
    #[inline]
    pub(crate) fn own_mask(&self) -> CharMask {
        self.character.map(Letter::bit).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.num_children() == 0
    }

    #[inline]
    pub(crate) fn seek_child(&self, key: Letter) -> Option<NodeId> {
        self.children.seek_child(key).copied()
    }
}

/// Borrowed, read-only view of a node.
pub struct NodeRef<'a, V> {
    store: &'a NodeStore<V>,
    id: NodeId,
    node: &'a Node<V>,
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<'a, V> NodeRef<'a, V> {
    pub(crate) fn new(store: &'a NodeStore<V>, id: NodeId) -> Option<Self> {
        let node = store.get(id)?;
        Some(Self { store, id, node })
    }

    /// For handles the trie knows to be live.
    pub(crate) fn at(store: &'a NodeStore<V>, id: NodeId) -> Self {
        Self {
            store,
            id,
            node: &store[id],
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The letter on the edge into this node; `None` for the root.
    pub fn character(&self) -> Option<char> {
        self.node.character.map(Letter::as_char)
    }

    pub fn mask(&self) -> CharMask {
        self.node.mask
    }

    pub fn is_terminal(&self) -> bool {
        self.node.is_terminal()
    }

    /// The metadata attached to the key ending here, if this node is terminal.
    pub fn value(&self) -> Option<&'a V> {
        self.node.value.as_ref()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        NodeRef::new(self.store, self.node.parent?)
    }

    pub fn child(&self, c: char) -> Option<NodeRef<'a, V>> {
        let id = self.node.seek_child(Letter::new(c)?)?;
        NodeRef::new(self.store, id)
    }

    /// Children in ascending letter order.
    pub fn children(&self) -> impl Iterator<Item = (char, NodeRef<'a, V>)> + 'a {
        let store = self.store;
        let node = self.node;
        node.children
            .iter()
            .filter_map(move |(l, id)| Some((l.as_char(), NodeRef::new(store, *id)?)))
    }

    pub fn num_children(&self) -> usize {
        self.node.children.num_children()
    }

    /// Distance from the root; the root is at depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self.node.parent;
        while let Some(p) = cur {
            depth += 1;
            cur = self.store.get(p).and_then(|n| n.parent);
        }
        depth
    }

    /// The key spelled by the path from the root to this node.
    pub fn key(&self) -> String {
        let mut letters = vec![];
        let mut cur = Some(self.node);
        while let Some(n) = cur {
            if let Some(l) = n.character {
                letters.push(l.as_char());
            }
            cur = n.parent.and_then(|p| self.store.get(p));
        }
        letters.iter().rev().collect()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("character", &self.character())
            .field("mask", &self.node.mask)
            .field("value", &self.node.value)
            .field("num_children", &self.num_children())
            .finish()
    }
}
