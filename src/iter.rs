use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::store::NodeStore;
use crate::utils::bitset::CharMask;

struct Frame {
    id: NodeId,
    // Length of the key buffer before this node's letter is appended.
    base_len: usize,
    // Query letters not yet seen on the path down to and including this node.
    pending: CharMask,
    push_letter: bool,
}

/// Depth-first walk over the stored keys below a starting node, yielding `(key, value)` in
/// ascending lexicographic order.
///
/// Carries a set of pending letters: a subtree is only entered when its reachability mask covers
/// every pending letter, and a key is only yielded once all of them have been seen on its path.
/// With an empty pending set this is plain enumeration.
pub struct Iter<'a, V> {
    store: &'a NodeStore<V>,
    stack: Vec<Frame>,
    cur_key: String,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn empty(store: &'a NodeStore<V>) -> Self {
        Self {
            store,
            stack: vec![],
            cur_key: String::new(),
        }
    }

    /// Start at `start`, whose full key is `prefix`.
    pub(crate) fn new(
        store: &'a NodeStore<V>,
        start: NodeId,
        prefix: String,
        pending: CharMask,
    ) -> Self {
        let stack = vec![Frame {
            id: start,
            base_len: prefix.len(),
            pending,
            push_letter: false,
        }];
        Self {
            store,
            stack,
            cur_key: prefix,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        loop {
            let frame = self.stack.pop()?;
            let Some(node) = store.get(frame.id) else {
                continue;
            };

            self.cur_key.truncate(frame.base_len);
            if frame.push_letter {
                if let Some(l) = node.character {
                    self.cur_key.push(l.as_char());
                }
            }

            // Reverse so the smallest letter is popped first.
            let base_len = self.cur_key.len();
            for (letter, child) in node.children.iter().rev() {
                let Some(child_node) = store.get(*child) else {
                    continue;
                };
                if !((child_node.mask ^ frame.pending) & frame.pending).is_empty() {
                    continue;
                }
                self.stack.push(Frame {
                    id: *child,
                    base_len,
                    pending: frame.pending.difference(&letter.bit()),
                    push_letter: true,
                });
            }

            if frame.pending.is_empty() {
                if let Some(v) = node.value.as_ref() {
                    return Some((self.cur_key.clone(), v));
                }
            }
        }
    }
}

impl<V> FusedIterator for Iter<'_, V> {}
