use crate::keys::Letter;

pub mod sorted_keyed_mapping;

/// Edge set out of a trie node: at most one child per letter.
pub trait NodeMapping<N> {
    fn add_child(&mut self, key: Letter, node: N);
    fn seek_child(&self, key: Letter) -> Option<&N>;
    fn delete_child(&mut self, key: Letter) -> Option<N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize;
}
