use crate::keys::{Letter, ALPHABET_SIZE};
use crate::mapping::NodeMapping;

/// Maps a letter to a child, using a vector of (letter, child) pairs kept sorted by letter.
/// Lookups are a binary search; inserts and deletes shift the entries after the position.
/// With at most 26 entries the shifting is cheap, and iteration order is alphabetical for free,
/// which is what gives the trie its lexicographic enumeration order.
pub struct SortedKeyedMapping<N> {
    entries: Vec<(Letter, N)>,
}

impl<N> Default for SortedKeyedMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> SortedKeyedMapping<N> {
    #[inline]
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    #[inline]
    fn position(&self, key: Letter) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&key, |(k, _)| *k)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Letter, &N)> + ExactSizeIterator {
        self.entries.iter().map(|(k, n)| (*k, n))
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &N> {
        self.entries.iter().map(|(_, n)| n)
    }
}

impl<N> NodeMapping<N> for SortedKeyedMapping<N> {
    fn add_child(&mut self, key: Letter, node: N) {
        match self.position(key) {
            Ok(_) => panic!("child {key} already present"),
            Err(idx) => self.entries.insert(idx, (key, node)),
        }
    }

    fn seek_child(&self, key: Letter) -> Option<&N> {
        let idx = self.position(key).ok()?;
        Some(&self.entries[idx].1)
    }

    fn delete_child(&mut self, key: Letter) -> Option<N> {
        let idx = self.position(key).ok()?;
        Some(self.entries.remove(idx).1)
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.entries.len()
    }

    fn width(&self) -> usize {
        ALPHABET_SIZE
    }
}

#[cfg(test)]
mod tests {
    use crate::keys::Letter;
    use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
    use crate::mapping::NodeMapping;

    fn l(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    #[test]
    fn test_add_seek_delete() {
        let mut m = SortedKeyedMapping::new();
        for (i, c) in "zdma".chars().enumerate() {
            m.add_child(l(c), i);
        }
        assert_eq!(m.num_children(), 4);
        assert_eq!(m.width(), 26);
        assert_eq!(m.seek_child(l('z')), Some(&0));
        assert_eq!(m.seek_child(l('a')), Some(&3));
        assert_eq!(m.seek_child(l('b')), None);

        let order: String = m.iter().map(|(k, _)| k.as_char()).collect();
        assert_eq!(order, "admz");

        assert_eq!(m.delete_child(l('m')), Some(2));
        assert_eq!(m.delete_child(l('m')), None);
        assert_eq!(m.num_children(), 3);
        let rev: Vec<usize> = m.values().rev().copied().collect();
        assert_eq!(rev, vec![0, 1, 3]);
    }

    #[test]
    #[should_panic]
    fn test_duplicate_add_panics() {
        let mut m = SortedKeyedMapping::new();
        m.add_child(l('c'), 1);
        m.add_child(l('c'), 2);
    }
}
