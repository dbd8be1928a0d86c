use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, BitXor};

use num_traits::PrimInt;

/// A set of small integer positions packed into a single primitive integer word.
/// The width of the set is the bit width of `StorageType`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitset<StorageType>
where
    StorageType: PrimInt,
{
    bits: StorageType,
}

/// The reachability mask carried by every trie node: one bit per letter of the alphabet.
pub type CharMask = Bitset<u64>;

impl<StorageType> Bitset<StorageType>
where
    StorageType: PrimInt,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            bits: StorageType::zero(),
        }
    }

    #[inline]
    fn from_raw(bits: StorageType) -> Self {
        Self { bits }
    }

    /// A set containing only `pos`.
    #[inline]
    pub fn single(pos: usize) -> Self {
        let mut b = Self::new();
        b.set(pos);
        b
    }

    #[inline]
    pub fn bit_width(&self) -> usize {
        StorageType::zero().count_zeros() as usize
    }

    #[inline]
    pub fn set(&mut self, pos: usize) {
        assert!(pos < self.bit_width());
        self.bits = self.bits | (StorageType::one() << pos);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Positions in `self` that are not in `other`.
    #[inline]
    pub fn difference(&self, other: &Self) -> Self {
        Self::from_raw(self.bits & !other.bits)
    }

    /// Set positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let mut remaining = self.bits;
        std::iter::from_fn(move || {
            if remaining.is_zero() {
                return None;
            }
            let pos = remaining.trailing_zeros() as usize;
            remaining = remaining & (remaining - StorageType::one());
            Some(pos)
        })
    }
}

impl<StorageType> Default for Bitset<StorageType>
where
    StorageType: PrimInt,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<StorageType> fmt::Debug for Bitset<StorageType>
where
    StorageType: PrimInt,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<StorageType: PrimInt> BitOr for Bitset<StorageType> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_raw(self.bits | rhs.bits)
    }
}

impl<StorageType: PrimInt> BitOrAssign for Bitset<StorageType> {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}

impl<StorageType: PrimInt> BitAnd for Bitset<StorageType> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_raw(self.bits & rhs.bits)
    }
}

impl<StorageType: PrimInt> BitXor for Bitset<StorageType> {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Self::from_raw(self.bits ^ rhs.bits)
    }
}

impl<StorageType: PrimInt> FromIterator<usize> for Bitset<StorageType> {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut b = Self::new();
        for pos in iter {
            b.set(pos);
        }
        b
    }
}
