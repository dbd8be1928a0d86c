use std::fmt;
use std::str::FromStr;

use crate::error::TrieError;
use crate::keys::letter::Letter;
use crate::utils::bitset::CharMask;

/// An owned, validated key: every character is a [`Letter`].
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrieKey {
    letters: Box<[Letter]>,
}

impl TrieKey {
    /// Validate `key`, failing on the first character outside the alphabet.
    pub fn parse(key: &str) -> Result<Self, TrieError> {
        let mut letters = Vec::with_capacity(key.len());
        for (position, c) in key.chars().enumerate() {
            let Some(l) = Letter::new(c) else {
                return Err(TrieError::InvalidKey {
                    key: key.to_string(),
                    character: c,
                    position,
                });
            };
            letters.push(l);
        }
        Ok(Self {
            letters: letters.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn as_slice(&self) -> &[Letter] {
        &self.letters
    }

    /// Union of the bits of every letter in the key.
    pub fn mask(&self) -> CharMask {
        self.letters
            .iter()
            .fold(CharMask::new(), |m, l| m | l.bit())
    }

    /// `suffix_masks()[i]` is the mask of `self[i..]`. Computed right to left in one pass.
    pub fn suffix_masks(&self) -> Vec<CharMask> {
        let mut masks = vec![CharMask::new(); self.letters.len()];
        let mut acc = CharMask::new();
        for (i, l) in self.letters.iter().enumerate().rev() {
            acc |= l.bit();
            masks[i] = acc;
        }
        masks
    }
}

impl FromStr for TrieKey {
    type Err = TrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrieKey::parse(s)
    }
}

impl TryFrom<&str> for TrieKey {
    type Error = TrieError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        TrieKey::parse(s)
    }
}

impl fmt::Display for TrieKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for l in self.letters.iter() {
            write!(f, "{l}")?;
        }
        Ok(())
    }
}
