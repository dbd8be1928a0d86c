use std::fmt;

use crate::utils::bitset::CharMask;

/// Number of letters in the supported alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// A single lowercase ASCII letter, stored as its offset from `'a'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    #[inline]
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Some(Self(c as u8 - b'a'))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn as_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// The reachability bit for this letter: bit `c - 'a'`.
    #[inline]
    pub fn bit(self) -> CharMask {
        CharMask::single(self.0 as usize)
    }
}

impl TryFrom<char> for Letter {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Letter::new(c).ok_or(c)
    }
}

impl From<Letter> for char {
    fn from(l: Letter) -> Self {
        l.as_char()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
