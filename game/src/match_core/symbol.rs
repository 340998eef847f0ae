use std::fmt;

use serde::{Deserialize, Serialize};

pub const ALPHABET_SIZE: usize = 13;

const GLYPHS: [&str; ALPHABET_SIZE] = [
    "☠️", "💀", "🥛", "🤡", "🐶", "☂️", "☔️", "🇵🇷", "🃏", "🚾", "🚬", "⛳️", "🎾",
];

/// One tile face. Stored as an index into the fixed alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Symbol(u8);

impl Symbol {
    pub const ALL: [Symbol; ALPHABET_SIZE] = {
        let mut all = [Symbol(0); ALPHABET_SIZE];
        let mut i = 0;
        while i < ALPHABET_SIZE {
            all[i] = Symbol(i as u8);
            i += 1;
        }
        all
    };

    pub fn new(index: usize) -> Option<Symbol> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Emoji shown to players.
    pub fn glyph(self) -> &'static str {
        GLYPHS[self.index()]
    }

    /// Single-letter debug code: `A` for index 0 up to `M`.
    pub fn code(self) -> char {
        char::from(b'A' + self.0)
    }

    pub fn from_code(code: char) -> Option<Symbol> {
        if !code.is_ascii_uppercase() {
            return None;
        }
        Self::new(usize::from(code as u8 - b'A'))
    }
}

impl TryFrom<u8> for Symbol {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Symbol::new(usize::from(value))
            .ok_or_else(|| format!("symbol index {value} outside alphabet of {ALPHABET_SIZE}"))
    }
}

impl From<Symbol> for u8 {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_letters() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::from_code(symbol.code()), Some(symbol));
        }
        assert_eq!(Symbol::ALL[0].code(), 'A');
        assert_eq!(Symbol::ALL[12].code(), 'M');
        assert_eq!(Symbol::from_code('N'), None);
        assert_eq!(Symbol::from_code('.'), None);
    }

    #[test]
    fn glyphs_are_distinct() {
        let mut glyphs: Vec<_> = Symbol::ALL.iter().map(|s| s.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), ALPHABET_SIZE);
    }

    #[test]
    fn deserialize_rejects_out_of_range_index() {
        assert_eq!(serde_json::from_str::<Symbol>("4").ok(), Symbol::new(4));
        assert!(serde_json::from_str::<Symbol>("13").is_err());
    }
}
