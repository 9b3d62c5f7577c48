//! Per-word quoting state.
//!
//! Glob characters are only live where the source was unquoted, so the
//! glom engine tracks, for every word it produces, which of its bytes came
//! from quoted text.

/// Quoting of one expanded word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Quote {
    /// Every byte was quoted.
    Quoted,
    /// No byte was quoted.
    Unquoted,
    /// One marker per byte: `q` for quoted, `r` for raw.
    Mixed(String),
}

impl Quote {
    /// Quote state of the concatenation of `left` (quoted as `self`) and
    /// `right` (quoted as `other`).
    #[must_use]
    pub fn concat(&self, left: &str, other: &Quote, right: &str) -> Quote {
        match (self, other) {
            (Quote::Quoted, Quote::Quoted) => Quote::Quoted,
            (Quote::Unquoted, Quote::Unquoted) => Quote::Unquoted,
            _ => {
                let mut mask = String::with_capacity(left.len() + right.len());
                self.write_mask(left, &mut mask);
                other.write_mask(right, &mut mask);
                Quote::Mixed(mask)
            }
        }
    }

    fn write_mask(&self, text: &str, mask: &mut String) {
        match self {
            Quote::Quoted => mask.extend(std::iter::repeat('q').take(text.len())),
            Quote::Unquoted => mask.extend(std::iter::repeat('r').take(text.len())),
            Quote::Mixed(m) => mask.push_str(m),
        }
    }

    /// Whether byte `i` of the word is unquoted.
    pub fn is_raw(&self, i: usize) -> bool {
        match self {
            Quote::Quoted => false,
            Quote::Unquoted => true,
            Quote::Mixed(m) => m.as_bytes().get(i) == Some(&b'r'),
        }
    }

    /// Whether any unquoted byte of `text` is a glob metacharacter.
    pub fn has_wild(&self, text: &str) -> bool {
        text.bytes()
            .enumerate()
            .any(|(i, b)| matches!(b, b'*' | b'?' | b'[') && self.is_raw(i))
    }
}
