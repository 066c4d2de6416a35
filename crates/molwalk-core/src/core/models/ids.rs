use slotmap::new_key_type;
use std::cmp::Ordering;
use std::fmt;

new_key_type! {
    pub struct UnitKey;
}

const ATOM_PREFIX: &str = "a";
const BOND_PREFIX: &str = "b";
const SET_PREFIX: &str = "as";

/// A structure identifier such as `a12`, `b3` or `as7`.
///
/// Identifiers are split into an alphabetic prefix and a numeric suffix. They
/// order first by prefix, with the single exception that the set prefix `as`
/// sorts directly after the bond prefix `b`, and then numerically by suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    prefix: String,
    number: u64,
    raw: String,
}

impl Identifier {
    /// Parses an identifier token.
    ///
    /// The suffix is the digit run right after the prefix; anything after it
    /// only matters to the final textual tie-break. A token without digits
    /// gets suffix `0`, and a suffix too long for `u64` saturates.
    pub fn new(token: &str) -> Self {
        let split = token
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(token.len());
        let (prefix, rest) = token.split_at(split);
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..end];
        let number = if digits.is_empty() {
            0
        } else {
            digits.parse().unwrap_or(u64::MAX)
        };
        Self {
            prefix: prefix.to_string(),
            number,
            raw: token.to_string(),
        }
    }

    pub fn atom(number: usize) -> Self {
        Self::new(&format!("{ATOM_PREFIX}{number}"))
    }

    pub fn bond(number: usize) -> Self {
        Self::new(&format!("{BOND_PREFIX}{number}"))
    }

    pub fn set(number: usize) -> Self {
        Self::new(&format!("{SET_PREFIX}{number}"))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    // `as` is slotted between `b` and anything that follows `b`.
    fn sort_prefix(&self) -> (&str, u8) {
        if self.prefix == SET_PREFIX {
            (BOND_PREFIX, 1)
        } else {
            (&self.prefix, 0)
        }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_prefix()
            .cmp(&other.sort_prefix())
            .then_with(|| self.number.cmp(&other.number))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefix_and_numeric_suffix() {
        let id = Identifier::new("as12");
        assert_eq!(id.prefix(), "as");
        assert_eq!(id.number(), 12);
        assert_eq!(id.to_string(), "as12");
    }

    #[test]
    fn token_without_digits_has_zero_suffix() {
        let id = Identifier::new("mol");
        assert_eq!(id.prefix(), "mol");
        assert_eq!(id.number(), 0);
    }

    #[test]
    fn suffix_stops_at_the_first_non_digit() {
        let id = Identifier::new("a1x");
        assert_eq!(id.number(), 1);
        assert!(Identifier::new("a1") < id);
        assert!(id < Identifier::new("a2"));
    }

    #[test]
    fn oversized_suffix_sorts_last_within_its_prefix() {
        let huge = Identifier::new("a1234567890123456789012345");
        assert_eq!(huge.number(), u64::MAX);
        assert!(Identifier::new("a99") < huge);
        assert!(huge < Identifier::new("b1"));
    }

    #[test]
    fn suffixes_compare_numerically_not_lexically() {
        assert!(Identifier::new("a2") < Identifier::new("a10"));
        assert!(Identifier::new("b9") < Identifier::new("b11"));
    }

    #[test]
    fn atoms_sort_before_bonds_before_sets() {
        let mut ids: Vec<Identifier> = ["as1", "b2", "a3", "as0", "b1", "a1"]
            .into_iter()
            .map(Identifier::new)
            .collect();
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(Identifier::as_str).collect();
        assert_eq!(sorted, vec!["a1", "a3", "b1", "b2", "as0", "as1"]);
    }

    #[test]
    fn set_prefix_sorts_after_bond_prefix_but_before_later_prefixes() {
        assert!(Identifier::new("b100") < Identifier::new("as1"));
        assert!(Identifier::new("as100") < Identifier::new("ba1"));
        assert!(Identifier::new("a100") < Identifier::new("as1"));
    }

    #[test]
    fn helper_constructors_use_standard_prefixes() {
        assert_eq!(Identifier::atom(4).as_str(), "a4");
        assert_eq!(Identifier::bond(2).as_str(), "b2");
        assert_eq!(Identifier::set(7).as_str(), "as7");
    }
}
