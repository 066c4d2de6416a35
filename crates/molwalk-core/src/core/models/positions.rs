use super::ids::Identifier;
use std::collections::HashMap;

/// A bijection between the positions `1..=N` and a set of identifiers.
///
/// Positions are handed out in insertion order with no gaps. The map doubles as
/// a generic ordered sequence of identifiers, e.g. for a molecule's top-level
/// path or a fused ring's subring order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    order: Vec<Identifier>,
    index: HashMap<Identifier, usize>,
}

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` at the next free position and returns that position.
    ///
    /// An identifier that is already mapped keeps its position.
    pub fn add_next(&mut self, id: Identifier) -> usize {
        if let Some(&position) = self.index.get(&id) {
            return position;
        }
        self.order.push(id.clone());
        let position = self.order.len();
        self.index.insert(id, position);
        position
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.index.contains_key(id)
    }

    pub fn contains_position(&self, position: usize) -> bool {
        position >= 1 && position <= self.order.len()
    }

    /// The identifier at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&Identifier> {
        position.checked_sub(1).and_then(|i| self.order.get(i))
    }

    /// The 1-based position of an identifier.
    pub fn position_of(&self, id: &Identifier) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Absorbs the entries of `other` in its order, skipping identifiers this
    /// map already holds. Existing numbering is never changed.
    pub fn merge(&mut self, other: &PositionMap) {
        for id in other.values() {
            self.add_next(id.clone());
        }
    }

    /// Iterates `(position, identifier)` pairs from low to high.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Identifier)> {
        self.order.iter().enumerate().map(|(i, id)| (i + 1, id))
    }

    pub fn values(&self) -> impl Iterator<Item = &Identifier> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[Identifier] {
        &self.order
    }
}

impl FromIterator<Identifier> for PositionMap {
    fn from_iter<T: IntoIterator<Item = Identifier>>(iter: T) -> Self {
        let mut map = Self::new();
        for id in iter {
            map.add_next(id);
        }
        map
    }
}
