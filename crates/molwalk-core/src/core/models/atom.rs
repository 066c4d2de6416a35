use crate::core::utils::elements::standard_atomic_weight;
use nalgebra::Point2;

/// An atom as delivered by the external chemistry toolkit.
///
/// Ring membership and aromaticity are perceived upstream and only carried
/// here; the 2-D position is layout information for downstream consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g., "C", "O", "Cl").
    pub symbol: String,
    /// The number of implicit hydrogens attached to this atom.
    pub hydrogens: u8,
    /// The 2-D layout coordinates of the atom.
    pub position: Point2<f64>,
    /// Whether the toolkit flagged this atom as aromatic.
    pub aromatic: bool,
    /// Whether the toolkit flagged this atom as a ring member.
    pub in_ring: bool,
}

impl Atom {
    /// Creates a new `Atom` with no hydrogens and both flags cleared.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol.
    /// * `position` - The 2-D coordinates of the atom.
    pub fn new(symbol: &str, position: Point2<f64>) -> Self {
        Self {
            symbol: symbol.to_string(),
            hydrogens: 0,
            position,
            aromatic: false,
            in_ring: false,
        }
    }

    pub fn with_hydrogens(mut self, hydrogens: u8) -> Self {
        self.hydrogens = hydrogens;
        self
    }

    pub fn with_flags(mut self, aromatic: bool, in_ring: bool) -> Self {
        self.aromatic = aromatic;
        self.in_ring = in_ring;
        self
    }

    pub fn is_carbon(&self) -> bool {
        self.symbol == "C"
    }

    pub fn is_oxygen(&self) -> bool {
        self.symbol == "O"
    }

    /// The standard atomic weight of the element, `0.0` for unknown symbols.
    pub fn mass(&self) -> f64 {
        standard_atomic_weight(&self.symbol)
    }

    /// An oxygen that still carries a hydrogen.
    pub fn is_hydroxyl(&self) -> bool {
        self.is_oxygen() && self.hydrogens > 0
    }
}
