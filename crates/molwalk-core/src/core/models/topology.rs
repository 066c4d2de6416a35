#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Anything but a plain single bond counts as a multiplicity for chain walks.
    pub fn is_multiple(self) -> bool {
        !matches!(self, Self::Single)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,     // Index of the first atom in the molecule graph
    pub atom2: usize,     // Index of the second atom in the molecule graph
    pub order: BondOrder, // Bond order (e.g., single, double, etc.)
    pub aromatic: bool,
    pub in_ring: bool,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
            aromatic: order == BondOrder::Aromatic,
            in_ring: false,
        }
    }

    pub fn in_ring(mut self, in_ring: bool) -> Self {
        self.in_ring = in_ring;
        self
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    pub fn other(&self, atom: usize) -> Option<usize> {
        if self.atom1 == atom {
            Some(self.atom2)
        } else if self.atom2 == atom {
            Some(self.atom1)
        } else {
            None
        }
    }
}
