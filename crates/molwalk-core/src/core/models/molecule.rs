use super::atom::Atom;
use super::ids::Identifier;
use super::topology::{Bond, BondOrder};

/// The molecular graph handed over by the external chemistry toolkit.
///
/// Atoms and bonds are stored in insertion order. Their structure identifiers
/// are derived from that order: the atom at index `i` is `a{i+1}` and the bond
/// at index `j` is `b{j+1}`, which keeps SMARTS match indices and identifiers
/// trivially interconvertible.
#[derive(Debug, Clone, Default)]
pub struct MoleculeGraph {
    /// Primary storage for atoms, indexed by insertion order.
    atoms: Vec<Atom>,
    /// Primary storage for bonds, indexed by insertion order.
    bonds: Vec<Bond>,
    /// Cached adjacency list of `(neighbor, bond)` index pairs per atom.
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl MoleculeGraph {
    /// Creates a new, empty molecule graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.adjacency.push(Vec::new());
        self.atoms.len() - 1
    }

    /// Adds a bond between two atoms.
    ///
    /// This method is idempotent; adding an existing bond returns the index of
    /// the bond already present without creating a duplicate.
    ///
    /// # Arguments
    ///
    /// * `atom1` - Index of the first atom.
    /// * `atom2` - Index of the second atom.
    /// * `order` - The order of the bond.
    ///
    /// # Return
    ///
    /// Returns `Some(bond_index)` if successful, otherwise `None` (e.g., if an
    /// atom doesn't exist or both indices name the same atom).
    pub fn add_bond(&mut self, atom1: usize, atom2: usize, order: BondOrder) -> Option<usize> {
        self.add_bond_with(Bond::new(atom1, atom2, order))
    }

    /// Adds a fully specified bond; see [`MoleculeGraph::add_bond`].
    pub fn add_bond_with(&mut self, bond: Bond) -> Option<usize> {
        let (atom1, atom2) = (bond.atom1, bond.atom2);
        if atom1 == atom2 || atom1 >= self.atoms.len() || atom2 >= self.atoms.len() {
            return None;
        }

        if let Some(&(_, existing)) = self.adjacency[atom1].iter().find(|(n, _)| *n == atom2) {
            return Some(existing);
        }

        let index = self.bonds.len();
        self.bonds.push(bond);
        self.adjacency[atom1].push((atom2, index));
        self.adjacency[atom2].push((atom1, index));
        Some(index)
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn bond(&self, index: usize) -> Option<&Bond> {
        self.bonds.get(index)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Retrieves the bonded neighbors of an atom as `(neighbor, bond)` index pairs.
    pub fn neighbors(&self, atom: usize) -> Option<&[(usize, usize)]> {
        self.adjacency.get(atom).map(|v| v.as_slice())
    }

    /// Finds the bond joining two atoms, if any.
    pub fn bond_between(&self, atom1: usize, atom2: usize) -> Option<usize> {
        self.adjacency
            .get(atom1)?
            .iter()
            .find(|(n, _)| *n == atom2)
            .map(|&(_, bond)| bond)
    }

    pub fn atom_id(index: usize) -> Identifier {
        Identifier::atom(index + 1)
    }

    pub fn bond_id(index: usize) -> Identifier {
        Identifier::bond(index + 1)
    }
}
