//! The interface to the external cheminformatics toolkit.
//!
//! Ring perception, chain extraction and SMARTS matching are not performed by
//! this crate. A toolkit implements [`StructurePerceiver`]; [`perceive`] turns
//! its answers into a materialized [`Detections`] value that the analysis
//! pipeline consumes. Analyses can also be fed a hand-built `Detections`.

use crate::core::models::ids::Identifier;
use crate::core::models::molecule::MoleculeGraph;
use crate::core::patterns::library::FunctionalGroupLibrary;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{debug, warn};

/// Separates a functional-group family name from its match counter.
pub const CANDIDATE_SEPARATOR: char = '-';

/// How a fused ring system is decomposed into subrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubRingStrategy {
    /// Smallest set of smallest rings.
    #[default]
    Sssr,
    /// All rings, filtered down to the non-redundant ones.
    AllRings,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("SMARTS pattern '{pattern}' failed to compile: {reason}")]
    Compile { pattern: String, reason: String },
    #[error("Failed to prepare molecule snapshot for pattern '{pattern}': {reason}")]
    Snapshot { pattern: String, reason: String },
}

/// An atom/bond container describing one detected substructure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub atoms: BTreeSet<Identifier>,
    pub bonds: BTreeSet<Identifier>,
}

impl Candidate {
    pub fn new(
        atoms: impl IntoIterator<Item = Identifier>,
        bonds: impl IntoIterator<Item = Identifier>,
    ) -> Self {
        Self {
            atoms: atoms.into_iter().collect(),
            bonds: bonds.into_iter().collect(),
        }
    }

    /// Builds the induced substructure of a set of atom indices: the atoms plus
    /// every bond whose endpoints both lie in the set.
    pub fn induced(molecule: &MoleculeGraph, atom_indices: &[usize]) -> Self {
        let members: BTreeSet<usize> = atom_indices
            .iter()
            .copied()
            .filter(|&i| i < molecule.atom_count())
            .collect();
        let bonds = molecule
            .bonds()
            .iter()
            .enumerate()
            .filter(|(_, b)| members.contains(&b.atom1) && members.contains(&b.atom2))
            .map(|(i, _)| MoleculeGraph::bond_id(i));
        Self::new(members.iter().map(|&i| MoleculeGraph::atom_id(i)), bonds)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn components(&self) -> impl Iterator<Item = &Identifier> {
        self.atoms.iter().chain(self.bonds.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FusedRingCandidate {
    pub ring: Candidate,
    pub subrings: Vec<Candidate>,
}

/// Everything the toolkit detected for one molecule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detections {
    pub fused_rings: Vec<FusedRingCandidate>,
    pub isolated_rings: Vec<Candidate>,
    pub chains: Vec<Candidate>,
    /// Raw SMARTS matches keyed by candidate name (`Family-N`).
    pub functional_groups: BTreeMap<String, Candidate>,
}

/// The external cheminformatics toolkit.
pub trait StructurePerceiver {
    fn fused_rings(&self, molecule: &MoleculeGraph) -> Vec<Candidate>;

    fn subrings(
        &self,
        molecule: &MoleculeGraph,
        fused_ring: &Candidate,
        strategy: SubRingStrategy,
    ) -> Vec<Candidate>;

    fn isolated_rings(&self, molecule: &MoleculeGraph) -> Vec<Candidate>;

    fn aliphatic_chains(&self, molecule: &MoleculeGraph, min_length: usize) -> Vec<Candidate>;

    /// Matches a SMARTS pattern and returns atom-index matches.
    fn smarts_matches(
        &self,
        molecule: &MoleculeGraph,
        smarts: &str,
    ) -> Result<Vec<Vec<usize>>, PatternError>;
}

/// Queries a perceiver for every kind of candidate substructure.
///
/// A pattern that fails to compile or match is logged and skipped; it never
/// aborts the pass. Matches that are permutations of the same atom set are
/// collapsed, and the survivors are named `Family-N` with `N` counting from 0.
pub fn perceive<P: StructurePerceiver + ?Sized>(
    molecule: &MoleculeGraph,
    perceiver: &P,
    library: &FunctionalGroupLibrary,
    strategy: SubRingStrategy,
    min_chain_length: usize,
) -> Detections {
    let fused_rings = perceiver
        .fused_rings(molecule)
        .into_iter()
        .map(|ring| {
            let subrings = perceiver.subrings(molecule, &ring, strategy);
            FusedRingCandidate { ring, subrings }
        })
        .collect();

    let chains = perceiver
        .aliphatic_chains(molecule, min_chain_length)
        .into_iter()
        .filter(|c| c.atom_count() >= min_chain_length)
        .collect();

    let mut functional_groups = BTreeMap::new();
    for (family, smarts) in library.iter() {
        let matches = match perceiver.smarts_matches(molecule, smarts) {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Skipping functional group '{}': {}", family, e);
                continue;
            }
        };
        let mut seen = BTreeSet::new();
        for atom_indices in matches {
            let candidate = Candidate::induced(molecule, &atom_indices);
            if candidate.atoms.is_empty() || !seen.insert(candidate.atoms.clone()) {
                continue;
            }
            let name = format!("{}{}{}", family, CANDIDATE_SEPARATOR, seen.len() - 1);
            functional_groups.insert(name, candidate);
        }
        debug!("Pattern '{}' produced {} candidate(s).", family, seen.len());
    }

    Detections {
        fused_rings,
        isolated_rings: perceiver.isolated_rings(molecule),
        chains,
        functional_groups,
    }
}

/// The family part of a candidate name (`"Hydroxyl-3"` → `"Hydroxyl"`).
pub fn family_name(candidate: &str) -> &str {
    candidate
        .split_once(CANDIDATE_SEPARATOR)
        .map_or(candidate, |(family, _)| family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::BondOrder;
    use nalgebra::Point2;

    struct StubPerceiver;

    impl StructurePerceiver for StubPerceiver {
        fn fused_rings(&self, _: &MoleculeGraph) -> Vec<Candidate> {
            Vec::new()
        }

        fn subrings(&self, _: &MoleculeGraph, _: &Candidate, _: SubRingStrategy) -> Vec<Candidate> {
            Vec::new()
        }

        fn isolated_rings(&self, _: &MoleculeGraph) -> Vec<Candidate> {
            Vec::new()
        }

        fn aliphatic_chains(&self, molecule: &MoleculeGraph, _: usize) -> Vec<Candidate> {
            vec![
                Candidate::induced(molecule, &[0, 1, 2]),
                Candidate::induced(molecule, &[0, 1]),
            ]
        }

        fn smarts_matches(
            &self,
            _: &MoleculeGraph,
            smarts: &str,
        ) -> Result<Vec<Vec<usize>>, PatternError> {
            match smarts {
                "[OX2H]" => Ok(vec![vec![3]]),
                "CO" => Ok(vec![vec![2, 3], vec![3, 2]]),
                _ => Err(PatternError::Compile {
                    pattern: smarts.to_string(),
                    reason: "unbalanced bracket".to_string(),
                }),
            }
        }
    }

    fn propanol() -> MoleculeGraph {
        let mut mol = MoleculeGraph::new();
        for symbol in ["C", "C", "C", "O"] {
            mol.add_atom(Atom::new(symbol, Point2::origin()));
        }
        mol.add_bond(0, 1, BondOrder::Single).unwrap();
        mol.add_bond(1, 2, BondOrder::Single).unwrap();
        mol.add_bond(2, 3, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn induced_candidate_contains_internal_bonds_only() {
        let mol = propanol();
        let candidate = Candidate::induced(&mol, &[1, 2, 9]);
        let atoms: Vec<&str> = candidate.atoms.iter().map(Identifier::as_str).collect();
        let bonds: Vec<&str> = candidate.bonds.iter().map(Identifier::as_str).collect();
        assert_eq!(atoms, vec!["a2", "a3"]);
        assert_eq!(bonds, vec!["b2"]);
    }

    #[test]
    fn family_name_strips_match_counter() {
        assert_eq!(family_name("Hydroxyl-3"), "Hydroxyl");
        assert_eq!(family_name("Carboxylic Acid-0"), "Carboxylic Acid");
        assert_eq!(family_name("Amine"), "Amine");
    }

    #[test]
    fn perceive_skips_failing_patterns_and_collapses_permutations() {
        let mol = propanol();
        let library = FunctionalGroupLibrary::from_pairs([
            ("Hydroxyl", "[OX2H]"),
            ("Ether", "CO"),
            ("Broken", "[C"),
        ]);
        let detections = perceive(&mol, &StubPerceiver, &library, SubRingStrategy::Sssr, 3);

        let names: Vec<&str> = detections
            .functional_groups
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["Ether-0", "Hydroxyl-0"]);
        assert_eq!(detections.functional_groups["Ether-0"].bonds.len(), 1);
    }

    #[test]
    fn perceive_drops_chains_below_minimum_length() {
        let mol = propanol();
        let detections = perceive(
            &mol,
            &StubPerceiver,
            &FunctionalGroupLibrary::default(),
            SubRingStrategy::AllRings,
            3,
        );
        assert_eq!(detections.chains.len(), 1);
        assert_eq!(detections.chains[0].atom_count(), 3);
    }
}
