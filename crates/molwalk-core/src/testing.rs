//! Small molecules with hand-written detections, shared by the unit tests.
//!
//! Atom and bond numbers in the fixture tables are 1-based so they read the
//! same as the `aN`/`bN` identifiers the analysis assigns.

use crate::core::models::atom::Atom;
use crate::core::models::ids::Identifier;
use crate::core::models::molecule::MoleculeGraph;
use crate::core::models::topology::BondOrder;
use crate::core::perception::{Candidate, Detections, FusedRingCandidate};
use crate::core::registry::StructureRegistry;
use crate::engine::builder::UnitBuilder;
use crate::engine::classify::classify_connections;
use crate::engine::config::DEFAULT_MIN_CHAIN_LENGTH;
use nalgebra::Point2;

pub struct Fixture {
    pub molecule: MoleculeGraph,
    pub detections: Detections,
}

fn graph(atoms: &[(&str, u8)], bonds: &[(usize, usize, BondOrder)]) -> MoleculeGraph {
    let mut molecule = MoleculeGraph::new();
    for (i, &(symbol, hydrogens)) in atoms.iter().enumerate() {
        let position = Point2::new(i as f64, 0.0);
        molecule.add_atom(Atom::new(symbol, position).with_hydrogens(hydrogens));
    }
    for &(a, b, order) in bonds {
        molecule
            .add_bond(a - 1, b - 1, order)
            .expect("fixture bonds join existing atoms");
    }
    molecule
}

fn candidate(molecule: &MoleculeGraph, atoms: &[usize]) -> Candidate {
    let indices: Vec<usize> = atoms.iter().map(|n| n - 1).collect();
    Candidate::induced(molecule, &indices)
}

fn single_bonds(pairs: &[(usize, usize)]) -> Vec<(usize, usize, BondOrder)> {
    pairs.iter().map(|&(a, b)| (a, b, BondOrder::Single)).collect()
}

fn chain_fixture(molecule: MoleculeGraph, chain: &[usize]) -> Fixture {
    let detections = Detections {
        chains: vec![candidate(&molecule, chain)],
        ..Detections::default()
    };
    Fixture {
        molecule,
        detections,
    }
}

pub fn empty() -> Fixture {
    Fixture {
        molecule: MoleculeGraph::new(),
        detections: Detections::default(),
    }
}

pub fn butane() -> Fixture {
    let molecule = graph(
        &[("C", 3), ("C", 2), ("C", 2), ("C", 3)],
        &single_bonds(&[(1, 2), (2, 3), (3, 4)]),
    );
    chain_fixture(molecule, &[1, 2, 3, 4])
}

/// But-1-ene numbered against the double bond: C1-C2-C3=C4.
pub fn butene() -> Fixture {
    let molecule = graph(
        &[("C", 3), ("C", 2), ("C", 1), ("C", 2)],
        &[
            (1, 2, BondOrder::Single),
            (2, 3, BondOrder::Single),
            (3, 4, BondOrder::Double),
        ],
    );
    chain_fixture(molecule, &[1, 2, 3, 4])
}

/// A chain candidate that closes on itself and has no terminal atoms.
pub fn cyclic_chain() -> Fixture {
    let molecule = graph(
        &[("C", 2); 4],
        &single_bonds(&[(1, 2), (2, 3), (3, 4), (4, 1)]),
    );
    chain_fixture(molecule, &[1, 2, 3, 4])
}

pub fn chloropropane() -> Fixture {
    let molecule = graph(
        &[("C", 3), ("C", 2), ("C", 2), ("Cl", 0)],
        &single_bonds(&[(1, 2), (2, 3), (3, 4)]),
    );
    chain_fixture(molecule, &[1, 2, 3])
}

/// A ring of `symbols` (atoms 1..=n, bonds around the ring first) with
/// substituents `(ring atom, symbol, hydrogens)` appended as atoms n+1...
pub fn substituted_ring(symbols: &[&str], substituents: &[(usize, &str, u8)]) -> Fixture {
    let n = symbols.len();
    let mut atoms: Vec<(&str, u8)> = symbols.iter().map(|&s| (s, 1)).collect();
    let mut pairs: Vec<(usize, usize)> = (1..=n).map(|i| (i, i % n + 1)).collect();
    for (k, &(ring_atom, symbol, hydrogens)) in substituents.iter().enumerate() {
        atoms.push((symbol, hydrogens));
        pairs.push((ring_atom, n + k + 1));
    }
    let molecule = graph(&atoms, &single_bonds(&pairs));
    let ring: Vec<usize> = (1..=n).collect();
    let detections = Detections {
        isolated_rings: vec![candidate(&molecule, &ring)],
        ..Detections::default()
    };
    Fixture {
        molecule,
        detections,
    }
}

pub fn toluene() -> Fixture {
    substituted_ring(&["C"; 6], &[(1, "C", 3)])
}

/// Naphthalene with the bridge atoms numbered a5 and a10.
pub fn naphthalene() -> Fixture {
    substituted_naphthalene(&["C"; 10], &[])
}

/// The naphthalene skeleton over `symbols` (bridge atoms a5 and a10) with
/// substituents `(rim atom, symbol, hydrogens)` appended as atoms 11...
pub fn substituted_naphthalene(symbols: &[&str], substituents: &[(usize, &str, u8)]) -> Fixture {
    let mut atoms: Vec<(&str, u8)> = symbols.iter().map(|&s| (s, 1)).collect();
    let mut bonds: Vec<(usize, usize, BondOrder)> = (1..=10)
        .map(|i| (i, i % 10 + 1, BondOrder::Aromatic))
        .collect();
    bonds.push((5, 10, BondOrder::Aromatic));
    for (k, &(rim_atom, symbol, hydrogens)) in substituents.iter().enumerate() {
        atoms.push((symbol, hydrogens));
        bonds.push((rim_atom, 11 + k, BondOrder::Single));
    }
    let molecule = graph(&atoms, &bonds);

    let fused = FusedRingCandidate {
        ring: candidate(&molecule, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]),
        subrings: vec![
            candidate(&molecule, &[1, 2, 3, 4, 5, 10]),
            candidate(&molecule, &[5, 6, 7, 8, 9, 10]),
        ],
    };
    Fixture {
        molecule,
        detections: Detections {
            fused_rings: vec![fused],
            ..Detections::default()
        },
    }
}

/// Spiro[4.4]nonane: two five-membered rings sharing a1.
pub fn spiro_nonane() -> Fixture {
    let molecule = graph(
        &[("C", 0), ("C", 2), ("C", 2), ("C", 2), ("C", 2), ("C", 2), ("C", 2), ("C", 2), ("C", 2)],
        &single_bonds(&[
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 1),
            (1, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (9, 1),
        ]),
    );
    let detections = Detections {
        isolated_rings: vec![
            candidate(&molecule, &[1, 2, 3, 4, 5]),
            candidate(&molecule, &[1, 6, 7, 8, 9]),
        ],
        ..Detections::default()
    };
    Fixture {
        molecule,
        detections,
    }
}

/// CH3-CH2-C(=O)-OH with the acid detected as a functional group.
pub fn propanoic_acid() -> Fixture {
    let molecule = graph(
        &[("C", 3), ("C", 2), ("C", 0), ("O", 0), ("O", 1)],
        &[
            (1, 2, BondOrder::Single),
            (2, 3, BondOrder::Single),
            (3, 4, BondOrder::Double),
            (3, 5, BondOrder::Single),
        ],
    );
    let mut detections = Detections {
        chains: vec![candidate(&molecule, &[1, 2, 3])],
        ..Detections::default()
    };
    detections
        .functional_groups
        .insert("Carboxylic Acid-0".to_string(), candidate(&molecule, &[3, 4, 5]));
    Fixture {
        molecule,
        detections,
    }
}

/// O=CH-OH as a lone functional group.
pub fn formic_acid() -> Fixture {
    let molecule = graph(
        &[("O", 0), ("C", 1), ("O", 1)],
        &[(1, 2, BondOrder::Double), (2, 3, BondOrder::Single)],
    );
    let mut detections = Detections::default();
    detections
        .functional_groups
        .insert("Carboxylic Acid-0".to_string(), candidate(&molecule, &[1, 2, 3]));
    Fixture {
        molecule,
        detections,
    }
}

/// Cyclopropane next to an unbonded water molecule.
pub fn disconnected() -> Fixture {
    let molecule = graph(
        &[("C", 2), ("C", 2), ("C", 2), ("O", 2)],
        &single_bonds(&[(1, 2), (2, 3), (3, 1)]),
    );
    let detections = Detections {
        isolated_rings: vec![candidate(&molecule, &[1, 2, 3])],
        ..Detections::default()
    };
    Fixture {
        molecule,
        detections,
    }
}

/// `copies` unconnected sets of a cyclohexane ring, an octane chain and a
/// bromine atom. Each set spans 15 atoms, so the bromines are a15, a30...
pub fn fragments(copies: usize) -> Fixture {
    let mut atoms: Vec<(&str, u8)> = Vec::new();
    let mut pairs = Vec::new();
    let mut rings = Vec::new();
    let mut chains = Vec::new();
    for copy in 0..copies {
        let base = copy * 15;
        atoms.extend([("C", 2); 6]);
        atoms.extend([("C", 2); 8]);
        atoms.push(("Br", 1));
        pairs.extend((1..=6).map(|i| (base + i, base + i % 6 + 1)));
        pairs.extend((7..14).map(|i| (base + i, base + i + 1)));
        rings.push((base + 1..=base + 6).collect::<Vec<_>>());
        chains.push((base + 7..=base + 14).collect::<Vec<_>>());
    }
    let molecule = graph(&atoms, &single_bonds(&pairs));
    let detections = Detections {
        isolated_rings: rings.iter().map(|r| candidate(&molecule, r)).collect(),
        chains: chains.iter().map(|c| candidate(&molecule, c)).collect(),
        ..Detections::default()
    };
    Fixture {
        molecule,
        detections,
    }
}

/// Every fixture that analyses without error.
pub fn all() -> Vec<Fixture> {
    vec![
        empty(),
        butane(),
        butene(),
        chloropropane(),
        toluene(),
        substituted_ring(&["C", "O", "C", "C", "N"], &[(1, "O", 1), (3, "Cl", 0)]),
        naphthalene(),
        substituted_naphthalene(&["C", "C", "N", "C", "C", "C", "C", "C", "C", "C"], &[(7, "C", 3)]),
        spiro_nonane(),
        propanoic_acid(),
        formic_acid(),
        disconnected(),
        fragments(2),
    ]
}

/// Runs the unit-building steps up to and including attachments.
pub fn prepared_builder(fixture: &Fixture) -> UnitBuilder {
    let detections = &fixture.detections;
    let mut builder = UnitBuilder::new();
    builder.register_graph(&fixture.molecule).unwrap();
    builder
        .register_rings(&detections.fused_rings, &detections.isolated_rings)
        .unwrap();
    builder
        .register_chains(&detections.chains, DEFAULT_MIN_CHAIN_LENGTH)
        .unwrap();
    builder
        .register_functional_groups(&detections.functional_groups)
        .unwrap();
    builder.compute_contexts().unwrap();
    builder.compute_attachments().unwrap();
    builder
}

/// A classified registry with its molecule root, ready to be walked.
pub fn classified_registry(fixture: &Fixture) -> (StructureRegistry, Identifier) {
    let mut builder = prepared_builder(fixture);
    classify_connections(builder.registry_mut()).unwrap();
    let molecule = builder.build_molecule().unwrap();
    (builder.into_registry(), molecule)
}
