use super::{Adjacency, adjacency, bidirectional_walk, store_positions, straight_walk};
use crate::core::models::ids::Identifier;
use crate::core::models::positions::PositionMap;
use crate::core::models::unit::{ConnectionKind, StructuralUnit, UnitData, UnitKind};
use crate::core::registry::StructureRegistry;
use crate::engine::error::AnalysisError;
use crate::engine::heuristics::unit_weight;
use std::collections::BTreeSet;

/// Non-carbon ring atoms: oxygen first, then heavier first, then identifier.
fn internal_substitutions(
    registry: &StructureRegistry,
    atoms: &BTreeSet<Identifier>,
) -> Result<Vec<Identifier>, AnalysisError> {
    let mut hetero = Vec::new();
    for id in atoms {
        if let Some(atom) = registry.get(id)?.atom() {
            if !atom.is_carbon() {
                hetero.push((!atom.is_oxygen(), atom.mass(), id));
            }
        }
    }
    hetero.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| b.1.total_cmp(&a.1))
            .then_with(|| a.2.cmp(b.2))
    });
    Ok(hetero.into_iter().map(|(_, _, id)| id.clone()).collect())
}

fn is_hydroxyl_partner(partner: &StructuralUnit) -> bool {
    match &partner.data {
        UnitData::Atom(atom) => atom.is_hydroxyl(),
        UnitData::FunctionalGroup { name } => {
            let name = name.to_lowercase();
            name.contains("hydroxyl") || name.contains("alcohol")
        }
        _ => false,
    }
}

/// The ring atom a connection attaches to.
fn attachment_atom(
    registry: &StructureRegistry,
    unit: &Identifier,
    atoms: &BTreeSet<Identifier>,
    kind: ConnectionKind,
    connector: &Identifier,
) -> Result<Identifier, AnalysisError> {
    let invalid = |reason| AnalysisError::InvalidConnection {
        unit: unit.clone(),
        kind,
        connector: connector.clone(),
        reason,
    };
    match kind {
        ConnectionKind::SpiroAtom | ConnectionKind::SharedAtom => {
            if atoms.contains(connector) {
                Ok(connector.clone())
            } else {
                Err(invalid("connecting atom is not part of the ring"))
            }
        }
        ConnectionKind::ConnectingBond => {
            let bond = registry
                .get(connector)?
                .bond()
                .ok_or_else(|| invalid("connector is not a bond"))?;
            [&bond.first, &bond.second]
                .into_iter()
                .find(|atom| atoms.contains(*atom))
                .cloned()
                .ok_or_else(|| invalid("connecting bond does not touch the ring"))
        }
        ConnectionKind::SharedBond | ConnectionKind::BridgeAtom => {
            Err(invalid("fusion connections carry no substituent"))
        }
    }
}

/// Ring atoms carrying something outside the ring.
///
/// Atoms whose partner is a hydroxyl come first, then heavier partners, then
/// identifier order; each atom is listed once.
fn external_substitutions(
    registry: &StructureRegistry,
    unit_id: &Identifier,
    atoms: &BTreeSet<Identifier>,
) -> Result<Vec<Identifier>, AnalysisError> {
    let mut substituted = Vec::new();
    for connection in registry.get(unit_id)?.connections() {
        if matches!(
            connection.kind,
            ConnectionKind::SharedBond | ConnectionKind::BridgeAtom
        ) {
            continue;
        }
        let atom = attachment_atom(
            registry,
            unit_id,
            atoms,
            connection.kind,
            &connection.connector,
        )?;
        let partner = registry.get(&connection.connected)?;
        let weight = unit_weight(registry, &connection.connected)?;
        substituted.push((!is_hydroxyl_partner(partner), weight, atom));
    }
    substituted.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| b.1.total_cmp(&a.1))
            .then_with(|| a.2.cmp(&b.2))
    });

    let mut seen = BTreeSet::new();
    Ok(substituted
        .into_iter()
        .filter(|(_, _, atom)| seen.insert(atom.clone()))
        .map(|(_, _, atom)| atom)
        .collect())
}

/// Orders the atoms of a ring-shaped unit over the given adjacency.
pub(super) fn ring_positions(
    registry: &StructureRegistry,
    unit_id: &Identifier,
    atoms: &BTreeSet<Identifier>,
    adjacency: &Adjacency,
) -> Result<PositionMap, AnalysisError> {
    let internal = internal_substitutions(registry, atoms)?;
    let external = external_substitutions(registry, unit_id, atoms)?;

    let positions = match (internal.as_slice(), external.as_slice()) {
        ([first, _, ..], _) | ([first], []) => straight_walk(adjacency, first, None),
        ([first], targets) => bidirectional_walk(adjacency, first, targets),
        ([], []) => match atoms.first() {
            Some(smallest) => straight_walk(adjacency, smallest, None),
            None => PositionMap::new(),
        },
        ([], [only]) => straight_walk(adjacency, only, None),
        ([], [top, rest @ ..]) => bidirectional_walk(adjacency, top, rest),
    };
    Ok(positions)
}

pub(super) fn walk_ring(registry: &mut StructureRegistry, id: &Identifier) -> Result<(), AnalysisError> {
    let kind = registry.get(id)?.kind();
    if !matches!(kind, UnitKind::IsolatedRing | UnitKind::SubRing) {
        return Err(AnalysisError::UnexpectedKind {
            unit: id.clone(),
            kind,
            expected: "ring",
        });
    }
    let atoms = registry.atoms_of(id)?;
    let bonds = registry.bonds_of(id)?;
    let adjacency = adjacency(registry, &atoms, &bonds)?;
    let positions = ring_positions(registry, id, &atoms, &adjacency)?;
    store_positions(registry, id, positions)
}
