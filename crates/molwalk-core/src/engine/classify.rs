use super::error::AnalysisError;
use crate::core::models::ids::Identifier;
use crate::core::models::unit::{Connection, ConnectionKind};
use crate::core::registry::StructureRegistry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// The set contexts of an atom, or the atom itself when it belongs to no set.
fn context_cloud(
    registry: &StructureRegistry,
    atom: &Identifier,
) -> Result<BTreeSet<Identifier>, AnalysisError> {
    let contexts = registry.set_contexts(atom)?;
    if contexts.is_empty() {
        Ok(BTreeSet::from([atom.clone()]))
    } else {
        Ok(contexts)
    }
}

fn bond_connections(
    registry: &StructureRegistry,
    pending: &mut Vec<(Identifier, Connection)>,
) -> Result<(), AnalysisError> {
    for bond_id in registry.bonds() {
        let unit = registry.get(bond_id)?;
        let bond = unit.bond().ok_or_else(|| AnalysisError::UnexpectedKind {
            unit: bond_id.clone(),
            kind: unit.kind(),
            expected: "bond",
        })?;
        for endpoint in [&bond.first, &bond.second] {
            if !registry.is_atom(endpoint) {
                return Err(AnalysisError::InvalidConnection {
                    unit: endpoint.clone(),
                    kind: ConnectionKind::ConnectingBond,
                    connector: bond_id.clone(),
                    reason: "bond endpoint is not a registered atom",
                });
            }
        }

        if registry.set_contexts(bond_id)?.is_empty() {
            let left = context_cloud(registry, &bond.first)?;
            let right = context_cloud(registry, &bond.second)?;
            for a in &left {
                for b in right.iter().filter(|b| *b != a) {
                    pending.push((
                        a.clone(),
                        Connection::new(ConnectionKind::ConnectingBond, bond_id.clone(), b.clone()),
                    ));
                    pending.push((
                        b.clone(),
                        Connection::new(ConnectionKind::ConnectingBond, bond_id.clone(), a.clone()),
                    ));
                }
            }
        }

        pending.push((
            bond.first.clone(),
            Connection::new(
                ConnectionKind::ConnectingBond,
                bond_id.clone(),
                bond.second.clone(),
            ),
        ));
        pending.push((
            bond.second.clone(),
            Connection::new(
                ConnectionKind::ConnectingBond,
                bond_id.clone(),
                bond.first.clone(),
            ),
        ));
    }
    Ok(())
}

fn shared_connections(
    registry: &StructureRegistry,
    pending: &mut Vec<(Identifier, Connection)>,
) -> Result<(), AnalysisError> {
    for unit_id in registry.sets() {
        let unit = registry.get(unit_id)?;
        let excluded: BTreeSet<&Identifier> = std::iter::once(unit_id)
            .chain(unit.sub_systems.iter())
            .chain(unit.super_systems.iter())
            .collect();

        let mut shared: BTreeMap<Identifier, BTreeSet<Identifier>> = BTreeMap::new();
        for component in &unit.components {
            for neighbour in registry.set_contexts(component)? {
                if !excluded.contains(&neighbour) {
                    shared.entry(neighbour).or_default().insert(component.clone());
                }
            }
        }

        for (neighbour, components) in shared {
            let both_rings = unit.kind().is_ring() && registry.get(&neighbour)?.kind().is_ring();

            let mut bridge_atoms = BTreeSet::new();
            for bond_id in components.iter().filter(|c| registry.is_bond(c)) {
                if let Some(bond) = registry.get(bond_id)?.bond() {
                    bridge_atoms.insert(bond.first.clone());
                    bridge_atoms.insert(bond.second.clone());
                }
                pending.push((
                    unit_id.clone(),
                    Connection::new(ConnectionKind::SharedBond, bond_id.clone(), neighbour.clone()),
                ));
            }
            for atom in &bridge_atoms {
                pending.push((
                    unit_id.clone(),
                    Connection::new(ConnectionKind::BridgeAtom, atom.clone(), neighbour.clone()),
                ));
            }

            let kind = if both_rings {
                ConnectionKind::SpiroAtom
            } else {
                ConnectionKind::SharedAtom
            };
            for atom in components
                .iter()
                .filter(|c| registry.is_atom(c) && !bridge_atoms.contains(*c))
            {
                pending.push((
                    unit_id.clone(),
                    Connection::new(kind, atom.clone(), neighbour.clone()),
                ));
            }
        }
    }
    Ok(())
}

/// Records every connection between units and between bonded atoms.
///
/// All connections are collected first and applied afterwards, so the pass
/// only reads the registry while classifying. Running it again adds nothing.
///
/// # Arguments
///
/// * `registry` - A registry whose units already carry contexts and attachments.
///
/// # Return
///
/// Returns `Ok(())` once every connection is recorded on both partners.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConnection`] if a bond endpoint is not an
/// atom, or a registry error if a component is missing.
pub fn classify_connections(registry: &mut StructureRegistry) -> Result<(), AnalysisError> {
    let mut pending = Vec::new();
    bond_connections(registry, &mut pending)?;
    shared_connections(registry, &mut pending)?;

    let mut added = 0;
    for (owner, connection) in pending {
        if registry.get_mut(&owner)?.connections.insert(connection) {
            added += 1;
        }
    }
    debug!("Classified {} connection record(s).", added);
    Ok(())
}
