use super::ring::ring_positions;
use super::{adjacency, store_positions};
use crate::core::models::ids::Identifier;
use crate::core::models::positions::PositionMap;
use crate::core::models::unit::{UnitData, UnitKind};
use crate::core::registry::StructureRegistry;
use crate::engine::error::AnalysisError;
use std::collections::{BTreeMap, BTreeSet};

/// Orders the subrings of a fused system.
///
/// Along the rim every atom places the first still unplaced subring that
/// contains it. The placed subrings are then scanned, most recent first, for
/// atoms of subrings that are still unplaced. Whatever is left over goes last
/// in identifier order.
fn subring_path(
    rim: &PositionMap,
    subrings: &BTreeMap<Identifier, PositionMap>,
) -> PositionMap {
    let mut path = PositionMap::new();
    let first_unplaced = |atom: &Identifier, path: &PositionMap| {
        subrings
            .iter()
            .find(|(id, positions)| !path.contains(id) && positions.contains(atom))
            .map(|(id, _)| id.clone())
    };

    for atom in rim.values() {
        if let Some(sub) = first_unplaced(atom, &path) {
            path.add_next(sub);
        }
    }

    loop {
        let next = path
            .as_slice()
            .iter()
            .rev()
            .filter_map(|placed| subrings.get(placed))
            .flat_map(|positions| positions.values())
            .find_map(|atom| first_unplaced(atom, &path));
        match next {
            Some(sub) => {
                path.add_next(sub);
            }
            None => break,
        }
    }

    for id in subrings.keys() {
        path.add_next(id.clone());
    }
    path
}

/// Walks the rim of a fused system and orders its subrings.
///
/// The rim is the fused system without the bonds shared between subrings;
/// it is walked like a single ring. Subrings must have been walked already.
pub(super) fn walk_fused(registry: &mut StructureRegistry, id: &Identifier) -> Result<(), AnalysisError> {
    let unit = registry.get(id)?;
    if unit.kind() != UnitKind::FusedRing {
        return Err(AnalysisError::UnexpectedKind {
            unit: id.clone(),
            kind: unit.kind(),
            expected: "fused ring",
        });
    }

    let mut subrings = BTreeMap::new();
    let mut shared_count: BTreeMap<Identifier, usize> = BTreeMap::new();
    for sub in unit.sub_systems() {
        for bond in registry.bonds_of(sub)? {
            *shared_count.entry(bond).or_default() += 1;
        }
        subrings.insert(sub.clone(), registry.get(sub)?.positions().clone());
    }

    let atoms = registry.atoms_of(id)?;
    let rim_bonds: BTreeSet<Identifier> = registry
        .bonds_of(id)?
        .into_iter()
        .filter(|bond| shared_count.get(bond).is_none_or(|&count| count < 2))
        .collect();
    let rim_adjacency = adjacency(registry, &atoms, &rim_bonds)?;
    let rim = ring_positions(registry, id, &atoms, &rim_adjacency)?;
    let path = subring_path(&rim, &subrings);

    store_positions(registry, id, rim)?;
    if let UnitData::FusedRing { path: stored } = &mut registry.get_mut(id)?.data {
        *stored = path;
    }
    Ok(())
}
