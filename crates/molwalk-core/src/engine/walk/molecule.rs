use super::{depth_first, store_positions};
use crate::core::models::ids::Identifier;
use crate::core::models::positions::PositionMap;
use crate::core::models::unit::{UnitData, UnitKind};
use crate::core::registry::StructureRegistry;
use crate::engine::error::AnalysisError;
use crate::engine::heuristics::{Heuristic, rank};
use tracing::debug;

/// Orders the top-level units of the molecule and concatenates their
/// positions into the molecule's own.
pub(super) fn walk_molecule(
    registry: &mut StructureRegistry,
    id: &Identifier,
    heuristics: &[Heuristic],
) -> Result<(), AnalysisError> {
    let unit = registry.get(id)?;
    if unit.kind() != UnitKind::Molecule {
        return Err(AnalysisError::UnexpectedKind {
            unit: id.clone(),
            kind: unit.kind(),
            expected: "molecule",
        });
    }

    let candidates = rank(registry, heuristics, unit.sub_systems().iter().cloned())?;
    let path = depth_first(registry, &candidates)?;

    let mut positions = PositionMap::new();
    for child in path.values() {
        if registry.is_atom(child) {
            positions.add_next(child.clone());
            continue;
        }
        let unit = registry.get(child)?;
        positions.merge(unit.positions());
        if let UnitData::FusedRing { path: subrings } = &unit.data {
            for sub in subrings.values() {
                positions.merge(registry.get(sub)?.positions());
            }
        }
    }
    debug!("Molecule path visits {} top-level unit(s).", path.len());

    store_positions(registry, id, positions)?;
    if let UnitData::Molecule { path: stored } = &mut registry.get_mut(id)?.data {
        *stored = path;
    }
    Ok(())
}
