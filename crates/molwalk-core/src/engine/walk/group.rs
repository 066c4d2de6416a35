use super::{depth_first, store_positions};
use crate::core::models::ids::Identifier;
use crate::core::models::unit::UnitKind;
use crate::core::registry::StructureRegistry;
use crate::engine::error::AnalysisError;

/// Walks a functional group depth-first over its atoms.
///
/// The walk starts at the first connecting atom, or at the heaviest atom when
/// the group is attached to nothing. Heavier atoms are visited first.
pub(super) fn walk_group(registry: &mut StructureRegistry, id: &Identifier) -> Result<(), AnalysisError> {
    let unit = registry.get(id)?;
    if unit.kind() != UnitKind::FunctionalGroup {
        return Err(AnalysisError::UnexpectedKind {
            unit: id.clone(),
            kind: unit.kind(),
            expected: "functional group",
        });
    }
    let anchor = unit.connecting_atoms().first().cloned();

    let mut weighted = Vec::new();
    for atom in registry.atoms_of(id)? {
        let mass = registry.get(&atom)?.atom().map_or(0.0, |a| a.mass());
        weighted.push((mass, atom));
    }
    weighted.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    let mut ranked: Vec<Identifier> = weighted.into_iter().map(|(_, atom)| atom).collect();

    if let Some(anchor) = anchor {
        if let Some(index) = ranked.iter().position(|atom| *atom == anchor) {
            let anchor = ranked.remove(index);
            ranked.insert(0, anchor);
        }
    }

    let positions = depth_first(registry, &ranked)?;
    store_positions(registry, id, positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn group_order(fixture: &testing::Fixture) -> Vec<String> {
        let (mut registry, _) = testing::classified_registry(fixture);
        let group = registry.sets_of_kind(UnitKind::FunctionalGroup)[0].clone();
        walk_group(&mut registry, &group).unwrap();
        registry
            .get(&group)
            .unwrap()
            .positions()
            .values()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn attached_group_starts_at_its_connecting_atom() {
        // C3 joins the acid to the chain; the oxygens follow, a4 before a5.
        assert_eq!(
            group_order(&testing::propanoic_acid()),
            ["a3", "a4", "a5"]
        );
    }

    #[test]
    fn free_group_starts_at_its_heaviest_atom() {
        // Formic acid: O=C-O with no attachment. Both oxygens outweigh the
        // carbon, so the walk starts at a1 and reaches a3 through a2.
        assert_eq!(group_order(&testing::formic_acid()), ["a1", "a2", "a3"]);
    }
}
