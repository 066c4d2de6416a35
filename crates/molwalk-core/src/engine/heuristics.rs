use crate::core::models::ids::Identifier;
use crate::core::models::unit::UnitKind;
use crate::core::registry::{RegistryError, StructureRegistry};
use serde::Deserialize;
use std::cmp::Ordering;

/// A ranking strategy for traversal priority.
///
/// Every strategy orders the preferred unit first, i.e. `Ordering::Less`
/// means the left unit ranks higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Rings before chains before functional groups, larger first within a
    /// kind. Singleton atoms follow and are left to the next strategy.
    #[serde(rename = "type", alias = "kind")]
    Kind,
    /// More atoms first.
    Count,
    /// Heavier first, by standard atomic weights.
    Weight,
}

/// The properties the heuristics compare, resolved once per unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitProfile {
    pub kind: UnitKind,
    pub atom_count: usize,
    pub weight: f64,
}

impl UnitProfile {
    pub fn of(registry: &StructureRegistry, id: &Identifier) -> Result<Self, RegistryError> {
        let unit = registry.get(id)?;
        let atoms = registry.atoms_of(id)?;
        Ok(Self {
            kind: unit.kind(),
            atom_count: atoms.len(),
            weight: total_weight(registry, atoms.iter())?,
        })
    }
}

/// Sum of the standard atomic weights of the given atoms.
pub fn total_weight<'a>(
    registry: &StructureRegistry,
    atoms: impl Iterator<Item = &'a Identifier>,
) -> Result<f64, RegistryError> {
    let mut weight = 0.0;
    for id in atoms {
        if let Some(atom) = registry.get(id)?.atom() {
            weight += atom.mass();
        }
    }
    Ok(weight)
}

/// The weight of any unit: an atom's own mass, or the sum over a set's atoms.
pub fn unit_weight(registry: &StructureRegistry, id: &Identifier) -> Result<f64, RegistryError> {
    let atoms = registry.atoms_of(id)?;
    total_weight(registry, atoms.iter())
}

/// Place of a kind, and whether size breaks ties within it. Singleton atoms
/// share the last place.
fn kind_rank(kind: UnitKind) -> (u8, bool) {
    match kind {
        UnitKind::IsolatedRing | UnitKind::FusedRing | UnitKind::SubRing => (0, true),
        UnitKind::AliphaticChain => (1, true),
        UnitKind::FunctionalGroup => (2, true),
        _ => (3, false),
    }
}

impl Heuristic {
    pub fn compare(self, a: &UnitProfile, b: &UnitProfile) -> Ordering {
        match self {
            Self::Kind => {
                let (rank_a, sized) = kind_rank(a.kind);
                let (rank_b, _) = kind_rank(b.kind);
                rank_a.cmp(&rank_b).then_with(|| {
                    if sized {
                        b.atom_count.cmp(&a.atom_count)
                    } else {
                        Ordering::Equal
                    }
                })
            }
            Self::Count => b.atom_count.cmp(&a.atom_count),
            Self::Weight => b.weight.total_cmp(&a.weight),
        }
    }
}

/// Runs the strategies in order and returns the first non-equal result.
pub fn compare(strategies: &[Heuristic], a: &UnitProfile, b: &UnitProfile) -> Ordering {
    strategies
        .iter()
        .map(|h| h.compare(a, b))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Sorts identifiers by the strategies, falling back to identifier order.
pub fn rank(
    registry: &StructureRegistry,
    strategies: &[Heuristic],
    ids: impl IntoIterator<Item = Identifier>,
) -> Result<Vec<Identifier>, RegistryError> {
    let mut profiled = ids
        .into_iter()
        .map(|id| UnitProfile::of(registry, &id).map(|profile| (id, profile)))
        .collect::<Result<Vec<_>, _>>()?;
    profiled.sort_by(|(id_a, a), (id_b, b)| compare(strategies, a, b).then_with(|| id_a.cmp(id_b)));
    Ok(profiled.into_iter().map(|(id, _)| id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(kind: UnitKind, atom_count: usize, weight: f64) -> UnitProfile {
        UnitProfile {
            kind,
            atom_count,
            weight,
        }
    }

    #[test]
    fn kind_prefers_rings_then_chains_then_groups() {
        let ring = profile(UnitKind::IsolatedRing, 5, 60.0);
        let chain = profile(UnitKind::AliphaticChain, 8, 96.0);
        let group = profile(UnitKind::FunctionalGroup, 2, 30.0);
        assert_eq!(Heuristic::Kind.compare(&ring, &chain), Ordering::Less);
        assert_eq!(Heuristic::Kind.compare(&group, &chain), Ordering::Greater);
        assert_eq!(
            Heuristic::Kind.compare(&profile(UnitKind::FusedRing, 10, 0.0), &ring),
            Ordering::Less
        );
    }

    #[test]
    fn kind_ties_go_to_larger_units() {
        let small = profile(UnitKind::AliphaticChain, 3, 0.0);
        let large = profile(UnitKind::AliphaticChain, 6, 0.0);
        assert_eq!(Heuristic::Kind.compare(&large, &small), Ordering::Less);
    }

    #[test]
    fn kind_leaves_atoms_after_every_ranked_kind() {
        let bromine = profile(UnitKind::Atom, 1, 79.904);
        let oxygen = profile(UnitKind::Atom, 1, 15.999);
        let group = profile(UnitKind::FunctionalGroup, 2, 28.0);
        assert_eq!(Heuristic::Kind.compare(&group, &bromine), Ordering::Less);
        assert_eq!(Heuristic::Kind.compare(&bromine, &oxygen), Ordering::Equal);
    }

    #[test]
    fn default_strategies_give_a_transitive_order() {
        let profiles = [
            profile(UnitKind::IsolatedRing, 6, 72.066),
            profile(UnitKind::FusedRing, 10, 120.11),
            profile(UnitKind::AliphaticChain, 8, 96.088),
            profile(UnitKind::AliphaticChain, 3, 36.033),
            profile(UnitKind::FunctionalGroup, 3, 44.009),
            profile(UnitKind::Atom, 1, 79.904),
            profile(UnitKind::Atom, 1, 126.904),
            profile(UnitKind::Atom, 1, 15.999),
        ];
        let strategies = [Heuristic::Kind, Heuristic::Weight];
        for a in &profiles {
            for b in &profiles {
                assert_eq!(compare(&strategies, a, b), compare(&strategies, b, a).reverse());
                for c in &profiles {
                    if compare(&strategies, a, b).is_le() && compare(&strategies, b, c).is_le() {
                        assert!(compare(&strategies, a, c).is_le(), "{a:?} {b:?} {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn count_and_weight_are_descending() {
        let light = profile(UnitKind::Atom, 1, 12.0);
        let heavy = profile(UnitKind::Atom, 1, 35.45);
        assert_eq!(Heuristic::Weight.compare(&heavy, &light), Ordering::Less);
        assert_eq!(Heuristic::Count.compare(&heavy, &light), Ordering::Equal);
    }

    #[test]
    fn composite_returns_first_decisive_strategy() {
        let atom = profile(UnitKind::Atom, 1, 35.45);
        let ring = profile(UnitKind::IsolatedRing, 6, 72.0);
        let strategies = [Heuristic::Kind, Heuristic::Weight];
        assert_eq!(compare(&strategies, &ring, &atom), Ordering::Less);
        assert_eq!(compare(&[Heuristic::Count], &atom, &atom), Ordering::Equal);
    }

    #[test]
    fn heuristic_names_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            order: Vec<Heuristic>,
        }
        let parsed: Wrapper = toml::from_str(r#"order = ["type", "kind", "count", "weight"]"#).unwrap();
        assert_eq!(
            parsed.order,
            vec![
                Heuristic::Kind,
                Heuristic::Kind,
                Heuristic::Count,
                Heuristic::Weight
            ]
        );
    }
}
