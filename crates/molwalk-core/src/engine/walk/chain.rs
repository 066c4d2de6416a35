use super::{adjacency, store_positions, straight_path, straight_walk};
use crate::core::models::ids::Identifier;
use crate::core::models::unit::UnitKind;
use crate::core::registry::StructureRegistry;
use crate::engine::error::AnalysisError;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Left,
    Right,
}

/// Picks the end a chain is numbered from.
///
/// Both ends are compared step by step towards the middle. The end closer to
/// a connecting atom wins, the left one on a tie. Failing that, the end
/// closer to a multiple bond wins, the right one on a tie.
fn numbering_end(
    from_left: &[Identifier],
    connecting: &BTreeSet<Identifier>,
    is_multiple: impl Fn(&Identifier, &Identifier) -> bool,
) -> End {
    let from_right: Vec<&Identifier> = from_left.iter().rev().collect();
    let n = from_left.len();

    for i in 0..n.div_ceil(2) {
        if connecting.contains(&from_left[i]) {
            return End::Left;
        }
        if connecting.contains(from_right[i]) {
            return End::Right;
        }
    }
    for i in 0..n / 2 {
        if is_multiple(from_right[i], from_right[i + 1]) {
            return End::Right;
        }
        if is_multiple(&from_left[i], &from_left[i + 1]) {
            return End::Left;
        }
    }
    End::Left
}

pub(super) fn walk_chain(registry: &mut StructureRegistry, id: &Identifier) -> Result<(), AnalysisError> {
    let unit = registry.get(id)?;
    if unit.kind() != UnitKind::AliphaticChain {
        return Err(AnalysisError::UnexpectedKind {
            unit: id.clone(),
            kind: unit.kind(),
            expected: "aliphatic chain",
        });
    }
    let connecting = unit.connecting_atoms().clone();
    let atoms = registry.atoms_of(id)?;
    let bonds = registry.bonds_of(id)?;
    let adjacency = adjacency(registry, &atoms, &bonds)?;

    let ends: Vec<&Identifier> = adjacency
        .iter()
        .filter(|(_, neighbours)| neighbours.len() == 1)
        .map(|(atom, _)| atom)
        .collect();
    let [left, right] = ends.as_slice() else {
        return Err(AnalysisError::MalformedChain {
            chain: id.clone(),
            ends: ends.len(),
        });
    };

    let mut multiple = BTreeSet::new();
    for bond_id in &bonds {
        if let Some(bond) = registry.get(bond_id)?.bond() {
            if bond.order.is_multiple() {
                multiple.insert((bond.first.clone(), bond.second.clone()));
            }
        }
    }
    let is_multiple = |a: &Identifier, b: &Identifier| {
        let pair = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        multiple.contains(&pair)
    };

    let from_left = straight_path(&adjacency, left, None);
    let start = match numbering_end(&from_left, &connecting, is_multiple) {
        End::Left => *left,
        End::Right => *right,
    };
    let positions = straight_walk(&adjacency, start, None);
    store_positions(registry, id, positions)
}
