//! Position assignment.
//!
//! Every set unit gets a [`PositionMap`] over its atoms; fused rings and the
//! molecule additionally get a `path` over their positioned children. Units
//! are walked bottom-up so that a parent can reuse its children's positions.

mod chain;
mod fused;
mod group;
mod molecule;
mod ring;

use super::error::AnalysisError;
use super::heuristics::Heuristic;
use crate::core::models::ids::Identifier;
use crate::core::models::positions::PositionMap;
use crate::core::models::unit::UnitKind;
use crate::core::registry::StructureRegistry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Atom neighbourhoods restricted to one unit.
pub(crate) type Adjacency = BTreeMap<Identifier, BTreeSet<Identifier>>;

/// Builds the neighbourhoods of `atoms` over the given bonds.
///
/// Bonds with an endpoint outside `atoms` are ignored; every atom gets an
/// entry even when it has no walkable bond.
pub(crate) fn adjacency<'a>(
    registry: &StructureRegistry,
    atoms: &BTreeSet<Identifier>,
    bonds: impl IntoIterator<Item = &'a Identifier>,
) -> Result<Adjacency, AnalysisError> {
    let mut adjacency: Adjacency = atoms
        .iter()
        .map(|atom| (atom.clone(), BTreeSet::new()))
        .collect();
    for bond_id in bonds {
        let Some(bond) = registry.get(bond_id)?.bond() else {
            continue;
        };
        if atoms.contains(&bond.first) && atoms.contains(&bond.second) {
            adjacency
                .entry(bond.first.clone())
                .or_default()
                .insert(bond.second.clone());
            adjacency
                .entry(bond.second.clone())
                .or_default()
                .insert(bond.first.clone());
        }
    }
    Ok(adjacency)
}

/// The path of a straight walk, without the unreachable leftovers.
///
/// Each step goes to the smallest unvisited neighbour; `first_step`
/// overrides the choice for the very first step if it is a neighbour.
fn straight_path(
    adjacency: &Adjacency,
    start: &Identifier,
    first_step: Option<&Identifier>,
) -> Vec<Identifier> {
    let mut path = vec![start.clone()];
    let mut visited = BTreeSet::from([start.clone()]);
    let mut current = start.clone();
    let mut forced = first_step.filter(|step| {
        adjacency
            .get(start)
            .is_some_and(|neighbours| neighbours.contains(*step))
    });

    loop {
        let next = match forced.take() {
            Some(step) => Some(step.clone()),
            None => adjacency
                .get(&current)
                .and_then(|neighbours| neighbours.iter().find(|n| !visited.contains(*n)))
                .cloned(),
        };
        let Some(next) = next else {
            break;
        };
        visited.insert(next.clone());
        path.push(next.clone());
        current = next;
    }
    path
}

/// Walks from `start` and appends atoms the walk cannot reach in identifier
/// order.
pub(crate) fn straight_walk(
    adjacency: &Adjacency,
    start: &Identifier,
    first_step: Option<&Identifier>,
) -> PositionMap {
    let mut positions: PositionMap = straight_path(adjacency, start, first_step)
        .into_iter()
        .collect();
    for atom in adjacency.keys() {
        positions.add_next(atom.clone());
    }
    positions
}

/// Walks from `start` in the direction that reaches one of `targets` first.
///
/// `targets` is ranked; when both directions reach a target after the same
/// number of steps, the direction reaching the better-ranked target wins, and
/// after that the direction through the smaller neighbour.
pub(crate) fn bidirectional_walk(
    adjacency: &Adjacency,
    start: &Identifier,
    targets: &[Identifier],
) -> PositionMap {
    let rank_of = |atom: &Identifier| targets.iter().position(|t| t == atom && t != start);
    let mut best: Option<((usize, usize), &Identifier)> = None;

    if let Some(neighbours) = adjacency.get(start) {
        for direction in neighbours {
            let hit = straight_path(adjacency, start, Some(direction))
                .iter()
                .enumerate()
                .skip(1)
                .find_map(|(step, atom)| rank_of(atom).map(|rank| (step, rank)));
            if let Some(hit) = hit {
                if best.is_none_or(|(current, _)| hit < current) {
                    best = Some((hit, direction));
                }
            }
        }
    }
    straight_walk(adjacency, start, best.map(|(_, direction)| direction))
}

/// Depth-first traversal over connection partners.
///
/// `ranked` lists the candidates best first. From each visited unit the
/// unvisited partners among the candidates are pushed worst first, so the
/// best one is visited next. When the stack drains with candidates left the
/// best remaining candidate starts a new walk.
pub(crate) fn depth_first(
    registry: &StructureRegistry,
    ranked: &[Identifier],
) -> Result<PositionMap, AnalysisError> {
    let rank: HashMap<&Identifier, usize> = ranked.iter().enumerate().map(|(i, id)| (id, i)).collect();
    let mut visited = PositionMap::new();

    for seed in ranked {
        if visited.contains(seed) {
            continue;
        }
        let mut stack = vec![seed.clone()];
        while let Some(current) = stack.pop() {
            if visited.contains(&current) {
                continue;
            }
            visited.add_next(current.clone());

            let mut partners: Vec<(usize, &Identifier)> = registry
                .get(&current)?
                .connections()
                .iter()
                .filter(|c| !visited.contains(&c.connected))
                .filter_map(|c| rank.get(&c.connected).map(|&r| (r, &c.connected)))
                .collect();
            partners.sort();
            partners.dedup();
            stack.extend(partners.into_iter().rev().map(|(_, id)| id.clone()));
        }
    }
    Ok(visited)
}

pub(crate) fn store_positions(
    registry: &mut StructureRegistry,
    id: &Identifier,
    positions: PositionMap,
) -> Result<(), AnalysisError> {
    debug!("Positioned {} component(s) of {}.", positions.len(), id);
    registry.get_mut(id)?.positions = positions;
    Ok(())
}

/// Walks every set unit bottom-up and finally the molecule root.
///
/// Subrings come first, then the other rings, chains and groups, then fused
/// systems (whose paths need their subrings' positions), then the molecule.
/// Positions are recomputed from scratch on every call.
///
/// # Arguments
///
/// * `registry` - The classified registry holding every unit.
/// * `molecule` - The identifier of the molecule root.
/// * `heuristics` - Strategies ranking the molecule's top-level units.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedChain`] for a chain without exactly two
/// ends, and [`AnalysisError::InvalidConnection`] for a ring connection that
/// does not touch the ring.
pub fn walk_all(
    registry: &mut StructureRegistry,
    molecule: &Identifier,
    heuristics: &[Heuristic],
) -> Result<(), AnalysisError> {
    let rings = registry
        .sets_of_kind(UnitKind::SubRing)
        .into_iter()
        .chain(registry.sets_of_kind(UnitKind::IsolatedRing));
    for id in rings {
        ring::walk_ring(registry, &id)?;
    }
    for id in registry.sets_of_kind(UnitKind::AliphaticChain) {
        chain::walk_chain(registry, &id)?;
    }
    for id in registry.sets_of_kind(UnitKind::FunctionalGroup) {
        group::walk_group(registry, &id)?;
    }
    for id in registry.sets_of_kind(UnitKind::FusedRing) {
        fused::walk_fused(registry, &id)?;
    }
    molecule::walk_molecule(registry, molecule, heuristics)
}
