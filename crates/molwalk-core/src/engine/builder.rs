use super::error::AnalysisError;
use super::filter::filter_functional_groups;
use crate::core::models::ids::Identifier;
use crate::core::models::molecule::MoleculeGraph;
use crate::core::models::positions::PositionMap;
use crate::core::models::unit::{BondData, StructuralUnit, UnitData, UnitKind};
use crate::core::perception::{Candidate, FusedRingCandidate, family_name};
use crate::core::registry::StructureRegistry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Turns a molecule and its detected candidates into registered units.
///
/// Each method is one step of the unit-building pass and expects the steps
/// before it to have run: graph, rings, chains, functional groups, contexts,
/// attachments and finally the molecule root (after classification).
pub struct UnitBuilder {
    registry: StructureRegistry,
}

impl Default for UnitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitBuilder {
    pub fn new() -> Self {
        Self {
            registry: StructureRegistry::new(),
        }
    }

    pub fn registry(&self) -> &StructureRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut StructureRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> StructureRegistry {
        self.registry
    }

    /// Registers every atom and bond; bonds become external bonds and contexts
    /// of both endpoint atoms.
    pub fn register_graph(&mut self, molecule: &MoleculeGraph) -> Result<(), AnalysisError> {
        for (index, atom) in molecule.atoms().iter().enumerate() {
            self.registry.register(StructuralUnit::new(
                MoleculeGraph::atom_id(index),
                UnitData::Atom(atom.clone()),
            ))?;
        }

        for (index, bond) in molecule.bonds().iter().enumerate() {
            let id = MoleculeGraph::bond_id(index);
            let mut data = BondData::new(
                MoleculeGraph::atom_id(bond.atom1),
                MoleculeGraph::atom_id(bond.atom2),
                bond.order,
            );
            data.aromatic = bond.aromatic;
            data.in_ring = bond.in_ring;
            let endpoints = [data.first.clone(), data.second.clone()];

            for atom_id in &endpoints {
                let atom = self.registry.get_mut(atom_id)?;
                atom.external_bonds.insert(id.clone());
                atom.contexts.insert(id.clone());
            }
            self.registry.register(
                StructuralUnit::new(id, UnitData::Bond(data)).with_components(endpoints),
            )?;
        }
        Ok(())
    }

    /// Registers a set unit over the candidate's atoms and bonds.
    ///
    /// Atoms become positioned children of the new unit unless it is a fused
    /// ring, whose positioned children are its subrings.
    fn register_set(
        &mut self,
        data: UnitData,
        candidate: &Candidate,
    ) -> Result<Identifier, AnalysisError> {
        for component in candidate.components() {
            self.registry.get(component)?;
        }
        let id = self.registry.next_set_id();
        let kind = data.kind();
        let mut unit = StructuralUnit::new(id.clone(), data)
            .with_components(candidate.components().cloned());

        if kind != UnitKind::FusedRing {
            unit.sub_systems.extend(candidate.atoms.iter().cloned());
            for atom_id in &candidate.atoms {
                self.registry.get_mut(atom_id)?.super_systems.insert(id.clone());
            }
        }
        self.registry.register(unit)?;
        debug!(
            "Registered {} {} with {} atom(s).",
            kind,
            id,
            candidate.atom_count()
        );
        Ok(id)
    }

    pub fn register_rings(
        &mut self,
        fused_rings: &[FusedRingCandidate],
        isolated_rings: &[Candidate],
    ) -> Result<(), AnalysisError> {
        for fused in fused_rings {
            let fused_id = self.register_set(
                UnitData::FusedRing {
                    path: PositionMap::new(),
                },
                &fused.ring,
            )?;
            for subring in &fused.subrings {
                let sub_id = self.register_set(UnitData::SubRing, subring)?;
                let sub = self.registry.get_mut(&sub_id)?;
                sub.super_systems.insert(fused_id.clone());
                sub.contexts.insert(fused_id.clone());
                self.registry
                    .get_mut(&fused_id)?
                    .sub_systems
                    .insert(sub_id);
            }
        }
        for ring in isolated_rings {
            self.register_set(UnitData::IsolatedRing, ring)?;
        }
        Ok(())
    }

    pub fn register_chains(
        &mut self,
        chains: &[Candidate],
        min_length: usize,
    ) -> Result<(), AnalysisError> {
        for chain in chains {
            if chain.atom_count() < min_length {
                debug!(
                    "Ignoring chain candidate of {} atom(s) below the minimum of {}.",
                    chain.atom_count(),
                    min_length
                );
                continue;
            }
            self.register_set(UnitData::AliphaticChain, chain)?;
        }
        Ok(())
    }

    /// Filters the raw matches against the units registered so far and
    /// registers the survivors as functional groups.
    pub fn register_functional_groups(
        &mut self,
        candidates: &BTreeMap<String, Candidate>,
    ) -> Result<Vec<Identifier>, AnalysisError> {
        let mut existing = Vec::new();
        for id in self.registry.sets() {
            if self.registry.get(id)?.kind() != UnitKind::SubRing {
                existing.push(self.registry.atoms_of(id)?);
            }
        }

        let mut registered = Vec::new();
        for (name, candidate) in filter_functional_groups(&existing, candidates) {
            let data = UnitData::FunctionalGroup {
                name: family_name(&name).to_string(),
            };
            registered.push(self.register_set(data, &candidate)?);
        }
        Ok(registered)
    }

    /// Adds every set unit to the contexts of each of its components.
    pub fn compute_contexts(&mut self) -> Result<(), AnalysisError> {
        let sets: Vec<Identifier> = self.registry.sets().cloned().collect();
        for set_id in sets {
            let components: Vec<Identifier> =
                self.registry.get(&set_id)?.components.iter().cloned().collect();
            for component in components {
                self.registry
                    .get_mut(&component)?
                    .contexts
                    .insert(set_id.clone());
            }
        }
        Ok(())
    }

    /// Computes external bonds and connecting atoms of every set unit.
    pub fn compute_attachments(&mut self) -> Result<(), AnalysisError> {
        let sets: Vec<Identifier> = self.registry.sets().cloned().collect();
        for set_id in sets {
            let atoms = self.registry.atoms_of(&set_id)?;
            let own_bonds = self.registry.bonds_of(&set_id)?;

            let mut external_bonds = BTreeSet::new();
            let mut connecting_atoms = BTreeSet::new();
            for atom_id in &atoms {
                for bond in &self.registry.get(atom_id)?.external_bonds {
                    if !own_bonds.contains(bond) {
                        external_bonds.insert(bond.clone());
                        connecting_atoms.insert(atom_id.clone());
                    }
                }
            }

            let unit = self.registry.get_mut(&set_id)?;
            unit.external_bonds = external_bonds;
            unit.connecting_atoms = connecting_atoms;
        }
        Ok(())
    }

    /// Registers the molecule root over all atoms and bonds.
    ///
    /// Its positioned children are the top-level set units and every atom
    /// that belongs to no set unit.
    pub fn build_molecule(&mut self) -> Result<Identifier, AnalysisError> {
        let mut top_level = BTreeSet::new();
        for id in self.registry.sets() {
            if self.registry.get(id)?.super_systems.is_empty() {
                top_level.insert(id.clone());
            }
        }
        for id in self.registry.atoms() {
            if self.registry.set_contexts(id)?.is_empty() {
                top_level.insert(id.clone());
            }
        }

        let id = self.registry.next_set_id();
        let mut molecule = StructuralUnit::new(
            id.clone(),
            UnitData::Molecule {
                path: PositionMap::new(),
            },
        )
        .with_components(self.registry.atoms().chain(self.registry.bonds()).cloned());
        molecule.sub_systems = top_level.clone();

        for child in &top_level {
            self.registry.get_mut(child)?.super_systems.insert(id.clone());
        }
        self.registry.register(molecule)?;
        debug!(
            "Molecule {} has {} top-level component(s).",
            id,
            top_level.len()
        );
        Ok(id)
    }
}
