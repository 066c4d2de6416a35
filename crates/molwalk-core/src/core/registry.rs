use crate::core::models::ids::{Identifier, UnitKey};
use crate::core::models::unit::{StructuralUnit, UnitKind};
use slotmap::SlotMap;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Identifier '{0}' is already registered")]
    Duplicate(Identifier),
    #[error("Identifier '{0}' is not registered")]
    Unknown(Identifier),
}

/// The table of all structural units of one analysis.
///
/// Units live in a slot map arena; identifiers resolve to arena keys through a
/// hash index. The registry is partitioned into atoms, bonds and sets so that
/// membership tests by identifier are O(1) and listings come out in identifier
/// order. A registry is created per molecule and dropped with its analysis.
#[derive(Debug, Clone, Default)]
pub struct StructureRegistry {
    /// Primary storage for units.
    units: SlotMap<UnitKey, StructuralUnit>,
    /// Lookup map from identifier to arena key.
    index: HashMap<Identifier, UnitKey>,
    atoms: BTreeSet<Identifier>,
    bonds: BTreeSet<Identifier>,
    sets: BTreeSet<Identifier>,
    /// Counter behind [`StructureRegistry::next_set_id`].
    set_counter: usize,
}

impl StructureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a unit in the partition of its kind.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the identifier is already taken.
    pub fn register(&mut self, unit: StructuralUnit) -> Result<UnitKey, RegistryError> {
        if self.index.contains_key(&unit.id) {
            return Err(RegistryError::Duplicate(unit.id));
        }
        let id = unit.id.clone();
        match unit.kind() {
            UnitKind::Atom => self.atoms.insert(id.clone()),
            UnitKind::Bond => self.bonds.insert(id.clone()),
            _ => self.sets.insert(id.clone()),
        };
        let key = self.units.insert(unit);
        self.index.insert(id, key);
        Ok(key)
    }

    /// Hands out the next unused `asN` identifier, starting at `as1`.
    pub fn next_set_id(&mut self) -> Identifier {
        loop {
            self.set_counter += 1;
            let id = Identifier::set(self.set_counter);
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Looks up a unit regardless of its partition.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] if nothing is registered under `id`.
    pub fn get(&self, id: &Identifier) -> Result<&StructuralUnit, RegistryError> {
        self.index
            .get(id)
            .and_then(|&key| self.units.get(key))
            .ok_or_else(|| RegistryError::Unknown(id.clone()))
    }

    pub fn get_mut(&mut self, id: &Identifier) -> Result<&mut StructuralUnit, RegistryError> {
        match self.index.get(id) {
            Some(&key) => self
                .units
                .get_mut(key)
                .ok_or_else(|| RegistryError::Unknown(id.clone())),
            None => Err(RegistryError::Unknown(id.clone())),
        }
    }

    pub fn key(&self, id: &Identifier) -> Option<UnitKey> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.index.contains_key(id)
    }

    pub fn is_atom(&self, id: &Identifier) -> bool {
        self.atoms.contains(id)
    }

    pub fn is_bond(&self, id: &Identifier) -> bool {
        self.bonds.contains(id)
    }

    pub fn is_set(&self, id: &Identifier) -> bool {
        self.sets.contains(id)
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Identifier> {
        self.atoms.iter()
    }

    pub fn bonds(&self) -> impl Iterator<Item = &Identifier> {
        self.bonds.iter()
    }

    pub fn sets(&self) -> impl Iterator<Item = &Identifier> {
        self.sets.iter()
    }

    pub fn set_ids(&self) -> &BTreeSet<Identifier> {
        &self.sets
    }

    /// Set units of one kind, in identifier order.
    pub fn sets_of_kind(&self, kind: UnitKind) -> Vec<Identifier> {
        self.sets
            .iter()
            .filter(|id| self.get(id).is_ok_and(|u| u.kind() == kind))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The atom components of a unit; an atom is its own single atom.
    pub fn atoms_of(&self, id: &Identifier) -> Result<BTreeSet<Identifier>, RegistryError> {
        if self.is_atom(id) {
            return Ok(BTreeSet::from([id.clone()]));
        }
        Ok(self
            .get(id)?
            .components
            .iter()
            .filter(|c| self.is_atom(c))
            .cloned()
            .collect())
    }

    /// The bond components of a unit.
    pub fn bonds_of(&self, id: &Identifier) -> Result<BTreeSet<Identifier>, RegistryError> {
        Ok(self
            .get(id)?
            .components
            .iter()
            .filter(|c| self.is_bond(c))
            .cloned()
            .collect())
    }

    /// The contexts of `id` that are registered set units.
    pub fn set_contexts(&self, id: &Identifier) -> Result<BTreeSet<Identifier>, RegistryError> {
        Ok(self
            .get(id)?
            .contexts
            .iter()
            .filter(|c| self.is_set(c))
            .cloned()
            .collect())
    }
}
