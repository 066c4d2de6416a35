use crate::core::models::ids::Identifier;
use crate::core::models::molecule::MoleculeGraph;
use crate::core::models::positions::PositionMap;
use crate::core::models::unit::{StructuralUnit, UnitKind};
use crate::core::patterns::library::FunctionalGroupLibrary;
use crate::core::perception::{Detections, StructurePerceiver, perceive};
use crate::core::registry::{RegistryError, StructureRegistry};
use crate::engine::builder::UnitBuilder;
use crate::engine::classify::classify_connections;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;
use crate::engine::walk::walk_all;
use nalgebra::{Point2, Vector2};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument, warn};

/// The structural model of one molecule.
///
/// Owns the registry of every unit the analysis produced; nothing is shared
/// with other analyses.
#[derive(Debug, Clone)]
pub struct Analysis {
    registry: StructureRegistry,
    molecule: Identifier,
}

impl Analysis {
    pub fn registry(&self) -> &StructureRegistry {
        &self.registry
    }

    pub fn unit(&self, id: &Identifier) -> Result<&StructuralUnit, RegistryError> {
        self.registry.get(id)
    }

    /// The molecule root.
    pub fn molecule(&self) -> Result<&StructuralUnit, RegistryError> {
        self.registry.get(&self.molecule)
    }

    pub fn molecule_id(&self) -> &Identifier {
        &self.molecule
    }

    /// The order of the molecule's top-level units and singleton atoms.
    pub fn path(&self) -> Result<&PositionMap, RegistryError> {
        let molecule = self.molecule()?;
        molecule
            .path()
            .ok_or_else(|| RegistryError::Unknown(self.molecule.clone()))
    }

    pub fn positions(&self, id: &Identifier) -> Result<&PositionMap, RegistryError> {
        Ok(self.registry.get(id)?.positions())
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Identifier> {
        self.registry.atoms()
    }

    pub fn bonds(&self) -> impl Iterator<Item = &Identifier> {
        self.registry.bonds()
    }

    /// Set units in identifier order, the molecule root included.
    pub fn units(&self) -> impl Iterator<Item = &Identifier> {
        self.registry.sets()
    }

    pub fn units_of_kind(&self, kind: UnitKind) -> Vec<Identifier> {
        self.registry.sets_of_kind(kind)
    }

    /// Mean 2-D position of the atoms of a unit; `None` for a unit without
    /// atoms.
    pub fn centroid(&self, id: &Identifier) -> Result<Option<Point2<f64>>, RegistryError> {
        let atoms = self.registry.atoms_of(id)?;
        if atoms.is_empty() {
            return Ok(None);
        }
        let mut sum = Vector2::<f64>::zeros();
        for atom_id in &atoms {
            if let Some(atom) = self.registry.get(atom_id)?.atom() {
                sum += atom.position.coords;
            }
        }
        Ok(Some(Point2::from(sum / atoms.len() as f64)))
    }
}

/// Builds the structural model of a molecule from already detected candidates.
///
/// # Arguments
///
/// * `molecule` - The atom and bond graph.
/// * `detections` - Rings, chains and functional groups found in `molecule`.
/// * `config` - Chain length threshold and ranking heuristics.
///
/// # Return
///
/// Returns the [`Analysis`] owning every unit, rooted at a new molecule unit.
///
/// # Errors
///
/// Returns an [`AnalysisError`] if a detection names an unknown atom, a chain
/// is malformed, or a connection cannot be classified.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run(
    molecule: &MoleculeGraph,
    detections: &Detections,
    config: &AnalysisConfig,
) -> Result<Analysis, AnalysisError> {
    // === Phase 1: Atoms, bonds and detected units ===
    info!(
        atoms = molecule.atom_count(),
        bonds = molecule.bond_count(),
        "Registering structural units."
    );
    let mut builder = UnitBuilder::new();
    builder.register_graph(molecule)?;
    builder.register_rings(&detections.fused_rings, &detections.isolated_rings)?;
    builder.register_chains(&detections.chains, config.min_chain_length)?;

    // === Phase 2: Functional groups ===
    let groups = builder.register_functional_groups(&detections.functional_groups)?;
    info!(
        candidates = detections.functional_groups.len(),
        kept = groups.len(),
        "Functional groups filtered."
    );

    // === Phase 3: Contexts and attachments ===
    builder.compute_contexts()?;
    builder.compute_attachments()?;

    // === Phase 4: Connectivity ===
    classify_connections(builder.registry_mut())?;

    // === Phase 5: Molecule root ===
    let root = builder.build_molecule()?;

    // === Phase 6: Positions ===
    let mut registry = builder.into_registry();
    walk_all(&mut registry, &root, &config.heuristics)?;

    info!(
        units = registry.set_ids().len(),
        "Analysis complete."
    );
    Ok(Analysis {
        registry,
        molecule: root,
    })
}

/// Runs the toolkit over a molecule and analyses what it found.
///
/// # Arguments
///
/// * `molecule` - The atom and bond graph.
/// * `perceiver` - The toolkit detecting rings, chains and SMARTS matches.
/// * `library` - Functional group patterns to match.
/// * `config` - Analysis settings, including the subring strategy.
///
/// # Errors
///
/// Same as [`run`]. Patterns the toolkit cannot match are skipped.
pub fn analyze<P: StructurePerceiver + ?Sized>(
    molecule: &MoleculeGraph,
    perceiver: &P,
    library: &FunctionalGroupLibrary,
    config: &AnalysisConfig,
) -> Result<Analysis, AnalysisError> {
    let detections = perceive(
        molecule,
        perceiver,
        library,
        config.subring_strategy,
        config.min_chain_length,
    );
    run(molecule, &detections, config)
}

/// Analyses independent molecules.
///
/// A failing molecule is logged and its error kept in its slot; the others
/// are unaffected. Results come back in input order.
///
/// # Arguments
///
/// * `inputs` - Molecules paired with their detections.
/// * `config` - Settings shared by every molecule.
///
/// # Return
///
/// Returns one result per input.
pub fn analyze_batch(
    inputs: &[(MoleculeGraph, Detections)],
    config: &AnalysisConfig,
) -> Vec<Result<Analysis, AnalysisError>> {
    #[cfg(not(feature = "parallel"))]
    let iterator = inputs.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = inputs.par_iter().enumerate();

    let results: Vec<Result<Analysis, AnalysisError>> = iterator
        .map(|(index, (molecule, detections))| {
            let result = run(molecule, detections, config);
            if let Err(e) = &result {
                warn!("Skipping molecule {} of the batch: {}", index, e);
            }
            result
        })
        .collect();

    info!(
        molecules = inputs.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "Batch analysis finished."
    );
    results
}
