//! # molwalk Core Library
//!
//! A structural decomposition and connectivity engine for molecular graphs.
//!
//! Given a molecule whose rings, chains and functional groups have been
//! detected by an external cheminformatics toolkit, the library builds a
//! hierarchy of named structural units, classifies how they are connected and
//! assigns a deterministic numbering to the components of every unit.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Identifiers, the structural unit model, the
//!   analysis-scoped registry, the input molecule graph and the interface to the
//!   external toolkit.
//!
//! - **[`engine`]: The Logic Core.** Unit building, overlap filtering, connectivity
//!   classification, ranking heuristics and the position walks.
//!
//! - **[`workflows`]: The Public API.** Runs the complete pipeline for a molecule or
//!   a batch of molecules and exposes the resulting model.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
