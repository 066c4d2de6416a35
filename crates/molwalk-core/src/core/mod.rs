//! # Core Module
//!
//! This module provides the data model shared by every stage of a structural
//! analysis: the input molecular graph, structure identifiers, structural units
//! and the registry that owns them for the duration of one analysis.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, structural units and position maps
//! - **Unit Storage** ([`registry`]) - The analysis-scoped arena of structural units
//! - **Toolkit Interface** ([`perception`]) - Candidate substructures delivered by the external toolkit
//! - **Pattern Library** ([`patterns`]) - Named SMARTS patterns for functional groups
//! - **Utilities** ([`utils`]) - Element data

pub mod models;
pub mod patterns;
pub mod perception;
pub mod registry;
pub mod utils;
