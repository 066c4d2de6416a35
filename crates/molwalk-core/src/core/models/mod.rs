//! # Core Models Module
//!
//! This module contains the data structures that describe a molecule and the
//! structural units derived from it.
//!
//! ## Overview
//!
//! Two layers of models live here:
//!
//! - **Input graph** - [`molecule::MoleculeGraph`] with its [`atom::Atom`]s and
//!   [`topology::Bond`]s, exactly as delivered by the external chemistry toolkit.
//! - **Unit model** - [`unit::StructuralUnit`], the tagged union of atoms, bonds,
//!   rings, chains, functional groups and the molecule root, cross-referenced by
//!   [`ids::Identifier`] and numbered by [`positions::PositionMap`].
//!
//! ## Key Components
//!
//! - [`ids`] - Structure identifiers and their total order
//! - [`atom`] - Atom properties delivered by the toolkit
//! - [`topology`] - Bonds and bond orders
//! - [`molecule`] - The input molecular graph
//! - [`positions`] - The 1-based bijective position map
//! - [`unit`] - Structural units and their connections

pub mod atom;
pub mod ids;
pub mod molecule;
pub mod positions;
pub mod topology;
pub mod unit;
