//! # Engine Module
//!
//! The analysis engine turns a molecule and its externally detected candidate
//! substructures into a registry of cross-referenced structural units.
//!
//! ## Architecture
//!
//! - **Unit Building** ([`builder`]) - Registers atoms, bonds and candidate units and wires up
//!   their containment, contexts and attachments
//! - **Overlap Filtering** ([`filter`]) - Prunes overlapping functional-group matches
//! - **Connectivity** ([`classify`]) - Classifies how units and atoms are linked
//! - **Position Assignment** ([`walk`]) - Numbers the components of every unit and orders the
//!   molecule's top-level units
//! - **Ranking** ([`heuristics`]) - Pluggable comparators that decide traversal priority
//! - **Configuration** ([`config`]) and **Error Handling** ([`error`])

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod heuristics;
pub mod walk;
