//! # Workflows Module
//!
//! High-level entry points that run the complete analysis pipeline.
//!
//! - **Analysis Workflow** ([`analyze`]) - From a molecule (and either a toolkit or its
//!   detections) to a fully positioned structural model, for one molecule or a batch.

pub mod analyze;
