//! # Patterns Module
//!
//! Named SMARTS patterns used to detect functional-group candidates.
//!
//! ## Key Components
//!
//! - [`library`] - Loading and accessing the functional-group pattern library
//!
//! ## Usage
//!
//! ```ignore
//! use molwalk::core::patterns::library::FunctionalGroupLibrary;
//!
//! let library = FunctionalGroupLibrary::load("groups.toml".as_ref())?;
//! let hydroxyl = library.get("Hydroxyl");
//! ```

pub mod library;
