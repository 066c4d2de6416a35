use thiserror::Error;

use crate::core::models::ids::Identifier;
use crate::core::models::unit::{ConnectionKind, UnitKind};
use crate::core::registry::RegistryError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Registry error: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },

    #[error("Aliphatic chain {chain} has {ends} terminal atom(s), expected exactly 2")]
    MalformedChain { chain: Identifier, ends: usize },

    #[error("Invalid {kind} connection on {unit} via {connector}: {reason}")]
    InvalidConnection {
        unit: Identifier,
        kind: ConnectionKind,
        connector: Identifier,
        reason: &'static str,
    },

    #[error("Unit {unit} of kind {kind} cannot be walked as {expected}")]
    UnexpectedKind {
        unit: Identifier,
        kind: UnitKind,
        expected: &'static str,
    },
}
