//! Error types for the contract.

use cartrack_core::{CoreError, ValidationError};
use cartrack_ledger::LedgerError;
use thiserror::Error;

use crate::identity::IdentityError;

/// Errors that terminate a contract invocation.
///
/// The display form of each variant is the failure message returned to the
/// caller in a [`crate::Response`].
#[derive(Debug, Error)]
pub enum ContractError {
    /// A required argument is missing.
    #[error("invalid number of arguments: {action} expects {expected}, got {got}")]
    Arity {
        action: &'static str,
        expected: usize,
        got: usize,
    },

    /// The payload does not parse into the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(CoreError),

    /// The payload parsed but is semantically invalid.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The caller's identity could not be resolved.
    #[error("unable to retrieve the invoker identity: {0}")]
    IdentityUnavailable(#[from] IdentityError),

    /// The ledger rejected a state access.
    #[error("unable to store {key}: {source}")]
    Persistence {
        key: String,
        #[source]
        source: LedgerError,
    },

    /// The action name is not recognized.
    #[error("invalid action provided: {0}")]
    InvalidAction(String),

    /// An outgoing payload could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(CoreError),
}

/// Coarse classification of a [`ContractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Arity,
    MalformedInput,
    Validation,
    IdentityUnavailable,
    Persistence,
    InvalidAction,
    Encoding,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Arity { .. } => ErrorKind::Arity,
            ContractError::MalformedInput(_) => ErrorKind::MalformedInput,
            ContractError::Validation(_) => ErrorKind::Validation,
            ContractError::IdentityUnavailable(_) => ErrorKind::IdentityUnavailable,
            ContractError::Persistence { .. } => ErrorKind::Persistence,
            ContractError::InvalidAction(_) => ErrorKind::InvalidAction,
            ContractError::Encoding(_) => ErrorKind::Encoding,
        }
    }
}

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
