//! Invocation requests and responses.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::{ContractError, Result};

/// Status code of a successful response.
pub const OK: i32 = 200;

/// Status code of a failed response.
pub const ERROR: i32 = 500;

/// The actions the contract recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Probe,
    CreateCarEntry,
    SaveKv,
    Query,
}

impl Action {
    /// All recognized actions.
    pub const ALL: [Action; 4] = [
        Action::Probe,
        Action::CreateCarEntry,
        Action::SaveKv,
        Action::Query,
    ];

    /// The wire name of the action.
    pub const fn name(self) -> &'static str {
        match self {
            Action::Probe => "probe",
            Action::CreateCarEntry => "createCarEntry",
            Action::SaveKv => "saveKV",
            Action::Query => "query",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| ContractError::InvalidAction(s.to_string()))
    }
}

/// An inbound invocation: an action name and its ordered string arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub action: String,
    pub args: Vec<String>,
}

impl Request {
    pub fn new<I, S>(action: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action: action.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a flat argument list whose first element is the action name.
    ///
    /// An empty list yields an empty action name, which dispatches to
    /// `InvalidAction`.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let action = args.next().unwrap_or_default();
        Self {
            action,
            args: args.collect(),
        }
    }
}

/// The outcome of an invocation as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// [`OK`] or [`ERROR`].
    pub status: i32,
    /// Failure message; empty on success.
    pub message: String,
    /// Success payload; empty on failure.
    pub payload: Bytes,
}

impl Response {
    pub fn success(payload: impl Into<Bytes>) -> Self {
        Self {
            status: OK,
            message: String::new(),
            payload: payload.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
            payload: Bytes::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OK
    }
}

impl From<Result<Bytes>> for Response {
    fn from(result: Result<Bytes>) -> Self {
        match result {
            Ok(payload) => Response::success(payload),
            Err(e) => Response::error(e.to_string()),
        }
    }
}
