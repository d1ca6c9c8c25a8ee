//! The Contract: request dispatch and the read-only operations.
//!
//! Mutating operations live in [`crate::record`] and [`crate::batch`]; they
//! extend [`Contract`] with further `impl` blocks.

use bytes::Bytes;
use cartrack_ledger::Ledger;
use tracing::{debug, error, info, warn};

use crate::config::ContractConfig;
use crate::error::{ContractError, Result};
use crate::identity::{CertificateIdentity, IdentityProvider};
use crate::response::{Action, Request, Response};

/// Status reported by `probe`.
pub const PROBE_STATUS: &str = "Success";

/// The contract.
///
/// Holds only immutable configuration; every invocation receives its ledger
/// (and optionally its identity provider) as arguments.
#[derive(Debug, Clone, Default)]
pub struct Contract {
    config: ContractConfig,
}

impl Contract {
    /// Create a contract with the given configuration.
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Instantiation hook. Touches no state.
    pub fn init<L: Ledger + ?Sized>(&self, ledger: &L) -> Response {
        info!(tx_id = %ledger.tx_id(), "contract initialized");
        Response::success(Bytes::new())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle a request, attributing writes to the transaction creator.
    pub async fn invoke<L: Ledger + ?Sized>(&self, ledger: &L, request: &Request) -> Response {
        let identity = CertificateIdentity::new(ledger, &self.config.unknown_identity);
        self.invoke_with_identity(ledger, &identity, request).await
    }

    /// Handle a request with an explicitly supplied identity provider.
    pub async fn invoke_with_identity<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        identity: &dyn IdentityProvider,
        request: &Request,
    ) -> Response {
        let result = self.dispatch(ledger, identity, request).await;
        if let Err(e) = &result {
            error!(action = %request.action, tx_id = %ledger.tx_id(), error = %e, "request rejected");
        }
        result.into()
    }

    /// Route a request to exactly one operation and return its result.
    ///
    /// Unknown actions fail before any ledger access.
    pub async fn dispatch<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        identity: &dyn IdentityProvider,
        request: &Request,
    ) -> Result<Bytes> {
        let action: Action = request.action.parse()?;
        debug!(%action, args = request.args.len(), "dispatching");

        match action {
            Action::Probe => Ok(self.probe(ledger)),
            Action::CreateCarEntry => {
                self.create_car_entry(ledger, identity, &request.args)
                    .await
            }
            Action::SaveKv => {
                let report = self.save_kv(ledger, &request.args).await?;
                Ok(Bytes::from(report.message()))
            }
            Action::Query => self.query(ledger, &request.args).await,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read-only operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Liveness check: `{"status":"Success","ts":"<raw tx timestamp>"}`.
    ///
    /// `ts` is the unnormalized timestamp, or empty if the ledger has none.
    pub fn probe<L: Ledger + ?Sized>(&self, ledger: &L) -> Bytes {
        let ts = ledger
            .tx_timestamp()
            .map(|ts| ts.to_string())
            .unwrap_or_default();
        let output = serde_json::json!({ "status": PROBE_STATUS, "ts": ts }).to_string();
        info!(%output, "probe");
        Bytes::from(output)
    }

    /// Point read. Absence, and any read failure, is an empty success.
    pub async fn query<L: Ledger + ?Sized>(&self, ledger: &L, args: &[String]) -> Result<Bytes> {
        let key = require_arg(Action::Query, args)?;

        match ledger.get_state(key).await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(Bytes::new()),
            Err(e) => {
                warn!(key, error = %e, "read failed, returning empty result");
                Ok(Bytes::new())
            }
        }
    }
}

/// The first argument of `action`, or an arity error.
pub(crate) fn require_arg(action: Action, args: &[String]) -> Result<&str> {
    args.first().map(String::as_str).ok_or(ContractError::Arity {
        action: action.name(),
        expected: 1,
        got: args.len(),
    })
}
