//! # CarTrack Ledger
//!
//! Ledger abstraction for the CarTrack contract. The contract never owns its
//! storage: it runs against the [`Ledger`] trait, which pairs a world state
//! with the metadata of the transaction being executed.
//!
//! ## Key Types
//!
//! - [`Ledger`] - What one invocation sees: state access plus tx metadata
//! - [`StateStore`] - The world state: async get/put over string keys
//! - [`TxContext`] - Transaction id, timestamp and creator certificate
//! - [`TxStub`] - A [`Ledger`] built from a [`StateStore`] and a [`TxContext`]
//! - [`SqliteStore`] - SQLite-backed world state
//! - [`MemoryStore`] - In-memory world state for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cartrack_ledger::{Ledger, SqliteStore, TxContext, TxStub};
//!
//! async fn example() {
//!     let store = Arc::new(SqliteStore::open("world_state.db").unwrap());
//!
//!     // One stub per invocation
//!     let stub = TxStub::new(store, TxContext::new(None));
//!     stub.put_state("ABC123", b"{}").await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Overwrite semantics**: a put replaces whatever was stored at the key
//! - **No empty keys**: every backend rejects `""` with `InvalidKey`
//! - **Absence is `None`**: reading an unknown key is not an error

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;
pub mod tx;

pub use error::{LedgerError, Result};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{validate_key, Ledger, StateStore};
pub use tx::{TxContext, TxStub};
