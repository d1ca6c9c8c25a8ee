//! # CarTrack Testkit
//!
//! Testing utilities for the CarTrack contract.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Scenario vectors**: Known invocations with expected payloads or failure kinds
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A recording world state, caller certificates and fixed-time ledgers
//!
//! ## Scenario Vectors
//!
//! ```rust,no_run
//! use cartrack_testkit::vectors::verify_all_vectors;
//!
//! async fn check() {
//!     for (name, matched, observed) in verify_all_vectors().await {
//!         println!("{}: {} ({})", name, matched, observed);
//!     }
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cartrack_testkit::generators::VehicleParams;
//!
//! proptest! {
//!     #[test]
//!     fn payload_has_chassis(params: VehicleParams) {
//!         prop_assert!(params.to_payload().contains(&params.chassis_number));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use cartrack_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let ledger = fixture.ledger("tx-1");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    certificate_pem, FailingIdentity, PutAttempt, RecordingStore, TestFixture, FIXED_SECONDS,
    FIXED_TIMESTAMP,
};
pub use generators::VehicleParams;
pub use vectors::{all_vectors, run_vector, verify_all_vectors, Expected, ScenarioVector};
