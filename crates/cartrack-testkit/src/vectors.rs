//! Scenario vectors: known invocations with expected outcomes.
//!
//! Each vector runs against a fresh [`TestFixture`] at [`FIXED_SECONDS`]
//! under transaction id `"vector-tx"`, with the caller resolving to
//! [`ScenarioVector::identity`].
//!
//! [`FIXED_SECONDS`]: crate::fixtures::FIXED_SECONDS

use bytes::Bytes;

use cartrack::{ErrorKind, Request, Result, StaticIdentity};

use crate::fixtures::TestFixture;

/// Transaction id every vector runs under.
pub const VECTOR_TX_ID: &str = "vector-tx";

/// Expected outcome of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Success with exactly this payload.
    Payload(&'static str),
    /// Failure of this kind.
    Failure(ErrorKind),
}

/// A scenario vector.
#[derive(Debug, Clone)]
pub struct ScenarioVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub action: &'static str,
    pub args: &'static [&'static str],
    /// Name the caller resolves to.
    pub identity: &'static str,
    pub expected: Expected,
}

/// All scenario vectors.
pub fn all_vectors() -> Vec<ScenarioVector> {
    vec![
        ScenarioVector {
            name: "create_overrides_attribution",
            action: "createCarEntry",
            args: &[r#"{"chasisNumber":"ABC123","manufacturer":"Spoofed"}"#],
            identity: "Alice",
            expected: Expected::Payload(
                r#"{"objType":"car","chasisNumber":"ABC123","manufacturer":"Alice","makeYear":"","model":"","color":"","licNumber":"","status":"NEW","dealer":"","owner":"","ts":"2023.11.14.22.13.20.000","trxnId":"vector-tx","updBy":"Alice"}"#,
            ),
        },
        ScenarioVector {
            name: "create_blank_chassis",
            action: "createCarEntry",
            args: &[r#"{"chasisNumber":"   "}"#],
            identity: "Alice",
            expected: Expected::Failure(ErrorKind::Validation),
        },
        ScenarioVector {
            name: "create_malformed",
            action: "createCarEntry",
            args: &["{not json"],
            identity: "Alice",
            expected: Expected::Failure(ErrorKind::MalformedInput),
        },
        ScenarioVector {
            name: "create_no_args",
            action: "createCarEntry",
            args: &[],
            identity: "Alice",
            expected: Expected::Failure(ErrorKind::Arity),
        },
        ScenarioVector {
            name: "query_absent",
            action: "query",
            args: &["nonexistent-key"],
            identity: "Alice",
            expected: Expected::Payload(""),
        },
        ScenarioVector {
            name: "query_no_args",
            action: "query",
            args: &[],
            identity: "Alice",
            expected: Expected::Failure(ErrorKind::Arity),
        },
        ScenarioVector {
            name: "save_kv_empty_batch",
            action: "saveKV",
            args: &["[]"],
            identity: "Alice",
            expected: Expected::Failure(ErrorKind::Validation),
        },
        ScenarioVector {
            name: "save_kv_not_a_list",
            action: "saveKV",
            args: &[r#"{"key":"a","value":"b"}"#],
            identity: "Alice",
            expected: Expected::Failure(ErrorKind::MalformedInput),
        },
        ScenarioVector {
            name: "save_kv_two_entries",
            action: "saveKV",
            args: &[r#"[{"key":"a","value":"1"},{"key":"b","value":"2"}]"#],
            identity: "Alice",
            expected: Expected::Payload("2 records saved"),
        },
        ScenarioVector {
            name: "probe",
            action: "probe",
            args: &[],
            identity: "Alice",
            expected: Expected::Payload(r#"{"status":"Success","ts":"seconds:1700000000"}"#),
        },
        ScenarioVector {
            name: "unknown_action",
            action: "deleteCarEntry",
            args: &["ABC123"],
            identity: "Alice",
            expected: Expected::Failure(ErrorKind::InvalidAction),
        },
    ]
}

/// Run a vector against a fresh fixture.
pub async fn run_vector(vector: &ScenarioVector) -> Result<Bytes> {
    let fixture = TestFixture::new();
    let ledger = fixture.ledger(VECTOR_TX_ID);
    let request = Request::new(vector.action, vector.args.iter().copied());

    fixture
        .contract
        .dispatch(&ledger, &StaticIdentity::new(vector.identity), &request)
        .await
}

/// Whether an outcome matches what a vector expects.
pub fn matches(expected: Expected, outcome: &Result<Bytes>) -> bool {
    match (expected, outcome) {
        (Expected::Payload(payload), Ok(bytes)) => bytes.as_ref() == payload.as_bytes(),
        (Expected::Failure(kind), Err(e)) => e.kind() == kind,
        _ => false,
    }
}

/// Run every vector, reporting `(name, matched, observed)` for each.
pub async fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results = Vec::new();
    for vector in all_vectors() {
        let outcome = run_vector(&vector).await;
        let observed = match &outcome {
            Ok(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Err(e) => format!("{:?}: {}", e.kind(), e),
        };
        results.push((vector.name.to_string(), matches(vector.expected, &outcome), observed));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_vectors_match() {
        for (name, matched, observed) in verify_all_vectors().await {
            assert!(matched, "vector '{}' observed {}", name, observed);
        }
    }

    #[tokio::test]
    async fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            let first = run_vector(&vector).await.ok();
            let second = run_vector(&vector).await.ok();
            assert_eq!(first, second, "vector '{}' differs on rerun", vector.name);
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
