//! Caller identity resolution.
//!
//! Records are attributed to whoever submitted the transaction, never to a
//! name found in the payload. The contract obtains that name through an
//! [`IdentityProvider`]; in production this is [`CertificateIdentity`], which
//! reads the subject common name of the creator's X.509 certificate.
//!
//! ## Resolution rules
//!
//! - No certificate, or bytes that don't parse as X.509: [`IdentityError`].
//! - A certificate whose subject has no usable common name (absent, not a
//!   string, or empty): resolves to the configured fallback, `"Unknown."` by
//!   default. This is a successful resolution, not an error.
//!
//! Certificates may be PEM or DER encoded.

use cartrack_ledger::{Ledger, LedgerError};
use thiserror::Error;
use x509_parser::prelude::*;

/// Resolved identity for a certificate without a usable common name.
pub const UNKNOWN_IDENTITY: &str = "Unknown.";

const PEM_PREFIX: &[u8] = b"-----BEGIN";

/// Errors resolving the caller's identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("caller certificate unavailable: {0}")]
    CertificateUnavailable(#[from] LedgerError),

    #[error("caller certificate could not be parsed: {0}")]
    MalformedCertificate(String),

    #[error("{0}")]
    Other(String),
}

/// Source of the invoking client's display name.
pub trait IdentityProvider {
    /// Resolve the caller's identity for the current invocation.
    fn resolve_caller_identity(&self) -> Result<String, IdentityError>;
}

/// An identity fixed up front, for hosts that authenticate callers elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity(pub String);

impl StaticIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl IdentityProvider for StaticIdentity {
    fn resolve_caller_identity(&self) -> Result<String, IdentityError> {
        Ok(self.0.clone())
    }
}

/// Resolves the caller from the creator certificate of the ledger transaction.
pub struct CertificateIdentity<'a, L: ?Sized> {
    ledger: &'a L,
    fallback: &'a str,
}

impl<'a, L: Ledger + ?Sized> CertificateIdentity<'a, L> {
    /// Resolve against `ledger`, using `fallback` when the certificate has no
    /// common name.
    pub fn new(ledger: &'a L, fallback: &'a str) -> Self {
        Self { ledger, fallback }
    }
}

impl<L: Ledger + ?Sized> IdentityProvider for CertificateIdentity<'_, L> {
    fn resolve_caller_identity(&self) -> Result<String, IdentityError> {
        let certificate = self.ledger.caller_certificate()?;
        Ok(subject_common_name(&certificate)?.unwrap_or_else(|| self.fallback.to_string()))
    }
}

/// Extract the first subject common name from a PEM or DER certificate.
///
/// Returns `Ok(None)` when the certificate parses but has no usable name.
pub fn subject_common_name(certificate: &[u8]) -> Result<Option<String>, IdentityError> {
    let pem;
    let der = if is_pem(certificate) {
        pem = x509_parser::pem::parse_x509_pem(certificate)
            .map_err(|e| IdentityError::MalformedCertificate(e.to_string()))?
            .1;
        &pem.contents[..]
    } else {
        certificate
    };

    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| IdentityError::MalformedCertificate(e.to_string()))?;

    let name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|attr| attr.as_str().ok())
        .filter(|cn| !cn.is_empty())
        .map(str::to_string);

    Ok(name)
}

fn is_pem(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PEM_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcgen::{CertificateParams, DistinguishedName, DnType, DnValue, KeyPair};

    fn certificate(common_name: Option<&str>) -> rcgen::Certificate {
        let mut params = CertificateParams::default();
        params.distinguished_name = DistinguishedName::new();
        params
            .distinguished_name
            .push(DnType::OrganizationName, DnValue::Utf8String("Org1".into()));
        if let Some(cn) = common_name {
            params
                .distinguished_name
                .push(DnType::CommonName, DnValue::Utf8String(cn.into()));
        }
        let key = KeyPair::generate().unwrap();
        params.self_signed(&key).unwrap()
    }

    #[test]
    fn test_common_name_from_pem() {
        let cert = certificate(Some("Alice"));
        let name = subject_common_name(cert.pem().as_bytes()).unwrap();
        assert_eq!(name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_common_name_from_der() {
        let cert = certificate(Some("Bob"));
        let name = subject_common_name(cert.der()).unwrap();
        assert_eq!(name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_pem_with_leading_whitespace() {
        let pem = format!("\n  {}", certificate(Some("Carol")).pem());
        assert_eq!(subject_common_name(pem.as_bytes()).unwrap().as_deref(), Some("Carol"));
    }

    #[test]
    fn test_missing_common_name_is_none() {
        let cert = certificate(None);
        assert_eq!(subject_common_name(cert.der()).unwrap(), None);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(matches!(
            subject_common_name(b"not a certificate"),
            Err(IdentityError::MalformedCertificate(_))
        ));
        assert!(matches!(
            subject_common_name(b"-----BEGIN CERTIFICATE-----\n!!!\n"),
            Err(IdentityError::MalformedCertificate(_))
        ));
    }

    #[test]
    fn test_static_identity() {
        assert_eq!(StaticIdentity::new("Alice").resolve_caller_identity().unwrap(), "Alice");
    }
}
