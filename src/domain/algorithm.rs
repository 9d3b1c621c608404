//! Signature and public key algorithm codes.

use std::fmt;

use const_oid::ObjectIdentifier;

use super::constants::{
    lookup, token_for, OID_DSA, OID_DSA_WITH_SHA1, OID_DSA_WITH_SHA256, OID_ECDSA_WITH_SHA1,
    OID_ECDSA_WITH_SHA256, OID_ECDSA_WITH_SHA384, OID_ECDSA_WITH_SHA512, OID_EC_PUBLIC_KEY,
    OID_ED25519, OID_MD2_WITH_RSA, OID_MD5_WITH_RSA, OID_RSASSA_PSS, OID_RSA_ENCRYPTION,
    OID_SHA1_WITH_RSA, OID_SHA256_WITH_RSA, OID_SHA384_WITH_RSA, OID_SHA512_WITH_RSA,
    PUBLIC_KEY_ALGORITHMS, SIGNATURE_ALGORITHMS,
};

/// Signature algorithm requested for the certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureAlgorithm {
    #[default]
    Unknown,
    Md2WithRsa,
    Md5WithRsa,
    Sha1WithRsa,
    Sha256WithRsa,
    Sha384WithRsa,
    Sha512WithRsa,
    DsaWithSha1,
    DsaWithSha256,
    EcdsaWithSha1,
    EcdsaWithSha256,
    EcdsaWithSha384,
    EcdsaWithSha512,
    Sha256WithRsaPss,
    Sha384WithRsaPss,
    Sha512WithRsaPss,
    PureEd25519,
}

impl SignatureAlgorithm {
    /// Algorithm identifier OID; `None` for [`SignatureAlgorithm::Unknown`].
    /// The RSA-PSS variants share one OID and differ in parameters.
    #[must_use]
    pub fn oid(self) -> Option<ObjectIdentifier> {
        let oid = match self {
            SignatureAlgorithm::Unknown => return None,
            SignatureAlgorithm::Md2WithRsa => OID_MD2_WITH_RSA,
            SignatureAlgorithm::Md5WithRsa => OID_MD5_WITH_RSA,
            SignatureAlgorithm::Sha1WithRsa => OID_SHA1_WITH_RSA,
            SignatureAlgorithm::Sha256WithRsa => OID_SHA256_WITH_RSA,
            SignatureAlgorithm::Sha384WithRsa => OID_SHA384_WITH_RSA,
            SignatureAlgorithm::Sha512WithRsa => OID_SHA512_WITH_RSA,
            SignatureAlgorithm::DsaWithSha1 => OID_DSA_WITH_SHA1,
            SignatureAlgorithm::DsaWithSha256 => OID_DSA_WITH_SHA256,
            SignatureAlgorithm::EcdsaWithSha1 => OID_ECDSA_WITH_SHA1,
            SignatureAlgorithm::EcdsaWithSha256 => OID_ECDSA_WITH_SHA256,
            SignatureAlgorithm::EcdsaWithSha384 => OID_ECDSA_WITH_SHA384,
            SignatureAlgorithm::EcdsaWithSha512 => OID_ECDSA_WITH_SHA512,
            SignatureAlgorithm::Sha256WithRsaPss
            | SignatureAlgorithm::Sha384WithRsaPss
            | SignatureAlgorithm::Sha512WithRsaPss => OID_RSASSA_PSS,
            SignatureAlgorithm::PureEd25519 => OID_ED25519,
        };
        Some(oid)
    }

    /// Canonical document token, or `"Unknown"`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        token_for(SIGNATURE_ALGORITHMS, self).unwrap_or("Unknown")
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public key algorithm requested for the certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PublicKeyAlgorithm {
    #[default]
    Unknown,
    Rsa,
    Dsa,
    Ecdsa,
    Ed25519,
}

impl PublicKeyAlgorithm {
    /// Subject public key algorithm OID; `None` for
    /// [`PublicKeyAlgorithm::Unknown`]
    #[must_use]
    pub fn oid(self) -> Option<ObjectIdentifier> {
        match self {
            PublicKeyAlgorithm::Unknown => None,
            PublicKeyAlgorithm::Rsa => Some(OID_RSA_ENCRYPTION),
            PublicKeyAlgorithm::Dsa => Some(OID_DSA),
            PublicKeyAlgorithm::Ecdsa => Some(OID_EC_PUBLIC_KEY),
            PublicKeyAlgorithm::Ed25519 => Some(OID_ED25519),
        }
    }

    /// Canonical document token, or `"Unknown"`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        token_for(PUBLIC_KEY_ALGORITHMS, self).unwrap_or("Unknown")
    }
}

impl fmt::Display for PublicKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translate a signature algorithm token. Empty, unrecognised or
/// differently-cased tokens yield [`SignatureAlgorithm::Unknown`].
#[must_use]
pub fn parse_signature_algorithm(token: &str) -> SignatureAlgorithm {
    lookup(SIGNATURE_ALGORITHMS, token).unwrap_or_else(|| {
        if !token.is_empty() {
            log::debug!("Unrecognized signature algorithm: {token}");
        }
        SignatureAlgorithm::Unknown
    })
}

/// Translate a public key algorithm token. Empty, unrecognised or
/// differently-cased tokens yield [`PublicKeyAlgorithm::Unknown`].
#[must_use]
pub fn parse_public_key_algorithm(token: &str) -> PublicKeyAlgorithm {
    lookup(PUBLIC_KEY_ALGORITHMS, token).unwrap_or_else(|| {
        if !token.is_empty() {
            log::debug!("Unrecognized public key algorithm: {token}");
        }
        PublicKeyAlgorithm::Unknown
    })
}
