//! Centralized symbol tables and object identifiers.
//! Maps the human-readable tokens accepted in documents to their domain codes.
//! Tokens are exact, case-sensitive matches; there is no aliasing.

use const_oid::ObjectIdentifier;
use x509_cert::ext::pkix::KeyUsages;

use super::algorithm::{PublicKeyAlgorithm, SignatureAlgorithm};
use super::name::DnField;
use super::usage::ExtKeyUsage;

// === Distinguished Name Fields ===

/// Distinguished-name field tokens accepted under `subject` and `issuer`
pub const DN_FIELDS: &[(&str, DnField)] = &[
    ("common_name", DnField::CommonName),
    ("country", DnField::Country),
    ("organization", DnField::Organization),
    ("organizational_unit", DnField::OrganizationalUnit),
    ("locality", DnField::Locality),
    ("province", DnField::Province),
    ("street_address", DnField::StreetAddress),
    ("postal_code", DnField::PostalCode),
    ("serial_number", DnField::SerialNumber),
];

// === Key Usage ===

/// Key usage tokens, one bit each
pub const KEY_USAGES: &[(&str, KeyUsages)] = &[
    ("digital_signature", KeyUsages::DigitalSignature),
    ("content_commitment", KeyUsages::NonRepudiation),
    ("key_encipherment", KeyUsages::KeyEncipherment),
    ("data_encipherment", KeyUsages::DataEncipherment),
    ("key_agreement", KeyUsages::KeyAgreement),
    ("cert_sign", KeyUsages::KeyCertSign),
    ("crl_sign", KeyUsages::CRLSign),
    ("encipher_only", KeyUsages::EncipherOnly),
    ("decipher_only", KeyUsages::DecipherOnly),
];

// === Extended Key Usage ===

/// Extended key usage tokens
pub const EXT_KEY_USAGES: &[(&str, ExtKeyUsage)] = &[
    ("any", ExtKeyUsage::Any),
    ("server_auth", ExtKeyUsage::ServerAuth),
    ("client_auth", ExtKeyUsage::ClientAuth),
    ("code_signing", ExtKeyUsage::CodeSigning),
    ("email_protection", ExtKeyUsage::EmailProtection),
    ("ipsec_end_system", ExtKeyUsage::IpsecEndSystem),
    ("ipsec_tunnel", ExtKeyUsage::IpsecTunnel),
    ("ipsec_user", ExtKeyUsage::IpsecUser),
    ("time_stamping", ExtKeyUsage::TimeStamping),
    ("ocsp_signing", ExtKeyUsage::OcspSigning),
    (
        "microsoft_server_gated_crypto",
        ExtKeyUsage::MicrosoftServerGatedCrypto,
    ),
    (
        "netscape_server_gated_crypto",
        ExtKeyUsage::NetscapeServerGatedCrypto,
    ),
    (
        "microsoft_commercial_code_signing",
        ExtKeyUsage::MicrosoftCommercialCodeSigning,
    ),
    (
        "microsoft_kernel_code_signing",
        ExtKeyUsage::MicrosoftKernelCodeSigning,
    ),
];

// === Algorithms ===

/// Signature algorithm tokens
pub const SIGNATURE_ALGORITHMS: &[(&str, SignatureAlgorithm)] = &[
    ("MD2WithRSA", SignatureAlgorithm::Md2WithRsa),
    ("MD5WithRSA", SignatureAlgorithm::Md5WithRsa),
    ("SHA1WithRSA", SignatureAlgorithm::Sha1WithRsa),
    ("SHA256WithRSA", SignatureAlgorithm::Sha256WithRsa),
    ("SHA384WithRSA", SignatureAlgorithm::Sha384WithRsa),
    ("SHA512WithRSA", SignatureAlgorithm::Sha512WithRsa),
    ("DSAWithSHA1", SignatureAlgorithm::DsaWithSha1),
    ("DSAWithSHA256", SignatureAlgorithm::DsaWithSha256),
    ("ECDSAWithSHA1", SignatureAlgorithm::EcdsaWithSha1),
    ("ECDSAWithSHA256", SignatureAlgorithm::EcdsaWithSha256),
    ("ECDSAWithSHA384", SignatureAlgorithm::EcdsaWithSha384),
    ("ECDSAWithSHA512", SignatureAlgorithm::EcdsaWithSha512),
    ("SHA256WithRSAPSS", SignatureAlgorithm::Sha256WithRsaPss),
    ("SHA384WithRSAPSS", SignatureAlgorithm::Sha384WithRsaPss),
    ("SHA512WithRSAPSS", SignatureAlgorithm::Sha512WithRsaPss),
    ("PureEd25519", SignatureAlgorithm::PureEd25519),
];

/// Public key algorithm tokens
pub const PUBLIC_KEY_ALGORITHMS: &[(&str, PublicKeyAlgorithm)] = &[
    ("RSA", PublicKeyAlgorithm::Rsa),
    ("DSA", PublicKeyAlgorithm::Dsa),
    ("ECDSA", PublicKeyAlgorithm::Ecdsa),
    ("Ed25519", PublicKeyAlgorithm::Ed25519),
];

/// Exact-match lookup in one of the symbol tables above
pub fn lookup<T: Copy>(table: &[(&str, T)], token: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, code)| *code)
}

/// Reverse lookup: canonical token for a domain code
pub fn token_for<T: Copy + PartialEq>(table: &[(&'static str, T)], code: T) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, candidate)| *candidate == code)
        .map(|(name, _)| *name)
}

// === Distinguished Name Attribute OIDs (RFC 4519) ===

/// commonName (2.5.4.3)
pub const OID_CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
/// serialNumber (2.5.4.5)
pub const OID_SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");
/// countryName (2.5.4.6)
pub const OID_C: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
/// localityName (2.5.4.7)
pub const OID_L: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
/// stateOrProvinceName (2.5.4.8)
pub const OID_ST: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
/// streetAddress (2.5.4.9)
pub const OID_STREET: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.9");
/// organizationName (2.5.4.10)
pub const OID_O: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
/// organizationalUnitName (2.5.4.11)
pub const OID_OU: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");
/// postalCode (2.5.4.17)
pub const OID_POSTAL_CODE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.17");

// === Extended Key Usage OIDs ===

/// anyExtendedKeyUsage (2.5.29.37.0)
pub const OID_EKU_ANY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37.0");
pub const OID_KP_SERVER_AUTH: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.1");
pub const OID_KP_CLIENT_AUTH: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.2");
pub const OID_KP_CODE_SIGNING: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.3");
pub const OID_KP_EMAIL_PROTECTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.4");
pub const OID_KP_IPSEC_END_SYSTEM: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.5");
pub const OID_KP_IPSEC_TUNNEL: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.6");
pub const OID_KP_IPSEC_USER: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.7");
pub const OID_KP_TIME_STAMPING: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.8");
pub const OID_KP_OCSP_SIGNING: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.9");

/// Microsoft Server Gated Crypto (1.3.6.1.4.1.311.10.3.3)
pub const OID_MS_SGC: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.10.3.3");
/// Netscape Server Gated Crypto (2.16.840.1.113730.4.1)
pub const OID_NETSCAPE_SGC: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.16.840.1.113730.4.1");
/// Microsoft commercial code signing (1.3.6.1.4.1.311.2.1.22)
pub const OID_MS_COMMERCIAL_CODE_SIGNING: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.2.1.22");
/// Microsoft kernel-mode code signing (1.3.6.1.4.1.311.61.1.1)
pub const OID_MS_KERNEL_CODE_SIGNING: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.61.1.1");

// === Signature Algorithm OIDs ===

pub const OID_MD2_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.2");
pub const OID_MD5_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.4");
pub const OID_SHA1_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
pub const OID_SHA256_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
pub const OID_SHA384_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
pub const OID_SHA512_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");
/// RSASSA-PSS; the hash is carried in the algorithm parameters
pub const OID_RSASSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");
pub const OID_DSA_WITH_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.3");
pub const OID_DSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.3.2");
pub const OID_ECDSA_WITH_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.1");
pub const OID_ECDSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
pub const OID_ECDSA_WITH_SHA384: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
pub const OID_ECDSA_WITH_SHA512: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.4");
/// Ed25519 (1.3.101.112), shared by the signature and key algorithm
pub const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

// === Public Key Algorithm OIDs ===

pub const OID_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
pub const OID_DSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");
pub const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
