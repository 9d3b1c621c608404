//! Key usage and extended key usage translation.

use const_oid::ObjectIdentifier;
use flagset::FlagSet;
use x509_cert::ext::pkix::KeyUsages;

use super::constants::{
    lookup, token_for, EXT_KEY_USAGES, KEY_USAGES, OID_EKU_ANY, OID_KP_CLIENT_AUTH,
    OID_KP_CODE_SIGNING, OID_KP_EMAIL_PROTECTION, OID_KP_IPSEC_END_SYSTEM, OID_KP_IPSEC_TUNNEL,
    OID_KP_IPSEC_USER, OID_KP_OCSP_SIGNING, OID_KP_SERVER_AUTH, OID_KP_TIME_STAMPING,
    OID_MS_COMMERCIAL_CODE_SIGNING, OID_MS_KERNEL_CODE_SIGNING, OID_MS_SGC, OID_NETSCAPE_SGC,
};

/// Key usage bitmask
pub type KeyUsageFlags = FlagSet<KeyUsages>;

/// Extended key usage purposes recognised in documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtKeyUsage {
    Any,
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    IpsecEndSystem,
    IpsecTunnel,
    IpsecUser,
    TimeStamping,
    OcspSigning,
    MicrosoftServerGatedCrypto,
    NetscapeServerGatedCrypto,
    MicrosoftCommercialCodeSigning,
    MicrosoftKernelCodeSigning,
}

impl ExtKeyUsage {
    /// Key purpose OID
    #[must_use]
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            ExtKeyUsage::Any => OID_EKU_ANY,
            ExtKeyUsage::ServerAuth => OID_KP_SERVER_AUTH,
            ExtKeyUsage::ClientAuth => OID_KP_CLIENT_AUTH,
            ExtKeyUsage::CodeSigning => OID_KP_CODE_SIGNING,
            ExtKeyUsage::EmailProtection => OID_KP_EMAIL_PROTECTION,
            ExtKeyUsage::IpsecEndSystem => OID_KP_IPSEC_END_SYSTEM,
            ExtKeyUsage::IpsecTunnel => OID_KP_IPSEC_TUNNEL,
            ExtKeyUsage::IpsecUser => OID_KP_IPSEC_USER,
            ExtKeyUsage::TimeStamping => OID_KP_TIME_STAMPING,
            ExtKeyUsage::OcspSigning => OID_KP_OCSP_SIGNING,
            ExtKeyUsage::MicrosoftServerGatedCrypto => OID_MS_SGC,
            ExtKeyUsage::NetscapeServerGatedCrypto => OID_NETSCAPE_SGC,
            ExtKeyUsage::MicrosoftCommercialCodeSigning => OID_MS_COMMERCIAL_CODE_SIGNING,
            ExtKeyUsage::MicrosoftKernelCodeSigning => OID_MS_KERNEL_CODE_SIGNING,
        }
    }

    /// Canonical document token
    #[must_use]
    pub fn as_str(self) -> &'static str {
        token_for(EXT_KEY_USAGES, self).unwrap_or("unknown")
    }
}

/// OR together the bits of every recognised key usage token.
/// Unrecognised tokens are skipped; empty input yields the empty mask.
#[must_use]
pub fn parse_key_usage<S: AsRef<str>>(tokens: &[S]) -> KeyUsageFlags {
    let mut flags = KeyUsageFlags::default();
    for token in tokens {
        let token = token.as_ref();
        match lookup(KEY_USAGES, token) {
            Some(usage) => flags |= usage,
            None => log::debug!("Ignoring unrecognized key usage: {token}"),
        }
    }
    flags
}

/// Translate extended key usage tokens, keeping input order and duplicates.
/// Unrecognised tokens are skipped.
#[must_use]
pub fn parse_ext_key_usage<S: AsRef<str>>(tokens: &[S]) -> Vec<ExtKeyUsage> {
    tokens
        .iter()
        .filter_map(|token| {
            let token = token.as_ref();
            let usage = lookup(EXT_KEY_USAGES, token);
            if usage.is_none() {
                log::debug!("Ignoring unrecognized extended key usage: {token}");
            }
            usage
        })
        .collect()
}

/// Canonical tokens for every bit set in `flags`, in table order
#[must_use]
pub fn key_usage_tokens(flags: KeyUsageFlags) -> Vec<&'static str> {
    KEY_USAGES
        .iter()
        .filter(|(_, usage)| flags.contains(*usage))
        .map(|(token, _)| *token)
        .collect()
}
