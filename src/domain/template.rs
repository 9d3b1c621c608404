//! Certificate template produced from a resolved specification.
//!
//! The template carries typed values only; signing it is left to the
//! caller. [`CertificateTemplate::extensions`] encodes the X.509 extensions
//! that the template describes.

use std::net::IpAddr;

use chrono::{DateTime, SecondsFormat, Utc};
use const_oid::AssociatedOid;
use der::asn1::{Ia5String, OctetString};
use der::Encode;
use num_bigint::BigUint;
use serde::Serialize;
use url::Url;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::{BasicConstraints, ExtendedKeyUsage, KeyUsage, SubjectAltName};
use x509_cert::ext::Extension;
use x509_cert::serial_number::SerialNumber;

use super::algorithm::{PublicKeyAlgorithm, SignatureAlgorithm};
use super::name::PkixName;
use super::usage::{key_usage_tokens, ExtKeyUsage, KeyUsageFlags};

/// Fully populated certificate template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateTemplate {
    pub serial_number: Option<BigUint>,
    pub subject: PkixName,
    pub issuer: PkixName,
    pub not_before: Option<DateTime<Utc>>,
    pub not_after: Option<DateTime<Utc>>,
    pub key_usage: KeyUsageFlags,
    pub ext_key_usage: Vec<ExtKeyUsage>,
    pub dns_names: Vec<String>,
    pub email_addresses: Vec<String>,
    pub ip_addresses: Vec<IpAddr>,
    pub uris: Vec<Url>,
    pub is_ca: bool,
    pub max_path_len: i32,
    pub max_path_len_zero: bool,
    pub basic_constraints_valid: bool,
    pub signature_algorithm: SignatureAlgorithm,
    pub public_key_algorithm: PublicKeyAlgorithm,
}

impl CertificateTemplate {
    /// Serial number in DER form; `None` when unset
    pub fn serial_number_der(&self) -> der::Result<Option<SerialNumber>> {
        self.serial_number
            .as_ref()
            .map(|serial| SerialNumber::new(&serial.to_bytes_be()))
            .transpose()
    }

    /// Path length constraint: a positive `max_path_len` is used as is
    /// (clamped to 255, the largest encodable value), zero only counts when
    /// `max_path_len_zero` is set, anything else leaves the path
    /// unconstrained.
    #[must_use]
    pub fn path_len_constraint(&self) -> Option<u8> {
        if self.max_path_len > 0 {
            Some(u8::try_from(self.max_path_len).unwrap_or_else(|_| {
                log::warn!(
                    "max_path_len {} exceeds {}, clamping",
                    self.max_path_len,
                    u8::MAX
                );
                u8::MAX
            }))
        } else if self.max_path_len == 0 && self.max_path_len_zero {
            Some(0)
        } else {
            None
        }
    }

    /// Subject alternative names in DNS, e-mail, IP, URI order
    pub fn subject_alt_names(&self) -> der::Result<Vec<GeneralName>> {
        let mut names = Vec::new();
        for dns in &self.dns_names {
            names.push(GeneralName::DnsName(Ia5String::new(dns)?));
        }
        for email in &self.email_addresses {
            names.push(GeneralName::Rfc822Name(Ia5String::new(email)?));
        }
        for ip in &self.ip_addresses {
            let octets = match ip {
                IpAddr::V4(v4) => v4.octets().to_vec(),
                IpAddr::V6(v6) => v6.octets().to_vec(),
            };
            names.push(GeneralName::IpAddress(OctetString::new(octets)?));
        }
        for uri in &self.uris {
            names.push(GeneralName::UniformResourceIdentifier(Ia5String::new(
                uri.as_str(),
            )?));
        }
        Ok(names)
    }

    /// Encode the extensions this template describes. Empty key usage,
    /// extended key usage and SAN lists are omitted; basic constraints are
    /// only emitted when `basic_constraints_valid` is set.
    pub fn extensions(&self) -> der::Result<Vec<Extension>> {
        let mut extensions = Vec::new();

        if !self.key_usage.is_empty() {
            extensions.push(encode_extension(&KeyUsage(self.key_usage), true)?);
        }

        if !self.ext_key_usage.is_empty() {
            let oids = self.ext_key_usage.iter().map(|usage| usage.oid()).collect();
            extensions.push(encode_extension(&ExtendedKeyUsage(oids), false)?);
        }

        let san = self.subject_alt_names()?;
        if !san.is_empty() {
            extensions.push(encode_extension(&SubjectAltName(san), false)?);
        }

        if self.basic_constraints_valid {
            let constraints = BasicConstraints {
                ca: self.is_ca,
                path_len_constraint: if self.is_ca {
                    self.path_len_constraint()
                } else {
                    None
                },
            };
            extensions.push(encode_extension(&constraints, true)?);
        }

        Ok(extensions)
    }

    /// Human-readable, serializable view of the template
    #[must_use]
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            serial_number: self.serial_number.as_ref().map(ToString::to_string),
            subject: render_name(&self.subject),
            issuer: render_name(&self.issuer),
            not_before: self.not_before.map(render_time),
            not_after: self.not_after.map(render_time),
            key_usage: key_usage_tokens(self.key_usage),
            ext_key_usage: self.ext_key_usage.iter().map(|u| u.as_str()).collect(),
            dns_names: self.dns_names.clone(),
            email_addresses: self.email_addresses.clone(),
            ip_addresses: self.ip_addresses.iter().map(ToString::to_string).collect(),
            uris: self.uris.iter().map(ToString::to_string).collect(),
            is_ca: self.is_ca,
            max_path_len: self.max_path_len,
            max_path_len_zero: self.max_path_len_zero,
            basic_constraints_valid: self.basic_constraints_valid,
            signature_algorithm: self.signature_algorithm.as_str(),
            public_key_algorithm: self.public_key_algorithm.as_str(),
        }
    }
}

/// Serializable view returned by [`CertificateTemplate::summary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    pub serial_number: Option<String>,
    pub subject: String,
    pub issuer: String,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
    pub key_usage: Vec<&'static str>,
    pub ext_key_usage: Vec<&'static str>,
    pub dns_names: Vec<String>,
    pub email_addresses: Vec<String>,
    pub ip_addresses: Vec<String>,
    pub uris: Vec<String>,
    pub is_ca: bool,
    pub max_path_len: i32,
    pub max_path_len_zero: bool,
    pub basic_constraints_valid: bool,
    pub signature_algorithm: &'static str,
    pub public_key_algorithm: &'static str,
}

fn encode_extension<T: AssociatedOid + Encode>(value: &T, critical: bool) -> der::Result<Extension> {
    Ok(Extension {
        extn_id: T::OID,
        critical,
        extn_value: OctetString::new(value.to_der()?)?,
    })
}

fn render_name(name: &PkixName) -> String {
    match name.to_name() {
        Ok(encoded) => encoded.to_string(),
        Err(e) => {
            log::warn!("Failed to encode name for display: {e}");
            String::new()
        }
    }
}

fn render_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::Decode;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use x509_cert::ext::pkix::KeyUsages;

    #[test]
    fn test_default_template_has_no_extensions() {
        let template = CertificateTemplate::default();
        assert!(template.extensions().unwrap().is_empty());
        assert_eq!(template.serial_number_der().unwrap(), None);
        assert_eq!(template.signature_algorithm, SignatureAlgorithm::Unknown);
    }

    #[test]
    fn test_path_len_constraint_rules() {
        let mut template = CertificateTemplate::default();
        assert_eq!(template.path_len_constraint(), None);

        template.max_path_len_zero = true;
        assert_eq!(template.path_len_constraint(), Some(0));

        template.max_path_len = 3;
        assert_eq!(template.path_len_constraint(), Some(3));

        template.max_path_len = -1;
        assert_eq!(template.path_len_constraint(), None);
    }

    #[test]
    fn test_oversized_path_len_is_clamped() {
        let template = CertificateTemplate {
            is_ca: true,
            basic_constraints_valid: true,
            max_path_len: 300,
            ..CertificateTemplate::default()
        };
        assert_eq!(template.path_len_constraint(), Some(u8::MAX));

        let extensions = template.extensions().expect("extensions encode");
        let constraints = BasicConstraints::from_der(extensions[0].extn_value.as_bytes())
            .expect("basic constraints decode");
        assert!(constraints.ca);
        assert_eq!(constraints.path_len_constraint, Some(255));
    }

    #[test]
    fn test_extensions_encoding() {
        let template = CertificateTemplate {
            key_usage: KeyUsages::DigitalSignature | KeyUsages::KeyCertSign,
            ext_key_usage: vec![ExtKeyUsage::ServerAuth],
            dns_names: vec!["example.com".to_string()],
            ip_addresses: vec![IpAddr::V4(Ipv4Addr::LOCALHOST)],
            is_ca: true,
            max_path_len: 1,
            basic_constraints_valid: true,
            ..CertificateTemplate::default()
        };

        let extensions = template.extensions().expect("extensions encode");
        let ids: Vec<_> = extensions.iter().map(|e| e.extn_id).collect();
        assert_eq!(
            ids,
            vec![
                KeyUsage::OID,
                ExtendedKeyUsage::OID,
                SubjectAltName::OID,
                BasicConstraints::OID
            ]
        );
        assert!(extensions[0].critical);
        assert!(!extensions[1].critical);
        assert!(extensions[3].critical);
    }

    #[test]
    fn test_subject_alt_names_order() {
        let template = CertificateTemplate {
            dns_names: vec!["a.example".to_string()],
            email_addresses: vec!["ops@example.com".to_string()],
            ip_addresses: vec![IpAddr::V6(Ipv6Addr::LOCALHOST)],
            uris: vec![Url::parse("spiffe://example/workload").unwrap()],
            ..CertificateTemplate::default()
        };
        let names = template.subject_alt_names().unwrap();
        assert_eq!(names.len(), 4);
        assert!(matches!(names[0], GeneralName::DnsName(_)));
        assert!(matches!(names[1], GeneralName::Rfc822Name(_)));
        assert!(matches!(&names[2], GeneralName::IpAddress(ip) if ip.as_bytes().len() == 16));
        assert!(matches!(names[3], GeneralName::UniformResourceIdentifier(_)));
    }

    #[test]
    fn test_serial_number_der() {
        let template = CertificateTemplate {
            serial_number: Some(BigUint::from(123_456u32)),
            ..CertificateTemplate::default()
        };
        assert!(template.serial_number_der().unwrap().is_some());
    }

    #[test]
    fn test_summary() {
        let template = CertificateTemplate {
            serial_number: Some(BigUint::from(42u32)),
            key_usage: KeyUsages::DigitalSignature.into(),
            signature_algorithm: SignatureAlgorithm::EcdsaWithSha256,
            ..CertificateTemplate::default()
        };
        let summary = template.summary();
        assert_eq!(summary.serial_number.as_deref(), Some("42"));
        assert_eq!(summary.key_usage, vec!["digital_signature"]);
        assert_eq!(summary.signature_algorithm, "ECDSAWithSHA256");
        assert_eq!(summary.public_key_algorithm, "Unknown");
        assert_eq!(summary.subject, "");
    }
}
