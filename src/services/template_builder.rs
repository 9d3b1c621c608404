//! Template builder service.
//! Maps a resolved specification field by field onto a certificate template.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use url::Url;

use crate::domain::algorithm::{parse_public_key_algorithm, parse_signature_algorithm};
use crate::domain::name::parse_pkix_name;
use crate::domain::spec::CertificateSpec;
use crate::domain::template::CertificateTemplate;
use crate::domain::usage::{parse_ext_key_usage, parse_key_usage};

/// Stateless template construction service.
///
/// Building never fails: serial numbers, timestamps, IP literals and URIs
/// that do not parse are logged and left unset.
pub struct TemplateBuilder;

impl TemplateBuilder {
    /// Build a template from a resolved specification
    #[must_use]
    pub fn build(spec: &CertificateSpec) -> CertificateTemplate {
        CertificateTemplate {
            serial_number: parse_serial_number(&spec.serial_number),
            subject: parse_pkix_name(&spec.subject),
            issuer: parse_pkix_name(&spec.issuer),
            not_before: parse_timestamp("not_before", &spec.not_before),
            not_after: parse_timestamp("not_after", &spec.not_after),
            key_usage: parse_key_usage(&spec.key_usage),
            ext_key_usage: parse_ext_key_usage(&spec.ext_key_usage),
            dns_names: spec.dns_names.clone(),
            email_addresses: spec.email_addresses.clone(),
            ip_addresses: spec
                .ip_addresses
                .iter()
                .filter_map(|ip| parse_ip_address(ip))
                .collect(),
            uris: spec.uris.iter().filter_map(|uri| parse_uri(uri)).collect(),
            is_ca: spec.is_ca.unwrap_or_default(),
            max_path_len: spec.max_path_len.unwrap_or_default(),
            max_path_len_zero: spec.max_path_len_zero.unwrap_or_default(),
            basic_constraints_valid: spec.basic_constraints_valid.unwrap_or_default(),
            signature_algorithm: parse_signature_algorithm(&spec.signature_algorithm),
            public_key_algorithm: parse_public_key_algorithm(&spec.public_key_algorithm),
        }
    }
}

fn parse_serial_number(value: &str) -> Option<BigUint> {
    if value.is_empty() {
        return None;
    }
    let serial = BigUint::parse_bytes(value.as_bytes(), 10);
    if serial.is_none() {
        log::warn!("Ignoring unparseable serial number: {value}");
    }
    serial
}

fn parse_timestamp(field: &str, value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(value) {
        Ok(time) => Some(time.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparseable {field} timestamp '{value}': {e}");
            None
        }
    }
}

fn parse_ip_address(value: &str) -> Option<IpAddr> {
    match value.parse::<IpAddr>() {
        Ok(ip) => Some(ip),
        Err(e) => {
            log::warn!("Ignoring unparseable IP address '{value}': {e}");
            None
        }
    }
}

fn parse_uri(value: &str) -> Option<Url> {
    match Url::parse(value) {
        Ok(uri) => Some(uri),
        Err(e) => {
            log::warn!("Ignoring unparseable URI '{value}': {e}");
            None
        }
    }
}
