//! Structured distinguished names.
//!
//! Documents describe `subject` and `issuer` as flat maps keyed by field
//! token. [`parse_pkix_name`] lifts such a map into a [`PkixName`], which can
//! then be encoded as an X.509 `Name`.

use std::collections::BTreeMap;

use const_oid::ObjectIdentifier;
use der::asn1::{Any, PrintableStringRef, SetOfVec};
use der::Tag;
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::{Name, RdnSequence, RelativeDistinguishedName};

use super::constants::{
    DN_FIELDS, OID_C, OID_CN, OID_L, OID_O, OID_OU, OID_POSTAL_CODE, OID_SERIAL_NUMBER, OID_ST,
    OID_STREET,
};

/// Distinguished-name attribute addressed by a document token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnField {
    CommonName,
    Country,
    Organization,
    OrganizationalUnit,
    Locality,
    Province,
    StreetAddress,
    PostalCode,
    SerialNumber,
}

impl DnField {
    /// Attribute type OID
    #[must_use]
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            DnField::CommonName => OID_CN,
            DnField::Country => OID_C,
            DnField::Organization => OID_O,
            DnField::OrganizationalUnit => OID_OU,
            DnField::Locality => OID_L,
            DnField::Province => OID_ST,
            DnField::StreetAddress => OID_STREET,
            DnField::PostalCode => OID_POSTAL_CODE,
            DnField::SerialNumber => OID_SERIAL_NUMBER,
        }
    }

    /// String type used when `value` is encoded. Country and serial number
    /// prefer PrintableString but fall back to UTF8String for characters
    /// outside its set.
    fn value_tag(self, value: &str) -> Tag {
        match self {
            DnField::Country | DnField::SerialNumber
                if PrintableStringRef::new(value).is_ok() =>
            {
                Tag::PrintableString
            }
            _ => Tag::Utf8String,
        }
    }
}

/// Structured subject or issuer name.
///
/// Multi-valued attributes hold at most one entry when built from a
/// document, since each token maps to a single string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PkixName {
    pub common_name: String,
    pub serial_number: String,
    pub country: Vec<String>,
    pub organization: Vec<String>,
    pub organizational_unit: Vec<String>,
    pub locality: Vec<String>,
    pub province: Vec<String>,
    pub street_address: Vec<String>,
    pub postal_code: Vec<String>,
}

impl PkixName {
    /// Assign one attribute value
    pub fn set(&mut self, field: DnField, value: &str) {
        match field {
            DnField::CommonName => self.common_name = value.to_string(),
            DnField::SerialNumber => self.serial_number = value.to_string(),
            DnField::Country => self.country = vec![value.to_string()],
            DnField::Organization => self.organization = vec![value.to_string()],
            DnField::OrganizationalUnit => self.organizational_unit = vec![value.to_string()],
            DnField::Locality => self.locality = vec![value.to_string()],
            DnField::Province => self.province = vec![value.to_string()],
            DnField::StreetAddress => self.street_address = vec![value.to_string()],
            DnField::PostalCode => self.postal_code = vec![value.to_string()],
        }
    }

    /// True when no attribute is populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes().is_empty()
    }

    /// Populated attributes in encoding order: C, O, OU, L, ST, STREET,
    /// postalCode, serialNumber, CN.
    #[must_use]
    pub fn attributes(&self) -> Vec<(DnField, &str)> {
        let mut out = Vec::new();
        let multi = [
            (DnField::Country, &self.country),
            (DnField::Organization, &self.organization),
            (DnField::OrganizationalUnit, &self.organizational_unit),
            (DnField::Locality, &self.locality),
            (DnField::Province, &self.province),
            (DnField::StreetAddress, &self.street_address),
            (DnField::PostalCode, &self.postal_code),
        ];
        for (field, values) in multi {
            out.extend(values.iter().map(|v| (field, v.as_str())));
        }
        if !self.serial_number.is_empty() {
            out.push((DnField::SerialNumber, self.serial_number.as_str()));
        }
        if !self.common_name.is_empty() {
            out.push((DnField::CommonName, self.common_name.as_str()));
        }
        out
    }

    /// Encode as an X.509 `Name`, one RDN per attribute value
    pub fn to_name(&self) -> der::Result<Name> {
        let mut rdns = Vec::new();
        for (field, value) in self.attributes() {
            let atv = AttributeTypeAndValue {
                oid: field.oid(),
                value: Any::new(field.value_tag(value), value.as_bytes())?,
            };
            rdns.push(RelativeDistinguishedName(SetOfVec::try_from(vec![atv])?));
        }
        Ok(RdnSequence(rdns))
    }
}

/// Translate a field-token map into a structured name.
///
/// Every known token is tested individually, so the result does not depend
/// on map iteration order. Unknown keys are ignored.
#[must_use]
pub fn parse_pkix_name(fields: &BTreeMap<String, String>) -> PkixName {
    let mut name = PkixName::default();
    for (token, field) in DN_FIELDS {
        if let Some(value) = fields.get(*token) {
            name.set(*field, value);
        }
    }
    for token in fields.keys() {
        if !DN_FIELDS.iter().any(|(known, _)| *known == token.as_str()) {
            log::debug!("Ignoring unrecognized distinguished name field: {token}");
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::{Decode, Encode, Tagged};

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_map() {
        let name = parse_pkix_name(&BTreeMap::new());
        assert_eq!(name, PkixName::default());
        assert!(name.is_empty());
    }

    #[test]
    fn test_all_fields() {
        let name = parse_pkix_name(&map(&[
            ("common_name", "example.com"),
            ("country", "US"),
            ("organization", "Example Corp"),
            ("organizational_unit", "IT Department"),
            ("locality", "San Francisco"),
            ("province", "California"),
            ("street_address", "123 Main St"),
            ("postal_code", "94102"),
            ("serial_number", "12345"),
        ]));

        assert_eq!(name.common_name, "example.com");
        assert_eq!(name.country, vec!["US"]);
        assert_eq!(name.organization, vec!["Example Corp"]);
        assert_eq!(name.organizational_unit, vec!["IT Department"]);
        assert_eq!(name.locality, vec!["San Francisco"]);
        assert_eq!(name.province, vec!["California"]);
        assert_eq!(name.street_address, vec!["123 Main St"]);
        assert_eq!(name.postal_code, vec!["94102"]);
        assert_eq!(name.serial_number, "12345");
        assert_eq!(name.attributes().len(), 9);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let name = parse_pkix_name(&map(&[
            ("common_name", "test.com"),
            ("CommonName", "wrong-case.com"),
            ("email", "x@example.com"),
        ]));
        assert_eq!(name.common_name, "test.com");
        assert_eq!(name.attributes().len(), 1);
    }

    #[test]
    fn test_encoding_order_and_display() {
        let name = parse_pkix_name(&map(&[
            ("common_name", "example.com"),
            ("organization", "Example Corp"),
            ("country", "US"),
        ]));
        let fields: Vec<DnField> = name.attributes().into_iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![DnField::Country, DnField::Organization, DnField::CommonName]
        );

        let encoded = name.to_name().expect("name encodes");
        assert_eq!(encoded.0.len(), 3);
        let rendered = encoded.to_string().to_ascii_lowercase();
        assert!(rendered.contains("cn=example.com"), "{rendered}");
        assert!(rendered.contains("o=example corp"), "{rendered}");
        assert!(rendered.contains("c=us"), "{rendered}");
    }

    #[test]
    fn test_string_type_follows_value() {
        let name = parse_pkix_name(&map(&[
            ("country", "Côte"),
            ("serial_number", "A_1@x"),
            ("organization", "Example Corp"),
        ]));
        let der = name.to_name().expect("name encodes").to_der().expect("der");
        let decoded = Name::from_der(&der).expect("name decodes");

        let tags: Vec<(ObjectIdentifier, Tag)> = decoded
            .0
            .iter()
            .flat_map(|rdn| rdn.0.iter())
            .map(|atv| (atv.oid, atv.value.tag()))
            .collect();
        assert!(tags.contains(&(OID_C, Tag::Utf8String)));
        assert!(tags.contains(&(OID_SERIAL_NUMBER, Tag::Utf8String)));
        assert!(tags.contains(&(OID_O, Tag::Utf8String)));

        let printable = parse_pkix_name(&map(&[("country", "US"), ("serial_number", "12345")]));
        let der = printable.to_name().expect("name encodes").to_der().expect("der");
        let decoded = Name::from_der(&der).expect("name decodes");
        assert!(decoded
            .0
            .iter()
            .flat_map(|rdn| rdn.0.iter())
            .all(|atv| atv.value.tag() == Tag::PrintableString));

        let rendered = decoded.to_string().to_ascii_lowercase();
        assert!(rendered.contains("c=us"), "{rendered}");
    }

    #[test]
    fn test_empty_name_encodes_to_empty_sequence() {
        let encoded = PkixName::default().to_name().expect("empty name encodes");
        assert!(encoded.0.is_empty());
    }
}
