//! Certificate specifications and configuration documents.
//!
//! A [`CertificateSpec`] is a partial description of a certificate; several
//! of them are merged into one before a template is built. A
//! [`ConfigDocument`] is the top-level document holding reusable `segments`,
//! the ordered `merge` selection and the final `config` override layer.
//!
//! Field names are the document keys and form a stable external contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Partial or complete certificate description.
///
/// Scalar strings use the empty string for "absent". Names map a
/// distinguished-name field token to its value. Sequences keep document
/// order. The four CA flags are tri-state so that "unset" is representable;
/// how an unset flag merges is decided by the merge policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateSpec {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub serial_number: String,

    #[serde(deserialize_with = "lenient::string_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub subject: BTreeMap<String, String>,

    #[serde(deserialize_with = "lenient::string_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub issuer: BTreeMap<String, String>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub not_before: String,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub not_after: String,

    #[serde(deserialize_with = "lenient::string_seq", skip_serializing_if = "Vec::is_empty")]
    pub key_usage: Vec<String>,

    #[serde(deserialize_with = "lenient::string_seq", skip_serializing_if = "Vec::is_empty")]
    pub ext_key_usage: Vec<String>,

    #[serde(deserialize_with = "lenient::string_seq", skip_serializing_if = "Vec::is_empty")]
    pub dns_names: Vec<String>,

    #[serde(deserialize_with = "lenient::string_seq", skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<String>,

    #[serde(deserialize_with = "lenient::string_seq", skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<String>,

    #[serde(deserialize_with = "lenient::string_seq", skip_serializing_if = "Vec::is_empty")]
    pub uris: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ca: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_path_len: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_path_len_zero: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_constraints_valid: Option<bool>,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub signature_algorithm: String,

    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub public_key_algorithm: String,
}

impl CertificateSpec {
    /// Parse a flat document where the top level is the specification itself
    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self, serde_yaml::Error> {
        parse_document(bytes)
    }

    /// Render as YAML using the document field names
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Top-level configuration document.
///
/// `None` means the key was absent from the document, which the resolver
/// treats differently from an empty list or map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CertificateSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<Vec<String>>,

    /// Segment table; a segment declared with a null body is present but
    /// contributes nothing when merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<BTreeMap<String, Option<CertificateSpec>>>,
}

impl ConfigDocument {
    /// Parse document bytes; blank, comment-only and `null` input is the
    /// empty document
    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self, serde_yaml::Error> {
        parse_document(bytes)
    }

    /// True when the document uses `segments` or `merge`
    #[must_use]
    pub fn uses_segments(&self) -> bool {
        self.segments.is_some() || self.merge.is_some()
    }

    /// Look up a segment by name. The outer `Option` is presence in the
    /// table, the inner one whether the segment has a body.
    #[must_use]
    pub fn segment(&self, name: &str) -> Option<Option<&CertificateSpec>> {
        self.segments
            .as_ref()
            .and_then(|segments| segments.get(name))
            .map(Option::as_ref)
    }
}

fn parse_document<T>(bytes: &[u8]) -> Result<T, serde_yaml::Error>
where
    T: Default + serde::de::DeserializeOwned,
{
    if is_blank(bytes) {
        return Ok(T::default());
    }
    Ok(serde_yaml::from_slice::<Option<T>>(bytes)?.unwrap_or_default())
}

/// Only whitespace and `#` comment lines
fn is_blank(bytes: &[u8]) -> bool {
    bytes.split(|b| *b == b'\n').all(|line| {
        line.iter()
            .find(|b| !b.is_ascii_whitespace())
            .map_or(true, |first| *first == b'#')
    })
}

/// Deserializers that accept any YAML scalar where a string is expected.
/// Plain scalars keep their source text, so `0x1F`, `1.10` or a 30-digit
/// serial arrive unchanged. `null` becomes the empty value.
mod lenient {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn string_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, String>, D::Error> {
        let raw = Option::<BTreeMap<String, Option<String>>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect())
    }

    pub fn string_seq<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect())
    }
}
