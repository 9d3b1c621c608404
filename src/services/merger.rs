//! Specification merge engine.
//!
//! Merging is not a generic deep merge. Each field class has its own rule,
//! applied in list order so that later entries take priority:
//!
//! | Field class | Rule |
//! |---|---|
//! | scalar strings | override when the incoming value is non-empty |
//! | `subject`, `issuer` | key-wise union, later keys overwrite |
//! | sequences | concatenate in encounter order |
//! | CA flags | governed by [`FlagMergePolicy`] |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::spec::CertificateSpec;

/// How the four CA flags (`is_ca`, `max_path_len`, `max_path_len_zero`,
/// `basic_constraints_valid`) combine across entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagMergePolicy {
    /// Every entry overwrites the flags with whatever it holds, unset
    /// included, so the last entry always decides them.
    #[default]
    AlwaysOverwrite,
    /// Only entries that set a flag override it.
    WhenPresent,
}

impl FlagMergePolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FlagMergePolicy::AlwaysOverwrite => "always_overwrite",
            FlagMergePolicy::WhenPresent => "when_present",
        }
    }
}

impl std::str::FromStr for FlagMergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always_overwrite" => Ok(FlagMergePolicy::AlwaysOverwrite),
            "when_present" => Ok(FlagMergePolicy::WhenPresent),
            other => Err(format!("unknown flag merge policy: {other}")),
        }
    }
}

/// Stateless merge service
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecMerger {
    flag_policy: FlagMergePolicy,
}

impl SpecMerger {
    #[must_use]
    pub fn new(flag_policy: FlagMergePolicy) -> Self {
        Self { flag_policy }
    }

    #[must_use]
    pub fn flag_policy(&self) -> FlagMergePolicy {
        self.flag_policy
    }

    /// Merge specifications in order. `None` entries are skipped; an empty
    /// input yields the default specification.
    pub fn merge<'a, I>(&self, specs: I) -> CertificateSpec
    where
        I: IntoIterator<Item = Option<&'a CertificateSpec>>,
    {
        let mut result = CertificateSpec::default();
        for spec in specs.into_iter().flatten() {
            self.apply(&mut result, spec);
        }
        result
    }

    fn apply(&self, result: &mut CertificateSpec, spec: &CertificateSpec) {
        override_if_set(&mut result.serial_number, &spec.serial_number);
        override_if_set(&mut result.not_before, &spec.not_before);
        override_if_set(&mut result.not_after, &spec.not_after);
        override_if_set(&mut result.signature_algorithm, &spec.signature_algorithm);
        override_if_set(&mut result.public_key_algorithm, &spec.public_key_algorithm);

        union_map(&mut result.subject, &spec.subject);
        union_map(&mut result.issuer, &spec.issuer);

        concat(&mut result.key_usage, &spec.key_usage);
        concat(&mut result.ext_key_usage, &spec.ext_key_usage);
        concat(&mut result.dns_names, &spec.dns_names);
        concat(&mut result.email_addresses, &spec.email_addresses);
        concat(&mut result.ip_addresses, &spec.ip_addresses);
        concat(&mut result.uris, &spec.uris);

        self.merge_flag(&mut result.is_ca, spec.is_ca);
        self.merge_flag(&mut result.max_path_len, spec.max_path_len);
        self.merge_flag(&mut result.max_path_len_zero, spec.max_path_len_zero);
        self.merge_flag(&mut result.basic_constraints_valid, spec.basic_constraints_valid);
    }

    fn merge_flag<T: Copy>(&self, target: &mut Option<T>, incoming: Option<T>) {
        match self.flag_policy {
            FlagMergePolicy::AlwaysOverwrite => *target = incoming,
            FlagMergePolicy::WhenPresent => {
                if incoming.is_some() {
                    *target = incoming;
                }
            }
        }
    }
}

/// Merge with the default flag policy
#[must_use]
pub fn merge_specs<'a, I>(specs: I) -> CertificateSpec
where
    I: IntoIterator<Item = Option<&'a CertificateSpec>>,
{
    SpecMerger::default().merge(specs)
}

fn override_if_set(target: &mut String, incoming: &str) {
    if !incoming.is_empty() {
        *target = incoming.to_string();
    }
}

fn union_map(target: &mut BTreeMap<String, String>, incoming: &BTreeMap<String, String>) {
    for (key, value) in incoming {
        target.insert(key.clone(), value.clone());
    }
}

fn concat(target: &mut Vec<String>, incoming: &[String]) {
    if !incoming.is_empty() {
        target.extend_from_slice(incoming);
    }
}
