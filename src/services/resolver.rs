//! Configuration resolver.
//!
//! Turns a [`ConfigDocument`] into one merged [`CertificateSpec`]:
//!
//! 1. no `merge` and no `config`: nothing to resolve, returns `None`
//! 2. otherwise the segments named in `merge` are looked up left to right,
//!    `config` is appended last, and the list goes through the merger
//! 3. an empty list (`merge: []` without `config`) yields the default spec
//!
//! Every segment reference is checked before any merging happens, so a
//! missing segment never produces partial output.

use crate::domain::spec::{CertificateSpec, ConfigDocument};
use crate::infra::error::{TemplateError, TemplateResult};
use crate::services::merger::{FlagMergePolicy, SpecMerger};

/// Stateless resolution service
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver {
    merger: SpecMerger,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(flag_policy: FlagMergePolicy) -> Self {
        Self {
            merger: SpecMerger::new(flag_policy),
        }
    }

    #[must_use]
    pub fn merger(&self) -> &SpecMerger {
        &self.merger
    }

    /// Resolve a document into its merged specification
    pub fn resolve(&self, doc: &ConfigDocument) -> TemplateResult<Option<CertificateSpec>> {
        let Some(merge) = doc.merge.as_ref() else {
            return Ok(doc
                .config
                .as_ref()
                .map(|config| self.merger.merge([Some(config)])));
        };

        let layers = self.collect_layers(doc, merge)?;
        log::debug!(
            "Merging {} layer(s) from segments {:?} (config: {})",
            layers.len(),
            merge,
            doc.config.is_some()
        );

        if layers.is_empty() {
            return Ok(Some(CertificateSpec::default()));
        }
        Ok(Some(self.merger.merge(layers)))
    }

    /// Ordered merge layers: named segments first, `config` last.
    /// Fails on the first name with no segment entry.
    fn collect_layers<'a>(
        &self,
        doc: &'a ConfigDocument,
        merge: &[String],
    ) -> TemplateResult<Vec<Option<&'a CertificateSpec>>> {
        let mut layers = Vec::with_capacity(merge.len() + 1);
        for name in merge {
            let segment = doc
                .segment(name)
                .ok_or_else(|| TemplateError::MissingSegment(name.clone()))?;
            layers.push(segment);
        }
        if let Some(config) = doc.config.as_ref() {
            layers.push(Some(config));
        }
        Ok(layers)
    }
}

/// Resolve with the default flag policy
pub fn resolve_config(doc: &ConfigDocument) -> TemplateResult<Option<CertificateSpec>> {
    ConfigResolver::default().resolve(doc)
}
