//! `ConvertWorkflow`: document bytes in, certificate template out.
//!
//! Picks the document shape the same way every time:
//! - `segments` or `merge` present: resolve through [`ConfigResolver`]
//! - otherwise `config` present: use it as the specification
//! - otherwise: the whole document is a flat specification

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::{
    domain::{
        spec::{CertificateSpec, ConfigDocument},
        template::CertificateTemplate,
    },
    infra::config::{ConverterConfiguration, OutputFormat},
    services::{merger::FlagMergePolicy, resolver::ConfigResolver, template_builder::TemplateBuilder},
    TemplateError, TemplateResult,
};

/// Orchestrates parsing, resolution and template construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertWorkflow {
    resolver: ConfigResolver,
}

impl ConvertWorkflow {
    #[must_use]
    pub fn new(flag_policy: FlagMergePolicy) -> Self {
        Self {
            resolver: ConfigResolver::new(flag_policy),
        }
    }

    /// Workflow using the policy stored in the tool configuration
    #[must_use]
    pub fn from_configuration(config: &ConverterConfiguration) -> Self {
        Self::new(config.flag_merge)
    }

    #[must_use]
    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Resolve document bytes into a single specification
    pub fn resolve(&self, data: &[u8]) -> TemplateResult<CertificateSpec> {
        let doc = ConfigDocument::from_yaml_slice(data)?;

        if doc.uses_segments() {
            log::debug!("Document uses segments, resolving");
            return Ok(self.resolver.resolve(&doc)?.unwrap_or_else(|| {
                log::debug!("Nothing selected for merging, using empty specification");
                CertificateSpec::default()
            }));
        }

        if let Some(config) = doc.config {
            log::debug!("Document has a config section only");
            return Ok(config);
        }

        log::debug!("Parsing document as a flat specification");
        Ok(CertificateSpec::from_yaml_slice(data)?)
    }

    /// Run the full workflow over document bytes
    pub fn run(&self, data: &[u8]) -> TemplateResult<CertificateTemplate> {
        let spec = self.resolve(data)?;
        Ok(TemplateBuilder::build(&spec))
    }
}

/// Convert document bytes with the default flag policy
pub fn template_from_yaml(data: &[u8]) -> TemplateResult<CertificateTemplate> {
    ConvertWorkflow::default().run(data)
}

/// Read a document from `path`, or from stdin when `path` is `-`
pub fn read_document(path: &Path) -> TemplateResult<Vec<u8>> {
    if path == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        return Ok(data);
    }
    fs::read(path).map_err(|e| {
        TemplateError::IoError(format!("Failed to read document {}: {e}", path.display()))
    })
}

/// Render the template summary in the requested format
pub fn render_summary(template: &CertificateTemplate, format: OutputFormat) -> TemplateResult<String> {
    let summary = template.summary();
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&summary)
            .map_err(|e| TemplateError::SerializationError(format!("JSON output failed: {e}")))?,
        OutputFormat::Yaml => serde_yaml::to_string(&summary)
            .map_err(|e| TemplateError::SerializationError(format!("YAML output failed: {e}")))?,
    };
    Ok(rendered)
}

/// Render a resolved specification as YAML
pub fn render_spec(spec: &CertificateSpec) -> TemplateResult<String> {
    spec.to_yaml_string()
        .map_err(|e| TemplateError::SerializationError(format!("YAML output failed: {e}")))
}
