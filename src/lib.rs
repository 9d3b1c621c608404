//! YAML to X.509 template library
//!
//! Turns a YAML configuration document into a typed X.509 certificate
//! template. Documents can describe the certificate directly or compose it
//! from named, reusable segments that are merged in a declared order.

pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

pub use domain::spec::{CertificateSpec, ConfigDocument};
pub use domain::template::{CertificateTemplate, TemplateSummary};
pub use infra::config::{ConfigManager, ConverterConfiguration, ExportFormat, OutputFormat};
pub use infra::error::{TemplateError, TemplateResult};
pub use pipelines::convert::{
    read_document, render_spec, render_summary, template_from_yaml, ConvertWorkflow,
};
pub use services::merger::{merge_specs, FlagMergePolicy, SpecMerger};
pub use services::resolver::{resolve_config, ConfigResolver};
pub use services::template_builder::TemplateBuilder;

/// Build a template from an already resolved specification
#[must_use]
pub fn build_template(spec: &CertificateSpec) -> CertificateTemplate {
    TemplateBuilder::build(spec)
}
