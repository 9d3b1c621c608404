//! Service layer module root.
//! Contains the stateless merge, resolution and template construction services.

pub mod merger;
pub mod resolver;
pub mod template_builder;

pub use merger::{merge_specs, FlagMergePolicy, SpecMerger};
pub use resolver::{resolve_config, ConfigResolver};
pub use template_builder::TemplateBuilder;
