//! Module scaffold generator
//!
//! Turns an entity's column metadata into the artifacts of a module: naming
//! helpers, the raw-type normalizer, the field projection engine, the template
//! renderer and the orchestrator that writes the files.

pub mod artifact;
pub mod field_type;
pub mod generator;
pub mod helpers;
pub mod projection;
pub mod render;
pub mod templates;

pub use artifact::{ArtifactKind, ScaffoldRequest, TemplateContext};
pub use field_type::{DefaultValue, FieldDescriptor, SemanticType, COMMON_FIELDS};
pub use generator::{GeneratedFile, ModuleGenerator};
pub use helpers::TemplateHelpers;
pub use render::{Fragments, Placeholder, Renderer};
pub use templates::{BuiltinTemplates, TemplateDirectory, TemplateStore};
