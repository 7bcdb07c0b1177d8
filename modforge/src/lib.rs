//! modforge: schema-driven module scaffolding
//!
//! Given a module name, an entity name and the column metadata of the entity's
//! table, modforge derives a uniform set of source artifacts for the module: a
//! model, a repository and its interface, a service, a DTO, store/update request
//! validators, an output resource and one handler per CRUD action.
//!
//! The interesting part is the metadata pipeline:
//!
//! ```text
//! entity ─► helpers::resolve_table_name ─► schema::SchemaCatalog::list_columns
//!        ─► field_type::normalize ─► projection::* ─► render::Renderer ─► writer
//! ```
//!
//! Every fragment (fillable listing, constructor views, validation rules,
//! documentation annotations) is projected from the same ordered list of
//! [`FieldDescriptor`]s, so all generated files agree on field order, types and
//! nullability.
//!
//! # Example
//!
//! ```rust,no_run
//! use modforge::schema::MemoryCatalog;
//! use modforge::{ArtifactKind, ModuleGenerator, ScaffoldRequest};
//!
//! # async fn example() -> modforge::Result<()> {
//! let catalog = MemoryCatalog::new().with_table(
//!     "products",
//!     &[("id", "int", false), ("name", "varchar(60)", false)],
//! );
//! let request = ScaffoldRequest::new("Catalog", "Product", ArtifactKind::all())?;
//! let generator = ModuleGenerator::builtin("app/Modules");
//! let files = generator.generate(&catalog, &request).await?;
//! assert_eq!(files.len(), 15);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;
pub mod schema;

pub use error::{Result, ScaffoldError};
pub use scaffold::{
    ArtifactKind, DefaultValue, FieldDescriptor, GeneratedFile, ModuleGenerator,
    ScaffoldRequest, SemanticType, TemplateContext, TemplateHelpers,
};
