//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Scaffolding error type
///
/// Every variant is fatal: a run stops at the first error and reports it.
/// Artifacts already written by the same run stay on disk.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Module or entity name is empty or malformed
    #[error("Invalid {what} name '{name}': {reason}")]
    InvalidName {
        /// Which name was rejected ("module" or "entity")
        what: &'static str,
        /// The rejected input
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// No artifact kind was selected
    #[error("No artifact kind selected. Pass --all or at least one kind flag")]
    EmptySelection,

    /// Unknown artifact kind name
    #[error("Unknown artifact kind: '{0}'")]
    UnknownKind(String),

    /// The pluralized table does not exist in the catalog
    #[error("Table not found in schema catalog: '{table}'")]
    TableNotFound {
        /// Table that was looked up
        table: String,
    },

    /// A column type has no semantic mapping
    #[error("Unmapped column type '{raw_type}' for column '{column}'")]
    UnmappedType {
        /// Column name
        column: String,
        /// Raw type string as reported by the catalog
        raw_type: String,
    },

    /// Template is absent from every configured source
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// Template name (e.g. `module.model.stub`)
        name: String,
    },

    /// Template exists but cannot be read
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        /// Template path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template references a placeholder the artifact kind does not supply
    #[error("Template {template} uses unknown placeholder {{{{{placeholder}}}}}")]
    UnknownPlaceholder {
        /// Template name
        template: String,
        /// Placeholder key without braces
        placeholder: String,
    },

    /// The artifact kind declares a placeholder but no fragment was derived for it
    #[error("No fragment derived for placeholder {{{{{placeholder}}}}} in {template}")]
    MissingFragment {
        /// Template name
        template: String,
        /// Placeholder key without braces
        placeholder: String,
    },

    /// Directory creation or file write failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Database driver error
    #[error("Schema catalog error: {0}")]
    Catalog(#[from] sqlx::Error),

    /// Offline schema file cannot be read or parsed
    #[error("Invalid schema file {}: {reason}", path.display())]
    SchemaFile {
        /// Schema file path
        path: PathBuf,
        /// Parse or read failure
        reason: String,
    },

    /// Catalog locator names no known backend
    #[error("Unsupported catalog locator: '{0}'. Expected sqlite:, postgres:, mysql: or a .json/.toml schema file")]
    UnsupportedCatalog(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for ScaffoldError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
