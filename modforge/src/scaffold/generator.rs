//! Module generator orchestrator
//!
//! Sequences the selected artifact kinds for one module/entity pair: reads the
//! entity's columns once (only when a selected kind needs them), then for each
//! kind in execution order loads its template, derives the fragments it
//! declares, renders and writes the file before moving on.
//!
//! A run stops at the first error. Files written by earlier kinds stay on disk,
//! and existing files at a computed path are overwritten.

use super::artifact::{ArtifactKind, ScaffoldRequest, TemplateContext};
use super::field_type::{self, FieldDescriptor};
use super::projection::{self, DocOptions};
use super::render::{Fragments, Placeholder, Renderer};
use super::templates::{BuiltinTemplates, TemplateStore};
use crate::error::{Result, ScaffoldError};
use crate::schema::SchemaCatalog;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// A rendered artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Destination path (module root joined with the kind's relative path)
    pub path: PathBuf,
    /// Rendered content
    pub content: String,
    /// Human description
    pub description: &'static str,
}

/// Generator for the artifacts of one module
#[derive(Debug)]
pub struct ModuleGenerator {
    modules_dir: PathBuf,
    templates: Box<dyn TemplateStore>,
    extension: String,
    example_timestamp: Option<DateTime<Utc>>,
}

impl ModuleGenerator {
    /// Generator writing under `modules_dir` with the built-in templates
    pub fn builtin(modules_dir: impl Into<PathBuf>) -> Self {
        Self {
            modules_dir: modules_dir.into(),
            templates: Box::new(BuiltinTemplates),
            extension: "php".to_string(),
            example_timestamp: None,
        }
    }

    /// Use another template store
    #[must_use]
    pub fn with_templates(mut self, templates: impl TemplateStore + 'static) -> Self {
        self.templates = Box::new(templates);
        self
    }

    /// File extension of generated files (default `php`)
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Pin the timestamp example in documentation annotations
    ///
    /// Without it every run uses the current instant, so output differs
    /// between runs for entities with timestamp columns.
    #[must_use]
    pub const fn with_example_timestamp(mut self, instant: DateTime<Utc>) -> Self {
        self.example_timestamp = Some(instant);
        self
    }

    /// Directory the module's artifacts are written under
    #[must_use]
    pub fn module_root(&self, request: &ScaffoldRequest) -> PathBuf {
        self.modules_dir.join(request.module())
    }

    /// Resolve the entity's table and normalize its columns
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TableNotFound`] if the table does not exist and
    /// [`ScaffoldError::UnmappedType`] for a column without a semantic type.
    pub async fn load_fields(
        &self,
        catalog: &dyn SchemaCatalog,
        request: &ScaffoldRequest,
    ) -> Result<Vec<FieldDescriptor>> {
        let table = request.table_name();
        tracing::debug!(entity = request.entity(), table = %table, "Resolved table");

        self.load_table_fields(catalog, &table).await
    }

    /// Read and normalize the columns of `table`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TableNotFound`] if the table does not exist and
    /// [`ScaffoldError::UnmappedType`] for a column without a semantic type.
    pub async fn load_table_fields(
        &self,
        catalog: &dyn SchemaCatalog,
        table: &str,
    ) -> Result<Vec<FieldDescriptor>> {
        let columns = catalog.list_columns(table).await?;
        let fields = field_type::normalize(&columns)?;
        tracing::debug!(table, fields = fields.len(), "Normalized columns");
        Ok(fields)
    }

    /// Generate and write every selected artifact
    ///
    /// # Errors
    ///
    /// Stops at the first schema, template, render or write error.
    pub async fn generate(
        &self,
        catalog: &dyn SchemaCatalog,
        request: &ScaffoldRequest,
    ) -> Result<Vec<GeneratedFile>> {
        let fields = if request.needs_fields() {
            self.load_fields(catalog, request).await?
        } else {
            Vec::new()
        };

        self.write_all(request, &TemplateContext::new(request, fields))
    }

    /// Generate every selected artifact with an empty field list
    ///
    /// No catalog is read; field fragments render empty.
    ///
    /// # Errors
    ///
    /// Stops at the first template, render or write error.
    pub fn skeleton(&self, request: &ScaffoldRequest) -> Result<Vec<GeneratedFile>> {
        self.write_all(request, &TemplateContext::new(request, Vec::new()))
    }

    /// Render the selected artifacts without writing them
    ///
    /// # Errors
    ///
    /// Stops at the first template or render error.
    pub fn render_artifacts(
        &self,
        request: &ScaffoldRequest,
        context: &TemplateContext,
    ) -> Result<Vec<GeneratedFile>> {
        let timestamp = self.timestamp();
        request
            .kinds()
            .map(|kind| self.render_one(kind, request, context, timestamp))
            .collect()
    }

    fn write_all(
        &self,
        request: &ScaffoldRequest,
        context: &TemplateContext,
    ) -> Result<Vec<GeneratedFile>> {
        let timestamp = self.timestamp();
        let mut files = Vec::new();

        for kind in request.kinds() {
            let file = self.render_one(kind, request, context, timestamp)?;
            write_file(&file.path, &file.content)?;
            tracing::info!(kind = %kind, path = %file.path.display(), "Wrote artifact");
            files.push(file);
        }

        Ok(files)
    }

    fn render_one(
        &self,
        kind: ArtifactKind,
        request: &ScaffoldRequest,
        context: &TemplateContext,
        timestamp: DateTime<Utc>,
    ) -> Result<GeneratedFile> {
        let template = kind.template_name();
        let body = self.templates.load(&template)?;
        let fragments = derive_fragments(kind, &context.fields, timestamp);
        let content = Renderer::new(&template, kind.placeholders()).render(&body, context, &fragments)?;

        Ok(GeneratedFile {
            kind,
            path: self
                .module_root(request)
                .join(kind.relative_path(request.entity(), &self.extension)),
            content,
            description: kind.description(),
        })
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.example_timestamp.unwrap_or_else(Utc::now)
    }
}

/// Derive the fragments `kind` declares from the field list
#[must_use]
pub fn derive_fragments(
    kind: ArtifactKind,
    fields: &[FieldDescriptor],
    example_timestamp: DateTime<Utc>,
) -> Fragments {
    let docs = |include_common_fields, include_validation_metadata| {
        projection::documentation(
            fields,
            &DocOptions {
                include_common_fields,
                include_validation_metadata,
                example_timestamp,
            },
        )
    };

    let mut fragments = Fragments::new();
    match kind {
        ArtifactKind::Model => {
            fragments.insert(Placeholder::FillableFields, projection::mutable_fields(fields));
            fragments.insert(Placeholder::SwaggerProperties, docs(true, false).properties);
        }
        ArtifactKind::Dto => {
            let constructor = projection::constructor(fields);
            fragments.insert(Placeholder::ConstructorProperties, constructor.properties);
            fragments.insert(Placeholder::ConstructorParams, constructor.params);
            fragments.insert(Placeholder::ArrayFields, constructor.array_fields);
        }
        ArtifactKind::StoreRequest | ArtifactKind::UpdateRequest => {
            let documentation = docs(false, true);
            fragments.insert(Placeholder::RulesDefinitions, projection::validation_rules(fields));
            fragments.insert(Placeholder::SwaggerRequired, documentation.required);
            fragments.insert(Placeholder::SwaggerProperties, documentation.properties);
        }
        ArtifactKind::Resource => {
            fragments.insert(Placeholder::ArrayFields, projection::array_fields(fields));
            fragments.insert(Placeholder::SwaggerProperties, docs(true, true).properties);
        }
        _ => {}
    }
    fragments
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ScaffoldError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| ScaffoldError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::templates::TemplateDirectory;
    use crate::schema::MemoryCatalog;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new().with_table(
            "products",
            &[
                ("id", "int", false),
                ("name", "varchar(60)", true),
                ("price", "decimal(10,2)", false),
                ("created_at", "timestamp", true),
                ("deleted_at", "timestamp", true),
            ],
        )
    }

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_generates_every_kind() {
        let dir = tempdir().unwrap();
        let generator = ModuleGenerator::builtin(dir.path()).with_example_timestamp(instant());
        let request = ScaffoldRequest::new("Catalog", "Product", ArtifactKind::all()).unwrap();

        let files = generator.generate(&catalog(), &request).await.unwrap();
        assert_eq!(files.len(), 15);

        let kinds: Vec<_> = files.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, ArtifactKind::ALL);

        for file in &files {
            assert!(file.path.starts_with(dir.path().join("Catalog")));
            assert_eq!(fs::read_to_string(&file.path).unwrap(), file.content);
            assert!(!file.content.contains("{{"), "unrendered token in {}", file.path.display());
        }
    }

    #[tokio::test]
    async fn test_model_fragments() {
        let dir = tempdir().unwrap();
        let generator = ModuleGenerator::builtin(dir.path()).with_example_timestamp(instant());
        let request = ScaffoldRequest::new("Catalog", "Product", [ArtifactKind::Model]).unwrap();

        let files = generator.generate(&catalog(), &request).await.unwrap();
        let model = &files[0].content;
        assert!(model.contains("namespace App\\Modules\\Catalog\\Models;"));
        assert!(model.contains("class Product extends Model"));
        assert!(model.contains("        'name',\n        'price'\n    ];"));
        assert!(model.contains("@OA\\Property(property=\"id\""));
        assert!(model.contains("example=\"2024-05-01T12:00:00.000000Z\""));
    }

    #[tokio::test]
    async fn test_load_table_fields() {
        let generator = ModuleGenerator::builtin("unused");

        let fields = generator.load_table_fields(&catalog(), "products").await.unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "price", "created_at", "deleted_at"]);

        assert!(matches!(
            generator.load_table_fields(&catalog(), "widgets").await,
            Err(ScaffoldError::TableNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_static_kinds_skip_catalog() {
        let dir = tempdir().unwrap();
        let generator = ModuleGenerator::builtin(dir.path());
        let request = ScaffoldRequest::new(
            "Catalog",
            "Widget",
            ArtifactKind::group("action").unwrap(),
        )
        .unwrap();

        // `widgets` is not in the catalog
        let files = generator.generate(&catalog(), &request).await.unwrap();
        assert_eq!(files.len(), 6);
        assert!(files[0].path.ends_with("Actions/Widget/StoreWidgetAction.php"));
    }

    #[tokio::test]
    async fn test_missing_table_writes_nothing() {
        let dir = tempdir().unwrap();
        let generator = ModuleGenerator::builtin(dir.path());
        let request = ScaffoldRequest::new("Sales", "Order", ArtifactKind::all()).unwrap();

        let err = generator.generate(&catalog(), &request).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::TableNotFound { table } if table == "orders"));
        assert!(!dir.path().join("Sales").exists());
    }

    #[tokio::test]
    async fn test_missing_template_keeps_earlier_files() {
        let dir = tempdir().unwrap();
        let templates = tempdir().unwrap();
        fs::write(templates.path().join("module.model.stub"), "class {{entity}}").unwrap();

        let generator = ModuleGenerator::builtin(dir.path())
            .with_templates(TemplateDirectory::new(templates.path(), false));
        let request = ScaffoldRequest::new(
            "Catalog",
            "Product",
            [ArtifactKind::Model, ArtifactKind::Service],
        )
        .unwrap();

        let err = generator.generate(&catalog(), &request).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound { name } if name == "module.service.stub"));
        assert!(dir.path().join("Catalog/Models/Product.php").exists());
        assert!(!dir.path().join("Catalog/Services").exists());
    }

    #[test]
    fn test_skeleton_renders_empty_fragments() {
        let dir = tempdir().unwrap();
        let generator = ModuleGenerator::builtin(dir.path()).with_extension("php");
        let request = ScaffoldRequest::new("Auth", "Role", ArtifactKind::all()).unwrap();

        let files = generator.skeleton(&request).unwrap();
        assert_eq!(files.len(), 15);

        let dto = files.iter().find(|f| f.kind == ArtifactKind::Dto).unwrap();
        assert!(dto.path.ends_with("Auth/DTO/RoleDTO.php"));
        assert!(dto.content.contains("class RoleDTO"));
        assert!(!dto.content.contains("{{"));
    }

    #[test]
    fn test_render_artifacts_is_pure() {
        let dir = tempdir().unwrap();
        let generator = ModuleGenerator::builtin(dir.path()).with_example_timestamp(instant());
        let request =
            ScaffoldRequest::new("Catalog", "Product", [ArtifactKind::Resource]).unwrap();
        let context = TemplateContext::new(&request, Vec::new());

        let files = generator.render_artifacts(&request, &context).unwrap();
        assert_eq!(files.len(), 1);
        assert!(!files[0].path.exists());
    }

    #[test]
    fn test_derive_fragments_matches_declared_placeholders() {
        let fields = field_type::normalize(&[crate::schema::RawColumn::new(
            "email",
            "varchar(120)",
            false,
        )])
        .unwrap();

        for kind in ArtifactKind::ALL {
            let fragments = derive_fragments(kind, &fields, instant());
            let keys: Vec<_> = fragments.keys().copied().collect();
            let mut declared = kind.placeholders().to_vec();
            declared.sort();
            assert_eq!(keys, declared, "fragments for {kind}");
        }
    }

    #[test]
    fn test_request_fragments_exclude_common_fields() {
        let fields = field_type::normalize(&[
            crate::schema::RawColumn::new("id", "int", false),
            crate::schema::RawColumn::new("email", "varchar(120)", false),
        ])
        .unwrap();

        let fragments = derive_fragments(ArtifactKind::StoreRequest, &fields, instant());
        assert_eq!(
            fragments[&Placeholder::RulesDefinitions],
            "'email' => 'required|string|min:1|max:120|email'"
        );
        assert_eq!(fragments[&Placeholder::SwaggerRequired], "\"email\"");
        assert!(!fragments[&Placeholder::SwaggerProperties].contains("\"id\""));
    }
}
