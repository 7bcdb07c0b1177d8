//! Artifact kinds and the per-run request
//!
//! Each [`ArtifactKind`] maps to exactly one template, one output path under the
//! module root and one closed set of dynamic placeholders. Variants are declared
//! in execution order, so sorting a selection yields the order files are written.

use super::field_type::FieldDescriptor;
use super::helpers::TemplateHelpers;
use super::render::Placeholder;
use crate::error::{Result, ScaffoldError};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One generated file category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    /// Eloquent model with `$fillable` and schema annotations
    Model,
    /// Service layer
    Service,
    /// Eloquent repository
    Repository,
    /// Repository contract
    RepositoryInterface,
    /// Data transfer object
    Dto,
    /// HTTP controller
    Controller,
    /// Validator for create requests
    StoreRequest,
    /// Validator for update requests
    UpdateRequest,
    /// Output transformer
    Resource,
    /// Create action
    StoreAction,
    /// Edit action
    EditAction,
    /// Update action
    UpdateAction,
    /// Delete action
    DeleteAction,
    /// Show action
    ShowAction,
    /// List action
    ListAction,
}

const MODEL_PLACEHOLDERS: &[Placeholder] =
    &[Placeholder::FillableFields, Placeholder::SwaggerProperties];
const DTO_PLACEHOLDERS: &[Placeholder] = &[
    Placeholder::ConstructorProperties,
    Placeholder::ConstructorParams,
    Placeholder::ArrayFields,
];
const REQUEST_PLACEHOLDERS: &[Placeholder] = &[
    Placeholder::RulesDefinitions,
    Placeholder::SwaggerRequired,
    Placeholder::SwaggerProperties,
];
const RESOURCE_PLACEHOLDERS: &[Placeholder] =
    &[Placeholder::ArrayFields, Placeholder::SwaggerProperties];

impl ArtifactKind {
    /// Every kind, in execution order
    pub const ALL: [Self; 15] = [
        Self::Model,
        Self::Service,
        Self::Repository,
        Self::RepositoryInterface,
        Self::Dto,
        Self::Controller,
        Self::StoreRequest,
        Self::UpdateRequest,
        Self::Resource,
        Self::StoreAction,
        Self::EditAction,
        Self::UpdateAction,
        Self::DeleteAction,
        Self::ShowAction,
        Self::ListAction,
    ];

    /// Every kind as a selection
    #[must_use]
    pub fn all() -> BTreeSet<Self> {
        Self::ALL.into_iter().collect()
    }

    /// Kinds selected by one command-line group
    ///
    /// `repository` covers the repository and its interface, `request` both
    /// validators and `action` the six action handlers. Single kinds are also
    /// accepted by slug.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnknownKind`] for an unrecognised name.
    pub fn group(name: &str) -> Result<Vec<Self>> {
        let kinds = match name {
            "all" => Self::ALL.to_vec(),
            "repository" => vec![Self::Repository, Self::RepositoryInterface],
            "request" => vec![Self::StoreRequest, Self::UpdateRequest],
            "action" => vec![
                Self::StoreAction,
                Self::EditAction,
                Self::UpdateAction,
                Self::DeleteAction,
                Self::ShowAction,
                Self::ListAction,
            ],
            other => vec![other.parse()?],
        };
        Ok(kinds)
    }

    /// Stable lower-case identifier
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Service => "service",
            Self::Repository => "repository",
            Self::RepositoryInterface => "repository-interface",
            Self::Dto => "dto",
            Self::Controller => "controller",
            Self::StoreRequest => "request-store",
            Self::UpdateRequest => "request-update",
            Self::Resource => "resource",
            Self::StoreAction => "action-store",
            Self::EditAction => "action-edit",
            Self::UpdateAction => "action-update",
            Self::DeleteAction => "action-delete",
            Self::ShowAction => "action-show",
            Self::ListAction => "action-list",
        }
    }

    /// Template name, e.g. `module.request-store.stub`
    #[must_use]
    pub fn template_name(self) -> String {
        format!("module.{}.stub", self.slug())
    }

    /// Output path relative to the module root
    ///
    /// # Examples
    ///
    /// ```
    /// # use modforge::ArtifactKind;
    /// # use std::path::PathBuf;
    /// assert_eq!(
    ///     ArtifactKind::StoreRequest.relative_path("Product", "php"),
    ///     PathBuf::from("Http/Requests/Product/StoreProductRequest.php")
    /// );
    /// ```
    #[must_use]
    pub fn relative_path(self, entity: &str, extension: &str) -> PathBuf {
        let (dir, file) = match self {
            Self::Model => ("Models".to_string(), entity.to_string()),
            Self::Service => ("Services".to_string(), format!("{entity}Service")),
            Self::Repository => (
                "Repositories/Eloquent".to_string(),
                format!("{entity}Repository"),
            ),
            Self::RepositoryInterface => (
                "Repositories/Interfaces".to_string(),
                format!("{entity}RepositoryInterface"),
            ),
            Self::Dto => ("DTO".to_string(), format!("{entity}DTO")),
            Self::Controller => (
                "Http/Controllers".to_string(),
                format!("{entity}Controller"),
            ),
            Self::StoreRequest | Self::UpdateRequest => (
                format!("Http/Requests/{entity}"),
                format!("{}{entity}Request", self.verb()),
            ),
            Self::Resource => ("Http/Resources".to_string(), format!("{entity}Resource")),
            Self::StoreAction
            | Self::EditAction
            | Self::UpdateAction
            | Self::DeleteAction
            | Self::ShowAction
            | Self::ListAction => (
                format!("Actions/{entity}"),
                format!("{}{entity}Action", self.verb()),
            ),
        };

        PathBuf::from(dir).join(format!("{file}.{extension}"))
    }

    /// Verb prefix of request and action files
    const fn verb(self) -> &'static str {
        match self {
            Self::StoreRequest | Self::StoreAction => "Store",
            Self::UpdateRequest | Self::UpdateAction => "Update",
            Self::EditAction => "Edit",
            Self::DeleteAction => "Delete",
            Self::ShowAction => "Show",
            Self::ListAction => "List",
            _ => "",
        }
    }

    /// Dynamic placeholders this kind's template may use
    #[must_use]
    pub const fn placeholders(self) -> &'static [Placeholder] {
        match self {
            Self::Model => MODEL_PLACEHOLDERS,
            Self::Dto => DTO_PLACEHOLDERS,
            Self::StoreRequest | Self::UpdateRequest => REQUEST_PLACEHOLDERS,
            Self::Resource => RESOURCE_PLACEHOLDERS,
            _ => &[],
        }
    }

    /// Whether rendering needs column metadata
    #[must_use]
    pub const fn needs_fields(self) -> bool {
        !self.placeholders().is_empty()
    }

    /// Human description for reports
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Service => "Service",
            Self::Repository => "Repository",
            Self::RepositoryInterface => "Repository interface",
            Self::Dto => "Data transfer object",
            Self::Controller => "Controller",
            Self::StoreRequest => "Store request validator",
            Self::UpdateRequest => "Update request validator",
            Self::Resource => "API resource",
            Self::StoreAction => "Store action",
            Self::EditAction => "Edit action",
            Self::UpdateAction => "Update action",
            Self::DeleteAction => "Delete action",
            Self::ShowAction => "Show action",
            Self::ListAction => "List action",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ArtifactKind {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| ScaffoldError::UnknownKind(s.to_string()))
    }
}

/// Validated input of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    module: String,
    entity: String,
    kinds: BTreeSet<ArtifactKind>,
}

impl ScaffoldRequest {
    /// Validate names and the selection
    ///
    /// Names are studly-cased (`user_profile` becomes `UserProfile`).
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] for an empty or malformed name and
    /// [`ScaffoldError::EmptySelection`] when no kind is selected.
    pub fn new(
        module: &str,
        entity: &str,
        kinds: impl IntoIterator<Item = ArtifactKind>,
    ) -> Result<Self> {
        let module = TemplateHelpers::normalize_name("module", module)?;
        let entity = TemplateHelpers::normalize_name("entity", entity)?;
        let kinds: BTreeSet<_> = kinds.into_iter().collect();

        if kinds.is_empty() {
            return Err(ScaffoldError::EmptySelection);
        }

        Ok(Self {
            module,
            entity,
            kinds,
        })
    }

    /// Studly-cased module name
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Studly-cased entity name
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Selected kinds, in execution order
    pub fn kinds(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Whether any selected kind needs column metadata
    #[must_use]
    pub fn needs_fields(&self) -> bool {
        self.kinds.iter().any(|kind| kind.needs_fields())
    }

    /// Table the entity's columns are read from
    #[must_use]
    pub fn table_name(&self) -> String {
        TemplateHelpers::resolve_table_name(&self.entity)
    }
}

/// Names and fields shared by every artifact of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    /// Studly-cased module name
    pub module: String,
    /// Studly-cased entity name
    pub entity: String,
    /// Field descriptors in catalog order
    pub fields: Vec<FieldDescriptor>,
}

impl TemplateContext {
    /// Context for a request and its fields
    #[must_use]
    pub fn new(request: &ScaffoldRequest, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            module: request.module().to_string(),
            entity: request.entity().to_string(),
            fields,
        }
    }

    /// Value of a static placeholder, `None` for dynamic ones
    #[must_use]
    pub fn static_value(&self, placeholder: Placeholder) -> Option<String> {
        match placeholder {
            Placeholder::Entity => Some(self.entity.clone()),
            Placeholder::LowerEntity => Some(self.entity.to_lowercase()),
            Placeholder::Module => Some(self.module.clone()),
            Placeholder::LowerModule => Some(self.module.to_lowercase()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_execution_order() {
        let order: Vec<_> = ArtifactKind::all().into_iter().collect();
        assert_eq!(order, ArtifactKind::ALL);
        assert_eq!(order.first(), Some(&ArtifactKind::Model));
        assert_eq!(order.last(), Some(&ArtifactKind::ListAction));
    }

    #[test]
    fn test_paths() {
        let cases = [
            (ArtifactKind::Model, "Models/Product.php"),
            (ArtifactKind::Service, "Services/ProductService.php"),
            (ArtifactKind::Repository, "Repositories/Eloquent/ProductRepository.php"),
            (
                ArtifactKind::RepositoryInterface,
                "Repositories/Interfaces/ProductRepositoryInterface.php",
            ),
            (ArtifactKind::Dto, "DTO/ProductDTO.php"),
            (ArtifactKind::Controller, "Http/Controllers/ProductController.php"),
            (
                ArtifactKind::UpdateRequest,
                "Http/Requests/Product/UpdateProductRequest.php",
            ),
            (ArtifactKind::Resource, "Http/Resources/ProductResource.php"),
            (ArtifactKind::EditAction, "Actions/Product/EditProductAction.php"),
            (ArtifactKind::ListAction, "Actions/Product/ListProductAction.php"),
        ];

        for (kind, expected) in cases {
            assert_eq!(kind.relative_path("Product", "php"), PathBuf::from(expected));
        }
    }

    #[test]
    fn test_template_names_are_unique() {
        let names: BTreeSet<_> = ArtifactKind::ALL.iter().map(|k| k.template_name()).collect();
        assert_eq!(names.len(), 15);
        assert!(names.contains("module.repository-interface.stub"));
    }

    #[test]
    fn test_needs_fields() {
        let needing: Vec<_> = ArtifactKind::ALL
            .into_iter()
            .filter(|k| k.needs_fields())
            .collect();
        assert_eq!(
            needing,
            [
                ArtifactKind::Model,
                ArtifactKind::Dto,
                ArtifactKind::StoreRequest,
                ArtifactKind::UpdateRequest,
                ArtifactKind::Resource,
            ]
        );
    }

    #[test]
    fn test_groups() {
        assert_eq!(ArtifactKind::group("all").unwrap().len(), 15);
        assert_eq!(ArtifactKind::group("action").unwrap().len(), 6);
        assert_eq!(
            ArtifactKind::group("request").unwrap(),
            [ArtifactKind::StoreRequest, ArtifactKind::UpdateRequest]
        );
        assert_eq!(ArtifactKind::group("dto").unwrap(), [ArtifactKind::Dto]);
        assert!(matches!(
            ArtifactKind::group("migration"),
            Err(ScaffoldError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_slug_round_trip() {
        for kind in ArtifactKind::ALL {
            assert_eq!(kind.slug().parse::<ArtifactKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_request_normalizes_names() {
        let request =
            ScaffoldRequest::new("catalog", "user_profile", [ArtifactKind::Model]).unwrap();
        assert_eq!(request.module(), "Catalog");
        assert_eq!(request.entity(), "UserProfile");
        assert_eq!(request.table_name(), "userprofiles");
        assert!(request.needs_fields());
    }

    #[test]
    fn test_request_rejects_empty_selection() {
        let result = ScaffoldRequest::new("Catalog", "Product", Vec::new());
        assert!(matches!(result, Err(ScaffoldError::EmptySelection)));
    }

    #[test]
    fn test_request_rejects_bad_names() {
        assert!(matches!(
            ScaffoldRequest::new("", "Product", ArtifactKind::all()),
            Err(ScaffoldError::InvalidName { what: "module", .. })
        ));
        assert!(matches!(
            ScaffoldRequest::new("Catalog", "9lives", ArtifactKind::all()),
            Err(ScaffoldError::InvalidName { what: "entity", .. })
        ));
    }

    #[test]
    fn test_static_only_selection() {
        let request =
            ScaffoldRequest::new("Catalog", "Product", ArtifactKind::group("action").unwrap())
                .unwrap();
        assert!(!request.needs_fields());
    }

    #[test]
    fn test_context_static_values() {
        let request = ScaffoldRequest::new("Catalog", "Product", ArtifactKind::all()).unwrap();
        let context = TemplateContext::new(&request, Vec::new());
        assert_eq!(
            context.static_value(Placeholder::LowerEntity).as_deref(),
            Some("product")
        );
        assert_eq!(
            context.static_value(Placeholder::LowerModule).as_deref(),
            Some("catalog")
        );
        assert_eq!(context.static_value(Placeholder::ArrayFields), None);
    }
}
