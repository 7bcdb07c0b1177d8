//! Template renderer
//!
//! Templates use `{{key}}` tokens from a closed set. Rendering validates every
//! token in the body against the static keys plus the artifact kind's dynamic
//! keys before substituting anything, so a stray or misspelled token is an
//! error instead of text left in the output.

use super::artifact::TemplateContext;
use crate::error::{Result, ScaffoldError};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid token pattern"));

/// A recognised placeholder key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// `{{entity}}`
    Entity,
    /// `{{lower_entity}}`
    LowerEntity,
    /// `{{module}}`
    Module,
    /// `{{lower_module}}`
    LowerModule,
    /// `{{fillable_fields}}`
    FillableFields,
    /// `{{swagger_properties}}`
    SwaggerProperties,
    /// `{{swagger_required}}`
    SwaggerRequired,
    /// `{{constructor_properties}}`
    ConstructorProperties,
    /// `{{constructor_params}}`
    ConstructorParams,
    /// `{{array_fields}}`
    ArrayFields,
    /// `{{rules_definitions}}`
    RulesDefinitions,
}

/// Derived fragment text by placeholder
pub type Fragments = BTreeMap<Placeholder, String>;

impl Placeholder {
    /// Placeholders every template may use
    pub const STATIC: [Self; 4] = [
        Self::Entity,
        Self::LowerEntity,
        Self::Module,
        Self::LowerModule,
    ];

    /// Key between the braces
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::LowerEntity => "lower_entity",
            Self::Module => "module",
            Self::LowerModule => "lower_module",
            Self::FillableFields => "fillable_fields",
            Self::SwaggerProperties => "swagger_properties",
            Self::SwaggerRequired => "swagger_required",
            Self::ConstructorProperties => "constructor_properties",
            Self::ConstructorParams => "constructor_params",
            Self::ArrayFields => "array_fields",
            Self::RulesDefinitions => "rules_definitions",
        }
    }

    /// Look up a key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        const ALL: [Placeholder; 11] = [
            Placeholder::Entity,
            Placeholder::LowerEntity,
            Placeholder::Module,
            Placeholder::LowerModule,
            Placeholder::FillableFields,
            Placeholder::SwaggerProperties,
            Placeholder::SwaggerRequired,
            Placeholder::ConstructorProperties,
            Placeholder::ConstructorParams,
            Placeholder::ArrayFields,
            Placeholder::RulesDefinitions,
        ];
        ALL.into_iter().find(|placeholder| placeholder.key() == key)
    }

    /// Whether the value comes from the names rather than the fields
    #[must_use]
    pub fn is_static(self) -> bool {
        Self::STATIC.contains(&self)
    }

    /// The token as written in templates
    #[must_use]
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.key())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Renders one template body for one artifact kind
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    template: &'a str,
    declared: &'a [Placeholder],
}

impl<'a> Renderer<'a> {
    /// Renderer for template `template` accepting the `declared` dynamic keys
    #[must_use]
    pub const fn new(template: &'a str, declared: &'a [Placeholder]) -> Self {
        Self { template, declared }
    }

    /// Tokens in `body` that are not allowed for this template
    fn check_tokens(&self, body: &str) -> Result<()> {
        for capture in TOKEN.captures_iter(body) {
            let key = &capture[1];
            let allowed = Placeholder::from_key(key)
                .is_some_and(|p| p.is_static() || self.declared.contains(&p));
            if !allowed {
                return Err(ScaffoldError::UnknownPlaceholder {
                    template: self.template.to_string(),
                    placeholder: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Substitute static names, then dynamic fragments
    ///
    /// Declared placeholders absent from the body are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnknownPlaceholder`] if the body uses a token
    /// outside the allowed set, or [`ScaffoldError::MissingFragment`] if a
    /// declared placeholder has no fragment.
    pub fn render(
        &self,
        body: &str,
        context: &TemplateContext,
        fragments: &Fragments,
    ) -> Result<String> {
        self.check_tokens(body)?;

        let mut output = body.to_string();
        for placeholder in Placeholder::STATIC {
            if let Some(value) = context.static_value(placeholder) {
                output = output.replace(&placeholder.token(), &value);
            }
        }

        for placeholder in self.declared {
            let fragment =
                fragments
                    .get(placeholder)
                    .ok_or_else(|| ScaffoldError::MissingFragment {
                        template: self.template.to_string(),
                        placeholder: placeholder.key().to_string(),
                    })?;
            output = output.replace(&placeholder.token(), fragment);
        }

        Ok(output)
    }
}
