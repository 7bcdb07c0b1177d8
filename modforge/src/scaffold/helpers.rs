//! Naming helpers for code generation
//!
//! This module provides the naming conventions used by the scaffold: studly
//! casing of module/entity names, the naïve table-name pluralization that feeds
//! the schema catalog, and input validation for user-supplied names.

use crate::error::{Result, ScaffoldError};

/// Naming helpers for the scaffold
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert a module or entity name to `StudlyCase`
    ///
    /// Each `_`, `-` or space separated segment gets an upper-case first
    /// letter; the rest of the segment keeps its case, so acronyms survive.
    ///
    /// # Examples
    ///
    /// ```
    /// # use modforge::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_studly_case("user_profile"), "UserProfile");
    /// assert_eq!(TemplateHelpers::to_studly_case("auth"), "Auth");
    /// assert_eq!(TemplateHelpers::to_studly_case("Product"), "Product");
    /// assert_eq!(TemplateHelpers::to_studly_case("HTTPRequest"), "HTTPRequest");
    /// ```
    #[must_use]
    pub fn to_studly_case(input: &str) -> String {
        input
            .split(['_', '-', ' '])
            .map(|segment| {
                let mut chars = segment.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect()
    }

    /// Resolve the table name for a singular entity
    ///
    /// Naïve English pluralization of the lower-cased entity: a trailing `s`
    /// takes `es`, a trailing `y` becomes `ies`, anything else takes `s`.
    /// Irregular forms are not handled; a wrong guess surfaces later as
    /// [`ScaffoldError::TableNotFound`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use modforge::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::resolve_table_name("Category"), "categories");
    /// assert_eq!(TemplateHelpers::resolve_table_name("Bus"), "buses");
    /// assert_eq!(TemplateHelpers::resolve_table_name("Order"), "orders");
    /// ```
    #[must_use]
    pub fn resolve_table_name(entity: &str) -> String {
        let entity = entity.trim().to_lowercase();

        if entity.ends_with('s') {
            format!("{entity}es")
        } else if let Some(stem) = entity.strip_suffix('y') {
            format!("{stem}ies")
        } else {
            format!("{entity}s")
        }
    }

    /// Validate and studly-case a module or entity name
    ///
    /// Names must be non-empty, start with an ASCII letter and contain only
    /// ASCII alphanumerics, `_` or `-`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] when the name is empty or malformed.
    pub fn normalize_name(what: &'static str, input: &str) -> Result<String> {
        let name = input.trim();

        if name.is_empty() {
            return Err(ScaffoldError::InvalidName {
                what,
                name: input.to_string(),
                reason: "name cannot be empty",
            });
        }

        if !name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            return Err(ScaffoldError::InvalidName {
                what,
                name: input.to_string(),
                reason: "name must start with a letter",
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ScaffoldError::InvalidName {
                what,
                name: input.to_string(),
                reason: "only letters, digits, '_' and '-' are allowed",
            });
        }

        Ok(Self::to_studly_case(name))
    }
}
