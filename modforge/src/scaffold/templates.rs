//! Template stores
//!
//! Every artifact kind renders from a template named `module.<kind>.stub`.
//! Built-in copies are compiled into the binary; a [`TemplateDirectory`] lets a
//! project override any of them.

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

static BUILTIN: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "module.model.stub" => include_str!("stubs/module.model.stub"),
    "module.service.stub" => include_str!("stubs/module.service.stub"),
    "module.repository.stub" => include_str!("stubs/module.repository.stub"),
    "module.repository-interface.stub" => include_str!("stubs/module.repository-interface.stub"),
    "module.dto.stub" => include_str!("stubs/module.dto.stub"),
    "module.controller.stub" => include_str!("stubs/module.controller.stub"),
    "module.request-store.stub" => include_str!("stubs/module.request-store.stub"),
    "module.request-update.stub" => include_str!("stubs/module.request-update.stub"),
    "module.resource.stub" => include_str!("stubs/module.resource.stub"),
    "module.action-store.stub" => include_str!("stubs/module.action-store.stub"),
    "module.action-edit.stub" => include_str!("stubs/module.action-edit.stub"),
    "module.action-update.stub" => include_str!("stubs/module.action-update.stub"),
    "module.action-delete.stub" => include_str!("stubs/module.action-delete.stub"),
    "module.action-show.stub" => include_str!("stubs/module.action-show.stub"),
    "module.action-list.stub" => include_str!("stubs/module.action-list.stub"),
};

/// Source of template bodies
pub trait TemplateStore: Send + Sync + fmt::Debug {
    /// Load the body of template `name`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateNotFound`] if no source has the
    /// template, or [`ScaffoldError::TemplateRead`] if it cannot be read.
    fn load(&self, name: &str) -> Result<String>;
}

/// Templates compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    /// Built-in body of `name`
    #[must_use]
    pub fn get(name: &str) -> Option<&'static str> {
        BUILTIN.get(name).copied()
    }

    /// Names of every built-in template, sorted
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = BUILTIN.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl TemplateStore for BuiltinTemplates {
    fn load(&self, name: &str) -> Result<String> {
        Self::get(name)
            .map(str::to_string)
            .ok_or_else(|| ScaffoldError::TemplateNotFound {
                name: name.to_string(),
            })
    }
}

/// Templates read from a directory, optionally falling back to built-ins
#[derive(Debug, Clone)]
pub struct TemplateDirectory {
    dir: PathBuf,
    builtin_fallback: bool,
}

impl TemplateDirectory {
    /// Store reading `dir`
    pub fn new(dir: impl Into<PathBuf>, builtin_fallback: bool) -> Self {
        Self {
            dir: dir.into(),
            builtin_fallback,
        }
    }

    /// Override directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an override of `name` would live at
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Whether the directory overrides `name`
    #[must_use]
    pub fn is_customized(&self, name: &str) -> bool {
        self.path(name).is_file()
    }
}

impl TemplateStore for TemplateDirectory {
    fn load(&self, name: &str) -> Result<String> {
        let path = self.path(name);

        if path.is_file() {
            tracing::debug!(template = name, path = %path.display(), "Using template override");
            return fs::read_to_string(&path).map_err(|source| ScaffoldError::TemplateRead {
                path,
                source,
            });
        }

        if self.builtin_fallback {
            if let Some(body) = BuiltinTemplates::get(name) {
                tracing::warn!(
                    template = name,
                    dir = %self.dir.display(),
                    "Template not in override directory, using built-in copy"
                );
                return Ok(body.to_string());
            }
        }

        Err(ScaffoldError::TemplateNotFound {
            name: name.to_string(),
        })
    }
}
