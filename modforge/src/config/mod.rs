//! Configuration
//!
//! Layered with figment, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. `/etc/modforge/config.toml`
//! 3. `~/.config/modforge/config.toml` (XDG)
//! 4. `./modforge.toml`
//! 5. An explicit file passed to [`ModforgeConfig::load`]
//! 6. Environment variables (`MODFORGE_*`, `__` for nesting, e.g.
//!    `MODFORGE_DATABASE__URL`)
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! [database]
//! url = "sqlite://./database/database.sqlite"
//!
//! [templates]
//! dir = "./stubs"
//! builtin_fallback = true
//!
//! [output]
//! modules_dir = "app/Modules"
//! extension = "php"
//!
//! [docs]
//! example_timestamp = "2024-01-01T00:00:00Z"
//! ```

use crate::error::Result;
use crate::scaffold::{ModuleGenerator, TemplateDirectory};
use chrono::{DateTime, Utc};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Catalog connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Catalog locator; `DATABASE_URL` is used when unset
    pub url: Option<String>,
}

/// Template source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Override directory
    pub dir: Option<PathBuf>,
    /// Use the built-in copy of templates the override directory lacks
    pub builtin_fallback: bool,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            dir: None,
            builtin_fallback: true,
        }
    }
}

/// Output layout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory holding one subdirectory per module
    pub modules_dir: PathBuf,
    /// Extension of generated files
    pub extension: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            modules_dir: PathBuf::from("app/Modules"),
            extension: "php".to_string(),
        }
    }
}

/// Documentation annotation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsSettings {
    /// Fixed example for timestamp properties; the current instant when unset
    pub example_timestamp: Option<DateTime<Utc>>,
}

/// Complete modforge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModforgeConfig {
    /// Catalog connection
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Template sources
    #[serde(default)]
    pub templates: TemplateSettings,

    /// Output layout
    #[serde(default)]
    pub output: OutputSettings,

    /// Documentation annotations
    #[serde(default)]
    pub docs: DocsSettings,
}

impl ModforgeConfig {
    /// Load the layered configuration
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`](crate::ScaffoldError::Config) if a
    /// configuration file cannot be parsed or a value has the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let system_config = PathBuf::from("/etc/modforge/config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        if let Some(user_config) = Self::recommended_path() {
            if user_config.exists() {
                figment = figment.merge(Toml::file(&user_config));
            }
        }

        let local_config = PathBuf::from("modforge.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        let config: Self = figment
            .merge(Env::prefixed("MODFORGE_").split("__"))
            .extract()?;

        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Load defaults, one file and the environment
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`](crate::ScaffoldError::Config) if the
    /// file cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("MODFORGE_").split("__"))
            .extract()?;

        Ok(config)
    }

    /// User configuration file (`~/.config/modforge/config.toml`)
    #[must_use]
    pub fn recommended_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("modforge").join("config.toml"))
    }

    /// Catalog locator, falling back to `DATABASE_URL`
    #[must_use]
    pub fn database_url(&self) -> Option<String> {
        self.database
            .url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .filter(|url| !url.trim().is_empty())
    }

    /// Generator configured with this output layout and template source
    #[must_use]
    pub fn generator(&self) -> ModuleGenerator {
        let mut generator = ModuleGenerator::builtin(&self.output.modules_dir)
            .with_extension(self.output.extension.clone());

        if let Some(dir) = &self.templates.dir {
            generator = generator.with_templates(TemplateDirectory::new(
                dir,
                self.templates.builtin_fallback,
            ));
        }

        if let Some(instant) = self.docs.example_timestamp {
            generator = generator.with_example_timestamp(instant);
        }

        generator
    }
}
