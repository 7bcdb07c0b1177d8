//! Module skeleton generation
//!
//! Writes every artifact kind for a module with empty field fragments, without
//! touching the schema catalog.

use super::print_generated;
use anyhow::{Context, Result};
use console::style;
use modforge::config::ModforgeConfig;
use modforge::{ArtifactKind, ScaffoldRequest};

/// Generate a module skeleton
pub struct ModuleCommand {
    module: String,
    entity: String,
}

impl ModuleCommand {
    /// Create a new module command
    #[must_use]
    pub const fn new(module: String, entity: String) -> Self {
        Self { module, entity }
    }

    /// Execute the module command
    ///
    /// # Errors
    ///
    /// Returns an error if names are invalid or any artifact fails to render
    /// or write.
    pub fn execute(&self, config: &ModforgeConfig) -> Result<()> {
        let request = ScaffoldRequest::new(&self.module, &self.entity, ArtifactKind::all())?;

        println!(
            "\n{} {} {}",
            style("Creating module").cyan().bold(),
            style(request.module()).green().bold(),
            style("...").cyan().bold()
        );

        let generator = config.generator();
        let files = generator
            .skeleton(&request)
            .context("Failed to generate module skeleton")?;

        print_generated(&files, &config.output.modules_dir);

        println!("\n{}", style("Next steps:").cyan().bold());
        println!(
            "  1. Fill in the model, DTO, requests and resource in {}",
            style(generator.module_root(&request).display()).yellow()
        );
        println!(
            "  2. Or regenerate them from the table: {}",
            style(format!(
                "modforge crud {} {} --model --dto --request --resource",
                request.module(),
                request.entity()
            ))
            .yellow()
        );

        Ok(())
    }
}
