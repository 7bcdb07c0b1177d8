//! Module generation from a table
//!
//! ```bash
//! modforge crud Catalog Product --all
//! modforge crud Catalog Product --model --request
//! ```

use super::{open_catalog, print_generated};
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use modforge::config::ModforgeConfig;
use modforge::{ArtifactKind, ScaffoldRequest};

/// Artifact kinds selected on the command line
#[derive(Debug, Clone, Default, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct KindSelection {
    /// Generate every artifact kind
    #[arg(long)]
    pub all: bool,
    /// Model
    #[arg(long)]
    pub model: bool,
    /// Service
    #[arg(long)]
    pub service: bool,
    /// Repository and its interface
    #[arg(long)]
    pub repository: bool,
    /// Data transfer object
    #[arg(long)]
    pub dto: bool,
    /// Controller
    #[arg(long)]
    pub controller: bool,
    /// Store and update request validators
    #[arg(long)]
    pub request: bool,
    /// API resource
    #[arg(long)]
    pub resource: bool,
    /// Store, edit, update, delete, show and list actions
    #[arg(long)]
    pub action: bool,
}

impl KindSelection {
    /// Resolve the flags to artifact kinds
    ///
    /// # Errors
    ///
    /// Returns an error only if a group name is unknown, which the flag table
    /// rules out.
    pub fn kinds(&self) -> modforge::Result<Vec<ArtifactKind>> {
        let flags = [
            (self.all, "all"),
            (self.model, "model"),
            (self.service, "service"),
            (self.repository, "repository"),
            (self.dto, "dto"),
            (self.controller, "controller"),
            (self.request, "request"),
            (self.resource, "resource"),
            (self.action, "action"),
        ];

        let mut kinds = Vec::new();
        for (_, group) in flags.iter().filter(|(selected, _)| *selected) {
            kinds.extend(ArtifactKind::group(group)?);
        }
        Ok(kinds)
    }
}

/// Generate module artifacts from the entity's table
pub struct CrudCommand {
    module: String,
    entity: String,
    kinds: KindSelection,
}

impl CrudCommand {
    /// Create a new crud command
    #[must_use]
    pub const fn new(module: String, entity: String, kinds: KindSelection) -> Self {
        Self {
            module,
            entity,
            kinds,
        }
    }

    /// Execute the crud command
    ///
    /// # Errors
    ///
    /// Returns an error if names are invalid, nothing is selected, the catalog
    /// cannot be read or any artifact fails to render or write.
    pub async fn execute(&self, config: &ModforgeConfig) -> Result<()> {
        let request = ScaffoldRequest::new(&self.module, &self.entity, self.kinds.kinds()?)?;

        println!(
            "\n{} {} {} {}",
            style("Generating").cyan().bold(),
            style(request.entity()).green().bold(),
            style("in module").cyan().bold(),
            style(request.module()).green().bold()
        );

        let generator = config.generator();
        let catalog = if request.needs_fields() {
            println!(
                "  {} {}",
                style("Reading table").dim(),
                style(request.table_name()).yellow()
            );
            Some(open_catalog(config).await?)
        } else {
            None
        };

        let files = match &catalog {
            Some(catalog) => generator
                .generate(catalog.as_ref(), &request)
                .await
                .context("Failed to generate module artifacts")?,
            None => generator
                .skeleton(&request)
                .context("Failed to generate module artifacts")?,
        };

        print_generated(&files, &config.output.modules_dir);

        println!(
            "\n{} {} module is ready in {}",
            style("✨").green().bold(),
            style(request.module()).green().bold(),
            style(generator.module_root(&request).display()).yellow()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_selects_nothing() {
        assert!(KindSelection::default().kinds().unwrap().is_empty());
    }

    #[test]
    fn test_group_flags() {
        let selection = KindSelection {
            repository: true,
            action: true,
            ..KindSelection::default()
        };
        let kinds = selection.kinds().unwrap();
        assert_eq!(kinds.len(), 8);
        assert!(kinds.contains(&ArtifactKind::RepositoryInterface));
        assert!(kinds.contains(&ArtifactKind::ListAction));
    }

    #[test]
    fn test_all_overlaps_are_deduplicated_by_request() {
        let selection = KindSelection {
            all: true,
            model: true,
            ..KindSelection::default()
        };
        let request = ScaffoldRequest::new("Catalog", "Product", selection.kinds().unwrap()).unwrap();
        assert_eq!(request.kinds().count(), 15);
    }
}
