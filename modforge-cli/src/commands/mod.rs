//! CLI command implementations

pub mod crud;
pub mod inspect;
pub mod module;
pub mod templates;

pub use crud::{CrudCommand, KindSelection};
pub use inspect::InspectCommand;
pub use module::ModuleCommand;
pub use templates::TemplatesCommand;

use anyhow::{Context, Result};
use console::style;
use modforge::config::ModforgeConfig;
use modforge::schema::{self, SchemaCatalog};
use modforge::GeneratedFile;
use std::path::Path;

/// Open the configured catalog
async fn open_catalog(config: &ModforgeConfig) -> Result<Box<dyn SchemaCatalog>> {
    let url = config.database_url().context(
        "No schema catalog configured. Pass --database-url, set DATABASE_URL or add [database] url to modforge.toml",
    )?;
    schema::connect(&url)
        .await
        .with_context(|| format!("Failed to open schema catalog: {url}"))
}

/// Print the list of written artifacts
fn print_generated(files: &[GeneratedFile], root: &Path) {
    println!(
        "\n{} {} files:",
        style("Generated").green().bold(),
        files.len()
    );

    for file in files {
        let shown = file.path.strip_prefix(root).unwrap_or(&file.path);
        println!(
            "  {} {} ({})",
            style("✓").green(),
            style(shown.display()).dim(),
            style(file.description).dim()
        );
    }
}
