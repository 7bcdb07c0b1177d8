//! Field inspection
//!
//! Shows how the generator reads an entity's table without writing anything.

use super::open_catalog;
use anyhow::{Context, Result};
use console::style;
use modforge::config::ModforgeConfig;
use modforge::{FieldDescriptor, TemplateHelpers};

/// Print the normalized fields of an entity's table
pub struct InspectCommand {
    entity: String,
}

impl InspectCommand {
    /// Create a new inspect command
    #[must_use]
    pub const fn new(entity: String) -> Self {
        Self { entity }
    }

    /// Execute the inspect command
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, the catalog cannot be opened,
    /// the table is missing or a column type is unmapped.
    pub async fn execute(&self, config: &ModforgeConfig) -> Result<()> {
        let entity = TemplateHelpers::normalize_name("entity", &self.entity)?;
        let table = TemplateHelpers::resolve_table_name(&entity);
        let catalog = open_catalog(config).await?;

        let fields = config
            .generator()
            .load_table_fields(catalog.as_ref(), &table)
            .await
            .with_context(|| format!("Failed to inspect table {table}"))?;

        println!(
            "\n{} {} ({} fields)\n",
            style("Table").cyan().bold(),
            style(&table).green().bold(),
            fields.len()
        );
        for line in field_table(&fields) {
            println!("  {line}");
        }

        Ok(())
    }
}

/// Aligned rows: name, type, nullable, length, precision, default
fn field_table(fields: &[FieldDescriptor]) -> Vec<String> {
    let width = fields
        .iter()
        .map(|field| field.name.len())
        .max()
        .unwrap_or(0)
        .max("name".len());

    let mut rows = vec![format!(
        "{:<width$}  {:<9}  {:<8}  {:>6}  {:>9}  default",
        "name", "type", "nullable", "length", "precision"
    )];

    rows.extend(fields.iter().map(|field| {
        let marker = if field.is_common() { " (common)" } else { "" };
        format!(
            "{:<width$}  {:<9}  {:<8}  {:>6}  {:>9}  {}{marker}",
            field.name,
            field.semantic_type.to_string(),
            if field.nullable { "yes" } else { "no" },
            field.max_length,
            field.precision,
            field.default_value.to_literal(),
        )
    }));

    rows
}
