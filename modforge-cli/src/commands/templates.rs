//! Template override management
//!
//! - `init` - Write the built-in templates into the override directory
//! - `list` - Show every template and whether it is customized
//! - `diff` - Show changes between an override and the built-in copy

use anyhow::{Context, Result};
use clap::Subcommand;
use console::{style, Emoji};
use modforge::config::ModforgeConfig;
use modforge::scaffold::{BuiltinTemplates, TemplateDirectory};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static SKIP: Emoji<'_, '_> = Emoji("· ", "");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");
static CUSTOM: Emoji<'_, '_> = Emoji("✨ ", "");
static DEFAULT: Emoji<'_, '_> = Emoji("  ", "");
static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "");

/// Override directory used when none is configured
const DEFAULT_OVERRIDE_DIR: &str = "stubs";

/// Template management subcommands
#[derive(Subcommand)]
pub enum TemplatesCommand {
    /// Write the built-in templates into the override directory
    Init {
        /// Overwrite templates that already exist
        #[arg(long)]
        force: bool,
    },
    /// List all templates and their status
    List {
        /// Show only customized templates
        #[arg(long)]
        customized: bool,
    },
    /// Show diff between a customized and the built-in template
    Diff {
        /// Template name (e.g. module.model.stub)
        template: Option<String>,
        /// Show diff for all customized templates
        #[arg(long)]
        all: bool,
    },
}

impl TemplatesCommand {
    /// Execute the templates command
    ///
    /// # Errors
    ///
    /// Returns error if template operation fails.
    pub fn execute(self, config: &ModforgeConfig) -> Result<()> {
        let store = override_dir(config);
        match self {
            Self::Init { force } => init_templates(&store, force),
            Self::List { customized } => list_templates(&store, customized),
            Self::Diff { template, all } => diff_templates(&store, template.as_deref(), all),
        }
    }
}

fn override_dir(config: &ModforgeConfig) -> TemplateDirectory {
    let dir = config
        .templates
        .dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OVERRIDE_DIR));
    TemplateDirectory::new(dir, config.templates.builtin_fallback)
}

/// Outcome of writing one built-in template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitOutcome {
    Written,
    Kept,
}

/// Write every built-in template into `store`'s directory
fn write_builtins(store: &TemplateDirectory, force: bool) -> Result<Vec<(&'static str, InitOutcome)>> {
    fs::create_dir_all(store.dir()).with_context(|| {
        format!(
            "Failed to create template directory: {}",
            store.dir().display()
        )
    })?;

    let mut outcomes = Vec::new();
    for name in BuiltinTemplates::names() {
        if store.is_customized(name) && !force {
            outcomes.push((name, InitOutcome::Kept));
            continue;
        }

        let body = BuiltinTemplates::get(name).unwrap_or_default();
        let path = store.path(name);
        fs::write(&path, body)
            .with_context(|| format!("Failed to write template: {}", path.display()))?;
        outcomes.push((name, InitOutcome::Written));
    }

    Ok(outcomes)
}

fn init_templates(store: &TemplateDirectory, force: bool) -> Result<()> {
    println!(
        "{FOLDER}Writing templates to {}",
        style(store.dir().display()).cyan()
    );
    println!();

    let outcomes = write_builtins(store, force)?;
    let mut written = 0;
    for (name, outcome) in &outcomes {
        match outcome {
            InitOutcome::Written => {
                println!("  {CHECK}{}", style(name).green());
                written += 1;
            }
            InitOutcome::Kept => {
                println!("  {SKIP}{} (exists, use --force to overwrite)", style(name).dim());
            }
        }
    }

    println!();
    println!(
        "{CHECK}Wrote {} of {} templates",
        written,
        outcomes.len()
    );
    println!();
    println!("Point the generator at them with:");
    println!(
        "  {} {}",
        style("modforge crud <module> <entity> --all --templates").cyan(),
        style(store.dir().display()).yellow()
    );

    Ok(())
}

/// Files in the override directory that match no built-in template
fn stray_files(dir: &Path) -> Vec<PathBuf> {
    let known = BuiltinTemplates::names();
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let relative = entry.path().strip_prefix(dir).unwrap_or_else(|_| entry.path());
            !known
                .iter()
                .any(|name| relative == Path::new(name))
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn list_templates(store: &TemplateDirectory, customized_only: bool) -> Result<()> {
    println!("{FOLDER}Module Templates");
    println!();
    println!("  Overrides: {}", style(store.dir().display()).cyan());
    println!();

    let mut total_customized = 0;
    let mut total_default = 0;

    for name in BuiltinTemplates::names() {
        let is_customized = store.is_customized(name);
        if customized_only && !is_customized {
            continue;
        }

        if is_customized {
            println!("    {CUSTOM}{}", style(name).yellow());
            total_customized += 1;
        } else {
            println!("    {DEFAULT}{}", style(name).dim());
            total_default += 1;
        }
    }

    let strays = stray_files(store.dir());
    if !strays.is_empty() {
        println!();
        println!("  {WARN}{}", style("Unrecognised files (never loaded):").yellow());
        for path in strays {
            println!("    {}", style(path.display()).dim());
        }
    }

    println!();
    println!(
        "  {} customized, {} default",
        style(total_customized).yellow(),
        style(total_default).dim()
    );

    Ok(())
}

fn diff_templates(store: &TemplateDirectory, template: Option<&str>, all: bool) -> Result<()> {
    if all {
        let mut found_any = false;
        for name in BuiltinTemplates::names() {
            if store.is_customized(name) {
                found_any = true;
                show_single_diff(store, name)?;
            }
        }
        if !found_any {
            println!("No customized templates found.");
        }
    } else if let Some(name) = template {
        show_single_diff(store, name)?;
    } else {
        anyhow::bail!("Please specify a template name or use --all");
    }

    Ok(())
}

/// Line diff from the built-in body to the override, one prefixed line per change
fn diff_lines(default_content: &str, custom_content: &str) -> Vec<(ChangeTag, String)> {
    TextDiff::from_lines(default_content, custom_content)
        .iter_all_changes()
        .map(|change| (change.tag(), change.to_string()))
        .collect()
}

fn show_single_diff(store: &TemplateDirectory, name: &str) -> Result<()> {
    let default_content = BuiltinTemplates::get(name)
        .with_context(|| format!("Unknown template: {name}"))?;

    if !store.is_customized(name) {
        anyhow::bail!("Template '{name}' is not customized");
    }
    let custom_path = store.path(name);
    let custom_content = fs::read_to_string(&custom_path)
        .with_context(|| format!("Failed to read template: {}", custom_path.display()))?;

    println!("{FILE}{}", style(name).bold());
    println!();

    for (tag, line) in diff_lines(default_content, &custom_content) {
        match tag {
            ChangeTag::Delete => print!("{}", style(format!("-{line}")).red()),
            ChangeTag::Insert => print!("{}", style(format!("+{line}")).green()),
            ChangeTag::Equal => print!(" {line}"),
        }
    }
    println!();

    Ok(())
}
