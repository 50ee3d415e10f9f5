//! `openfarm generate` subcommand
//!
//! Reads module type and module instance descriptors (JSON) and emits a
//! single firmware sketch source file.
//!
//! # Usage
//!
//! ```text
//! openfarm generate --types-file types.json --modules-file modules.json
//! openfarm generate ... --plugin csv --plugin ros       # add protocols
//! openfarm generate ... --categories calibration        # select port groups
//! openfarm generate ... --check                         # validate only (CI)
//! openfarm generate ... --dry-run                       # print, don't write
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::Args;
use colored::Colorize;

use openfarm_codegen::{
    generate, plugin_by_name, prune, synthesize, Category, ModuleInstance, ModuleType, Plugin,
    RESERVED_WORDS,
};

use crate::error::{CliError, CliResult};

/// Generate firmware source from type and instance descriptors
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Path to the module type descriptors (JSON object keyed by type id)
    #[arg(long)]
    pub types_file: PathBuf,

    /// Path to the module instance descriptors (JSON object keyed by
    /// instance id)
    #[arg(long)]
    pub modules_file: PathBuf,

    /// Port categories to enable (sensors, actuators, calibration)
    #[arg(long = "categories", default_values = ["sensors", "actuators"])]
    pub categories: Vec<String>,

    /// Communication plugins to apply, in order
    #[arg(long = "plugin")]
    pub plugins: Vec<String>,

    /// Output path for the generated sketch
    #[arg(long, default_value = "src/src.ino")]
    pub output: PathBuf,

    /// Validate descriptors without writing files (exit 1 if errors found)
    #[arg(long)]
    pub check: bool,

    /// Print generated output to stdout instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn execute(self) -> CliResult<()> {
        // ── Read descriptors ───────────────────────────────────────────────
        let types = load_types(&self.types_file)?;
        let instances = load_instances(&self.modules_file)?;

        let categories = self
            .categories
            .iter()
            .map(|s| Category::from_str(s))
            .collect::<Result<Vec<_>, _>>()?;

        let plugins = self
            .plugins
            .iter()
            .map(|name| {
                plugin_by_name(name).ok_or_else(|| CliError::UnknownPlugin { name: name.clone() })
            })
            .collect::<CliResult<Vec<Box<dyn Plugin>>>>()?;

        // ── Synthesize and generate ────────────────────────────────────────
        let mut modules = synthesize(&instances, &types, RESERVED_WORDS)?;
        prune(&mut modules, &categories);
        let source = generate(&modules, &plugins)?;

        if self.check {
            println!(
                "{} {} module(s) validated successfully",
                "✓".green(),
                modules.len()
            );
            return Ok(());
        }

        if self.dry_run {
            println!("{}  {}", "── Sketch".dimmed(), self.output.display());
            println!("{source}");
            return Ok(());
        }

        // ── Write files ────────────────────────────────────────────────────
        write_if_changed(&self.output, &source)?;
        println!("{} {} module(s) processed", "✓".green(), modules.len());

        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_descriptor_map(path: &Path) -> CliResult<BTreeMap<String, serde_json::Value>> {
    if !path.exists() {
        return Err(CliError::DescriptorNotFound {
            path: path.display().to_string(),
        });
    }
    let src =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let map = serde_json::from_str(&src).with_context(|| format!("parsing {}", path.display()))?;
    Ok(map)
}

fn load_types(path: &Path) -> CliResult<BTreeMap<String, ModuleType>> {
    read_descriptor_map(path)?
        .into_iter()
        .map(|(id, value)| {
            let ty = ModuleType::from_json(value)
                .with_context(|| format!("module type \"{id}\" in {}", path.display()))?;
            Ok((id, ty))
        })
        .collect()
}

fn load_instances(path: &Path) -> CliResult<BTreeMap<String, ModuleInstance>> {
    read_descriptor_map(path)?
        .into_iter()
        .map(|(id, value)| {
            let instance = ModuleInstance::from_json(value)
                .with_context(|| format!("module instance \"{id}\" in {}", path.display()))?;
            Ok((id, instance))
        })
        .collect()
}

/// Write `contents` to `path`, creating parent directories as needed.
/// Prints a status line indicating whether the file was created or unchanged.
fn write_if_changed(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory: {}", parent.display()))?;
        }
    }

    // Read existing to detect changes
    let existing = std::fs::read_to_string(path).ok();
    let changed = existing.as_deref() != Some(contents);

    if changed {
        std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
        println!("  {} {} written", "→".cyan(), path.display());
    } else {
        println!("  {} {} unchanged", "·".dimmed(), path.display());
    }

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────────
