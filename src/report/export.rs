//! JSON export of the compiled menu

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use super::summary::MenuSummary;
use crate::pipeline::{MenuNode, Settings};

/// Where the tree came from
#[derive(Serialize)]
pub struct ExportMetadata {
    /// shellmenu version
    pub version: String,
    /// Settings file path
    pub settings_file: String,
    /// Root section name
    pub root: String,
    /// Encoding used to read the settings file
    pub encoding: String,
}

/// Tree-wide counts
#[derive(Serialize)]
pub struct ExportSummary {
    pub submenus: usize,
    pub commands: usize,
    pub empty_commands: usize,
    pub depth: usize,
}

/// Complete export: metadata, counts and the tree itself
#[derive(Serialize)]
pub struct MenuExport<'a> {
    pub metadata: ExportMetadata,
    pub summary: ExportSummary,
    pub tree: &'a MenuNode,
}

impl<'a> MenuExport<'a> {
    pub fn new(tree: &'a MenuNode, settings: &Settings) -> Self {
        let summary = MenuSummary::from_tree(tree);
        Self {
            metadata: ExportMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                settings_file: settings.path.display().to_string(),
                root: settings.root.clone(),
                encoding: settings.encoding.name().to_string(),
            },
            summary: ExportSummary {
                submenus: summary.submenus,
                commands: summary.commands.len(),
                empty_commands: summary.empty_commands(),
                depth: summary.depth,
            },
            tree,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize menu to JSON")
    }
}

/// Write the export of `tree` to stdout.
pub fn print_menu_json(tree: &MenuNode, settings: &Settings) -> Result<()> {
    let json = MenuExport::new(tree, settings).to_json()?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", json).context("Failed to write JSON to stdout")?;
    Ok(())
}
