//! Pipeline module - settings file to menu tree
//!
//! raw source -> [`SectionTable`] -> [`MenuNode`] tree. Every stage is a pure
//! transform and its output is immutable once built.

pub mod compiler;
pub mod decoder;
pub mod error;
pub mod loader;
pub mod node;
pub mod section;
pub mod settings;
pub mod value;

pub use compiler::*;
pub use decoder::{decode, parse_literal};
pub use error::*;
pub use loader::{load, parse_str, DEFAULT_SECTION};
pub use node::*;
pub use section::*;
pub use settings::*;
pub use value::*;

use anyhow::{Context, Result};
use log::info;

/// Load the settings file and compile it into a menu tree.
pub fn build_menu(settings: &Settings) -> Result<MenuNode> {
    info!(
        "Reading menu settings from {} ({})",
        settings.path.display(),
        settings.encoding.name()
    );
    let table = load(settings)?;
    let tree = Compiler::new(&table)
        .missing(settings.missing)
        .compile(&settings.root)
        .with_context(|| format!("Failed to build menu from {}", settings.path.display()))?;
    info!(
        "Compiled menu [{}] with {} command(s)",
        settings.root,
        tree.leaf_count()
    );
    Ok(tree)
}
