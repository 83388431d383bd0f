//! Menu tree compiler
//!
//! Walks the section table from the root section and builds the menu tree:
//!
//! - a section with a non-empty `children` list becomes a submenu whose
//!   children are the listed sections, in the listed order
//! - any other section becomes a command whose shell line is its `cmd*`
//!   values joined by `"; "` in ascending key order
//!
//! The chain of sections being expanded is tracked so that a section listing
//! one of its own ancestors is reported instead of recursing forever. Chains
//! longer than [`MAX_MENU_DEPTH`] are rejected as well.

use log::{debug, warn};

use super::error::CompileError;
use super::node::MenuNode;
use super::section::{Section, SectionTable};
use super::value::ConfigValue;

/// Root section used when none is configured.
pub const ROOT_SECTION: &str = "MAIN_MENU";
/// Label used for sections without a `label` key.
pub const UNKNOWN_LABEL: &str = "unknown";
pub const LABEL_KEY: &str = "label";
pub const DESCRIPTION_KEY: &str = "description";
pub const CHILDREN_KEY: &str = "children";
/// Keys starting with this prefix are command fragments.
pub const COMMAND_PREFIX: &str = "cmd";
pub const COMMAND_SEPARATOR: &str = "; ";
/// Deepest menu the compiler builds, counting the root as level 1.
pub const MAX_MENU_DEPTH: usize = 128;

/// Handling of `children` entries that name no section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Stop with [`CompileError::MissingSection`]
    #[default]
    Fail,
    /// Substitute an `"unknown"` command with an empty shell line
    Placeholder,
}

/// Compile `table` starting at `root`, failing on missing children.
pub fn compile(table: &SectionTable, root: &str) -> Result<MenuNode, CompileError> {
    Compiler::new(table).compile(root)
}

/// Configurable compiler over a borrowed section table.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    table: &'a SectionTable,
    missing: MissingPolicy,
}

impl<'a> Compiler<'a> {
    pub fn new(table: &'a SectionTable) -> Self {
        Self {
            table,
            missing: MissingPolicy::Fail,
        }
    }

    pub fn missing(mut self, policy: MissingPolicy) -> Self {
        self.missing = policy;
        self
    }

    pub fn compile(&self, root: &str) -> Result<MenuNode, CompileError> {
        let section = self
            .table
            .get(root)
            .ok_or_else(|| CompileError::MissingSection {
                name: root.to_string(),
                referenced_by: None,
            })?;
        let mut ancestors = Vec::new();
        self.build(section, &mut ancestors)
    }

    fn build(
        &self,
        section: &Section,
        ancestors: &mut Vec<String>,
    ) -> Result<MenuNode, CompileError> {
        if ancestors.iter().any(|name| name == section.name()) {
            let mut chain = ancestors.clone();
            chain.push(section.name().to_string());
            return Err(CompileError::CyclicReference { chain });
        }
        if ancestors.len() >= MAX_MENU_DEPTH {
            return Err(CompileError::TooDeep {
                section: section.name().to_string(),
                limit: MAX_MENU_DEPTH,
            });
        }

        let label = section_label(section);
        let description = section.get(DESCRIPTION_KEY).map(ToString::to_string);
        let child_names = children_of(section)?;

        if child_names.is_empty() {
            let command = command_line(section);
            debug!("[{}] command {:?}: {}", section.name(), label, command);
            return Ok(
                MenuNode::command(label, section.name(), command).with_description(description)
            );
        }

        ancestors.push(section.name().to_string());
        let mut children = Vec::with_capacity(child_names.len());
        for name in child_names {
            match self.table.get(name) {
                Some(child) => children.push(self.build(child, ancestors)?),
                None => match self.missing {
                    MissingPolicy::Fail => {
                        return Err(CompileError::MissingSection {
                            name: name.to_string(),
                            referenced_by: Some(section.name().to_string()),
                        });
                    }
                    MissingPolicy::Placeholder => {
                        warn!(
                            "Section [{}] listed in [{}] does not exist, using an empty item",
                            name,
                            section.name()
                        );
                        children.push(MenuNode::command(UNKNOWN_LABEL, name, ""));
                    }
                },
            }
        }
        ancestors.pop();

        debug!(
            "[{}] submenu {:?} with {} item(s)",
            section.name(),
            label,
            children.len()
        );
        Ok(MenuNode::submenu(label, section.name(), children).with_description(description))
    }
}

fn section_label(section: &Section) -> String {
    section
        .get(LABEL_KEY)
        .map(ToString::to_string)
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// Child section names, in listed order. Empty when the section is a command.
fn children_of(section: &Section) -> Result<Vec<&str>, CompileError> {
    let value = match section.get(CHILDREN_KEY) {
        Some(value) if value.is_truthy() => value,
        _ => return Ok(Vec::new()),
    };

    match value {
        ConfigValue::String(name) => Ok(vec![name.as_str()]),
        ConfigValue::List(items) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| CompileError::InvalidChildren {
                    section: section.name().to_string(),
                    found: format!("{} {}", item.type_name(), item.to_literal()),
                })
            })
            .collect(),
        other => Err(CompileError::InvalidChildren {
            section: section.name().to_string(),
            found: format!("{} {}", other.type_name(), other.to_literal()),
        }),
    }
}

/// `cmd*` values joined in ascending key order.
fn command_line(section: &Section) -> String {
    section
        .entries()
        .filter(|(key, _)| key.starts_with(COMMAND_PREFIX))
        .map(|(_, value)| value.to_string())
        .collect::<Vec<_>>()
        .join(COMMAND_SEPARATOR)
}
