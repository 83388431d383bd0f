//! Compiled menu tree

use serde::Serialize;

/// One node of the compiled menu tree.
///
/// Children are owned by their parent; a section referenced from several
/// places is compiled into independent copies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuNode {
    /// Display text
    pub label: String,
    /// Optional longer description shown alongside the label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Section the node was compiled from
    pub section: String,
    #[serde(flatten)]
    pub kind: MenuKind,
}

/// Submenu or command leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuKind {
    Submenu { children: Vec<MenuNode> },
    Command { command: String },
}

impl MenuNode {
    pub fn submenu(
        label: impl Into<String>,
        section: impl Into<String>,
        children: Vec<MenuNode>,
    ) -> Self {
        Self {
            label: label.into(),
            description: None,
            section: section.into(),
            kind: MenuKind::Submenu { children },
        }
    }

    pub fn command(
        label: impl Into<String>,
        section: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            description: None,
            section: section.into(),
            kind: MenuKind::Command {
                command: command.into(),
            },
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn is_submenu(&self) -> bool {
        matches!(self.kind, MenuKind::Submenu { .. })
    }

    /// Child nodes; empty for commands.
    pub fn children(&self) -> &[MenuNode] {
        match &self.kind {
            MenuKind::Submenu { children } => children,
            MenuKind::Command { .. } => &[],
        }
    }

    /// Shell command, for command leaves.
    pub fn command_line(&self) -> Option<&str> {
        match &self.kind {
            MenuKind::Submenu { .. } => None,
            MenuKind::Command { command } => Some(command),
        }
    }

    /// Number of command leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            MenuKind::Submenu { children } => children.iter().map(MenuNode::leaf_count).sum(),
            MenuKind::Command { .. } => 1,
        }
    }

    /// Levels in this subtree; a lone command has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(MenuNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Visit every node in pre-order together with its depth (root = 0).
    pub fn walk<F: FnMut(usize, &MenuNode)>(&self, visit: &mut F) {
        self.walk_at(0, visit);
    }

    fn walk_at<F: FnMut(usize, &MenuNode)>(&self, depth: usize, visit: &mut F) {
        visit(depth, self);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }
}
