//! Menu summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{MenuKind, MenuNode};

/// One command of the menu with its position in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRow {
    /// Labels from the root down to the command
    pub path: Vec<String>,
    pub section: String,
    pub command: String,
}

/// Summary of a compiled menu tree
#[derive(Debug, Default)]
pub struct MenuSummary {
    pub title: String,
    pub submenus: usize,
    pub commands: Vec<CommandRow>,
    pub depth: usize,
}

impl MenuSummary {
    pub fn from_tree(tree: &MenuNode) -> Self {
        let mut summary = Self {
            title: tree.label.clone(),
            depth: tree.depth(),
            ..Default::default()
        };

        let mut path: Vec<String> = Vec::new();
        tree.walk(&mut |depth, node| {
            path.truncate(depth);
            path.push(node.label.clone());
            match &node.kind {
                MenuKind::Submenu { .. } => summary.submenus += 1,
                MenuKind::Command { command } => summary.commands.push(CommandRow {
                    path: path.clone(),
                    section: node.section.clone(),
                    command: command.clone(),
                }),
            }
        });

        summary
    }

    /// Commands with nothing to run.
    pub fn empty_commands(&self) -> usize {
        self.commands.iter().filter(|row| row.command.is_empty()).count()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("MENU SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![Cell::new("📁 Title"), Cell::new(&self.title)]);
        table.add_row(vec![Cell::new("📂 Submenus"), Cell::new(self.submenus)]);
        table.add_row(vec![
            Cell::new("▶  Commands"),
            Cell::new(self.commands.len())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        let empty = self.empty_commands();
        table.add_row(vec![
            Cell::new("⚠️  Empty commands"),
            Cell::new(empty).fg(if empty == 0 { Color::White } else { Color::Yellow }),
        ]);
        table.add_row(vec![Cell::new("📐 Depth"), Cell::new(self.depth)]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if self.commands.is_empty() {
            return;
        }

        println!();
        println!(
            "    {} {}",
            style("📝").cyan(),
            style("COMMANDS").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        for line in self.commands_table().to_string().lines() {
            println!("    {}", line);
        }
    }

    fn commands_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Menu path").add_attribute(Attribute::Bold),
            Cell::new("Section").add_attribute(Attribute::Bold),
            Cell::new("Command").add_attribute(Attribute::Bold),
        ]);

        for row in &self.commands {
            let command = if row.command.is_empty() {
                Cell::new("(nothing to run)").fg(Color::Yellow)
            } else {
                Cell::new(&row.command)
            };
            table.add_row(vec![
                Cell::new(row.path.join(" › ")),
                Cell::new(&row.section).fg(Color::DarkGrey),
                command,
            ]);
        }

        table
    }
}
