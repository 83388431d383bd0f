//! Tests for mounting menu trees onto a presenter

use anyhow::Result;

use shellmenu::cli::{mount, present, Presenter};
use shellmenu::pipeline::{compile, parse_str, MenuNode};

#[path = "common/mod.rs"]
mod common;

use common::NESTED_MENU;

/// Presenter that records every call as a line of text
#[derive(Default)]
struct RecordingPresenter {
    calls: Vec<String>,
    pages: usize,
}

impl Presenter for RecordingPresenter {
    type Handle = usize;

    fn create_root_menu(&mut self, title: &str) -> usize {
        self.calls.push(format!("root {}", title));
        self.pages += 1;
        self.pages - 1
    }

    fn push_submenu(&mut self, parent: &usize, node: &MenuNode) -> usize {
        self.calls.push(format!("submenu {} in {}", node.label, parent));
        self.pages += 1;
        self.pages - 1
    }

    fn add_command_item(&mut self, parent: &usize, label: &str, command: &str) {
        self.calls.push(format!("command {} in {}: {}", label, parent, command));
    }

    fn run(self, root: usize) -> Result<()> {
        anyhow::ensure!(root < self.pages, "unknown root page {}", root);
        Ok(())
    }
}

fn nested_tree() -> MenuNode {
    let table = parse_str(NESTED_MENU, "test").unwrap();
    compile(&table, "MAIN_MENU").unwrap()
}

#[test]
fn test_mount_preserves_order_and_nesting() {
    let mut presenter = RecordingPresenter::default();
    let root = mount(&nested_tree(), &mut presenter);

    assert_eq!(root, 0);
    assert_eq!(
        presenter.calls,
        vec![
            "root Main",
            "submenu Files in 0",
            "command List files in 1: ls -la",
            "command Disk usage in 1: df -h; du -sh .",
            "command unnamed in 0: top",
        ]
    );
}

#[test]
fn test_mount_command_root() {
    let mut presenter = RecordingPresenter::default();
    mount(&MenuNode::command("Only", "MAIN_MENU", "ls"), &mut presenter);

    assert_eq!(presenter.calls, vec!["root Only", "command Only in 0: ls"]);
}

#[test]
fn test_present_runs_root() {
    assert!(present(&nested_tree(), RecordingPresenter::default()).is_ok());
}
