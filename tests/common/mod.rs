//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// The two-item menu used throughout the documentation
pub const EDIT_QUIT_MENU: &str = "\
[MAIN_MENU]
label = Main
children = ['Edit', 'Quit']

[Edit]
label = Edit
cmd001 = nano file.txt

[Quit]
label = Quit
cmd001 = exit
";

/// The same menu with no root label, children written as a bare tuple
pub const UNLABELED_MENU: &str = "\
[MAIN_MENU]
children = 'Edit', 'Quit'

[Edit]
label = Edit
cmd001 = nano file.txt

[Quit]
label = Quit
cmd001 = exit
";

/// Sections `S0` .. `S{len-1}`, each listing the next; the last runs `true`.
pub fn chain_menu(len: usize) -> String {
    let mut text = String::new();
    for i in 0..len {
        text.push_str(&format!("[S{}]\nlabel = level {}\n", i, i));
        if i + 1 < len {
            text.push_str(&format!("children = S{}\n", i + 1));
        } else {
            text.push_str("cmd001 = true\n");
        }
    }
    text
}

/// A deeper menu with a shared DEFAULT label and a nested submenu
pub const NESTED_MENU: &str = "\
[DEFAULT]
label = unnamed

[MAIN_MENU]
label = Main
children = ['Files', 'Tools']

[Files]
label = Files
children = ['List', 'Disk']

[List]
label = List files
cmd001 = ls -la

[Disk]
label = Disk usage
cmd002 = du -sh .
cmd001 = df -h

[Tools]
cmd001 = top
";

/// Write `contents` as UTF-8 to `main_menu.ini` in a fresh temp directory.
/// Returns (temp_dir, file_path) - keep temp_dir alive to prevent cleanup.
pub fn create_temp_settings(contents: &str) -> (TempDir, PathBuf) {
    create_temp_settings_bytes(contents.as_bytes())
}

/// Write raw bytes to `main_menu.ini` in a fresh temp directory.
pub fn create_temp_settings_bytes(contents: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("main_menu.ini");
    std::fs::write(&path, contents).expect("Failed to write settings file");
    (temp_dir, path)
}

/// Path inside a fresh temp directory that does not exist.
pub fn missing_settings_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("absent.ini");
    (temp_dir, path)
}
