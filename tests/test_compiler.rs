//! Tests for compiling section tables into menu trees

use shellmenu::pipeline::{
    build_menu, compile, parse_str, CompileError, Compiler, ConfigValue, MenuKind, MenuNode,
    MissingPolicy, Section, SectionTable, Settings, MAX_MENU_DEPTH,
};

#[path = "common/mod.rs"]
mod common;

use common::{
    chain_menu, create_temp_settings, missing_settings_path, EDIT_QUIT_MENU, NESTED_MENU,
    UNLABELED_MENU,
};

fn labels(node: &MenuNode) -> Vec<&str> {
    node.children().iter().map(|c| c.label.as_str()).collect()
}

#[test]
fn test_edit_quit_example() {
    let table = parse_str(EDIT_QUIT_MENU, "test").unwrap();
    let tree = compile(&table, "MAIN_MENU").unwrap();

    let expected = MenuNode::submenu(
        "Main",
        "MAIN_MENU",
        vec![
            MenuNode::command("Edit", "Edit", "nano file.txt"),
            MenuNode::command("Quit", "Quit", "exit"),
        ],
    );
    assert_eq!(tree, expected);
}

#[test]
fn test_unlabeled_root_with_bare_tuple_children() {
    let table = parse_str(UNLABELED_MENU, "test").unwrap();
    let tree = compile(&table, "MAIN_MENU").unwrap();

    let expected = MenuNode::submenu(
        "unknown",
        "MAIN_MENU",
        vec![
            MenuNode::command("Edit", "Edit", "nano file.txt"),
            MenuNode::command("Quit", "Quit", "exit"),
        ],
    );
    assert_eq!(tree, expected);
}

#[test]
fn test_command_fragments_join_in_key_order() {
    let table = SectionTable::new().with(
        Section::new("MAIN_MENU")
            .with("label", "Both")
            .with("cmd002", "b")
            .with("cmd001", "a"),
    );
    let tree = compile(&table, "MAIN_MENU").unwrap();

    assert_eq!(tree.command_line(), Some("a; b"));
}

#[test]
fn test_section_without_children_or_commands_is_empty_command() {
    let table = SectionTable::new().with(Section::new("MAIN_MENU").with("label", "Nothing"));
    let tree = compile(&table, "MAIN_MENU").unwrap();

    assert!(!tree.is_submenu());
    assert_eq!(tree.command_line(), Some(""));
}

#[test]
fn test_label_defaults_to_unknown() {
    let table = parse_str(NESTED_MENU, "test").unwrap();
    let tree = compile(&table, "MAIN_MENU").unwrap();

    // [Tools] has no label of its own and inherits the DEFAULT one
    assert_eq!(labels(&tree), vec!["Files", "unnamed"]);

    let bare = SectionTable::new().with(Section::new("MAIN_MENU"));
    assert_eq!(compile(&bare, "MAIN_MENU").unwrap().label, "unknown");
}

#[test]
fn test_children_keep_listed_order() {
    let table = SectionTable::new()
        .with(Section::new("MAIN_MENU").with(
            "children",
            ConfigValue::from(vec!["C", "A", "B"]),
        ))
        .with(Section::new("A").with("label", "a"))
        .with(Section::new("B").with("label", "b"))
        .with(Section::new("C").with("label", "c"));
    let tree = compile(&table, "MAIN_MENU").unwrap();

    assert_eq!(labels(&tree), vec!["c", "a", "b"]);
}

#[test]
fn test_nested_menu() {
    let table = parse_str(NESTED_MENU, "test").unwrap();
    let tree = compile(&table, "MAIN_MENU").unwrap();

    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.leaf_count(), 3);

    let files = &tree.children()[0];
    assert_eq!(labels(files), vec!["List files", "Disk usage"]);
    assert_eq!(files.children()[1].command_line(), Some("df -h; du -sh ."));
}

#[test]
fn test_shared_section_is_compiled_twice() {
    let table = SectionTable::new()
        .with(Section::new("MAIN_MENU").with("children", ConfigValue::from(vec!["A", "B"])))
        .with(Section::new("A").with("children", ConfigValue::from(vec!["Shared"])))
        .with(Section::new("B").with("children", ConfigValue::from(vec!["Shared"])))
        .with(Section::new("Shared").with("label", "s").with("cmd001", "ls"));
    let tree = compile(&table, "MAIN_MENU").unwrap();

    assert_eq!(tree.leaf_count(), 2, "A section reachable twice is not a cycle");
}

#[test]
fn test_direct_self_reference_is_cyclic() {
    let table = SectionTable::new()
        .with(Section::new("MAIN_MENU").with("children", ConfigValue::from(vec!["MAIN_MENU"])));
    let err = compile(&table, "MAIN_MENU").unwrap_err();

    assert_eq!(
        err,
        CompileError::CyclicReference {
            chain: vec!["MAIN_MENU".to_string(), "MAIN_MENU".to_string()],
        }
    );
}

#[test]
fn test_transitive_reference_is_cyclic() {
    let table = SectionTable::new()
        .with(Section::new("MAIN_MENU").with("children", ConfigValue::from(vec!["A"])))
        .with(Section::new("A").with("children", ConfigValue::from(vec!["B"])))
        .with(Section::new("B").with("children", ConfigValue::from(vec!["A"])));
    let err = compile(&table, "MAIN_MENU").unwrap_err();

    assert_eq!(err.to_string(), "cyclic menu reference: MAIN_MENU -> A -> B -> A");
}

#[test]
fn test_missing_child_fails_by_default() {
    let table = SectionTable::new()
        .with(Section::new("MAIN_MENU").with("children", ConfigValue::from(vec!["Ghost"])));
    let err = compile(&table, "MAIN_MENU").unwrap_err();

    assert_eq!(
        err,
        CompileError::MissingSection {
            name: "Ghost".to_string(),
            referenced_by: Some("MAIN_MENU".to_string()),
        }
    );
}

#[test]
fn test_missing_child_placeholder() {
    let table = SectionTable::new()
        .with(Section::new("MAIN_MENU").with("children", ConfigValue::from(vec!["Ghost", "Real"])))
        .with(Section::new("Real").with("label", "Real").with("cmd001", "ls"));
    let tree = Compiler::new(&table)
        .missing(MissingPolicy::Placeholder)
        .compile("MAIN_MENU")
        .unwrap();

    let placeholder = &tree.children()[0];
    assert_eq!(placeholder.label, "unknown");
    assert_eq!(placeholder.kind, MenuKind::Command { command: String::new() });
    assert_eq!(tree.children()[1].label, "Real");
}

#[test]
fn test_missing_root() {
    let table = SectionTable::new().with(Section::new("Other"));
    let err = compile(&table, "MAIN_MENU").unwrap_err();

    assert!(matches!(
        err,
        CompileError::MissingSection { ref name, referenced_by: None } if name == "MAIN_MENU"
    ));
}

#[test]
fn test_invalid_children_value() {
    let table = SectionTable::new()
        .with(Section::new("MAIN_MENU").with("children", ConfigValue::Integer(5)));
    let err = compile(&table, "MAIN_MENU").unwrap_err();

    assert!(matches!(err, CompileError::InvalidChildren { .. }));
}

#[test]
fn test_deepest_allowed_chain_compiles() {
    let table = parse_str(&chain_menu(MAX_MENU_DEPTH), "test").unwrap();
    let tree = compile(&table, "S0").unwrap();

    assert_eq!(tree.depth(), MAX_MENU_DEPTH);
    assert_eq!(tree.leaf_count(), 1);
}

#[test]
fn test_overlong_chain_is_rejected() {
    let table = parse_str(&chain_menu(5000), "test").unwrap();
    let err = compile(&table, "S0").unwrap_err();

    assert_eq!(
        err,
        CompileError::TooDeep {
            section: format!("S{}", MAX_MENU_DEPTH),
            limit: MAX_MENU_DEPTH,
        }
    );
}

#[test]
fn test_description_is_carried() {
    let table = SectionTable::new().with(
        Section::new("MAIN_MENU")
            .with("label", "Main")
            .with("description", "Everyday tasks"),
    );
    let tree = compile(&table, "MAIN_MENU").unwrap();

    assert_eq!(tree.description.as_deref(), Some("Everyday tasks"));
}

#[test]
fn test_build_menu_from_file() {
    let (_dir, path) = create_temp_settings(EDIT_QUIT_MENU);
    let tree = build_menu(&Settings::new(&path)).unwrap();

    assert_eq!(labels(&tree), vec!["Edit", "Quit"]);
}

#[test]
fn test_build_menu_with_other_root() {
    let (_dir, path) = create_temp_settings(NESTED_MENU);
    let tree = build_menu(&Settings::new(&path).with_root("Files")).unwrap();

    assert_eq!(tree.label, "Files");
    assert_eq!(tree.leaf_count(), 2);
}

#[test]
fn test_build_menu_missing_file() {
    let (_dir, path) = missing_settings_path();
    let err = build_menu(&Settings::new(&path)).unwrap_err();

    assert!(err.to_string().contains("not found"), "Got: {}", err);
}
