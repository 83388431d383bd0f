//! Presentation adapter interface
//!
//! The compiled tree is handed to a [`Presenter`] through [`mount`]. Any
//! widget library can sit behind the trait; the terminal implementation lives
//! in [`super::menu`].

use anyhow::Result;

use crate::pipeline::{MenuKind, MenuNode};

/// Minimal capabilities a menu front end must offer.
pub trait Presenter {
    /// Opaque reference to one menu page.
    type Handle;

    /// Create the top-level menu page.
    fn create_root_menu(&mut self, title: &str) -> Self::Handle;

    /// Add a submenu entry for `node` to `parent` and return the new page.
    fn push_submenu(&mut self, parent: &Self::Handle, node: &MenuNode) -> Self::Handle;

    /// Add an entry to `parent` that runs `command` when selected.
    fn add_command_item(&mut self, parent: &Self::Handle, label: &str, command: &str);

    /// Run the session until the user leaves it.
    fn run(self, root: Self::Handle) -> Result<()>;
}

/// Build the pages for `tree` in `presenter`, returning the root page.
///
/// A command at the root yields a root page holding just that command.
pub fn mount<P: Presenter>(tree: &MenuNode, presenter: &mut P) -> P::Handle {
    let root = presenter.create_root_menu(&tree.label);
    match &tree.kind {
        MenuKind::Submenu { children } => fill(presenter, &root, children),
        MenuKind::Command { command } => presenter.add_command_item(&root, &tree.label, command),
    }
    root
}

/// Mount `tree` and run the session.
pub fn present<P: Presenter>(tree: &MenuNode, mut presenter: P) -> Result<()> {
    let root = mount(tree, &mut presenter);
    presenter.run(root)
}

fn fill<P: Presenter>(presenter: &mut P, parent: &P::Handle, children: &[MenuNode]) {
    for child in children {
        match &child.kind {
            MenuKind::Submenu { children } => {
                let page = presenter.push_submenu(parent, child);
                fill(presenter, &page, children);
            }
            MenuKind::Command { command } => {
                presenter.add_command_item(parent, &child.label, command)
            }
        }
    }
}
