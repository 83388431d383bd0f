//! CLI module - argument parsing and the interactive menu

pub mod args;
pub mod menu;
pub mod presenter;

pub use args::Cli;
pub use menu::TerminalPresenter;
pub use presenter::{mount, present, Presenter};
