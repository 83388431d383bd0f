//! shellmenu: terminal menus of shell commands
//!
//! A library for turning an INI settings file into a menu tree and
//! presenting it in the terminal.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
