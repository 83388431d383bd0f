//! shellmenu: terminal menu of shell commands
//!
//! Reads the menu from an INI settings file and shows it as a full-screen
//! terminal menu.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::debug;

use shellmenu::cli::{present, Cli, TerminalPresenter};
use shellmenu::pipeline::build_menu;
use shellmenu::report::{print_menu_json, MenuSummary};
use shellmenu::utils::{init_logging, print_banner, print_error, print_settings, print_success};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log);
    debug!("{:?}", cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings();

    // Nothing is shown until the whole menu compiles
    let tree = build_menu(&settings)?;

    if cli.is_interactive() {
        return present(&tree, TerminalPresenter::new());
    }

    if cli.json {
        return print_menu_json(&tree, &settings);
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_settings(&settings);
    MenuSummary::from_tree(&tree).display();
    println!();
    print_success("Settings are valid");
    Ok(())
}
