//! Command-line argument definitions using clap

use clap::{ArgAction, Parser};
use encoding_rs::Encoding;
use std::path::PathBuf;

use crate::pipeline::{
    encoding_for_label, MissingPolicy, Settings, DEFAULT_SETTINGS_FILE, ROOT_SECTION,
};

/// shellmenu - a terminal menu of shell commands described by an INI file
#[derive(Parser, Debug)]
#[command(name = "shellmenu")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Print help
    #[arg(short = 'h', long, short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Verbose logging (debug level, written to stderr)
    #[arg(short = 'l', long)]
    pub log: bool,

    /// Settings file describing the menu
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Section the menu starts from
    #[arg(long, value_name = "SECTION", default_value = ROOT_SECTION)]
    pub root: String,

    /// Text encoding of the settings file (e.g. utf-8, windows-1251, koi8-r)
    #[arg(long, value_name = "LABEL", default_value = "utf-8", value_parser = parse_encoding)]
    pub encoding: &'static Encoding,

    /// Show an empty "unknown" item for children that name no section
    /// instead of refusing to start
    #[arg(long, default_value = "false")]
    pub lenient: bool,

    /// Validate the settings and print a summary instead of opening the menu
    #[arg(long, default_value = "false", conflicts_with = "json")]
    pub check: bool,

    /// Print the compiled menu tree as JSON instead of opening the menu
    #[arg(long, default_value = "false")]
    pub json: bool,
}

impl Cli {
    /// Pipeline settings selected by these arguments.
    pub fn settings(&self) -> Settings {
        let missing = if self.lenient {
            MissingPolicy::Placeholder
        } else {
            MissingPolicy::Fail
        };
        Settings::new(&self.settings)
            .with_encoding(self.encoding)
            .with_root(self.root.clone())
            .with_missing(missing)
    }

    /// Whether the interactive menu should be opened.
    pub fn is_interactive(&self) -> bool {
        !self.check && !self.json
    }
}

/// Validator for the encoding label
fn parse_encoding(s: &str) -> Result<&'static Encoding, String> {
    encoding_for_label(s).ok_or_else(|| format!("'{}' is not a known text encoding", s))
}
