//! Explicit startup settings for the load/compile pipeline

use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};

use super::compiler::{MissingPolicy, ROOT_SECTION};

/// Settings file used when none is given on the command line.
pub const DEFAULT_SETTINGS_FILE: &str = "main_menu.ini";

/// Where the menu comes from and how it is compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Path of the INI settings file
    pub path: PathBuf,
    /// Text encoding of the settings file
    pub encoding: &'static Encoding,
    /// Section the menu tree starts from
    pub root: String,
    /// What to do with `children` entries that name no section
    pub missing: MissingPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SETTINGS_FILE),
            encoding: UTF_8,
            root: ROOT_SECTION.to_string(),
            missing: MissingPolicy::Fail,
        }
    }
}

impl Settings {
    /// Default settings reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_missing(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }
}

/// Resolve a WHATWG encoding label such as `utf-8` or `windows-1251`.
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}
