//! Error types for loading settings and compiling the menu tree.
//!
//! Loading and compiling fail fast: any of these errors stops the program
//! before the interactive session starts. Messages name the offending
//! section, key or line so the settings file can be fixed and the program
//! rerun.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a settings source into a section table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings path does not point at an existing file.
    #[error("settings file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The source could not be split into sections and keys.
    ///
    /// `line` is 1-based; 0 means the problem concerns the whole source
    /// (for example bytes that are invalid under the declared encoding).
    #[error("malformed settings {}: {}", location(.origin, .line), .reason)]
    Malformed {
        /// File path or other description of the source
        origin: String,
        line: usize,
        reason: String,
    },

    /// The file exists but could not be read.
    #[error("failed to read settings file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn malformed(origin: &str, line: usize, reason: impl Into<String>) -> Self {
        ConfigError::Malformed {
            origin: origin.to_string(),
            line,
            reason: reason.into(),
        }
    }
}

/// Errors raised while compiling a section table into a menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A root or child section name has no matching section.
    #[error("section [{}] not found{}", .name, referenced_from(.referenced_by))]
    MissingSection {
        name: String,
        /// The section whose `children` listed `name`; `None` for the root
        referenced_by: Option<String>,
    },

    /// A section lists itself among its own ancestors.
    #[error("cyclic menu reference: {}", .chain.join(" -> "))]
    CyclicReference {
        /// Expansion path, ending with the section that repeats
        chain: Vec<String>,
    },

    /// A `children` value is neither a list of section names nor a single name.
    #[error("section [{}] has invalid children: {}", .section, .found)]
    InvalidChildren { section: String, found: String },

    /// The menu nests more levels than the compiler builds.
    #[error("menu nesting exceeds {} levels at section [{}]", .limit, .section)]
    TooDeep { section: String, limit: usize },
}

fn location(origin: &str, line: &usize) -> String {
    if *line == 0 {
        origin.to_string()
    } else {
        format!("{}:{}", origin, line)
    }
}

fn referenced_from(referenced_by: &Option<String>) -> String {
    match referenced_by {
        Some(parent) => format!(" (listed in children of [{}])", parent),
        None => String::new(),
    }
}
