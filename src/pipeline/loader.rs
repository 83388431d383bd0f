//! Settings loader for INI-style menu files
//!
//! Understands the configparser dialect menu files are written in:
//!
//! - `[name]` section headers (names are case-sensitive, text after `]` is
//!   ignored)
//! - `key = value` or `key: value` lines, keys folded to lower case
//! - full-line `#` / `;` comments, no inline comments
//! - indented continuation lines extending the previous value; blank lines
//!   between them stay part of the value
//! - a `[DEFAULT]` section whose keys every other section inherits
//!
//! Every value is run through the literal decoder ([`decode`](super::decoder::decode)).

use std::borrow::Cow;
use std::fs;
use std::io;

use encoding_rs::Encoding;
use log::{debug, trace};

use super::decoder::decode;
use super::error::ConfigError;
use super::section::{Section, SectionTable};
use super::settings::Settings;

/// Section whose keys act as fallbacks for all other sections.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Read and parse the settings file described by `settings`.
pub fn load(settings: &Settings) -> Result<SectionTable, ConfigError> {
    let path = &settings.path;
    if !path.is_file() {
        return Err(ConfigError::NotFound { path: path.clone() });
    }

    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound { path: path.clone() },
        _ => ConfigError::Io {
            path: path.clone(),
            source,
        },
    })?;

    let origin = path.display().to_string();
    let text = decode_text(&bytes, settings.encoding, &origin)?;
    let table = parse_str(&text, &origin)?;
    debug!(
        "Loaded {} section(s) from {} ({})",
        table.len(),
        origin,
        settings.encoding.name()
    );
    Ok(table)
}

/// Parse settings text. `origin` only appears in error messages.
pub fn parse_str(text: &str, origin: &str) -> Result<SectionTable, ConfigError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut sections = split_sections(text, origin)?;

    let defaults = sections
        .iter()
        .position(|s| s.name == DEFAULT_SECTION)
        .map(|i| sections.remove(i));

    let mut table = SectionTable::new();
    for raw in sections {
        let mut section = Section::new(raw.name);
        if let Some(defaults) = &defaults {
            for entry in &defaults.entries {
                section.insert(entry.key.clone(), decode(&entry.value));
            }
        }
        for entry in raw.entries {
            trace!("[{}] {} = {:?}", section.name(), entry.key, entry.value);
            let value = decode(&entry.value);
            section.insert(entry.key, value);
        }
        table.insert(section);
    }
    Ok(table)
}

fn decode_text<'b>(
    bytes: &'b [u8],
    encoding: &'static Encoding,
    origin: &str,
) -> Result<Cow<'b, str>, ConfigError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ConfigError::malformed(
            origin,
            0,
            format!("contains byte sequences invalid in {}", encoding.name()),
        ));
    }
    Ok(text)
}

struct RawSection {
    name: String,
    line: usize,
    entries: Vec<RawEntry>,
}

struct RawEntry {
    key: String,
    value: String,
}

fn split_sections(text: &str, origin: &str) -> Result<Vec<RawSection>, ConfigError> {
    let mut sections: Vec<RawSection> = Vec::new();
    // indentation of the key line whose value may still continue
    let mut continuation: Option<usize> = None;
    // blank lines seen since the last value line, kept only if the value goes on
    let mut pending_blank = 0;

    for (i, line) in text.lines().enumerate() {
        let number = i + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank += 1;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        if let Some(key_indent) = continuation {
            if indent > key_indent {
                if let Some(entry) = sections.last_mut().and_then(|s| s.entries.last_mut()) {
                    for _ in 0..=pending_blank {
                        entry.value.push('\n');
                    }
                    entry.value.push_str(trimmed);
                }
                pending_blank = 0;
                continue;
            }
        }
        continuation = None;
        pending_blank = 0;

        if trimmed.starts_with('[') {
            // text after the closing bracket is ignored, as configparser does
            let close = trimmed.rfind(']').ok_or_else(|| {
                ConfigError::malformed(origin, number, "unterminated section header")
            })?;
            let name = trimmed[1..close].trim();
            if name.is_empty() {
                return Err(ConfigError::malformed(origin, number, "empty section name"));
            }
            if let Some(first) = sections.iter().find(|s| s.name == name) {
                return Err(ConfigError::malformed(
                    origin,
                    number,
                    format!("duplicate section [{}] (first defined at line {})", name, first.line),
                ));
            }
            sections.push(RawSection {
                name: name.to_string(),
                line: number,
                entries: Vec::new(),
            });
            continue;
        }

        let section = sections.last_mut().ok_or_else(|| {
            ConfigError::malformed(origin, number, "key line before any [section] header")
        })?;

        let delimiter = trimmed.find(|c: char| c == '=' || c == ':').ok_or_else(|| {
            ConfigError::malformed(
                origin,
                number,
                format!("missing '=' in line of section [{}]", section.name),
            )
        })?;
        let key = trimmed[..delimiter].trim().to_lowercase();
        if key.is_empty() {
            return Err(ConfigError::malformed(
                origin,
                number,
                format!("empty key in section [{}]", section.name),
            ));
        }
        if section.entries.iter().any(|e| e.key == key) {
            return Err(ConfigError::malformed(
                origin,
                number,
                format!("duplicate key '{}' in section [{}]", key, section.name),
            ));
        }

        let value = trimmed[delimiter + 1..].trim().to_string();
        section.entries.push(RawEntry { key, value });
        continuation = Some(indent);
    }

    Ok(sections)
}
