//! Decoded settings sections

use std::collections::{BTreeMap, HashMap};

use super::value::ConfigValue;

/// One named group of decoded key/value entries.
///
/// Keys are kept sorted, so iterating the entries visits `cmd001` before
/// `cmd002` regardless of declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    entries: BTreeMap<String, ConfigValue>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Builder-style insert, handy for constructing tables in code.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Entries in ascending key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All sections of a settings source, by case-sensitive name.
///
/// Sections iterate in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionTable {
    sections: Vec<Section>,
    index: HashMap<String, usize>,
}

impl SectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section, replacing any earlier section with the same name.
    pub fn insert(&mut self, section: Section) {
        match self.index.get(section.name()) {
            Some(&i) => self.sections[i] = section,
            None => {
                self.index
                    .insert(section.name().to_string(), self.sections.len());
                self.sections.push(section);
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, section: Section) -> Self {
        self.insert(section);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&i| &self.sections[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromIterator<Section> for SectionTable {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        let mut table = SectionTable::new();
        for section in iter {
            table.insert(section);
        }
        table
    }
}
