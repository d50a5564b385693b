use std::str::FromStr;

use crate::api::{InvalidCapture, Parameter};
use crate::model::Kind;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    short: Option<char>,
    kind: Kind,
    parsed: bool,
    values: Vec<String>,
}

/// The per-pass state of an option set: which options were parsed, and their raw values.
///
/// Entries are kept in declaration order, and indexed by each option's position in its set.
/// A fresh state is created for every parse pass, so the declarations never need resetting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionState {
    entries: Vec<Entry>,
}

impl OptionState {
    pub(crate) fn new(parameters: &[Parameter<'_>]) -> Self {
        Self {
            entries: parameters
                .iter()
                .map(|p| Entry {
                    name: p.long_name().to_string(),
                    short: p.short_name(),
                    kind: p.kind(),
                    parsed: false,
                    values: Vec::default(),
                })
                .collect(),
        }
    }

    pub(crate) fn is_parsed_at(&self, index: usize) -> bool {
        self.entries[index].parsed
    }

    pub(crate) fn mark(&mut self, index: usize) {
        self.entries[index].parsed = true;
    }

    pub(crate) fn push(&mut self, index: usize, value: impl Into<String>) {
        self.entries[index].values.push(value.into());
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Whether the option `name` (long name) was parsed.
    pub fn is_parsed(&self, name: &str) -> bool {
        self.find(name).map(|e| e.parsed).unwrap_or(false)
    }

    /// Whether the option with the short name `short` was parsed.
    pub fn is_parsed_short(&self, short: char) -> bool {
        self.entries
            .iter()
            .any(|e| e.short == Some(short) && e.parsed)
    }

    /// The first raw value of the option `name`, if any.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.find(name)
            .and_then(|e| e.values.first())
            .map(String::as_str)
    }

    /// All raw values of the option `name`, in the order they were parsed.
    /// Empty for unknown or unparsed options.
    pub fn values(&self, name: &str) -> &[String] {
        self.find(name)
            .map(|e| e.values.as_slice())
            .unwrap_or_default()
    }

    /// Convert the first raw value of the option `name` into `T`.
    ///
    /// Returns `Ok(None)` when the option has no value.
    pub fn get<T: FromStr>(&self, name: &str) -> Result<Option<T>, InvalidCapture> {
        match self.value(name) {
            Some(value) => T::from_str(value)
                .map(Some)
                .map_err(|_| InvalidCapture::InvalidConversion {
                    token: value.to_string(),
                    type_name: std::any::type_name::<T>(),
                }),
            None => Ok(None),
        }
    }

    /// The kind of the option `name`, if it is declared.
    pub fn kind(&self, name: &str) -> Option<Kind> {
        self.find(name).map(|e| e.kind)
    }

    /// The long names of the parsed options, in declaration order.
    pub fn parsed(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.parsed)
            .map(|e| e.name.as_str())
    }
}
