//! Bidirectional code/label tables for thermostat and fan modes
//!
//! The hub describes a mode control's states as a semicolon-delimited string
//! of alternating numeric codes and labels, e.g. `"0;Off;1;Heat;2;Cool"`.

use indexmap::IndexMap;
use tracing::debug;

/// Thermostat mode labels the platform understands
pub const THERMOSTAT_MODES: [&str; 6] = ["auto", "off", "cool", "heat", "dry", "fan_only"];

/// Which labels a mode string may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeVocabulary {
    /// Closed set of [`THERMOSTAT_MODES`]; labels are normalized (spaces → `_`)
    Thermostat,
    /// Any label, kept as the hub reports it (lower-cased)
    Fan,
}

impl ModeVocabulary {
    fn accept(&self, label: &str) -> Option<String> {
        match self {
            ModeVocabulary::Thermostat => {
                let normalized = label.replace(' ', "_");
                THERMOSTAT_MODES
                    .contains(&normalized.as_str())
                    .then_some(normalized)
            }
            ModeVocabulary::Fan => Some(label.to_string()),
        }
    }
}

/// Lossless code ↔ label lookup built from one device's mode string
///
/// Both directions hold exactly the recognized pairs. A label reported
/// twice keeps the last code it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeMap {
    by_code: IndexMap<u32, String>,
    by_label: IndexMap<String, u32>,
}

impl ModeMap {
    /// Parse a mode string against a vocabulary
    ///
    /// Never fails: an unpaired trailing token, an unrecognized label, or a
    /// non-numeric code drops that token or pair and parsing continues.
    pub fn parse(modes: &str, vocabulary: ModeVocabulary) -> Self {
        let lowered = modes.to_lowercase();
        let tokens: Vec<&str> = lowered.split(';').collect();
        let mut map = ModeMap::default();

        for pair in tokens.chunks(2) {
            let [code, label] = pair else {
                debug!("Dropping unpaired mode token {:?}", pair);
                break;
            };

            let Some(label) = vocabulary.accept(label.trim()) else {
                debug!("Dropping unrecognized mode '{}' (code {})", label, code);
                continue;
            };

            let Ok(code) = code.trim().parse::<u32>() else {
                debug!("Dropping mode '{}' with non-numeric code '{}'", label, code);
                continue;
            };

            map.insert(code, label);
        }

        map
    }

    fn insert(&mut self, code: u32, label: String) {
        if let Some(previous) = self.by_label.insert(label.clone(), code) {
            if previous != code {
                self.by_code.shift_remove(&previous);
            }
        }
        if let Some(previous) = self.by_code.insert(code, label) {
            if self.by_label.get(&previous) == Some(&code) {
                self.by_label.shift_remove(&previous);
            }
        }
    }

    pub fn label(&self, code: u32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    pub fn code(&self, label: &str) -> Option<u32> {
        self.by_label.get(label).copied()
    }

    /// Recognized labels in the order the hub listed them
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.by_label.keys().map(String::as_str)
    }

    /// `(code, label)` pairs as string keys and values, for state lookup tables
    pub fn code_to_label(&self) -> impl Iterator<Item = (String, &str)> {
        self.by_code
            .iter()
            .map(|(code, label)| (code.to_string(), label.as_str()))
    }

    /// `(label, code)` pairs, for command lookup tables
    pub fn label_to_code(&self) -> impl Iterator<Item = (&str, String)> {
        self.by_label
            .iter()
            .map(|(label, code)| (label.as_str(), code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
