//! Pattern-based extraction of `<label>: <number> <unit>` triples from
//! free-text lab reports.

use std::sync::LazyLock;

use regex::Regex;

/// One recognized occurrence in the report text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedValue {
    /// Normalized test label (lowercased, whitespace collapsed, en-dash
    /// replaced with hyphen).
    pub label: String,
    pub value: f64,
    /// Unit token as it appeared in the text, not validated against the
    /// reference table.
    pub unit: String,
}

/// Extracted values in discovery order.
///
/// A duplicate label overwrites the earlier value in place, keeping the
/// position of the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct ExtractedValues {
    entries: Vec<ExtractedValue>,
}

impl ExtractedValues {
    pub fn insert(&mut self, entry: ExtractedValue) {
        match self.entries.iter_mut().find(|e| e.label == entry.label) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, label: &str) -> Option<&ExtractedValue> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Label, colon, decimal number, unit token. The number capture is the loose
/// digits-and-dots class; captures that do not parse as f64 (e.g. "1.2.3")
/// drop the whole match rather than erroring.
static VALUE_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\w\s-]+):\s*([\d.]+)\s*([\w/%µ]+)").unwrap());

/// Scan report text for all non-overlapping label/value/unit triples.
///
/// Matching is case-blind (the pattern contains no literal letters); labels
/// are normalized afterwards, units kept as found. Text with no match yields
/// an empty collection, not an error.
pub fn extract(text: &str) -> ExtractedValues {
    let mut values = ExtractedValues::default();

    for caps in VALUE_TRIPLE.captures_iter(text) {
        let label = normalize_label(&caps[1]);
        let value = match caps[2].parse::<f64>() {
            Ok(v) => v,
            Err(_) => continue,
        };
        values.insert(ExtractedValue {
            label,
            value,
            unit: caps[3].to_string(),
        });
    }

    values
}

/// Normalize a raw label capture: lowercase, en-dash → hyphen, internal
/// whitespace runs collapsed to single spaces, trimmed.
fn normalize_label(raw: &str) -> String {
    raw.to_lowercase()
        .replace('\u{2013}', "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
