//! Classification of extracted values against the reference table.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::extract::ExtractedValues;
use super::reference::ReferenceTable;

/// One successfully classified test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Normalized test label. Serialized as the map key, not a field.
    #[serde(skip_serializing)]
    pub label: String,
    pub value: f64,
    pub unit: String,
    /// Title-cased interval label, e.g. "Non-Diabetic".
    pub status: String,
    /// Advisory text, sanitized to the renderer's Latin-1 charset.
    pub advice: String,
}

/// Classification results in discovery order, serialized as a JSON object
/// keyed by test label.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResults(pub Vec<ClassificationResult>);

impl Serialize for AnalysisResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for result in &self.0 {
            map.serialize_entry(&result.label, result)?;
        }
        map.end()
    }
}

/// Classify each extracted value against the reference table.
///
/// Labels without a reference entry and values falling in no declared
/// interval are dropped without error. Output preserves the input's
/// discovery order. The advice lookup cannot miss for a validated table;
/// a miss drops the entry rather than panicking.
pub fn classify(values: &ExtractedValues, table: &ReferenceTable) -> Vec<ClassificationResult> {
    let mut results = Vec::new();

    for extracted in values.iter() {
        let Some(reference) = table.get(&extracted.label) else {
            continue;
        };
        let Some(interval) = reference.match_interval(extracted.value) else {
            continue;
        };
        let Some(advice) = reference.advice_for(interval.label) else {
            continue;
        };

        results.push(ClassificationResult {
            label: extracted.label.clone(),
            value: extracted.value,
            unit: extracted.unit.clone(),
            status: title_case(interval.label),
            advice: latin1_lossy(advice),
        });
    }

    results
}

/// Title-case a status label: the first letter of each word is uppercased,
/// the rest lowercased. Any non-letter (hyphen, digit, space) starts a new
/// word, so "non-diabetic" becomes "Non-Diabetic" and "vitamin b12"
/// becomes "Vitamin B12".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Replace every character outside Latin-1 with '?', matching what the PDF
/// renderer's built-in fonts can represent.
pub fn latin1_lossy(s: &str) -> String {
    s.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}
