//! Built-in reference ranges: per test, a display unit, ordered half-open
//! intervals, and advisory text per interval label.
//!
//! The table is fixed configuration compiled into the service. Integrity
//! (every interval label has an advice entry) is checked once at startup
//! instead of failing a lookup mid-request.

use thiserror::Error;

/// Half-open numeric range `[low, high)` tagged with a status label.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub label: &'static str,
    pub low: f64,
    pub high: f64,
}

impl Interval {
    /// Lower-inclusive, upper-exclusive containment.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value < self.high
    }
}

/// Reference configuration for one recognized test.
#[derive(Debug, Clone)]
pub struct ReferenceEntry {
    /// Display unit. Extracted units are not validated against this.
    pub unit: &'static str,
    /// Intervals in declared order; first match wins. They need not be
    /// contiguous or exhaustive.
    pub intervals: Vec<Interval>,
    advice: Vec<(&'static str, &'static str)>,
}

impl ReferenceEntry {
    /// First interval containing `value`, in declared order.
    pub fn match_interval(&self, value: f64) -> Option<&Interval> {
        self.intervals.iter().find(|i| i.contains(value))
    }

    /// Advisory text for an interval label.
    pub fn advice_for(&self, label: &str) -> Option<&'static str> {
        self.advice
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, text)| *text)
    }
}

/// Configuration-integrity failure in the reference table.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("test '{test}': interval '{interval}' has no advice entry")]
    MissingAdvice { test: String, interval: String },
}

/// The full reference table, keyed by normalized test label.
pub struct ReferenceTable {
    entries: Vec<(&'static str, ReferenceEntry)>,
}

impl ReferenceTable {
    /// Load the built-in table, validating that every interval label has a
    /// matching advice entry.
    pub fn builtin() -> Result<Self, ReferenceError> {
        let table = Self {
            entries: builtin_entries(),
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), ReferenceError> {
        for (test, entry) in &self.entries {
            for interval in &entry.intervals {
                if entry.advice_for(interval.label).is_none() {
                    return Err(ReferenceError::MissingAdvice {
                        test: test.to_string(),
                        interval: interval.label.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Exact lookup by normalized label.
    pub fn get(&self, label: &str) -> Option<&ReferenceEntry> {
        self.entries
            .iter()
            .find(|(test, _)| *test == label)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(
    unit: &'static str,
    intervals: &[(&'static str, f64, f64)],
    advice: &[(&'static str, &'static str)],
) -> ReferenceEntry {
    ReferenceEntry {
        unit,
        intervals: intervals
            .iter()
            .map(|&(label, low, high)| Interval { label, low, high })
            .collect(),
        advice: advice.to_vec(),
    }
}

/// The built-in reference data. Interval order matters (first match wins),
/// and some tests have deliberate gaps between intervals (e.g. glucose
/// 125-126, folate 5.3-5.4); values falling into a gap are dropped.
fn builtin_entries() -> Vec<(&'static str, ReferenceEntry)> {
    vec![
        (
            "vitamin d",
            entry(
                "ng/mL",
                &[
                    ("deficient", 0.0, 20.0),
                    ("insufficient", 20.0, 30.0),
                    ("sufficient", 30.0, 100.0),
                ],
                &[
                    (
                        "deficient",
                        "Get 15\u{2013}20 min sunlight daily, take Vitamin D3 supplement, eat eggs/fish.",
                    ),
                    ("insufficient", "Get more sunlight and consider dietary sources."),
                    ("sufficient", "Maintain current levels."),
                ],
            ),
        ),
        (
            "hemoglobin a1c",
            entry(
                "%",
                &[
                    ("non-diabetic", 0.0, 5.7),
                    ("prediabetic", 5.7, 6.4),
                    ("diabetic", 6.5, 15.0),
                ],
                &[
                    ("prediabetic", "Reduce sugar, walk 20 min daily, avoid junk food."),
                    (
                        "diabetic",
                        "Consult doctor. Strict sugar control, regular exercise, low-carb diet.",
                    ),
                    ("non-diabetic", "Maintain current lifestyle."),
                ],
            ),
        ),
        (
            "iron",
            entry(
                "µg/dL",
                &[("low", 0.0, 70.0), ("normal", 70.0, 180.0)],
                &[
                    (
                        "low",
                        "Eat iron-rich foods like spinach, nuts, red meat. Add Vitamin C for absorption.",
                    ),
                    ("normal", "Iron levels are fine. Maintain with balanced diet."),
                ],
            ),
        ),
        (
            "tsh",
            entry(
                "µIU/mL",
                &[
                    ("low", 0.0, 0.35),
                    ("normal", 0.35, 5.5),
                    ("high", 5.5, 100.0),
                ],
                &[
                    (
                        "low",
                        "Possible hyperthyroidism. Consider retesting. Avoid self-medicating.",
                    ),
                    ("normal", "TSH is normal. No action needed."),
                    ("high", "Possible hypothyroidism. Consult an endocrinologist."),
                ],
            ),
        ),
        (
            "egfr",
            entry(
                "mL/min/1.73m2",
                &[
                    ("normal", 90.0, 130.0),
                    ("mild decrease", 60.0, 90.0),
                    ("moderate decrease", 30.0, 60.0),
                    ("severe decrease", 15.0, 30.0),
                    ("kidney failure", 0.0, 15.0),
                ],
                &[
                    ("normal", "Your kidney function is healthy."),
                    ("mild decrease", "Stay hydrated, avoid excessive salt or painkillers."),
                    ("moderate decrease", "Kidney care recommended. Consult a nephrologist."),
                    ("severe decrease", "Serious concern. Seek specialist advice immediately."),
                    ("kidney failure", "Critical. Immediate medical attention required."),
                ],
            ),
        ),
        (
            "uric acid",
            entry(
                "mg/dL",
                &[
                    ("low", 0.0, 3.5),
                    ("normal", 3.5, 7.2),
                    ("high", 7.2, 15.0),
                ],
                &[
                    (
                        "low",
                        "Usually not a concern. Monitor if you feel fatigue or low energy.",
                    ),
                    ("normal", "Good uric acid balance."),
                    ("high", "Reduce red meat, alcohol, sugary foods. Stay hydrated."),
                ],
            ),
        ),
        (
            "glucose",
            entry(
                "mg/dL",
                &[
                    ("normal", 70.0, 100.0),
                    ("prediabetic", 100.0, 125.0),
                    ("diabetic", 126.0, 300.0),
                ],
                &[
                    ("normal", "Blood sugar is normal. Keep up good lifestyle."),
                    (
                        "prediabetic",
                        "Reduce sugar/carbs, increase physical activity, track diet.",
                    ),
                    ("diabetic", "Strict sugar control, regular exercise, consult doctor."),
                ],
            ),
        ),
        (
            "alt",
            entry(
                "U/L",
                &[("normal", 0.0, 40.0), ("high", 40.0, 100.0)],
                &[
                    ("normal", "ALT is normal. Liver is healthy."),
                    (
                        "high",
                        "May indicate liver stress. Avoid alcohol, oily food, and consult doctor.",
                    ),
                ],
            ),
        ),
        (
            "ast",
            entry(
                "U/L",
                &[("normal", 0.0, 40.0), ("high", 40.0, 100.0)],
                &[
                    ("normal", "AST is normal. Liver & muscles healthy."),
                    (
                        "high",
                        "Could mean liver or muscle stress. Avoid heavy exercise & alcohol.",
                    ),
                ],
            ),
        ),
        (
            "ldl",
            entry(
                "mg/dL",
                &[
                    ("optimal", 0.0, 100.0),
                    ("above optimal", 100.0, 130.0),
                    ("borderline high", 130.0, 160.0),
                    ("high", 160.0, 190.0),
                    ("very high", 190.0, 300.0),
                ],
                &[
                    ("optimal", "LDL is good. Maintain with diet & exercise."),
                    ("above optimal", "Slightly high. Cut back on fried/oily food."),
                    ("borderline high", "Limit fat, add exercise, track weekly."),
                    (
                        "high",
                        "Risk of heart issues. Consult doctor & start heart-healthy routine.",
                    ),
                    ("very high", "Critical. Immediate medical attention required."),
                ],
            ),
        ),
        (
            "vitamin b12",
            entry(
                "pg/mL",
                &[("low", 0.0, 200.0), ("normal", 200.0, 911.0)],
                &[
                    (
                        "low",
                        "Take B12-rich foods (milk, eggs, meat) or consult doctor for injections.",
                    ),
                    ("normal", "B12 levels are fine. Maintain diet."),
                ],
            ),
        ),
        (
            "folate",
            entry(
                "ng/mL",
                &[
                    ("deficient", 0.0, 3.4),
                    ("indeterminate", 3.4, 5.3),
                    ("normal", 5.4, 20.0),
                ],
                &[
                    (
                        "deficient",
                        "Eat green leafy veggies, lentils, take folic acid supplements.",
                    ),
                    ("indeterminate", "Slightly low. Improve diet and retest in 2 weeks."),
                    ("normal", "Normal folate level. Maintain."),
                ],
            ),
        ),
        (
            "calcium",
            entry(
                "mg/dL",
                &[
                    ("low", 0.0, 8.1),
                    ("normal", 8.1, 10.4),
                    ("high", 10.5, 15.0),
                ],
                &[
                    (
                        "low",
                        "May affect bones. Eat dairy, leafy greens, or take calcium supplements.",
                    ),
                    ("normal", "Normal calcium level."),
                    ("high", "Avoid calcium supplements. Consider retesting."),
                ],
            ),
        ),
        (
            "crp",
            entry(
                "mg/L",
                &[("normal", 0.0, 6.0), ("high", 6.0, 100.0)],
                &[
                    ("normal", "No signs of inflammation."),
                    (
                        "high",
                        "Body may have infection or inflammation. Track symptoms or consult doctor.",
                    ),
                ],
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_validates() {
        let table = ReferenceTable::builtin().expect("built-in table must be internally consistent");
        assert_eq!(table.len(), 14);
    }

    #[test]
    fn missing_advice_rejected() {
        let table = ReferenceTable {
            entries: vec![(
                "broken",
                entry("mg/dL", &[("low", 0.0, 10.0)], &[("high", "unused")]),
            )],
        };
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::MissingAdvice { ref test, ref interval }
                if test == "broken" && interval == "low"
        ));
    }

    #[test]
    fn lookup_is_exact() {
        let table = ReferenceTable::builtin().unwrap();
        assert!(table.get("vitamin d").is_some());
        assert!(table.get("Vitamin D").is_none());
        assert!(table.get("cholesterol").is_none());
    }

    #[test]
    fn interval_half_open() {
        let table = ReferenceTable::builtin().unwrap();
        let tsh = table.get("tsh").unwrap();
        // Exactly the lower bound of "high" matches "high", not "normal".
        assert_eq!(tsh.match_interval(5.5).unwrap().label, "high");
        assert_eq!(tsh.match_interval(5.499).unwrap().label, "normal");
    }

    #[test]
    fn first_matching_interval_wins_in_declared_order() {
        let table = ReferenceTable::builtin().unwrap();
        let egfr = table.get("egfr").unwrap();
        // eGFR intervals are declared from "normal" down to "kidney failure".
        assert_eq!(egfr.match_interval(95.0).unwrap().label, "normal");
        assert_eq!(egfr.match_interval(20.0).unwrap().label, "severe decrease");
    }

    #[test]
    fn gap_values_match_nothing() {
        let table = ReferenceTable::builtin().unwrap();
        assert!(table.get("glucose").unwrap().match_interval(125.5).is_none());
        assert!(table.get("folate").unwrap().match_interval(5.35).is_none());
        assert!(table.get("hemoglobin a1c").unwrap().match_interval(6.45).is_none());
    }

    #[test]
    fn out_of_range_value_matches_nothing() {
        let table = ReferenceTable::builtin().unwrap();
        assert!(table.get("glucose").unwrap().match_interval(500.0).is_none());
        assert!(table.get("tsh").unwrap().match_interval(-1.0).is_none());
    }

    #[test]
    fn advice_lookup() {
        let table = ReferenceTable::builtin().unwrap();
        let glucose = table.get("glucose").unwrap();
        assert_eq!(
            glucose.advice_for("normal"),
            Some("Blood sugar is normal. Keep up good lifestyle.")
        );
        assert_eq!(glucose.advice_for("unknown"), None);
    }
}
