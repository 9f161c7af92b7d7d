//! Lab report analysis pipeline: free text → extracted values → classified
//! results against the built-in reference ranges.

pub mod classify;
pub mod extract;
pub mod pdf;
pub mod reference;

pub use classify::{classify, AnalysisResults, ClassificationResult};
pub use extract::{extract, ExtractedValue, ExtractedValues};
pub use reference::{ReferenceError, ReferenceTable};

/// Run the full pipeline on raw report text.
///
/// Unknown tests and values outside every declared interval are dropped
/// silently; they reduce the result set rather than surfacing as errors.
pub fn analyze_report(text: &str, table: &ReferenceTable) -> Vec<ClassificationResult> {
    classify(&extract(text), table)
}
