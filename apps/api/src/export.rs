//! CSV / TSV rendering of analysis results, one row per profile.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;

const HEADER: [&str; 4] = ["relevance", "explanation", "target_persona", "next_step"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    fn delimiter(&self) -> char {
        match self {
            ExportFormat::Csv => ',',
            ExportFormat::Tsv => '\t',
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Tsv => "text/tab-separated-values",
        }
    }

    /// Download filename; batch exports get their own name so a single
    /// analysis saved earlier is not silently overwritten.
    pub fn file_name(&self, batch: bool) -> &'static str {
        match (self, batch) {
            (ExportFormat::Csv, false) => "profile_analysis.csv",
            (ExportFormat::Csv, true) => "batch_analysis.csv",
            (ExportFormat::Tsv, false) => "profile_analysis.tsv",
            (ExportFormat::Tsv, true) => "batch_analysis.tsv",
        }
    }
}

/// Renders results as a delimited table: header row plus one row per result.
pub fn render(results: &[AnalysisResult], format: ExportFormat) -> String {
    let delim = format.delimiter();
    let mut out = String::with_capacity(256 + results.len() * 128);

    push_row(&mut out, HEADER.iter().copied(), delim);
    for result in results {
        let fields = [
            result.relevance.as_str(),
            result.explanation.as_str(),
            result.target_persona.as_str(),
            result.next_step.as_str(),
        ];
        push_row(&mut out, fields.into_iter(), delim);
    }

    out
}

fn push_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>, delim: char) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(delim);
        }
        out.push_str(&escape_field(field, delim));
    }
    out.push('\n');
}

/// RFC-4180 style quoting: a field containing the delimiter, a quote, or a
/// line break is wrapped in double quotes with internal quotes doubled.
fn escape_field(field: &str, delim: char) -> String {
    if field.contains(delim) || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
