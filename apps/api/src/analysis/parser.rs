//! Resilient parsing of model output. The model is asked for strict JSON but
//! does not always comply: fenced JSON, JSON buried in prose, or plain
//! label-formatted text all show up in practice. Parsing never fails; the
//! worst case is the sentinel record.

use regex::Regex;
use serde::Deserialize;

use crate::analysis::{AnalysisResult, Relevance};

/// Intermediate shape for the strict path. Every key is optional so a
/// partially-complete object still parses; unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    relevance: Option<String>,
    explanation: Option<String>,
    target_persona: Option<String>,
    next_step: Option<String>,
}

/// Parses raw LLM output into an `AnalysisResult`.
///
/// Order of attempts:
/// 1. strict: serde-parse the `{ .. }` span of the text (this also skips
///    markdown code fences, since they sit outside the braces)
/// 2. fallback: scrape `Label: value` lines for the four known fields
/// 3. give up: the sentinel record
pub fn parse_analysis(raw: &str) -> AnalysisResult {
    if let Some(json_str) = extract_json_object(raw) {
        if let Ok(parsed) = serde_json::from_str::<RawAnalysis>(json_str) {
            return AnalysisResult {
                relevance: parsed
                    .relevance
                    .as_deref()
                    .map(parse_relevance)
                    .unwrap_or_default(),
                explanation: parsed.explanation.unwrap_or_default(),
                target_persona: parsed.target_persona.unwrap_or_default(),
                next_step: parsed.next_step.unwrap_or_default(),
            };
        }
    }

    scrape_labels(raw).unwrap_or_else(AnalysisResult::unparseable)
}

/// Extract the outermost `{ .. }` span, mirroring the greedy match the
/// model-output convention assumes. Returns None when no braces exist.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Maps the model's relevance string onto the enum. Prefix matching keeps
/// variants like "High relevance" or "Low." usable; anything else is No.
fn parse_relevance(s: &str) -> Relevance {
    let lower = s.trim().trim_matches('"').to_lowercase();
    if lower.starts_with("high") {
        Relevance::High
    } else if lower.starts_with("medium") {
        Relevance::Medium
    } else if lower.starts_with("low") {
        Relevance::Low
    } else {
        Relevance::No
    }
}

/// Best-effort recovery from non-JSON output: scan for `Label: value` lines.
/// Returns None when none of the four labels appear, so the caller can fall
/// through to the sentinel record.
fn scrape_labels(raw: &str) -> Option<AnalysisResult> {
    let relevance = scrape_label(raw, "relevance");
    let explanation = scrape_label(raw, "explanation");
    let target_persona = scrape_label(raw, r"target[ _]?persona");
    let next_step = scrape_label(raw, r"next[ _]?step");

    if relevance.is_none()
        && explanation.is_none()
        && target_persona.is_none()
        && next_step.is_none()
    {
        return None;
    }

    // Fields the scrape could not recover get the sentinel's placeholders.
    let sentinel = AnalysisResult::unparseable();
    Some(AnalysisResult {
        relevance: relevance
            .as_deref()
            .map(parse_relevance)
            .unwrap_or(sentinel.relevance),
        explanation: explanation.unwrap_or(sentinel.explanation),
        target_persona: target_persona.unwrap_or(sentinel.target_persona),
        next_step: next_step.unwrap_or(sentinel.next_step),
    })
}

/// Finds `<label>: <value>` on its own line, case-insensitive, tolerant of
/// leading list markers and markdown bold. `label` is a regex fragment.
fn scrape_label(raw: &str, label: &str) -> Option<String> {
    let pattern = format!(r"(?im)^[\s*#>-]*(?:\*\*)?{label}(?:\*\*)?\s*[:\-]\s*(.+)$");
    let re = Regex::new(&pattern).ok()?;
    let value = re.captures(raw)?.get(1)?.as_str();
    let value = value.trim().trim_matches('"').trim_end_matches("**").trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_json_round_trips_unchanged() {
        let raw = r#"{
            "relevance": "High",
            "explanation": "CIO owning network refresh budgets",
            "target_persona": "",
            "next_step": "Book a discovery call"
        }"#;
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::High);
        assert_eq!(result.explanation, "CIO owning network refresh budgets");
        assert_eq!(result.target_persona, "");
        assert_eq!(result.next_step, "Book a discovery call");
    }

    #[test]
    fn test_missing_keys_default_deterministically() {
        let raw = r#"{"explanation": "Plant head, indirect influence"}"#;
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::No);
        assert_eq!(result.explanation, "Plant head, indirect influence");
        assert_eq!(result.target_persona, "");
        assert_eq!(result.next_step, "");
    }

    #[test]
    fn test_fenced_json_still_parses() {
        let raw = "```json\n{\"relevance\": \"Medium\", \"explanation\": \"ops lead\", \"target_persona\": \"CIO\", \"next_step\": \"email\"}\n```";
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::Medium);
        assert_eq!(result.target_persona, "CIO");
    }

    #[test]
    fn test_json_buried_in_prose_parses() {
        let raw = "Sure! Here is the analysis you asked for:\n{\"relevance\": \"Low\", \"explanation\": \"HR role\", \"target_persona\": \"IT Infrastructure Manager\", \"next_step\": \"skip\"}";
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::Low);
        assert_eq!(result.target_persona, "IT Infrastructure Manager");
    }

    #[test]
    fn test_unknown_extra_keys_are_ignored() {
        let raw = r#"{"relevance": "High", "explanation": "x", "target_persona": "", "next_step": "y", "confidence": 0.9}"#;
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::High);
        assert_eq!(result.next_step, "y");
    }

    #[test]
    fn test_label_fallback_recovers_present_fields() {
        let raw = "Relevance: Medium\nExplanation: Facilities manager with site-wide Wi-Fi pain\nNext Step: send warehouse case study";
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::Medium);
        assert_eq!(
            result.explanation,
            "Facilities manager with site-wide Wi-Fi pain"
        );
        assert_eq!(result.next_step, "send warehouse case study");
        // not labeled, falls back to the sentinel placeholder (empty)
        assert_eq!(result.target_persona, "");
    }

    #[test]
    fn test_label_fallback_handles_markdown_decoration() {
        let raw = "- **Relevance**: Low\n- **Target Persona**: Head of IT";
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::Low);
        assert_eq!(result.target_persona, "Head of IT");
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let raw = "RELEVANCE: high\nnext step: call them";
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::High);
        assert_eq!(result.next_step, "call them");
    }

    #[test]
    fn test_unrecognizable_text_yields_sentinel_not_panic() {
        let result = parse_analysis("I'm sorry, I cannot analyze this profile.");
        assert_eq!(result, AnalysisResult::unparseable());
    }

    #[test]
    fn test_empty_input_yields_sentinel() {
        assert_eq!(parse_analysis(""), AnalysisResult::unparseable());
    }

    #[test]
    fn test_broken_json_falls_through_to_labels() {
        // Truncated object: strict parse fails, labels still recoverable.
        let raw = "{\"relevance\": \"High\", \"explanation\": \"cut off\nRelevance: High\nExplanation: recovered by fallback";
        let result = parse_analysis(raw);
        assert_eq!(result.relevance, Relevance::High);
        assert_eq!(result.explanation, "recovered by fallback");
    }

    #[test]
    fn test_parse_relevance_prefix_matching() {
        assert_eq!(parse_relevance("High relevance"), Relevance::High);
        assert_eq!(parse_relevance(" medium "), Relevance::Medium);
        assert_eq!(parse_relevance("Low."), Relevance::Low);
        assert_eq!(parse_relevance("Not relevant"), Relevance::No);
        assert_eq!(parse_relevance("garbage"), Relevance::No);
    }
}
