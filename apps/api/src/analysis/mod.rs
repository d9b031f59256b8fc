//! Profile analysis — prompt construction, the LLM round trip, and the
//! resilient parsing of whatever the model sends back.

pub mod batch;
pub mod handlers;
pub mod parser;
pub mod prompts;

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Categorical judgment of a profile's value as a sales target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relevance {
    High,
    Medium,
    Low,
    #[default]
    No,
}

impl Relevance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relevance::High => "High",
            Relevance::Medium => "Medium",
            Relevance::Low => "Low",
            Relevance::No => "No",
        }
    }
}

/// One judgment per profile. Immutable once produced; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub relevance: Relevance,
    pub explanation: String,
    /// Suggested alternative decision-maker role. Empty when the profile
    /// itself is highly relevant.
    pub target_persona: String,
    pub next_step: String,
}

impl AnalysisResult {
    /// Sentinel record returned when the model output is unusable or the
    /// API call for one profile in a batch fails.
    pub fn unparseable() -> Self {
        Self {
            relevance: Relevance::No,
            explanation: "Manual analysis required: model output could not be parsed".to_string(),
            target_persona: String::new(),
            next_step: "Review the profile manually".to_string(),
        }
    }
}

/// Analyzes a single profile: build the prompt, make one API call, parse.
/// A network or API failure surfaces as an error; malformed model output
/// never does (the parser always produces a record).
pub async fn analyze_profile(
    llm: &LlmClient,
    profile_text: &str,
) -> Result<AnalysisResult, AppError> {
    let prompt = prompts::ANALYSIS_PROMPT_TEMPLATE.replace("{profile_text}", profile_text);
    let raw = llm
        .call(&prompt, prompts::ANALYSIS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Profile analysis failed: {e}")))?;
    Ok(parser::parse_analysis(&raw))
}

/// Analyzes a batch file sequentially, one independent API call per profile.
/// A failed call is logged and replaced with the sentinel record so the
/// remaining profiles still get processed. Output order matches input order.
pub async fn analyze_batch(llm: &LlmClient, content: &str) -> Vec<AnalysisResult> {
    run_batch(content, |profile| async move {
        analyze_profile(llm, &profile).await
    })
    .await
}

/// The batch loop itself, generic over the per-profile analysis so it can be
/// exercised without a live API. N non-empty blocks in, exactly N records
/// out, input order preserved.
async fn run_batch<F, Fut>(content: &str, mut analyze: F) -> Vec<AnalysisResult>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<AnalysisResult, AppError>>,
{
    let profiles = batch::split_profiles(content);
    let total = profiles.len();
    let mut results = Vec::with_capacity(total);

    for (i, profile_text) in profiles.into_iter().enumerate() {
        info!("Analyzing profile {}/{}", i + 1, total);
        match analyze(profile_text).await {
            Ok(result) => results.push(result),
            Err(e) => {
                warn!("Profile {}/{} failed: {e}", i + 1, total);
                results.push(AnalysisResult::unparseable());
            }
        }
    }

    results
}
