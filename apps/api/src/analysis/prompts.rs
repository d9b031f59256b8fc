// LLM prompt constants for the Analysis module.

/// System prompt for profile analysis — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str =
    "You are a B2B sales-intelligence analyst for an enterprise Wi-Fi and \
    network infrastructure vendor. Judge LinkedIn profiles as sales targets. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Profile analysis prompt template. Replace `{profile_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this LinkedIn profile as a sales target for Wi-Fi / network infrastructure solutions.

LINKEDIN PROFILE TEXT:
{profile_text}

CONTEXT FOR ANALYSIS:
- Our company: Syntel + Altai Super Wi-Fi (enterprise Wi-Fi / network infrastructure)
- We sell Wi-Fi and network infrastructure solutions
- Target roles: CIO, CTO, IT Infrastructure Manager, Network Architect, Operations Head
- Target industries: Manufacturing, Warehouses, BFSI, Education, Healthcare, Hospitality
- Geography focus: India

RELEVANCE RUBRIC (choose exactly one):
- "High": direct IT / network infrastructure roles (CIO, CTO, IT Infrastructure Manager, Network Architect, Wireless Engineer)
- "Medium": indirect influence (Operations Head, Facilities Manager, COO, Head of Plant)
- "Low": limited involvement in IT decisions
- "No": no relevance to IT infrastructure

EXPLANATION: what they are responsible for, how their role aligns with Wi-Fi / network
infrastructure needs, and their potential influence on IT buying decisions.

TARGET PERSONA: if the profile is not highly relevant, the exact persona to pursue at
their organization instead. Leave empty when relevance is "High".

NEXT STEP: the single recommended next action for a sales rep handling this profile.

Return a JSON object with this EXACT schema (no extra fields):
{
  "relevance": "High/Medium/Low/No",
  "explanation": "Detailed analysis here...",
  "target_persona": "Who to target instead, or empty",
  "next_step": "Recommended next action"
}"#;
