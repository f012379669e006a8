// Shared prompt fragments. Each feature that calls the model keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_RULES: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every rewriting prompt.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Keep all real experience. Never invent companies, roles, dates, \
    degrees or metrics that are not present in the current resume.";
