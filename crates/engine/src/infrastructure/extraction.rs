//! Extraction strategies: keyword rules and a local LLM.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use gamecraft_domain::{
    analyze_turn, ConversationState, GameSpecification, Intent, SpecUpdate, TurnAnalysis, TurnRole,
};
use regex_lite::Regex;
use serde::Deserialize;

use crate::infrastructure::ports::{
    ChatMessage, ExtractionError, ExtractionPort, ExtractionRequest, LlmPort, LlmRequest,
};

/// Number of earlier turns sent to the model as context.
pub const LLM_HISTORY_TURNS: usize = 4;

/// Deterministic keyword and pattern matching from the domain crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedExtractor;

impl RuleBasedExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExtractionPort for RuleBasedExtractor {
    async fn analyze(&self, request: ExtractionRequest) -> Result<TurnAnalysis, ExtractionError> {
        Ok(analyze_turn(&request.message, request.state))
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Structured extraction through an [`LlmPort`].
///
/// The model answers with the whole specification; the update is the
/// difference against the current one. Errors are returned to the caller,
/// which decides how to fall back.
pub struct LlmExtractor {
    llm: Arc<dyn LlmPort>,
}

impl LlmExtractor {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ExtractionPort for LlmExtractor {
    async fn analyze(&self, request: ExtractionRequest) -> Result<TurnAnalysis, ExtractionError> {
        let system_prompt = build_system_prompt(request.state, &request.spec)?;

        let start = request.history.len().saturating_sub(LLM_HISTORY_TURNS);
        let mut messages: Vec<ChatMessage> = request.history[start..]
            .iter()
            .map(|turn| match turn.role {
                TurnRole::User => ChatMessage::user(turn.text.clone()),
                TurnRole::Assistant => ChatMessage::assistant(turn.text.clone()),
            })
            .collect();
        messages.push(ChatMessage::user(request.message.trim()));

        let llm_request = LlmRequest::new(messages)
            .with_system_prompt(system_prompt)
            .with_temperature(0.0)
            .with_json_mode();

        let response = self.llm.generate(llm_request).await?;
        tracing::debug!(
            finish_reason = ?response.finish_reason,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "LLM extraction answered"
        );

        parse_extraction(&response.content, &request.spec)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

fn build_system_prompt(
    state: ConversationState,
    spec: &GameSpecification,
) -> Result<String, ExtractionError> {
    let spec_json = serde_json::to_string_pretty(spec)
        .map_err(|e| ExtractionError::Malformed(format!("spec serialization: {e}")))?;
    let intents = Intent::all()
        .iter()
        .map(Intent::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        r#"You are an expert game design assistant. Your job is to extract game parameters and classify intent.
Current conversation state: {state}
Current game specification:
{spec_json}

Analyze the user's latest message and answer with a single JSON object:
{{"intent": "<one of: {intents}>", "spec": <the updated game specification>}}
Only change fields in the specification that the user explicitly mentioned. Leave every other field exactly as it is above.
Answer with JSON only."#,
        state = state.as_str(),
    ))
}

// Fenced ```json blocks first, then the outermost braces.
static FENCED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*\})\s*```").expect("valid regex"));
static RAW_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct LlmExtraction {
    intent: String,
    #[serde(default, alias = "extracted_spec")]
    spec: Option<serde_json::Value>,
}

/// Pull the JSON object out of a model reply.
fn extract_json(raw: &str) -> Option<&str> {
    if let Some(caps) = FENCED_JSON_RE.captures(raw) {
        return caps.get(1).map(|m| m.as_str());
    }
    RAW_JSON_RE.find(raw).map(|m| m.as_str())
}

/// Turn a model reply into an analysis relative to `current`.
fn parse_extraction(
    raw: &str,
    current: &GameSpecification,
) -> Result<TurnAnalysis, ExtractionError> {
    let json = extract_json(raw)
        .ok_or_else(|| ExtractionError::Malformed("no JSON object in reply".to_string()))?;
    let parsed: LlmExtraction = serde_json::from_str(json)
        .map_err(|e| ExtractionError::Malformed(format!("invalid JSON: {e}")))?;

    let intent: Intent = parsed
        .intent
        .parse()
        .map_err(|e| ExtractionError::Malformed(format!("{e}")))?;

    let update = match parsed.spec {
        Some(serde_json::Value::Object(fields)) => {
            let merged = merge_spec(current, fields)?;
            SpecUpdate::between(current, &merged)
        }
        Some(serde_json::Value::Null) | None => SpecUpdate::default(),
        Some(other) => {
            return Err(ExtractionError::Malformed(format!(
                "spec must be an object, got {other}"
            )))
        }
    };

    Ok(TurnAnalysis::new(intent, update))
}

/// Overlay the fields the model returned onto the current specification.
fn merge_spec(
    current: &GameSpecification,
    fields: serde_json::Map<String, serde_json::Value>,
) -> Result<GameSpecification, ExtractionError> {
    let mut base = serde_json::to_value(current)
        .map_err(|e| ExtractionError::Malformed(format!("spec serialization: {e}")))?;
    if let serde_json::Value::Object(base_fields) = &mut base {
        for (key, value) in fields {
            // Unknown keys are dropped; nulls mean "unchanged".
            if base_fields.contains_key(&key) && !value.is_null() {
                base_fields.insert(key, value);
            }
        }
    }
    serde_json::from_value(base)
        .map_err(|e| ExtractionError::Malformed(format!("spec field out of range: {e}")))
}
