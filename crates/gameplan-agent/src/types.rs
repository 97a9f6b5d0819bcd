use serde::{Deserialize, Serialize};

// ─── Chat wire format ─────────────────────────────────────────────────────

/// A `POST /chat/completions` request body. Only the fields we send.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chat completion response. Tolerant of fields we do not use.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// The assistant text of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

// ─── Defensive JSON parsing ───────────────────────────────────────────────

/// Outcome of parsing structured JSON out of model text. Malformed output is
/// a normal condition, not an error: callers keep the raw text so a coach can
/// still read what the model said.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Parsed<T> {
    Ok { value: T },
    Malformed { raw: String },
}

impl<T> Parsed<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Parsed::Ok { value } => Some(value),
            Parsed::Malformed { .. } => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Parsed::Ok { .. })
    }
}

/// Extract and deserialize a `T` from raw model output. Strips markdown code
/// fences, then falls back to the outermost `{…}` span if the whole text is
/// not valid JSON.
pub fn parse_model_json<T: serde::de::DeserializeOwned>(raw: &str) -> Parsed<T> {
    let stripped = strip_code_fences(raw);
    if let Ok(value) = serde_json::from_str::<T>(stripped) {
        return Parsed::Ok { value };
    }
    if let Some(span) = outermost_object(stripped) {
        if let Ok(value) = serde_json::from_str::<T>(span) {
            return Parsed::Ok { value };
        }
    }
    Parsed::Malformed {
        raw: raw.to_string(),
    }
}

/// Remove a leading ```json / ``` fence and its closing fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

/// The span from the first `{` to its matching brace, tracking strings and
/// escapes so braces inside labels do not confuse the depth count.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

// ─── Structured payloads ──────────────────────────────────────────────────

/// A generated call sheet. Every section defaults to empty so a model that
/// omits a category still parses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GamePlan {
    #[serde(default)]
    pub run_game: Vec<String>,
    #[serde(default)]
    pub rpo_game: Vec<String>,
    #[serde(default)]
    pub quick_game: Vec<String>,
    #[serde(default)]
    pub dropback_game: Vec<String>,
    #[serde(default)]
    pub shot_plays: Vec<String>,
    #[serde(default)]
    pub screen_game: Vec<String>,
    #[serde(default)]
    pub third_and_short: Vec<String>,
    #[serde(default)]
    pub third_and_medium: Vec<String>,
    #[serde(default)]
    pub third_and_long: Vec<String>,
    #[serde(default)]
    pub red_zone: Vec<String>,
    #[serde(default)]
    pub goal_line: Vec<String>,
    #[serde(default)]
    pub two_minute: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl GamePlan {
    pub fn is_empty(&self) -> bool {
        self.run_game.is_empty()
            && self.rpo_game.is_empty()
            && self.quick_game.is_empty()
            && self.dropback_game.is_empty()
            && self.shot_plays.is_empty()
            && self.screen_game.is_empty()
            && self.third_and_short.is_empty()
            && self.third_and_medium.is_empty()
            && self.third_and_long.is_empty()
            && self.red_zone.is_empty()
            && self.goal_line.is_empty()
            && self.two_minute.is_empty()
    }
}

/// Model commentary on a scouting report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoutingAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub suggested_fronts: Vec<String>,
}
