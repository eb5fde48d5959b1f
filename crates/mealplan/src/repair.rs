use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::PlanError;

static RE_OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?:json)?\s*").unwrap());
static RE_CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*```$").unwrap());
static RE_TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([\]}])").unwrap());
// A closing brace followed by another object; candidate cut points
static RE_OBJECT_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\}\s*,\s*\{").unwrap());

/// Remove an optional markdown code fence around the JSON body.
pub fn strip_code_fence(content: &str) -> String {
    let content = RE_OPENING_FENCE.replace(content.trim(), "");
    RE_CLOSING_FENCE.replace(&content, "").into_owned()
}

/// Parse plan JSON, falling back to simple repairs
///
/// 1. Trailing commas before `]` or `}` are removed.
/// 2. A reply cut off mid-meal is closed after the last complete meal. Cut
///    points are tried from the end; only a cut at the level of the `meals`
///    array parses once `]}` is appended.
///
/// When nothing parses, the error from the untouched content is returned.
pub fn parse_json_plan(content: &str) -> Result<Value, PlanError> {
    let first_error = match serde_json::from_str(content) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let repaired = RE_TRAILING_COMMA.replace_all(content, "$1");
    if let Ok(value) = serde_json::from_str(&repaired) {
        tracing::debug!("Repaired plan JSON by removing trailing commas");
        return Ok(value);
    }

    let boundaries: Vec<usize> = RE_OBJECT_BOUNDARY
        .find_iter(content)
        .map(|m| m.start())
        .collect();

    for idx in boundaries.into_iter().rev() {
        // Keep the closing brace of the last complete meal
        let truncated = format!("{}\n  ]\n}}", &content[..=idx]);

        if let Ok(value) = serde_json::from_str::<Value>(&truncated) {
            tracing::warn!(
                kept_bytes = idx + 1,
                "Plan JSON was truncated, keeping the complete meals before the cut"
            );
            return Ok(value);
        }
    }

    Err(first_error.into())
}
