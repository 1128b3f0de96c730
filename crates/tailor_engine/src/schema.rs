//! Response schema requested from the oracle and the validation applied to
//! whatever comes back. The oracle's output is untrusted: every field is
//! checked before it becomes an [`AnalysisResult`].

use std::collections::HashSet;
use std::fmt;

use serde_json::{json, Map, Value};
use tailor_core::{
    AnalysisResult, Impact, QualityMetric, QualityReport, Suggestion, SuggestionKind,
};

/// Schema sent with analysis requests, in the oracle's OpenAPI subset.
pub fn analysis_schema() -> Value {
    let metric = json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER", "description": "Score from 0 to 10." },
            "feedback": { "type": "STRING" }
        },
        "required": ["score", "feedback"]
    });
    json!({
        "type": "OBJECT",
        "properties": {
            "atsScore": {
                "type": "INTEGER",
                "description": "Overall score from 0 to 100. ATS match score when a job description is given, general resume strength otherwise. Be strict."
            },
            "summary": {
                "type": "STRING",
                "description": "A critical summary of the resume's fit. Call out weaknesses clearly."
            },
            "quality": {
                "type": "OBJECT",
                "properties": {
                    "clarity": metric,
                    "relevance": metric,
                    "keywords": metric,
                    "formatting": metric
                },
                "required": ["clarity", "relevance", "keywords", "formatting"]
            },
            "missingKeywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Critical keywords from the job description that the resume lacks."
            },
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "type": { "type": "STRING", "enum": ["rewrite", "addition", "removal", "format"] },
                        "originalText": {
                            "type": "STRING",
                            "description": "Exact snippet of the resume to change. Empty when adding new content."
                        },
                        "suggestedText": {
                            "type": "STRING",
                            "description": "The improved version. Must be substantially different from and better than originalText."
                        },
                        "reason": { "type": "STRING", "description": "Why the change is necessary." },
                        "impact": { "type": "STRING", "enum": ["high", "medium", "low"] }
                    },
                    "required": ["id", "type", "suggestedText", "reason", "impact"]
                }
            }
        },
        "required": ["atsScore", "summary", "quality", "missingKeywords", "suggestions"]
    })
}

/// A structural problem in the oracle's analysis payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub path: String,
    pub problem: String,
}

impl SchemaError {
    fn new(path: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.problem)
    }
}

impl std::error::Error for SchemaError {}

/// Strips a surrounding Markdown code fence, if any.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Validates an already parsed payload and converts it into an [`AnalysisResult`].
pub fn parse_analysis(value: &Value) -> Result<AnalysisResult, SchemaError> {
    let root = as_object(value, "$")?;

    let overall_score = integer_field(root, "$", "atsScore")?;
    let summary = string_field(root, "$", "summary")?;

    let quality = as_object(required(root, "$", "quality")?, "$.quality")?;
    let quality = QualityReport {
        clarity: metric(quality, "clarity")?,
        relevance: metric(quality, "relevance")?,
        keywords: metric(quality, "keywords")?,
        formatting: metric(quality, "formatting")?,
    };

    let missing_keywords = as_array(required(root, "$", "missingKeywords")?, "$.missingKeywords")?
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_str()
                .map(|s| s.trim().to_string())
                .ok_or_else(|| SchemaError::new(format!("$.missingKeywords[{idx}]"), "expected a string"))
        })
        .filter(|keyword| !matches!(keyword, Ok(k) if k.is_empty()))
        .collect::<Result<Vec<_>, _>>()?;

    let raw_suggestions = as_array(required(root, "$", "suggestions")?, "$.suggestions")?;
    let mut suggestions = Vec::with_capacity(raw_suggestions.len());
    let mut seen_ids = HashSet::new();
    for (idx, item) in raw_suggestions.iter().enumerate() {
        let path = format!("$.suggestions[{idx}]");
        let suggestion = suggestion(item, &path)?;
        if !seen_ids.insert(suggestion.id.clone()) {
            return Err(SchemaError::new(
                format!("{path}.id"),
                format!("duplicate id {:?}", suggestion.id),
            ));
        }
        suggestions.push(suggestion);
    }

    Ok(AnalysisResult {
        overall_score,
        summary,
        quality,
        missing_keywords,
        suggestions,
    })
}

fn suggestion(value: &Value, path: &str) -> Result<Suggestion, SchemaError> {
    let object = as_object(value, path)?;

    let id = string_field(object, path, "id")?.trim().to_string();
    if id.is_empty() {
        return Err(SchemaError::new(format!("{path}.id"), "must not be empty"));
    }

    let raw_kind = string_field(object, path, "type")?;
    let kind = SuggestionKind::parse(&raw_kind).ok_or_else(|| {
        SchemaError::new(format!("{path}.type"), format!("unknown suggestion type {raw_kind:?}"))
    })?;

    let raw_impact = string_field(object, path, "impact")?;
    let impact = Impact::parse(&raw_impact).ok_or_else(|| {
        SchemaError::new(format!("{path}.impact"), format!("unknown impact {raw_impact:?}"))
    })?;

    let original_text = match object.get("originalText") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.trim().is_empty() => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            return Err(SchemaError::new(
                format!("{path}.originalText"),
                "expected a string",
            ))
        }
    };

    let suggested_text = string_field(object, path, "suggestedText")?;
    if suggested_text.trim().is_empty() {
        return Err(SchemaError::new(
            format!("{path}.suggestedText"),
            "must not be empty",
        ));
    }

    Ok(Suggestion {
        id,
        kind,
        original_text,
        suggested_text,
        reason: string_field(object, path, "reason")?,
        impact,
    })
}

fn metric(quality: &Map<String, Value>, name: &str) -> Result<QualityMetric, SchemaError> {
    let path = format!("$.quality.{name}");
    let object = as_object(required(quality, "$.quality", name)?, &path)?;
    let score = number_field(object, &path, "score")?;
    if score < 0.0 {
        return Err(SchemaError::new(format!("{path}.score"), "must not be negative"));
    }
    let feedback = match object.get("feedback") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(_) => {
            return Err(SchemaError::new(
                format!("{path}.feedback"),
                "expected a string",
            ))
        }
    };
    Ok(QualityMetric { score, feedback })
}

fn required<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Value, SchemaError> {
    match object.get(key) {
        Some(Value::Null) | None => Err(SchemaError::new(format!("{path}.{key}"), "missing")),
        Some(value) => Ok(value),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::new(path, "expected an object"))
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, SchemaError> {
    value
        .as_array()
        .ok_or_else(|| SchemaError::new(path, "expected an array"))
}

fn string_field(object: &Map<String, Value>, path: &str, key: &str) -> Result<String, SchemaError> {
    required(object, path, key)?
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| SchemaError::new(format!("{path}.{key}"), "expected a string"))
}

fn number_field(object: &Map<String, Value>, path: &str, key: &str) -> Result<f64, SchemaError> {
    required(object, path, key)?
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| SchemaError::new(format!("{path}.{key}"), "expected a number"))
}

/// Integer field; fractional values are rounded.
fn integer_field(object: &Map<String, Value>, path: &str, key: &str) -> Result<i64, SchemaError> {
    let value = required(object, path, key)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    number_field(object, path, key).map(|n| n.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_json_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_json_fences("  {}  "), "{}");
    }

    #[test]
    fn schema_requires_top_level_fields() {
        let schema = analysis_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(
            required,
            ["atsScore", "summary", "quality", "missingKeywords", "suggestions"]
        );
        assert_eq!(
            schema["properties"]["suggestions"]["items"]["properties"]["impact"]["enum"],
            json!(["high", "medium", "low"])
        );
    }

    #[test]
    fn fractional_score_is_rounded() {
        let value = json!({"atsScore": 71.6});
        let object = value.as_object().unwrap();
        assert_eq!(integer_field(object, "$", "atsScore").unwrap(), 72);
    }
}
