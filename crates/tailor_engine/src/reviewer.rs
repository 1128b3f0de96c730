use std::sync::Arc;

use tailor_core::{AnalysisResult, OptimizedResume, Suggestion};
use tailor_logging::{excerpt, tailor_debug, tailor_info, tailor_warn};

use crate::prompts::{build_analysis_prompt, build_optimization_prompt, EXTRACTION_INSTRUCTION};
use crate::schema::{analysis_schema, parse_analysis, strip_json_fences, SchemaError};
use crate::{fingerprint, normalize_plain_text, DecodeError, Oracle, OracleError, OracleRequest, Part, ResponseFormat};

/// Temperature for analysis calls; low so scores are repeatable.
const ANALYSIS_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("oracle call failed: {0}")]
    Oracle(#[from] OracleError),
    #[error("oracle returned no text")]
    Empty,
    #[error("plain-text upload is not readable: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("oracle call failed: {0}")]
    Oracle(#[from] OracleError),
    #[error("oracle returned malformed JSON: {0}")]
    Malformed(String),
    #[error("oracle response does not match the analysis schema: {0}")]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptimizationError {
    #[error("oracle call failed: {0}")]
    Oracle(#[from] OracleError),
}

/// The three resume operations, each a single oracle call with no retry.
#[derive(Clone)]
pub struct ResumeReviewer {
    oracle: Arc<dyn Oracle>,
}

impl ResumeReviewer {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Asks the oracle to transcribe the uploaded document as Markdown-ish text.
    pub async fn extract_text(
        &self,
        file_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, ExtractionError> {
        let payload = if mime_type == "text/plain" {
            let decoded = normalize_plain_text(file_bytes)?;
            tailor_debug!("plain-text upload decoded as {}", decoded.encoding_label);
            decoded.text.into_bytes()
        } else {
            file_bytes.to_vec()
        };
        tailor_info!(
            "extract_text doc={} mime={} bytes={}",
            fingerprint(file_bytes),
            mime_type,
            payload.len()
        );

        let request = OracleRequest {
            parts: vec![
                Part::InlineData {
                    mime_type: mime_type.to_string(),
                    bytes: payload,
                },
                Part::Text(EXTRACTION_INSTRUCTION.to_string()),
            ],
            response: ResponseFormat::Text,
            temperature: None,
        };
        let text = self.oracle.generate(request).await?;
        if text.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }
        Ok(text)
    }

    /// Scores the resume; a blank `job_description` runs the general audit.
    pub async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let general = job_description.trim().is_empty();
        tailor_info!(
            "analyze mode={} doc={} resume_chars={} jd_chars={}",
            if general { "general" } else { "targeted" },
            fingerprint(resume_text.as_bytes()),
            resume_text.chars().count(),
            job_description.chars().count()
        );

        let request = OracleRequest {
            parts: vec![Part::Text(build_analysis_prompt(resume_text, job_description))],
            response: ResponseFormat::Json {
                schema: analysis_schema(),
            },
            temperature: Some(ANALYSIS_TEMPERATURE),
        };
        let raw = self.oracle.generate(request).await?;
        let raw = if raw.trim().is_empty() { "{}" } else { raw.as_str() };
        let value: serde_json::Value = serde_json::from_str(strip_json_fences(raw))
            .map_err(|err| {
                tailor_warn!("analysis payload is not JSON: {} ({})", err, excerpt(raw, 80));
                AnalysisError::Malformed(err.to_string())
            })?;
        let result = parse_analysis(&value).inspect_err(|err| {
            tailor_warn!("analysis payload rejected: {}", err);
        })?;
        tailor_info!(
            "analysis done score={} suggestions={} missing_keywords={}",
            result.overall_score,
            result.suggestions.len(),
            result.missing_keywords.len()
        );
        Ok(result)
    }

    /// Applies `suggestions` through the oracle and returns the full rewritten text.
    /// Blank output falls back to `resume_text` unchanged.
    pub async fn auto_optimize(
        &self,
        resume_text: &str,
        job_description: &str,
        suggestions: &[Suggestion],
    ) -> Result<OptimizedResume, OptimizationError> {
        tailor_info!(
            "auto_optimize doc={} suggestions={}",
            fingerprint(resume_text.as_bytes()),
            suggestions.len()
        );
        let prompt = build_optimization_prompt(resume_text, job_description, suggestions);
        let text = self.oracle.generate(OracleRequest::text(prompt)).await?;
        let text = if text.trim().is_empty() {
            tailor_warn!("auto_optimize returned no text; keeping the current resume");
            resume_text.to_string()
        } else {
            text
        };

        let optimized = OptimizedResume::new(text);
        if !optimized.unresolved_placeholders.is_empty() {
            tailor_warn!(
                "rewritten resume still contains placeholders: {:?}",
                optimized.unresolved_placeholders
            );
        }
        Ok(optimized)
    }
}
