use std::fmt;

use tailor_core::{AnalysisResult, OptimizedResume, RequestId};

use crate::reviewer::{AnalysisError, ExtractionError, OptimizationError};

/// One piece of prompt content.
#[derive(Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, bytes: Vec<u8> },
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Part::InlineData { mime_type, bytes } => f
                .debug_struct("InlineData")
                .field("mime_type", mime_type)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Free-form text.
    Text,
    /// JSON constrained by the given schema.
    Json { schema: serde_json::Value },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub parts: Vec<Part>,
    pub response: ResponseFormat,
    pub temperature: Option<f32>,
}

impl OracleRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into())],
            response: ResponseFormat::Text,
            temperature: None,
        }
    }

    /// Concatenated text parts, mostly useful for inspecting prompts in tests.
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("invalid oracle endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("oracle request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("oracle returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("oracle response exceeded {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },
    #[error("could not decode oracle response: {0}")]
    Decode(String),
    #[error("oracle blocked the prompt: {0}")]
    Blocked(String),
}

/// Text-generation backend. Implementations perform exactly one request per
/// call; retries are not their concern.
#[async_trait::async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(&self, request: OracleRequest) -> Result<String, OracleError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Extracted {
        request: RequestId,
        result: Result<String, ExtractionError>,
    },
    Analyzed {
        request: RequestId,
        result: Result<AnalysisResult, AnalysisError>,
    },
    Optimized {
        request: RequestId,
        result: Result<OptimizedResume, OptimizationError>,
    },
    /// The call was cancelled before the oracle answered.
    Cancelled { request: RequestId },
}

impl EngineEvent {
    pub fn request(&self) -> RequestId {
        match self {
            EngineEvent::Extracted { request, .. }
            | EngineEvent::Analyzed { request, .. }
            | EngineEvent::Optimized { request, .. }
            | EngineEvent::Cancelled { request } => *request,
        }
    }
}
