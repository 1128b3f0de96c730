//! Resume tailor engine: oracle client, prompts, response validation and effect execution.
mod decode;
mod digest;
mod engine;
mod export;
mod gemini;
mod prompts;
mod reviewer;
mod schema;
mod types;

pub use decode::{normalize_plain_text, DecodeError, DecodedText};
pub use digest::fingerprint;
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use export::{export_filename, ExportError, ResumeExporter};
pub use gemini::{GeminiOracle, OracleSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompts::{
    build_analysis_prompt, build_optimization_prompt, truncate_chars, EXTRACTION_INSTRUCTION,
    GENERAL_AUDIT_MARKER, JD_CONTEXT_CHARS, ORIGINAL_EXCERPT_CHARS, TARGETED_MATCH_MARKER,
};
pub use reviewer::{AnalysisError, ExtractionError, OptimizationError, ResumeReviewer};
pub use schema::{analysis_schema, parse_analysis, SchemaError};
pub use types::{EngineEvent, Oracle, OracleError, OracleRequest, Part, ResponseFormat};
