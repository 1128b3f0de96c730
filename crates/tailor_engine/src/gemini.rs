use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tailor_logging::{tailor_debug, tailor_warn};

use crate::{Oracle, OracleError, OracleRequest, Part, ResponseFormat};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone)]
pub struct OracleSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}

impl fmt::Debug for OracleSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_response_bytes", &self.max_response_bytes)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Oracle backed by the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiOracle {
    settings: OracleSettings,
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl GeminiOracle {
    pub fn new(settings: OracleSettings) -> Result<Self, OracleError> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );
        let endpoint = reqwest::Url::parse(&endpoint)
            .map_err(|err| OracleError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| OracleError::Network(err.to_string()))?;
        Ok(Self {
            settings,
            client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    fn encode_body(&self, request: &OracleRequest) -> Result<Vec<u8>, OracleError> {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => WirePart::Text { text },
                Part::InlineData { mime_type, bytes } => WirePart::Inline {
                    inline_data: InlineData {
                        mime_type,
                        data: BASE64.encode(bytes),
                    },
                },
            })
            .collect();

        let generation_config = match (&request.response, request.temperature) {
            (ResponseFormat::Text, None) => None,
            (ResponseFormat::Text, temperature) => Some(GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                temperature,
            }),
            (ResponseFormat::Json { schema }, temperature) => Some(GenerationConfig {
                response_mime_type: Some("application/json"),
                response_schema: Some(schema),
                temperature,
            }),
        };

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config,
        };
        serde_json::to_vec(&body).map_err(|err| OracleError::Decode(err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<BytesMut, OracleError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(OracleError::TooLarge { max_bytes });
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(OracleError::TooLarge { max_bytes });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Oracle for GeminiOracle {
    async fn generate(&self, request: OracleRequest) -> Result<String, OracleError> {
        let body = self.encode_body(&request)?;
        tailor_debug!(
            "generateContent model={} parts={} request_bytes={}",
            self.settings.model,
            request.parts.len(),
            body.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.settings.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
            tailor_warn!("generateContent returned {}: {}", status, message);
            return Err(OracleError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&body)
            .map_err(|err| OracleError::Decode(err.to_string()))?;
        response_text(parsed)
    }
}

/// Text of the first candidate; no candidate means empty text unless the
/// prompt itself was blocked.
fn response_text(response: GenerateContentResponse) -> Result<String, OracleError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(OracleError::Blocked(reason));
        }
        return Ok(String::new());
    };
    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" {
            tailor_warn!("generateContent finished with reason {}", reason);
        }
    }
    Ok(candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

fn map_reqwest_error(err: reqwest::Error) -> OracleError {
    if err.is_timeout() {
        return OracleError::Timeout;
    }
    OracleError::Network(err.to_string())
}
