use std::fmt;
use std::path::Path;

/// File extensions the upload widget accepts.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Raw uploaded document as handed to the extraction call.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    UnsupportedExtension { name: String },
    Empty { name: String },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::UnsupportedExtension { name } => write!(
                f,
                "{name} is not a supported file type. Upload a .pdf, .docx or .txt file."
            ),
            UploadError::Empty { name } => write!(f, "{name} is empty."),
        }
    }
}

impl ResumeFile {
    /// Builds an upload from a file name and its content, deriving the MIME
    /// type from the extension.
    pub fn from_named_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let name = name.into();
        let mime_type = mime_type_for(&name)
            .ok_or_else(|| UploadError::UnsupportedExtension { name: name.clone() })?;
        if bytes.is_empty() {
            return Err(UploadError::Empty { name });
        }
        Ok(Self {
            name,
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn is_plain_text(&self) -> bool {
        self.mime_type == "text/plain"
    }
}

/// MIME type for an accepted resume file name, matched case-insensitively on
/// the extension.
pub fn mime_type_for(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}
