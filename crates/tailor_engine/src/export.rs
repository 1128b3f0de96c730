use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::fingerprint;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Writes edited resumes to disk.
#[derive(Debug, Clone)]
pub struct ResumeExporter {
    dir: PathBuf,
}

impl ResumeExporter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Atomically writes `text` to `target`, or to a default name under the
    /// output directory derived from the uploaded file name.
    pub fn export(
        &self,
        target: Option<&Path>,
        source_name: Option<&str>,
        text: &str,
    ) -> Result<PathBuf, ExportError> {
        let target = match target {
            Some(path) => path.to_path_buf(),
            None => self.dir.join(export_filename(source_name, text)),
        };
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        ensure_output_dir(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            tmp.write_all(b"\n")?;
        }
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| ExportError::Io(e.error))?;
        Ok(target)
    }
}

fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        Ok(())
    } else {
        fs::create_dir_all(dir).map_err(|e| ExportError::OutputDir(e.to_string()))
    }
}

/// `{sanitized stem}--tailored--{short hash of text}.md`
pub fn export_filename(source_name: Option<&str>, text: &str) -> String {
    let stem = source_name
        .map(Path::new)
        .and_then(Path::file_stem)
        .and_then(|s| s.to_str())
        .unwrap_or("resume");
    let hash = fingerprint(text.as_bytes());
    format!("{}--tailored--{hash}.md", sanitize_stem(stem))
}

fn sanitize_stem(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if is_forbidden(c) || c.is_whitespace() { '_' } else { c };
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let mut cleaned: String = compacted
        .trim_matches(&['_', '.'][..])
        .chars()
        .take(60)
        .collect();
    if cleaned.is_empty() {
        cleaned = "resume".to_string();
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
