use std::fmt::Write as _;

use tailor_core::{ContextView, ACCEPTED_EXTENSIONS};

/// Lines of the parsed resume shown on the context screen.
const PREVIEW_LINES: usize = 12;

pub fn render_upload(parsing: bool, enabled: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Upload Resume");
    let formats = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "Accepted formats: {formats}");
    if parsing {
        let _ = writeln!(out, "Extracting Data...");
    } else if enabled {
        let _ = writeln!(out, "Type `upload <path>` to choose a file.");
    }
    out
}

pub fn render_context(file_name: Option<&str>, context: &ContextView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Resume: {}  (Extracted)", file_name.unwrap_or("uploaded file"));

    let lines: Vec<&str> = context.resume_text.lines().collect();
    for line in lines.iter().take(PREVIEW_LINES) {
        let _ = writeln!(out, "  | {line}");
    }
    if lines.len() > PREVIEW_LINES {
        let _ = writeln!(out, "  | ... ({} more lines)", lines.len() - PREVIEW_LINES);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Target Job Description");
    if context.job_description.trim().is_empty() {
        let _ = writeln!(out, "  (none yet; type `jd` to paste one)");
    } else {
        for line in context.job_description.lines() {
            let _ = writeln!(out, "  > {line}");
        }
    }

    let _ = writeln!(out);
    if context.targeted_enabled {
        let _ = writeln!(out, "  analyze jd       Analyze Match");
    } else {
        let _ = writeln!(out, "  analyze jd       Analyze Match (needs a job description)");
    }
    let _ = writeln!(out, "  OR");
    if context.general_enabled {
        let _ = writeln!(out, "  analyze general  General Resume Audit");
    }
    out
}
