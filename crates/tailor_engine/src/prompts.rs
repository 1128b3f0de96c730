//! Prompt templates for the three oracle calls.

use tailor_core::Suggestion;

/// How much of each suggestion's original span is quoted in the rewrite directive.
pub const ORIGINAL_EXCERPT_CHARS: usize = 100;
/// How much of the job description is passed to the rewrite directive as context.
pub const JD_CONTEXT_CHARS: usize = 1000;

/// First line of the general audit template.
pub const GENERAL_AUDIT_MARKER: &str = "You are a strict, critical and no-nonsense Resume Auditor.";
/// First line of the targeted match template.
pub const TARGETED_MATCH_MARKER: &str =
    "You are a strict Applicant Tracking System (ATS) Auditor and Recruiter.";

pub const EXTRACTION_INSTRUCTION: &str = "Extract all text content from this resume document \
verbatim. Do not summarize. Keep the structure using Markdown headers and bullet points where \
appropriate.";

const TRUNCATED_MARKER: &str = "...";

/// Returns at most `max_chars` characters of `text`, appending `...` when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{TRUNCATED_MARKER}", &text[..end]),
        None => text.to_string(),
    }
}

/// Picks the template from the job description: blank selects the general
/// audit, anything else the targeted match.
pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    if job_description.trim().is_empty() {
        general_audit_prompt(resume_text)
    } else {
        targeted_match_prompt(resume_text, job_description)
    }
}

fn general_audit_prompt(resume_text: &str) -> String {
    format!(
        "{GENERAL_AUDIT_MARKER}
Your goal is blunt, honest feedback that lifts this resume into the top 1%.
Skip friendly filler. Be direct and objective.

RESUME CONTENT:
{resume_text}

TASK:
1. Audit the resume hard. Look for vague statements, missing metrics, passive voice and poor formatting.
2. Compute a Resume Strength Score from 0 to 100. Be strict: a generic resume without numbers scores below 50.
3. Rate Clarity, Relevance, Keywords and Formatting from 0 to 10. Be harsh.
4. List missing essential elements. Flag generic skills (for example \"Communication\") as lacking specificity.
5. Give specific, actionable suggestions.
   - Only propose a rewrite when the new version is clearly better (adds a metric, turns passive into active).
   - Do not propose trivial wording swaps such as \"Managed\" to \"Led\" without added context.
6. 'originalText' must match the resume text EXACTLY so it can be located.
7. 'suggestedText' is the exact replacement text and must be a substantial improvement.

Return JSON matching the provided schema.
Use the Resume Strength Score for 'atsScore'.
Make 'summary' a critical assessment and say plainly if the resume is weak.
"
    )
}

fn targeted_match_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{TARGETED_MATCH_MARKER}
Your job is to filter out candidates who do not match the Job Description (JD).
Do not be polite. State exactly why this candidate would be rejected.

JOB DESCRIPTION:
{job_description}

RESUME CONTENT:
{resume_text}

TASK:
1. Analyze the resume against the job description.
2. Compute a strict ATS match score from 0 to 100. If key hard skills from the JD are missing, the score MUST be below 60.
3. Rate Clarity, Relevance, Keywords and Formatting from 0 to 10.
4. List keywords from the JD that the resume lacks, using the exact phrases of the JD.
5. Give specific suggestions that close the gap.
   - Rewrite generic bullets so they carry JD keywords and plausible metrics.
   - Do not propose synonym swaps unless the new word is the exact JD keyword.
6. 'originalText' must match the resume text EXACTLY.
7. 'suggestedText' must be substantially different and optimized for the JD.

Return JSON matching the provided schema.
"
    )
}

/// One directive line per suggestion, original span cut to [`ORIGINAL_EXCERPT_CHARS`].
fn suggestion_directives(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "(none)".to_string();
    }
    suggestions
        .iter()
        .map(|suggestion| {
            let original = suggestion
                .original_text
                .as_deref()
                .map(|text| truncate_chars(text, ORIGINAL_EXCERPT_CHARS))
                .unwrap_or_else(|| "(new content)".to_string());
            format!(
                "- TYPE: {}. REASON: {} REPLACE: \"{}\" WITH: \"{}\"",
                suggestion.kind, suggestion.reason, original, suggestion.suggested_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_optimization_prompt(
    resume_text: &str,
    job_description: &str,
    suggestions: &[Suggestion],
) -> String {
    let jd_context = if job_description.trim().is_empty() {
        "N/A".to_string()
    } else {
        truncate_chars(job_description, JD_CONTEXT_CHARS)
    };
    let directives = suggestion_directives(suggestions);
    format!(
        "You are a precise Resume Editor.

You receive the CURRENT RESUME TEXT and a list of STRICT CHANGES to apply.

YOUR TASK:
1. Apply the listed changes to the resume text and nothing else.
2. When a change gives replacement text, replace the original text with it verbatim. Do not alter its meaning.
3. When a change adds keywords, put them in the most logical section (Skills, Core Competencies or Summary).
4. Do NOT reword parts of the resume that no change targets, except where grammar requires it.
5. IMPORTANT: when a change calls for a metric (for example \"improve efficiency by X%\"), replace placeholders such as 'X%', '[Number]' or 'Y' with realistic, plausible numbers for the role (for example \"improved efficiency by 23%\", \"managed a budget of $50,000\"). Never leave abstract placeholders in the final text.
6. Format the result as clean, professional Markdown.

CURRENT RESUME:
{resume_text}

STRICT CHANGES TO APPLY:
{directives}

TARGET JD CONTEXT (for context only):
{jd_context}

Output ONLY the full rewritten resume text in Markdown.
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailor_core::{Impact, SuggestionKind};

    fn suggestion(original: Option<&str>) -> Suggestion {
        Suggestion {
            id: "s1".into(),
            kind: SuggestionKind::Addition,
            original_text: original.map(ToOwned::to_owned),
            suggested_text: "Kubernetes".into(),
            reason: "Named in the JD.".into(),
            impact: Impact::Medium,
        }
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abcd", 3), "abc...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }

    #[test]
    fn blank_job_description_selects_general_audit() {
        let prompt = build_analysis_prompt("Managed a team", " \n ");
        assert!(prompt.starts_with(GENERAL_AUDIT_MARKER));
        assert!(!prompt.contains("JOB DESCRIPTION:"));

        let prompt = build_analysis_prompt("Managed a team", "Rust engineer");
        assert!(prompt.starts_with(TARGETED_MATCH_MARKER));
        assert!(prompt.contains("JOB DESCRIPTION:\nRust engineer"));
    }

    #[test]
    fn directives_quote_truncated_original_span() {
        let long = "a".repeat(ORIGINAL_EXCERPT_CHARS + 20);
        let prompt = build_optimization_prompt("resume", "", &[suggestion(Some(&long))]);
        let expected = format!("REPLACE: \"{}...\"", "a".repeat(ORIGINAL_EXCERPT_CHARS));
        assert!(prompt.contains(&expected));
        assert!(prompt.contains("TARGET JD CONTEXT (for context only):\nN/A"));
    }

    #[test]
    fn job_description_context_is_cut_to_limit() {
        let jd = "j".repeat(JD_CONTEXT_CHARS + 200);
        let prompt = build_optimization_prompt("resume", &jd, &[suggestion(None)]);
        let header = "TARGET JD CONTEXT (for context only):\n";
        let start = prompt.find(header).map(|idx| idx + header.len());
        let block = start
            .map(|idx| &prompt[idx..])
            .and_then(|rest| rest.split('\n').next())
            .unwrap_or_default();
        assert_eq!(block, format!("{}...", "j".repeat(JD_CONTEXT_CHARS)));

        let short = "k".repeat(JD_CONTEXT_CHARS);
        let prompt = build_optimization_prompt("resume", &short, &[]);
        assert!(prompt.contains(&format!("{header}{short}\n")));
        assert!(!prompt.contains(&format!("{short}...")));
    }

    #[test]
    fn additions_without_original_are_marked() {
        let prompt = build_optimization_prompt("resume", "JD", &[suggestion(None)]);
        assert!(prompt.contains("- TYPE: addition. REASON: Named in the JD. REPLACE: \"(new content)\" WITH: \"Kubernetes\""));
    }
}
