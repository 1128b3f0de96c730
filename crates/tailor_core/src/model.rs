use std::fmt;

/// Which prompt family an analysis runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    /// Resume scored against a pasted job description.
    #[default]
    TargetedMatch,
    /// No job description; resume audited against general best practices.
    GeneralAudit,
}

impl AnalysisMode {
    pub fn is_general(self) -> bool {
        matches!(self, AnalysisMode::GeneralAudit)
    }

    /// The job description text to send for this mode.
    pub fn job_description_for(self, job_description: &str) -> String {
        match self {
            AnalysisMode::TargetedMatch => job_description.to_string(),
            AnalysisMode::GeneralAudit => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Rewrite,
    Addition,
    Removal,
    Format,
}

impl SuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionKind::Rewrite => "rewrite",
            SuggestionKind::Addition => "addition",
            SuggestionKind::Removal => "removal",
            SuggestionKind::Format => "format",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rewrite" => Some(SuggestionKind::Rewrite),
            "addition" => Some(SuggestionKind::Addition),
            "removal" => Some(SuggestionKind::Removal),
            "format" => Some(SuggestionKind::Format),
            _ => None,
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Impact::High),
            "medium" => Some(Impact::Medium),
            "low" => Some(Impact::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single proposed edit to the resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub kind: SuggestionKind,
    /// Exact span in the resume to replace; `None` for pure additions.
    pub original_text: Option<String>,
    pub suggested_text: String,
    pub reason: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityMetric {
    /// Raw score as returned by the oracle; see [`crate::display_metric_score`].
    pub score: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub clarity: QualityMetric,
    pub relevance: QualityMetric,
    pub keywords: QualityMetric,
    pub formatting: QualityMetric,
}

impl QualityReport {
    /// Metrics in display order with their labels.
    pub fn named(&self) -> [(&'static str, &QualityMetric); 4] {
        [
            ("Clarity", &self.clarity),
            ("Relevance", &self.relevance),
            ("Keywords", &self.keywords),
            ("Formatting", &self.formatting),
        ]
    }
}

/// Snapshot produced by one analysis call. Replaced, never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Raw overall score; see [`crate::display_overall_score`].
    pub overall_score: i64,
    pub summary: String,
    pub quality: QualityReport,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

/// Placeholder tokens the rewrite directive asks the oracle to fill in.
pub const PLACEHOLDER_TOKENS: &[&str] = &["X%", "[Number]", "[number]", "[X]", "$X", "Y%", "$Y"];

/// Single-letter placeholders, only counted where a quantity would go.
const BARE_PLACEHOLDERS: &[&str] = &["X", "Y"];
const QUANTITY_WORDS: &[&str] = &["by", "of", "to", "over", "than", "saving", "cut"];

/// Rewritten resume text returned by auto-optimization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedResume {
    pub text: String,
    /// Placeholder tokens still present in `text`.
    pub unresolved_placeholders: Vec<String>,
}

impl OptimizedResume {
    pub fn new(text: String) -> Self {
        let unresolved_placeholders = find_placeholders(&text);
        Self {
            text,
            unresolved_placeholders,
        }
    }
}

/// Returns the distinct placeholder tokens found in `text`, in table order,
/// followed by any bare `X` or `Y`.
///
/// `X%` only counts when the `X` is not part of a longer word (so `XX%` or
/// `MAX%` do not match). A bare letter only counts as its own word right
/// after a quantity word, as in "reduced spend by Y".
pub fn find_placeholders(text: &str) -> Vec<String> {
    let tokens = PLACEHOLDER_TOKENS
        .iter()
        .filter(|token| contains_standalone(text, token));
    let bare = BARE_PLACEHOLDERS
        .iter()
        .filter(|letter| contains_bare_quantity(text, letter));
    tokens.chain(bare).map(|token| token.to_string()).collect()
}

fn contains_bare_quantity(text: &str, letter: &str) -> bool {
    text.match_indices(letter).any(|(idx, _)| {
        let after = text[idx + letter.len()..].chars().next();
        if matches!(after, Some(c) if c.is_alphanumeric() || c == '%') {
            return false;
        }
        let head = &text[..idx];
        if !head.ends_with(char::is_whitespace) {
            return false;
        }
        head.split_whitespace()
            .next_back()
            .is_some_and(|word| QUANTITY_WORDS.contains(&word.to_lowercase().as_str()))
    })
}

fn contains_standalone(text: &str, token: &str) -> bool {
    text.match_indices(token).any(|(idx, _)| {
        let before = text[..idx].chars().next_back();
        !matches!(before, Some(c) if c.is_alphanumeric())
    })
}
