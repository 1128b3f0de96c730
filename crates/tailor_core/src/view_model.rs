use crate::{AnalysisMode, Phase, ResultsTab, ScoreBand, Suggestion};

pub const BANNER_EXTRACTION_FAILED: &str =
    "Could not parse the file. Please try a different format or paste the text.";
pub const BANNER_ANALYSIS_FAILED: &str = "Analysis failed. Please try again later.";
pub const BANNER_REANALYSIS_FAILED: &str = "Re-analysis failed.";
pub const BANNER_OPTIMIZATION_FAILED: &str = "Auto-optimization failed. Please try manual editing.";
pub const BANNER_EXPORT_FAILED: &str = "Could not save the resume";

/// Position in the Upload -> Context -> Results stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Context,
    Results,
}

impl Step {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Idle | Phase::Parsing | Phase::Error => Step::Upload,
            Phase::Ready | Phase::Analyzing => Step::Context,
            Phase::Results => Step::Results,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub phase: Phase,
    pub logged_in: bool,
    pub login_pending: bool,
    pub step: Step,
    pub show_stepper: bool,
    pub error_banner: Option<String>,
    pub notice: Option<String>,
    pub upload_enabled: bool,
    pub file_name: Option<String>,
    pub context: Option<ContextView>,
    pub analyzing_mode: Option<AnalysisMode>,
    pub results: Option<ResultsView>,
    pub editor: Option<EditorView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextView {
    pub resume_text: String,
    pub job_description: String,
    pub targeted_enabled: bool,
    pub general_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub mode: AnalysisMode,
    pub score_label: &'static str,
    pub overall_score: u8,
    pub band: ScoreBand,
    pub headline: &'static str,
    pub summary: String,
    pub metrics: Vec<MetricView>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub active_tab: ResultsTab,
    pub optimizing: bool,
    pub optimize_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricView {
    pub name: &'static str,
    /// Normalized 0-10 score.
    pub score: f64,
    pub bar_percent: u8,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub text: String,
    pub char_count: usize,
    pub unresolved_placeholders: Vec<String>,
    pub reanalyze_enabled: bool,
}
