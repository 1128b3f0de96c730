//! Resume tailor core: pure state machine, domain model and view-model helpers.
mod effect;
mod model;
mod msg;
mod score;
mod state;
mod update;
mod upload;
mod view_model;

pub use effect::Effect;
pub use model::{
    find_placeholders, AnalysisMode, AnalysisResult, Impact, OptimizedResume, QualityMetric,
    QualityReport, Suggestion, SuggestionKind, PLACEHOLDER_TOKENS,
};
pub use msg::Msg;
pub use score::{display_metric_score, display_overall_score, ScoreBand};
pub use state::{AppState, CallKind, PendingCall, Phase, RequestId, ResultsTab};
pub use update::update;
pub use upload::{mime_type_for, ResumeFile, UploadError, ACCEPTED_EXTENSIONS};
pub use view_model::{
    AppViewModel, ContextView, EditorView, MetricView, ResultsView, Step, BANNER_ANALYSIS_FAILED,
    BANNER_EXPORT_FAILED, BANNER_EXTRACTION_FAILED, BANNER_OPTIMIZATION_FAILED,
    BANNER_REANALYSIS_FAILED,
};
