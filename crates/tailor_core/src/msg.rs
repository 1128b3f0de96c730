use std::path::PathBuf;

use crate::{AnalysisMode, AnalysisResult, OptimizedResume, RequestId, ResultsTab, ResumeFile};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User clicked the sign-in button on the login screen.
    LoginClicked,
    /// Simulated sign-in finished.
    LoginCompleted,
    /// User submitted a resume file for extraction.
    UploadSubmitted(ResumeFile),
    /// The front-end could not read the chosen file.
    UploadRejected(String),
    /// Oracle finished extracting text from the uploaded file.
    TextExtracted {
        request: RequestId,
        result: Result<String, String>,
    },
    /// User edited the job description box.
    JobDescriptionChanged(String),
    /// User picked an analysis mode from the context screen.
    AnalyzeClicked(AnalysisMode),
    /// Oracle finished scoring the resume.
    AnalysisFinished {
        request: RequestId,
        result: Result<AnalysisResult, String>,
    },
    /// User switched between the suggestions and keywords tabs.
    TabSelected(ResultsTab),
    EditorOpened,
    EditorClosed,
    /// User replaced the editor contents.
    EditedTextChanged(String),
    /// User asked to score the edited resume again.
    ReanalyzeClicked,
    /// User asked the oracle to apply all suggestions.
    AutoOptimizeClicked,
    /// Oracle finished rewriting the resume.
    OptimizationFinished {
        request: RequestId,
        result: Result<OptimizedResume, String>,
    },
    /// User asked to save the edited resume; `None` picks a default file name.
    ExportRequested(Option<PathBuf>),
    /// Export effect completed.
    ExportFinished(Result<PathBuf, String>),
    /// The oracle cannot be used at all (no credentials, engine down).
    OracleUnavailable(String),
    /// User dismissed the error banner.
    ErrorDismissed,
    /// User started over.
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
