use std::path::PathBuf;

use crate::{RequestId, ResumeFile, Suggestion};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SimulateLogin,
    ExtractText {
        request: RequestId,
        file: ResumeFile,
    },
    /// An empty `job_description` selects the general audit prompt.
    Analyze {
        request: RequestId,
        resume_text: String,
        job_description: String,
    },
    AutoOptimize {
        request: RequestId,
        resume_text: String,
        job_description: String,
        suggestions: Vec<Suggestion>,
    },
    CancelPending {
        request: RequestId,
    },
    ExportResume {
        target: Option<PathBuf>,
        source_name: Option<String>,
        text: String,
    },
}
