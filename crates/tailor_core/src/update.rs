use crate::view_model::{
    BANNER_ANALYSIS_FAILED, BANNER_EXPORT_FAILED, BANNER_EXTRACTION_FAILED,
    BANNER_OPTIMIZATION_FAILED, BANNER_REANALYSIS_FAILED,
};
use crate::{mime_type_for, AnalysisMode, AppState, CallKind, Effect, Msg, Phase, UploadError};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoginClicked => {
            if state.start_login() {
                vec![Effect::SimulateLogin]
            } else {
                Vec::new()
            }
        }
        Msg::LoginCompleted => {
            state.complete_login();
            Vec::new()
        }
        Msg::ResetClicked => match state.reset() {
            Some(pending) => vec![Effect::CancelPending {
                request: pending.id,
            }],
            None => Vec::new(),
        },
        Msg::ErrorDismissed => {
            state.clear_error();
            Vec::new()
        }
        Msg::OracleUnavailable(reason) => {
            // Nothing more will arrive for an outstanding call.
            let effects = match state.pending() {
                Some(pending) => {
                    state.finish_call(pending.id);
                    vec![Effect::CancelPending {
                        request: pending.id,
                    }]
                }
                None => Vec::new(),
            };
            state.set_phase(Phase::Error);
            state.set_error(reason);
            effects
        }
        Msg::NoOp => Vec::new(),
        // Everything below requires a signed-in session outside the Error phase.
        _ if !state.is_logged_in() || state.phase() == Phase::Error => Vec::new(),
        Msg::UploadSubmitted(file) => {
            if state.phase() != Phase::Idle || state.is_busy() {
                return (state, Vec::new());
            }
            if mime_type_for(&file.name).is_none() {
                state.set_error(UploadError::UnsupportedExtension { name: file.name }.to_string());
                return (state, Vec::new());
            }
            if file.bytes.is_empty() {
                state.set_error(UploadError::Empty { name: file.name }.to_string());
                return (state, Vec::new());
            }
            let request = state.begin_call(CallKind::Extract);
            state.set_file_name(Some(file.name.clone()));
            state.set_phase(Phase::Parsing);
            vec![Effect::ExtractText { request, file }]
        }
        Msg::UploadRejected(reason) => {
            if state.phase() == Phase::Idle && !state.is_busy() {
                state.set_error(reason);
            }
            Vec::new()
        }
        Msg::TextExtracted { request, result } => {
            if state.finish_call(request).is_none() {
                return (state, Vec::new());
            }
            match result {
                Ok(text) if !text.trim().is_empty() => {
                    state.store_extracted_text(text);
                    state.set_phase(Phase::Ready);
                }
                Ok(_) | Err(_) => {
                    state.set_file_name(None);
                    state.set_phase(Phase::Idle);
                    state.set_error(BANNER_EXTRACTION_FAILED);
                }
            }
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            if state.phase() == Phase::Ready && !state.is_busy() {
                state.set_job_description(text);
            }
            Vec::new()
        }
        Msg::AnalyzeClicked(mode) => {
            if state.phase() != Phase::Ready
                || state.is_busy()
                || state.resume_text().trim().is_empty()
            {
                return (state, Vec::new());
            }
            if mode == AnalysisMode::TargetedMatch && state.job_description().trim().is_empty() {
                return (state, Vec::new());
            }
            let resume_text = state.resume_text().to_string();
            let job_description = mode.job_description_for(state.job_description());
            let request = state.begin_call(CallKind::Analyze {
                mode,
                return_to: Phase::Ready,
            });
            state.set_phase(Phase::Analyzing);
            vec![Effect::Analyze {
                request,
                resume_text,
                job_description,
            }]
        }
        Msg::ReanalyzeClicked => {
            if state.phase() != Phase::Results
                || state.is_busy()
                || state.edited_text().trim().is_empty()
            {
                return (state, Vec::new());
            }
            let mode = state.mode();
            let resume_text = state.edited_text().to_string();
            let job_description = mode.job_description_for(state.job_description());
            let request = state.begin_call(CallKind::Analyze {
                mode,
                return_to: Phase::Results,
            });
            state.set_phase(Phase::Analyzing);
            vec![Effect::Analyze {
                request,
                resume_text,
                job_description,
            }]
        }
        Msg::AnalysisFinished { request, result } => {
            let Some(CallKind::Analyze { mode, return_to }) = state.finish_call(request) else {
                return (state, Vec::new());
            };
            match result {
                Ok(result) => {
                    state.store_result(mode, result);
                    state.set_phase(Phase::Results);
                }
                Err(_) => {
                    state.set_phase(return_to);
                    state.set_error(if return_to == Phase::Results {
                        BANNER_REANALYSIS_FAILED
                    } else {
                        BANNER_ANALYSIS_FAILED
                    });
                }
            }
            Vec::new()
        }
        Msg::AutoOptimizeClicked => {
            if state.phase() != Phase::Results || state.is_busy() {
                return (state, Vec::new());
            }
            let Some(suggestions) = state.result().map(|result| result.suggestions.clone()) else {
                return (state, Vec::new());
            };
            let resume_text = state.edited_text().to_string();
            let job_description = state.mode().job_description_for(state.job_description());
            let request = state.begin_call(CallKind::Optimize);
            vec![Effect::AutoOptimize {
                request,
                resume_text,
                job_description,
                suggestions,
            }]
        }
        Msg::OptimizationFinished { request, result } => {
            if state.finish_call(request).is_none() {
                return (state, Vec::new());
            }
            match result {
                Ok(optimized) => {
                    state.apply_optimized(optimized.text, optimized.unresolved_placeholders);
                }
                Err(_) => state.set_error(BANNER_OPTIMIZATION_FAILED),
            }
            Vec::new()
        }
        Msg::TabSelected(tab) => {
            if state.phase() == Phase::Results {
                state.select_tab(tab);
            }
            Vec::new()
        }
        Msg::EditorOpened => {
            if state.phase() == Phase::Results {
                state.set_editor_open(true);
            }
            Vec::new()
        }
        Msg::EditorClosed => {
            state.set_editor_open(false);
            Vec::new()
        }
        Msg::EditedTextChanged(text) => {
            if state.phase() == Phase::Results {
                state.set_edited_text(text);
            }
            Vec::new()
        }
        Msg::ExportRequested(target) => {
            if state.phase() != Phase::Results || state.edited_text().trim().is_empty() {
                return (state, Vec::new());
            }
            vec![Effect::ExportResume {
                target,
                source_name: state.file_name().map(ToOwned::to_owned),
                text: state.edited_text().to_string(),
            }]
        }
        Msg::ExportFinished(result) => {
            if state.phase() != Phase::Results {
                return (state, Vec::new());
            }
            match result {
                Ok(path) => state.set_notice(format!("Saved to {}", path.display())),
                Err(detail) => state.set_error(format!("{BANNER_EXPORT_FAILED}: {detail}")),
            }
            Vec::new()
        }
    };

    (state, effects)
}
