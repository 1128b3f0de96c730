use crate::view_model::{
    AppViewModel, ContextView, EditorView, MetricView, ResultsView, Step,
};
use crate::{display_metric_score, display_overall_score, AnalysisMode, AnalysisResult, ScoreBand};

/// Identifies one oracle call. Never reused within a session, so a response
/// can always be matched against the call the state is waiting for.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Parsing,
    Ready,
    Analyzing,
    Results,
    /// Entered only when the oracle cannot be reached at all; see `Msg::OracleUnavailable`.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsTab {
    #[default]
    Suggestions,
    Keywords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Extract,
    Analyze {
        mode: AnalysisMode,
        /// Phase to fall back to when the call fails.
        return_to: Phase,
    },
    Optimize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCall {
    pub id: RequestId,
    pub kind: CallKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    phase: Phase,
    logged_in: bool,
    login_pending: bool,
    file_name: Option<String>,
    resume_text: String,
    edited_text: String,
    job_description: String,
    mode: AnalysisMode,
    result: Option<AnalysisResult>,
    active_tab: ResultsTab,
    editor_open: bool,
    unresolved_placeholders: Vec<String>,
    error_message: Option<String>,
    notice: Option<String>,
    pending: Option<PendingCall>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a session that skips the login screen.
    pub fn signed_in() -> Self {
        Self {
            logged_in: true,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn pending(&self) -> Option<PendingCall> {
        self.pending
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_open
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.pending.is_some();
        let context = (self.phase == Phase::Ready).then(|| ContextView {
            resume_text: self.resume_text.clone(),
            job_description: self.job_description.clone(),
            targeted_enabled: !busy && !self.job_description.trim().is_empty(),
            general_enabled: !busy,
        });
        let analyzing_mode = match self.pending {
            Some(PendingCall {
                kind: CallKind::Analyze { mode, .. },
                ..
            }) => Some(mode),
            _ => None,
        };
        let results = if self.phase == Phase::Results {
            self.result.as_ref().map(|result| self.results_view(result))
        } else {
            None
        };
        let editor = (self.phase == Phase::Results && self.editor_open).then(|| EditorView {
            text: self.edited_text.clone(),
            char_count: self.edited_text.chars().count(),
            unresolved_placeholders: self.unresolved_placeholders.clone(),
            reanalyze_enabled: !busy && !self.edited_text.trim().is_empty(),
        });

        AppViewModel {
            phase: self.phase,
            logged_in: self.logged_in,
            login_pending: self.login_pending,
            step: Step::for_phase(self.phase),
            show_stepper: self.phase != Phase::Results,
            error_banner: self.error_message.clone(),
            notice: self.notice.clone(),
            upload_enabled: self.phase == Phase::Idle && !busy,
            file_name: self.file_name.clone(),
            context,
            analyzing_mode,
            results,
            editor,
            dirty: self.dirty,
        }
    }

    fn results_view(&self, result: &AnalysisResult) -> ResultsView {
        let overall_score = display_overall_score(result.overall_score);
        let band = ScoreBand::for_score(overall_score);
        let general = self.mode.is_general();
        let optimizing = matches!(
            self.pending,
            Some(PendingCall {
                kind: CallKind::Optimize,
                ..
            })
        );
        ResultsView {
            mode: self.mode,
            score_label: if general {
                "Resume Strength"
            } else {
                "ATS Match Score"
            },
            overall_score,
            band,
            headline: band.headline(general),
            summary: result.summary.clone(),
            metrics: result
                .quality
                .named()
                .into_iter()
                .map(|(name, metric)| {
                    let score = display_metric_score(metric.score);
                    MetricView {
                        name,
                        score,
                        bar_percent: (score * 10.0).round().min(100.0) as u8,
                        feedback: metric.feedback.clone(),
                    }
                })
                .collect(),
            missing_keywords: result.missing_keywords.clone(),
            suggestions: result.suggestions.clone(),
            active_tab: self.active_tab,
            optimizing,
            optimize_enabled: self.pending.is_none(),
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Registers a new outstanding call and returns its id.
    pub(crate) fn begin_call(&mut self, kind: CallKind) -> RequestId {
        self.next_request_id += 1;
        let id = self.next_request_id;
        self.pending = Some(PendingCall { id, kind });
        self.notice = None;
        self.error_message = None;
        self.mark_dirty();
        id
    }

    /// Clears the pending call if `request` is the one being waited for.
    pub(crate) fn finish_call(&mut self, request: RequestId) -> Option<CallKind> {
        match self.pending {
            Some(pending) if pending.id == request => {
                self.pending = None;
                self.mark_dirty();
                Some(pending.kind)
            }
            _ => None,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error_message.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn start_login(&mut self) -> bool {
        if self.logged_in || self.login_pending {
            return false;
        }
        self.login_pending = true;
        self.mark_dirty();
        true
    }

    pub(crate) fn complete_login(&mut self) {
        if self.login_pending {
            self.login_pending = false;
            self.logged_in = true;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_file_name(&mut self, name: Option<String>) {
        self.file_name = name;
        self.mark_dirty();
    }

    pub(crate) fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub(crate) fn store_extracted_text(&mut self, text: String) {
        self.edited_text = text.clone();
        self.resume_text = text;
        self.mark_dirty();
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        if self.job_description != text {
            self.job_description = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn store_result(&mut self, mode: AnalysisMode, result: AnalysisResult) {
        self.mode = mode;
        self.result = Some(result);
        self.active_tab = ResultsTab::Suggestions;
        self.editor_open = false;
        self.unresolved_placeholders.clear();
        self.mark_dirty();
    }

    pub(crate) fn select_tab(&mut self, tab: ResultsTab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_editor_open(&mut self, open: bool) {
        if self.editor_open != open {
            self.editor_open = open;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_edited_text(&mut self, text: String) {
        if self.edited_text != text {
            self.edited_text = text;
            self.unresolved_placeholders.clear();
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_optimized(&mut self, text: String, unresolved: Vec<String>) {
        self.edited_text = text;
        self.unresolved_placeholders = unresolved;
        self.editor_open = true;
        self.mark_dirty();
    }

    /// Clears everything collected in this session. Login and the request
    /// counter survive so late responses can never match a new call.
    pub(crate) fn reset(&mut self) -> Option<PendingCall> {
        let pending = self.pending.take();
        *self = Self {
            logged_in: self.logged_in,
            login_pending: self.login_pending,
            next_request_id: self.next_request_id,
            dirty: true,
            ..Self::default()
        };
        pending
    }
}
