use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tailor_core::{Effect, Msg};
use tailor_engine::{EngineEvent, EngineHandle, EventSink, ResumeExporter};
use tailor_logging::{tailor_debug, tailor_info, tailor_warn};

use super::app::AppEvent;

/// Executes the effects returned by `update` and feeds results back as messages.
pub struct EffectRunner {
    engine: Result<EngineHandle, String>,
    exporter: ResumeExporter,
    login_delay: Duration,
    tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    /// `engine` is `Err(reason)` when no oracle is available; oracle effects
    /// then turn into `Msg::OracleUnavailable`.
    pub fn new(
        engine: Result<EngineHandle, String>,
        exporter: ResumeExporter,
        login_delay: Duration,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            engine,
            exporter,
            login_delay,
            tx,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SimulateLogin => {
                    let tx = self.tx.clone();
                    let delay = self.login_delay;
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = tx.send(AppEvent::Core(Msg::LoginCompleted));
                    });
                }
                Effect::ExtractText { request, file } => {
                    tailor_info!(
                        "ExtractText request={} mime={} bytes={}",
                        request,
                        file.mime_type,
                        file.bytes.len()
                    );
                    if let Some(engine) = self.engine() {
                        engine.extract(request, file);
                    }
                }
                Effect::Analyze {
                    request,
                    resume_text,
                    job_description,
                } => {
                    tailor_info!(
                        "Analyze request={} general={}",
                        request,
                        job_description.trim().is_empty()
                    );
                    if let Some(engine) = self.engine() {
                        engine.analyze(request, resume_text, job_description);
                    }
                }
                Effect::AutoOptimize {
                    request,
                    resume_text,
                    job_description,
                    suggestions,
                } => {
                    tailor_info!(
                        "AutoOptimize request={} suggestions={}",
                        request,
                        suggestions.len()
                    );
                    if let Some(engine) = self.engine() {
                        engine.optimize(request, resume_text, job_description, suggestions);
                    }
                }
                Effect::CancelPending { request } => {
                    if let Ok(engine) = &self.engine {
                        engine.cancel(request);
                    }
                }
                Effect::ExportResume {
                    target,
                    source_name,
                    text,
                } => {
                    let result = self
                        .exporter
                        .export(target.as_deref(), source_name.as_deref(), &text)
                        .map_err(|err| {
                            tailor_warn!("export failed: {}", err);
                            err.to_string()
                        });
                    if let Ok(path) = &result {
                        tailor_info!("exported resume to {:?}", path);
                    }
                    self.send(Msg::ExportFinished(result));
                }
            }
        }
    }

    fn engine(&self) -> Option<&EngineHandle> {
        match &self.engine {
            Ok(engine) => Some(engine),
            Err(reason) => {
                self.send(Msg::OracleUnavailable(reason.clone()));
                None
            }
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.tx.send(AppEvent::Core(msg));
    }
}

/// Forwards engine results into the app loop as core messages.
pub struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl MsgSink {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Arc<Self> {
        Arc::new(Self { tx })
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        if let Some(msg) = engine_event_to_msg(event) {
            let _ = self.tx.send(AppEvent::Core(msg));
        }
    }
}

/// Maps an engine event to the message `update` expects. Error details are
/// flattened to strings; cancelled calls produce nothing.
pub fn engine_event_to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::Extracted { request, result } => Some(Msg::TextExtracted {
            request,
            result: result.map_err(|err| {
                tailor_warn!("extraction {} failed: {}", request, err);
                err.to_string()
            }),
        }),
        EngineEvent::Analyzed { request, result } => Some(Msg::AnalysisFinished {
            request,
            result: result.map_err(|err| {
                tailor_warn!("analysis {} failed: {}", request, err);
                err.to_string()
            }),
        }),
        EngineEvent::Optimized { request, result } => Some(Msg::OptimizationFinished {
            request,
            result: result.map_err(|err| {
                tailor_warn!("optimization {} failed: {}", request, err);
                err.to_string()
            }),
        }),
        EngineEvent::Cancelled { request } => {
            tailor_debug!("request {} cancelled", request);
            None
        }
    }
}
