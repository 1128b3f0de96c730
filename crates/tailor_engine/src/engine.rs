use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tailor_core::{RequestId, ResumeFile, Suggestion};
use tailor_logging::{tailor_debug, tailor_info, tailor_warn};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, ResumeReviewer};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Extract {
        request: RequestId,
        file: ResumeFile,
    },
    Analyze {
        request: RequestId,
        resume_text: String,
        job_description: String,
    },
    Optimize {
        request: RequestId,
        resume_text: String,
        job_description: String,
        suggestions: Vec<Suggestion>,
    },
    Cancel {
        request: RequestId,
    },
}

impl EngineCommand {
    fn request(&self) -> RequestId {
        match self {
            EngineCommand::Extract { request, .. }
            | EngineCommand::Analyze { request, .. }
            | EngineCommand::Optimize { request, .. }
            | EngineCommand::Cancel { request } => *request,
        }
    }
}

type TokenMap = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs oracle calls on a background tokio runtime and reports results
/// through an [`EventSink`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(reviewer: ResumeReviewer, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let tokens: TokenMap = Arc::new(Mutex::new(HashMap::new()));

        thread::Builder::new()
            .name("tailor-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let request = command.request();
                    if let EngineCommand::Cancel { .. } = command {
                        cancel(&tokens, request);
                        continue;
                    }
                    let token = CancellationToken::new();
                    if let Ok(mut map) = tokens.lock() {
                        map.insert(request, token.clone());
                    }
                    let reviewer = reviewer.clone();
                    let sink = sink.clone();
                    let tokens = tokens.clone();
                    runtime.spawn(async move {
                        let event = tokio::select! {
                            _ = token.cancelled() => EngineEvent::Cancelled { request },
                            event = handle_command(&reviewer, command) => event,
                        };
                        if let Ok(mut map) = tokens.lock() {
                            map.remove(&request);
                        }
                        sink.emit(event);
                    });
                }
                tailor_debug!("engine command channel closed");
                runtime.shutdown_background();
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn extract(&self, request: RequestId, file: ResumeFile) {
        self.send(EngineCommand::Extract { request, file });
    }

    pub fn analyze(
        &self,
        request: RequestId,
        resume_text: impl Into<String>,
        job_description: impl Into<String>,
    ) {
        self.send(EngineCommand::Analyze {
            request,
            resume_text: resume_text.into(),
            job_description: job_description.into(),
        });
    }

    pub fn optimize(
        &self,
        request: RequestId,
        resume_text: impl Into<String>,
        job_description: impl Into<String>,
        suggestions: Vec<Suggestion>,
    ) {
        self.send(EngineCommand::Optimize {
            request,
            resume_text: resume_text.into(),
            job_description: job_description.into(),
            suggestions,
        });
    }

    /// Cancels `request` if it is still running; the sink then receives
    /// [`EngineEvent::Cancelled`] instead of a result.
    pub fn cancel(&self, request: RequestId) {
        self.send(EngineCommand::Cancel { request });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            tailor_warn!("engine worker is gone; command dropped");
        }
    }
}

fn cancel(tokens: &TokenMap, request: RequestId) {
    let token = tokens.lock().ok().and_then(|mut map| map.remove(&request));
    match token {
        Some(token) => {
            tailor_info!("cancelling request {}", request);
            token.cancel();
        }
        None => tailor_debug!("cancel for request {} which is not running", request),
    }
}

async fn handle_command(reviewer: &ResumeReviewer, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Extract { request, file } => EngineEvent::Extracted {
            request,
            result: reviewer.extract_text(&file.bytes, &file.mime_type).await,
        },
        EngineCommand::Analyze {
            request,
            resume_text,
            job_description,
        } => EngineEvent::Analyzed {
            request,
            result: reviewer.analyze(&resume_text, &job_description).await,
        },
        EngineCommand::Optimize {
            request,
            resume_text,
            job_description,
            suggestions,
        } => EngineEvent::Optimized {
            request,
            result: reviewer
                .auto_optimize(&resume_text, &job_description, &suggestions)
                .await,
        },
        EngineCommand::Cancel { request } => EngineEvent::Cancelled { request },
    }
}
