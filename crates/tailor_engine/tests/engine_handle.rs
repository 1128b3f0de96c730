use std::sync::{mpsc, Arc};
use std::time::Duration;

use tailor_core::ResumeFile;
use tailor_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, ExtractionError, Oracle, OracleError,
    OracleRequest, ResumeReviewer,
};

/// Answers every request with `reply` after `delay`.
struct SlowOracle {
    delay: Duration,
    reply: String,
}

#[async_trait::async_trait]
impl Oracle for SlowOracle {
    async fn generate(&self, _request: OracleRequest) -> Result<String, OracleError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

fn engine(delay: Duration, reply: &str) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let oracle = Arc::new(SlowOracle {
        delay,
        reply: reply.to_string(),
    });
    let (tx, rx) = mpsc::channel();
    let handle = EngineHandle::new(
        ResumeReviewer::new(oracle),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("engine starts");
    (handle, rx)
}

fn pdf() -> ResumeFile {
    ResumeFile::from_named_bytes("cv.pdf", b"%PDF".to_vec()).expect("valid upload")
}

#[test]
fn extraction_result_is_delivered_with_request_id() {
    let (engine, rx) = engine(Duration::from_millis(0), "# Resume");
    engine.extract(7, pdf());

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event,
        EngineEvent::Extracted {
            request: 7,
            result: Ok("# Resume".into())
        }
    );
}

#[test]
fn blank_extraction_is_reported_as_error() {
    let (engine, rx) = engine(Duration::from_millis(0), " ");
    engine.extract(1, pdf());

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event,
        EngineEvent::Extracted {
            request: 1,
            result: Err(ExtractionError::Empty)
        }
    );
}

#[test]
fn cancelled_call_reports_cancelled_instead_of_result() {
    let (engine, rx) = engine(Duration::from_secs(10), "late");
    engine.analyze(3, "resume", "");
    std::thread::sleep(Duration::from_millis(50));
    engine.cancel(3);

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(event, EngineEvent::Cancelled { request: 3 });
}

#[test]
fn cancelling_unknown_request_is_harmless() {
    let (engine, rx) = engine(Duration::from_millis(0), "Rewritten");
    engine.cancel(99);
    engine.optimize(4, "Original", "", Vec::new());

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(event.request(), 4);
    assert!(matches!(event, EngineEvent::Optimized { result: Ok(_), .. }));
}
