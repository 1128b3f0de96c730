use tailor_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn signed_out_session_ignores_upload() {
    let state = AppState::new();
    let file = tailor_core::ResumeFile::from_named_bytes("cv.txt", b"Managed a team".to_vec())
        .expect("valid upload");
    let (next, effects) = update(state.clone(), Msg::UploadSubmitted(file));

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
