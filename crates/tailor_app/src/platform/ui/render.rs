use std::fmt::Write as _;

use tailor_core::{AppViewModel, Phase, Step};

use super::{dashboard, editor, login, uploader};

const RULE: &str = "────────────────────────────────────────────────────────────";

pub fn render(view: &AppViewModel) -> String {
    if !view.logged_in {
        return login::render(view.login_pending);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "ResumeTailor AI");
    if view.show_stepper {
        let _ = writeln!(out, "{}", stepper(view.step));
    }
    if let Some(message) = &view.error_banner {
        out.push_str(&banner(message));
    }
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "Note: {notice}");
    }
    let _ = writeln!(out, "{RULE}");

    match view.phase {
        Phase::Idle | Phase::Parsing => {
            out.push_str(&uploader::render_upload(view.phase == Phase::Parsing, view.upload_enabled))
        }
        Phase::Ready => {
            if let Some(context) = &view.context {
                out.push_str(&uploader::render_context(view.file_name.as_deref(), context));
            }
        }
        Phase::Analyzing => {
            if let Some(mode) = view.analyzing_mode {
                out.push_str(&dashboard::render_analyzing(mode));
            }
        }
        Phase::Results => {
            if let Some(results) = &view.results {
                out.push_str(&dashboard::render_results(results));
            }
            if let Some(editor) = &view.editor {
                out.push_str(&editor::render(editor));
            }
        }
        Phase::Error => {
            let _ = writeln!(out, "The AI service is not available. Type `reset` to start over.");
        }
    }
    out
}

/// `[1 Upload] > 2 Context > 3 Results` with the current step bracketed.
pub fn stepper(current: Step) -> String {
    [(Step::Upload, "1 Upload"), (Step::Context, "2 Context"), (Step::Results, "3 Results")]
        .iter()
        .map(|(step, label)| {
            if *step == current {
                format!("[{label}]")
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

pub fn banner(message: &str) -> String {
    format!("Error: {message}  (type `dismiss` to hide)\n")
}

/// `[######----]` for a 0-100 percentage.
pub(super) fn bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub(super) fn format_with_commas(value: usize) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tailor_core::{update, AppState, Msg, ResumeFile};

    #[test]
    fn stepper_brackets_current_step() {
        assert_eq!(stepper(Step::Context), "1 Upload > [2 Context] > 3 Results");
    }

    #[test]
    fn bar_rounds_to_width() {
        assert_eq!(bar(0, 10), "[----------]");
        assert_eq!(bar(45, 10), "[#####-----]");
        assert_eq!(bar(100, 4), "[####]");
    }

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1_234_567), "1,234,567");
    }

    #[test]
    fn logged_out_view_is_the_login_screen() {
        let text = render(&AppState::new().view());
        assert!(text.contains("Continue with Google"));
        assert!(!text.contains("1 Upload"));
    }

    #[test]
    fn upload_banner_is_shown_until_dismissed() {
        let state = AppState::signed_in();
        let file = ResumeFile {
            name: "cv.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![1],
        };
        let (state, _) = update(state, Msg::UploadSubmitted(file));
        let text = render(&state.view());
        assert!(text.contains("Error: "));
        assert!(text.contains("[1 Upload]"));

        let (state, _) = update(state, Msg::ErrorDismissed);
        assert!(!render(&state.view()).contains("Error: "));
    }

    #[test]
    fn error_phase_points_at_reset() {
        let (state, _) = update(AppState::signed_in(), Msg::OracleUnavailable("no key".into()));
        let text = render(&state.view());
        assert!(text.contains("Type `reset` to start over"));
    }
}
