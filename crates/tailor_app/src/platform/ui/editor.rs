use std::fmt::Write as _;

use tailor_core::EditorView;

use super::render::format_with_commas;

pub fn render(editor: &EditorView) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Live Editor  ({} characters, Markdown supported)",
        format_with_commas(editor.char_count)
    );
    for line in editor.text.lines() {
        let _ = writeln!(out, "  | {line}");
    }
    if !editor.unresolved_placeholders.is_empty() {
        let _ = writeln!(
            out,
            "Warning: placeholders left in the text: {}. Replace them with real numbers before saving.",
            editor.unresolved_placeholders.join(", ")
        );
    }
    let mut actions = vec!["edit load <path>", "save [path]", "close"];
    if editor.reanalyze_enabled {
        actions.insert(1, "reanalyze");
    }
    let _ = writeln!(out, "Actions: {}", actions.join(" | "));
    out
}
