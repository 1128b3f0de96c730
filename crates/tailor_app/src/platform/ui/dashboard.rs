use std::fmt::Write as _;

use tailor_core::{AnalysisMode, MetricView, ResultsTab, ResultsView, Suggestion};

use super::render::bar;

const METRIC_BAR_WIDTH: usize = 20;

pub fn render_analyzing(mode: AnalysisMode) -> String {
    let (title, detail) = match mode {
        AnalysisMode::TargetedMatch => (
            "Analyzing Compatibility...",
            "Comparing skills, experience and keywords against the provided job description.",
        ),
        AnalysisMode::GeneralAudit => (
            "Auditing Resume Structure...",
            "Checking against industry best practices for impact, clarity and formatting.",
        ),
    };
    format!("{title}\n{detail}\n")
}

pub fn render_results(results: &ResultsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis Results");
    let _ = writeln!(
        out,
        "{}: {}/100 [{}]  {}",
        results.score_label,
        results.overall_score,
        results.band.label(),
        results.headline
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Executive Summary");
    let _ = writeln!(out, "  {}", results.summary);
    let _ = writeln!(out);
    for metric in &results.metrics {
        out.push_str(&metric_line(metric));
    }
    let _ = writeln!(out);

    let suggestions_tab = format!("Suggestions ({})", results.suggestions.len());
    let keywords_tab = format!("Missing Keywords ({})", results.missing_keywords.len());
    let (left, right) = match results.active_tab {
        ResultsTab::Suggestions => (format!("[{suggestions_tab}]"), keywords_tab),
        ResultsTab::Keywords => (suggestions_tab, format!("[{keywords_tab}]")),
    };
    let _ = writeln!(out, "{left}  {right}");
    match results.active_tab {
        ResultsTab::Suggestions => out.push_str(&suggestion_list(&results.suggestions)),
        ResultsTab::Keywords => out.push_str(&keyword_list(results.mode, &results.missing_keywords)),
    }
    let _ = writeln!(out);

    if results.optimizing {
        let _ = writeln!(out, "Auto-Optimize: Processing...");
    } else if results.optimize_enabled {
        let _ = writeln!(out, "optimize  Auto-Optimize (apply AI enhancements)");
    }
    let _ = writeln!(out, "edit      Open Live Editor");
    out
}

fn metric_line(metric: &MetricView) -> String {
    let mut line = format!(
        "  {:<11}{} {:>4.1}/10",
        metric.name,
        bar(metric.bar_percent, METRIC_BAR_WIDTH),
        metric.score
    );
    if !metric.feedback.is_empty() {
        let _ = write!(line, "  {}", metric.feedback);
    }
    line.push('\n');
    line
}

fn suggestion_list(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "  No suggestions found! Your resume looks great.\n".to_string();
    }
    let mut out = String::new();
    for (idx, suggestion) in suggestions.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} impact • {}",
            idx + 1,
            suggestion.impact.as_str().to_uppercase(),
            suggestion.kind
        );
        if let Some(original) = &suggestion.original_text {
            let _ = writeln!(out, "     - {original}");
        }
        let _ = writeln!(out, "     + {}", suggestion.suggested_text);
        let _ = writeln!(out, "     why: {}", suggestion.reason);
    }
    out
}

fn keyword_list(mode: AnalysisMode, keywords: &[String]) -> String {
    let explanation = if mode.is_general() {
        "The following elements or specific skills appear to be missing or underrepresented. \
Consider adding these to enhance your professional presentation."
    } else {
        "The following keywords appear frequently in the job description but are missing from \
your resume. Try to incorporate these naturally."
    };
    let mut out = format!("  {explanation}\n");
    if keywords.is_empty() {
        out.push_str("  No missing keywords detected.\n");
    } else {
        let _ = writeln!(out, "  {}", keywords.join(", "));
    }
    out
}
