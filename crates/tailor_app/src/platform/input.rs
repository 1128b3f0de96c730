//! Line-oriented command parsing for the terminal front-end.

use std::path::PathBuf;

use tailor_core::{AnalysisMode, ResultsTab};
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  login                      sign in
  upload <path>              upload a .pdf, .docx or .txt resume
  jd                         paste a job description; finish with a line containing only '.'
  jd <text>                  set a one-line job description
  analyze jd|general         score against the job description, or run a general audit
  tab suggestions|keywords   switch the results tab
  optimize                   let the oracle apply every suggestion
  edit                       open the editor
  edit load <path>           replace the editor text with a file
  close                      close the editor
  reanalyze                  score the edited text again
  show                       print the current screen
  save [path]                save the edited resume as Markdown
  dismiss                    hide the error banner
  reset                      start over
  help                       show this help
  quit                       exit";

/// Terminator line for multi-line job description input.
const JD_END: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login,
    Upload(PathBuf),
    JobDescription(String),
    Analyze(AnalysisMode),
    Tab(ResultsTab),
    Optimize,
    Edit,
    EditLoad(PathBuf),
    Close,
    Reanalyze,
    Show,
    Save(Option<PathBuf>),
    Dismiss,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command {0:?}; type `help` for the list")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{command}` does not understand {value:?}")]
    InvalidArgument { command: &'static str, value: String },
}

/// Outcome of feeding one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Command(Command),
    /// Line consumed; more input is needed (multi-line job description).
    Pending,
    Blank,
}

/// Turns input lines into commands. Holds the buffer of a job description
/// being pasted across several lines.
#[derive(Debug, Default)]
pub struct InputParser {
    jd_lines: Option<Vec<String>>,
}

impl InputParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collecting(&self) -> bool {
        self.jd_lines.is_some()
    }

    pub fn feed(&mut self, line: &str) -> Result<Feed, InputError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(lines) = self.jd_lines.as_mut() {
            if line.trim() == JD_END {
                let text = lines.join("\n");
                self.jd_lines = None;
                return Ok(Feed::Command(Command::JobDescription(text)));
            }
            lines.push(line.to_string());
            return Ok(Feed::Pending);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Feed::Blank);
        }
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "login" => Command::Login,
            "upload" => Command::Upload(required_path("upload", rest)?),
            "jd" if rest.is_empty() => {
                self.jd_lines = Some(Vec::new());
                return Ok(Feed::Pending);
            }
            "jd" => Command::JobDescription(rest.to_string()),
            "analyze" => Command::Analyze(match rest.to_ascii_lowercase().as_str() {
                "jd" | "targeted" => AnalysisMode::TargetedMatch,
                "general" | "audit" => AnalysisMode::GeneralAudit,
                "" => {
                    return Err(InputError::MissingArgument {
                        command: "analyze",
                        expected: "`jd` or `general`",
                    })
                }
                other => {
                    return Err(InputError::InvalidArgument {
                        command: "analyze",
                        value: other.to_string(),
                    })
                }
            }),
            "tab" => Command::Tab(match rest.to_ascii_lowercase().as_str() {
                "suggestions" | "s" => ResultsTab::Suggestions,
                "keywords" | "k" => ResultsTab::Keywords,
                "" => {
                    return Err(InputError::MissingArgument {
                        command: "tab",
                        expected: "`suggestions` or `keywords`",
                    })
                }
                other => {
                    return Err(InputError::InvalidArgument {
                        command: "tab",
                        value: other.to_string(),
                    })
                }
            }),
            "optimize" => Command::Optimize,
            "edit" => match rest.split_once(char::is_whitespace) {
                Some((sub, path)) if sub.eq_ignore_ascii_case("load") => {
                    Command::EditLoad(required_path("edit load", path.trim())?)
                }
                None if rest.eq_ignore_ascii_case("load") => {
                    return Err(InputError::MissingArgument {
                        command: "edit load",
                        expected: "a file path",
                    })
                }
                None if rest.is_empty() => Command::Edit,
                _ => {
                    return Err(InputError::InvalidArgument {
                        command: "edit",
                        value: rest.to_string(),
                    })
                }
            },
            "close" => Command::Close,
            "reanalyze" => Command::Reanalyze,
            "show" => Command::Show,
            "save" => Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "dismiss" => Command::Dismiss,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(InputError::Unknown(word.to_string())),
        };
        Ok(Feed::Command(command))
    }
}

fn required_path(command: &'static str, rest: &str) -> Result<PathBuf, InputError> {
    let rest = rest.trim_matches(['"', '\'']);
    if rest.is_empty() {
        return Err(InputError::MissingArgument {
            command,
            expected: "a file path",
        });
    }
    Ok(PathBuf::from(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> Result<Feed, InputError> {
        InputParser::new().feed(line)
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("login"), Ok(Feed::Command(Command::Login)));
        assert_eq!(parse("  QUIT "), Ok(Feed::Command(Command::Quit)));
        assert_eq!(parse("save"), Ok(Feed::Command(Command::Save(None))));
        assert_eq!(
            parse("save out/cv.md"),
            Ok(Feed::Command(Command::Save(Some(PathBuf::from("out/cv.md")))))
        );
        assert_eq!(parse(""), Ok(Feed::Blank));
    }

    #[test]
    fn upload_path_may_be_quoted_and_contain_spaces() {
        assert_eq!(
            parse("upload \"My Resume.pdf\""),
            Ok(Feed::Command(Command::Upload(PathBuf::from("My Resume.pdf"))))
        );
        assert_eq!(
            parse("upload"),
            Err(InputError::MissingArgument {
                command: "upload",
                expected: "a file path"
            })
        );
    }

    #[test]
    fn analyze_modes() {
        assert_eq!(
            parse("analyze general"),
            Ok(Feed::Command(Command::Analyze(AnalysisMode::GeneralAudit)))
        );
        assert_eq!(
            parse("analyze JD"),
            Ok(Feed::Command(Command::Analyze(AnalysisMode::TargetedMatch)))
        );
        assert!(matches!(
            parse("analyze later"),
            Err(InputError::InvalidArgument { command: "analyze", .. })
        ));
    }

    #[test]
    fn multi_line_job_description_ends_at_dot() {
        let mut parser = InputParser::new();
        assert_eq!(parser.feed("jd"), Ok(Feed::Pending));
        assert!(parser.is_collecting());
        assert_eq!(parser.feed("Senior Rust engineer"), Ok(Feed::Pending));
        assert_eq!(parser.feed(""), Ok(Feed::Pending));
        assert_eq!(parser.feed("- tokio, reqwest"), Ok(Feed::Pending));
        assert_eq!(
            parser.feed(".\n"),
            Ok(Feed::Command(Command::JobDescription(
                "Senior Rust engineer\n\n- tokio, reqwest".into()
            )))
        );
        assert!(!parser.is_collecting());
        assert_eq!(parser.feed("show"), Ok(Feed::Command(Command::Show)));
    }

    #[test]
    fn commands_are_not_parsed_inside_job_description() {
        let mut parser = InputParser::new();
        parser.feed("jd").unwrap();
        assert_eq!(parser.feed("quit"), Ok(Feed::Pending));
        assert_eq!(
            parser.feed("."),
            Ok(Feed::Command(Command::JobDescription("quit".into())))
        );
    }

    #[test]
    fn edit_subcommands() {
        assert_eq!(parse("edit"), Ok(Feed::Command(Command::Edit)));
        assert_eq!(
            parse("edit load draft.md"),
            Ok(Feed::Command(Command::EditLoad(PathBuf::from("draft.md"))))
        );
        assert!(matches!(
            parse("edit load"),
            Err(InputError::MissingArgument { command: "edit load", .. })
        ));
        assert!(matches!(parse("edit something"), Err(InputError::InvalidArgument { .. })));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(parse("frobnicate now"), Err(InputError::Unknown("frobnicate".into())));
    }
}
