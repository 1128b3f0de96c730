use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Local;
use log::LevelFilter;
use tailor_core::{update, AppState, Msg, ResumeFile};
use tailor_engine::{EngineHandle, GeminiOracle, ResumeExporter, ResumeReviewer};
use tailor_logging::{tailor_error, tailor_info, tailor_warn};

use super::config::AppConfig;
use super::effects::{EffectRunner, MsgSink};
use super::input::{Command, Feed, InputParser, HELP_TEXT};
use super::{logging, ui};
use crate::Cli;

const IGNORED_HINT: &str = "Nothing to do for that right now. Type `show` for the current screen.";
const JD_PROMPT: &str = "Paste the job description. Finish with a line containing only '.'";

/// Everything the main loop reacts to. Input arrives from the stdin reader
/// thread; core messages from the effect runner and the engine sink.
#[derive(Debug)]
pub enum AppEvent {
    Input(Command),
    /// Text for the user that does not change state.
    Message(String),
    Core(Msg),
    InputClosed,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()?
    };
    logging::initialize(config.log_destination, level, &config.log_file);
    tailor_info!(
        "resume tailor starting at {} model={} output_dir={:?}",
        Local::now().to_rfc3339(),
        config.model,
        config.output_dir
    );

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let engine = start_engine(&config, tx.clone());
    let unavailable = engine.as_ref().err().cloned();
    let runner = EffectRunner::new(
        engine,
        ResumeExporter::new(config.output_dir.clone()),
        config.login_delay(),
        tx.clone(),
    );
    spawn_input_reader(tx);

    let state = if cli.no_login {
        AppState::signed_in()
    } else {
        AppState::new()
    };
    let mut app = App {
        state,
        runner,
        out: io::stdout(),
    };
    if let Some(reason) = unavailable {
        app.dispatch(Msg::OracleUnavailable(reason));
    }
    app.render(true)?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Core(msg) => app.dispatch(msg),
            AppEvent::Input(Command::Quit) | AppEvent::InputClosed => break,
            AppEvent::Input(command) => app.handle_command(command)?,
            AppEvent::Message(text) => app.print(&text)?,
        }
        app.render(false)?;
    }
    tailor_info!("resume tailor exiting");
    Ok(())
}

/// Builds the oracle and engine. `Err` carries the reason shown to the user.
fn start_engine(config: &AppConfig, tx: mpsc::Sender<AppEvent>) -> Result<EngineHandle, String> {
    let api_key = config.api_key().map_err(|err| {
        tailor_warn!("{}", err);
        err.to_string()
    })?;
    let oracle = GeminiOracle::new(config.oracle_settings(api_key)).map_err(|err| {
        tailor_error!("oracle setup failed: {}", err);
        err.to_string()
    })?;
    tailor_info!("oracle endpoint {}", oracle.endpoint());
    EngineHandle::new(ResumeReviewer::new(Arc::new(oracle)), MsgSink::new(tx)).map_err(|err| {
        tailor_error!("engine runtime failed to start: {}", err);
        format!("could not start the engine: {err}")
    })
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let mut parser = InputParser::new();
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let was_collecting = parser.is_collecting();
            let event = match parser.feed(&line) {
                Ok(Feed::Command(command)) => AppEvent::Input(command),
                Ok(Feed::Pending) if !was_collecting => AppEvent::Message(JD_PROMPT.to_string()),
                Ok(Feed::Pending | Feed::Blank) => continue,
                Err(err) => AppEvent::Message(err.to_string()),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

struct App {
    state: AppState,
    runner: EffectRunner,
    out: io::Stdout,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Dispatches a user action and tells the user when it had no effect.
    fn dispatch_input(&mut self, msg: Msg) -> io::Result<()> {
        self.dispatch(msg);
        if !self.state.view().dirty {
            self.print(IGNORED_HINT)?;
        }
        Ok(())
    }

    fn handle_command(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Login => self.dispatch_input(Msg::LoginClicked),
            Command::Upload(path) => self.dispatch_input(read_upload(&path)),
            Command::JobDescription(text) => self.dispatch_input(Msg::JobDescriptionChanged(text)),
            Command::Analyze(mode) => self.dispatch_input(Msg::AnalyzeClicked(mode)),
            Command::Tab(tab) => self.dispatch_input(Msg::TabSelected(tab)),
            Command::Optimize => self.dispatch_input(Msg::AutoOptimizeClicked),
            Command::Edit => self.dispatch_input(Msg::EditorOpened),
            Command::EditLoad(path) => match fs::read_to_string(&path) {
                Ok(text) => {
                    self.dispatch(Msg::EditorOpened);
                    self.dispatch_input(Msg::EditedTextChanged(text))
                }
                Err(err) => {
                    tailor_warn!("could not read {:?}: {}", path, err);
                    self.print(&format!("Could not read {}: {}", path.display(), err))
                }
            },
            Command::Close => self.dispatch_input(Msg::EditorClosed),
            Command::Reanalyze => self.dispatch_input(Msg::ReanalyzeClicked),
            Command::Save(target) => self.dispatch_input(Msg::ExportRequested(target)),
            Command::Dismiss => self.dispatch_input(Msg::ErrorDismissed),
            Command::Reset => self.dispatch_input(Msg::ResetClicked),
            Command::Show => self.render(true),
            Command::Help => self.print(HELP_TEXT),
            Command::Quit => Ok(()),
        }
    }

    fn render(&mut self, force: bool) -> io::Result<()> {
        let dirty = self.state.consume_dirty();
        if dirty || force {
            let text = ui::render::render(&self.state.view());
            write!(self.out, "{text}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

/// Reads the file at `path` into an upload message. Read failures and
/// unsupported files become `UploadRejected`.
fn read_upload(path: &Path) -> Msg {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match fs::read(path) {
        Ok(bytes) => match ResumeFile::from_named_bytes(name, bytes) {
            Ok(file) => Msg::UploadSubmitted(file),
            Err(err) => Msg::UploadRejected(err.to_string()),
        },
        Err(err) => {
            tailor_warn!("could not read upload {:?}: {}", path, err);
            Msg::UploadRejected(format!("Could not read {name}: {err}"))
        }
    }
}
