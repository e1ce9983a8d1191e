//! Interactive specimen viewer shell
//!
//! Drives a headless [`Viewer`] from the command line. Every command is
//! followed by one frame, so label fading and layout run as they would in the
//! windowed viewer.
//!
//! ## Usage
//!
//! ```bash
//! specimen-shell                         # built-in defaults
//! specimen-shell --config viewer.toml    # settings from a TOML file
//! specimen-shell --load ammonite         # load a specimen before the prompt
//! ```
//!
//! Type `help` at the `specimen> ` prompt for the command list, `quit` or
//! Ctrl+D to leave.

use std::path::PathBuf;
use std::process::ExitCode;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use specimen_catalog::builtin_catalog;
use specimen_cmd::{CmdError, CommandExecutor, CommandOutput, MessageKind};
use specimen_scene::Viewer;
use specimen_settings::ViewerSettings;

/// Viewport used for the per-command frame
const VIEWPORT: [f32; 2] = [1280.0, 800.0];

const USAGE: &str = "usage: specimen-shell [--config <file.toml>] [--load <specimen>]";

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    load: Option<String>,
}

fn parse_options() -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-c" | "--config" => {
                let path = args.next().ok_or("--config needs a file")?;
                options.config = Some(PathBuf::from(path));
            }
            "-l" | "--load" => {
                options.load = Some(args.next().ok_or("--load needs a specimen key")?);
            }
            other => return Err(format!("unexpected argument '{}'", other)),
        }
    }
    Ok(Some(options))
}

fn print_output(output: &CommandOutput) {
    for message in &output.messages {
        match message.kind {
            MessageKind::Info => println!("{}", message.text),
            MessageKind::Warning | MessageKind::Error => eprintln!("{}", message.text),
        }
    }
}

/// Run a line and a frame; returns false when the shell should exit
fn execute(executor: &mut CommandExecutor, viewer: &mut Viewer, line: &str) -> bool {
    match executor.do_(viewer, line) {
        Ok(output) => print_output(&output),
        Err(CmdError::Aborted) => return false,
        Err(e) => eprintln!("Error: {}", e),
    }

    let report = viewer.frame(VIEWPORT);
    for skipped in &report.skipped {
        log::debug!("Label skipped this frame: {}", skipped);
    }
    log::debug!(
        "Frame: {} labels faded, {} positioned, dirty {:?}",
        report.updated,
        report.positioned,
        report.dirty
    );
    true
}

fn run(options: Options) -> Result<(), String> {
    let settings = match &options.config {
        Some(path) => ViewerSettings::load(path)
            .map_err(|e| format!("cannot load settings from {}: {}", path.display(), e))?,
        None => ViewerSettings::default(),
    };

    let mut viewer = Viewer::new(builtin_catalog(), settings);
    let mut executor = CommandExecutor::new();

    if let Some(key) = &options.load {
        if !execute(&mut executor, &mut viewer, &format!("load {}", key)) {
            return Ok(());
        }
    }

    let mut editor = DefaultEditor::new().map_err(|e| format!("cannot start line editor: {}", e))?;
    loop {
        match editor.readline("specimen> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = editor.add_history_entry(line.as_str()) {
                        log::debug!("History entry not recorded: {}", e);
                    }
                }
                if !execute(&mut executor, &mut viewer, &line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(format!("read error: {}", e)),
        }
    }

    let removed = viewer.unload();
    log::debug!("Shutdown removed {} labels", removed);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match parse_options() {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
