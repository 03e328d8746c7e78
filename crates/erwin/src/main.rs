//! ErwinText, a small terminal text editor.
//!
//! ```bash
//! erwin [FILE] [-c CONFIG] [--log LOG_FILE] [-v...]
//! ```
//!
//! # Keys
//!
//! - Arrows, Home/End, PageUp/PageDown: move the cursor
//! - Ctrl+S: save (asks for a name when the buffer has none)
//! - Ctrl+Q / Ctrl+C: quit; press twice to drop unsaved changes
//! - Ctrl+F: find; Up/Down jump between matches, any other key leaves find mode
//! - Ctrl+A then Backspace: delete everything
//! - Ctrl+V: paste from the system clipboard (`wl-paste` or `xclip`)
//! - Ctrl+Z: undo
//! - Mouse: click to place the cursor, wheel to scroll

mod app;
mod cli;
mod clipboard;
mod config;
mod logging;
mod ui;

use anyhow::{Context, Result};
use app::{App, WELCOME_MESSAGE};
use clap::Parser;
use cli::Cli;
use config::Config;
use crossterm::{
    cursor::Show,
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use erwin_core::Editor;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("erwin: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let (config, config_error) = Config::load(cli.config_file.as_deref());

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.log_file.clone())
        .or_else(config::default_log_file);
    if let Some(log_file) = &log_file
        && let Err(err) = logging::init(log_file, cli.verbosity)
    {
        eprintln!("erwin: logging disabled: {err:#}");
    }

    let mut editor = Editor::new(config.editor_options());
    match &cli.file {
        // Anything but a missing file is fatal before the terminal is taken over.
        Some(path) => editor
            .open(path)
            .with_context(|| format!("cannot open {}", path.display()))?,
        None => editor.set_status(WELCOME_MESSAGE),
    }
    if let Some(err) = config_error {
        log::warn!("{err}; using defaults");
        editor.set_status(format!("{err}; using defaults"));
    }

    let mut app = App::new(editor, config.clipboard);

    install_panic_hook();
    let mut terminal = setup_terminal().context("failed to set up the terminal")?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal().context("failed to restore the terminal")?;
    terminal.show_cursor()?;
    result?;

    if let Some(err) = app.take_fatal() {
        eprintln!("erwin: {err}");
        return Ok(ExitCode::FAILURE);
    }
    log::info!("erwin exiting");
    Ok(ExitCode::SUCCESS)
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen,
        Show
    )
}

fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        log::error!("panic: {info}");
        default_panic(info);
    }));
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if app.should_quit() {
            break;
        }

        // Polling keeps the clock and status timeout ticking without input.
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }
    }
    Ok(())
}
