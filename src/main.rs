//! filter-tui - A terminal UI for curating sync filter rules
//!
//! Edits an ordered list of include/exclude path rules (`+ /path`,
//! `- /path`, or arbitrary lines) stored in a newline-delimited filter
//! file, with drag reordering, clipboard round-trips, and an
//! advanced-mode toggle persisted in the user config.

mod action;
mod app;
mod component;
mod components;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::{App, ViewOptions};
use crate::component::Component;
use crate::services::{FileBackend, SettingsStore};
use crate::tui::Tui;
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Curate the ordered include/exclude filter rules of a sync target.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Filter file to edit (created on first save)
    file: PathBuf,

    /// Header title shown above the rule list
    #[arg(long, default_value = "Sync Filters")]
    title: String,

    /// Header description line
    #[arg(long)]
    description: Option<String>,

    /// Stretch the view across the whole terminal instead of a centered
    /// column
    #[arg(long)]
    full_page: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Create app state
    let options = ViewOptions {
        title: cli.title,
        description: cli.description,
        full_page: cli.full_page,
    };
    let backend = Arc::new(FileBackend::new(cli.file));
    let settings = SettingsStore::load_or_default();
    let mut app = App::new(options, backend, settings);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                eprintln!("Draw error: {}", e);
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Process the action; an update may chain into another
            if let Some(action) = action {
                let mut current_action = Some(action);
                while let Some(a) = current_action {
                    current_action = app.update(a)?;
                }
            }
        } else {
            // No event - tick so background work gets polled
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
