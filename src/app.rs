//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that routes events to the filter list and the modal
//! dialogs, and owns the pieces of state they act on: the filter list,
//! the advanced-mode mirror, background I/O, and transient messages.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_view_layout, FilterListComponent, HelpDialog, PathPickerDialog, PickerMode,
    QuitDialog,
};
use crate::model::{FilterList, LineTarget, Modal, ModalStack};
use crate::services::{clipboard, FilterBackend, IoJobs, SettingsStore, Subscription, ADVANCED_MODE};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a transient status message stays visible.
const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Page-chrome configuration for the view.
pub struct ViewOptions {
    pub title: String,
    pub description: Option<String>,
    pub full_page: bool,
}

struct Toast {
    message: String,
    raised_at: Instant,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    options: ViewOptions,

    /// Load/save capability for the filter lines
    backend: Arc<dyn FilterBackend>,

    /// Persisted settings, source of truth for advanced_mode
    settings: SettingsStore,

    /// The ordered filter rule collection
    pub filters: FilterList,

    /// Local mirror of the advanced_mode key, updated only through the
    /// subscription below
    pub show_advanced: bool,

    /// Listener guard for the advanced_mode key
    advanced_sub: Option<Subscription>,

    /// Background filter I/O
    jobs: IoJobs,

    /// Whether the initial load has completed
    pub loaded: bool,

    /// Whether the list has edits that were not saved yet
    pub dirty: bool,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message shown until the next user action
    error: Option<String>,

    /// Transient status message
    toast: Option<Toast>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub list: FilterListComponent,
    pub modals: ModalStack,
    quit_dialog: QuitDialog,
    picker: PathPickerDialog,
    help_dialog: HelpDialog,
}

impl App {
    /// Create a new App instance.
    ///
    /// The advanced-mode mirror is seeded with a synchronous read; from
    /// then on it only changes through the subscription set up in
    /// `init`.
    pub fn new(
        options: ViewOptions,
        backend: Arc<dyn FilterBackend>,
        settings: SettingsStore,
    ) -> App {
        let show_advanced = settings.get(ADVANCED_MODE);
        App {
            options,
            backend,
            settings,
            filters: FilterList::new(),
            show_advanced,
            advanced_sub: None,
            jobs: IoJobs::new(),
            loaded: false,
            dirty: false,
            should_quit: false,
            error: None,
            toast: None,
            list: FilterListComponent::new(),
            modals: ModalStack::new(),
            quit_dialog: QuitDialog,
            picker: PathPickerDialog::new(),
            help_dialog: HelpDialog::default(),
        }
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    fn picker_start_dir() -> PathBuf {
        env::var("HOME")
            .map(PathBuf::from)
            .or_else(|_| env::current_dir())
            .unwrap_or_else(|_| PathBuf::from("/"))
    }

    /// Drain completed background work and expire transient messages.
    fn poll_background(&mut self) {
        if let Some(result) = self.jobs.poll_load() {
            match result {
                Ok(lines) => {
                    self.filters = FilterList::from_lines(lines);
                    self.list.select_first(self.filters.len());
                    self.loaded = true;
                }
                Err(e) => {
                    self.loaded = true;
                    self.error = Some(format!("Failed to load filters: {:#}", e));
                }
            }
        }

        if let Some(result) = self.jobs.poll_save() {
            match result {
                Ok(()) => {
                    self.dirty = false;
                    self.toast("Filters saved");
                }
                Err(e) => self.error = Some(format!("Failed to save filters: {:#}", e)),
            }
        }

        if let Some(value) = self.advanced_sub.as_ref().and_then(|sub| sub.try_recv()) {
            self.show_advanced = value;
            self.help_dialog.show_advanced = value;
            self.toast(if value {
                "Advanced mode enabled"
            } else {
                "Advanced mode disabled"
            });
        }

        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.raised_at.elapsed() > TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::PathPicker => self.picker.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::LineInput { value, target, .. } => {
                let action = match key.code {
                    KeyCode::Esc => Some(Action::CloseModal),
                    KeyCode::Enter => match *target {
                        LineTarget::Append => Some(Action::AppendLine(value.clone())),
                        LineTarget::Edit { position } => Some(Action::UpdateLine {
                            position,
                            label: value.clone(),
                        }),
                    },
                    KeyCode::Backspace => {
                        if let Some(Modal::LineInput { value, .. }) = self.modals.top_mut() {
                            value.pop();
                        }
                        None
                    }
                    KeyCode::Char(c) => {
                        if let Some(Modal::LineInput { value, .. }) = self.modals.top_mut() {
                            value.push(c);
                        }
                        None
                    }
                    _ => None,
                };
                Ok(action)
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    /// Mount: subscribe to the advanced_mode key and kick off the one
    /// asynchronous initial load. Both are torn down with the App; the
    /// subscription guard unregisters itself on drop.
    fn init(&mut self) -> Result<()> {
        self.advanced_sub = Some(self.settings.on(ADVANCED_MODE));
        self.jobs.spawn_load(self.backend.clone());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.list.handle_key(key, self.show_advanced)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.modals.is_empty() {
            return Ok(self.list.handle_mouse(mouse, &self.filters));
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        // Errors stay visible until the user does something else.
        if action != Action::Tick {
            self.error = None;
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.poll_background(),
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
                self.modals.pop();
            }
            Action::Quit => {
                if self.dirty {
                    self.modals.push(Modal::QuitConfirm);
                } else {
                    self.should_quit = true;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.list.next(self.filters.len()),
            Action::PrevItem => self.list.previous(self.filters.len()),
            Action::FirstItem => self.list.select_first(self.filters.len()),
            Action::LastItem => self.list.select_last(self.filters.len()),

            // ─────────────────────────────────────────────────────────────────
            // Reordering
            // ─────────────────────────────────────────────────────────────────
            Action::MoveEntryUp => {
                if let Some(entries) = self.list.move_selected(&self.filters, -1) {
                    self.filters.replace_all(entries);
                    self.dirty = true;
                }
            }
            Action::MoveEntryDown => {
                if let Some(entries) = self.list.move_selected(&self.filters, 1) {
                    self.filters.replace_all(entries);
                    self.dirty = true;
                }
            }
            Action::CommitReorder(entries) => {
                self.filters.replace_all(entries);
                self.dirty = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // List Edits
            // ─────────────────────────────────────────────────────────────────
            Action::AppendLine(line) => {
                self.filters.append(line);
                self.list.select_last(self.filters.len());
                self.dirty = true;
                if matches!(
                    self.modals.top(),
                    Some(Modal::PathPicker) | Some(Modal::LineInput { .. })
                ) {
                    self.modals.pop();
                }
            }
            Action::UpdateLine { position, label } => {
                self.filters.set_label(position, label);
                self.dirty = true;
                if matches!(self.modals.top(), Some(Modal::LineInput { .. })) {
                    self.modals.pop();
                }
            }
            Action::RemoveSelected => {
                if let Some(position) = self.list.selected() {
                    self.filters.remove_at(position);
                    self.list.clamp_selection(self.filters.len());
                    self.dirty = true;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenIncludePicker => {
                self.picker.open(PickerMode::Include, Self::picker_start_dir());
                self.modals.push(Modal::PathPicker);
            }
            Action::OpenExcludePicker => {
                self.picker.open(PickerMode::Exclude, Self::picker_start_dir());
                self.modals.push(Modal::PathPicker);
            }
            Action::OpenLineInput => {
                self.modals.push(Modal::LineInput {
                    title: "Add Arbitrary Line".to_string(),
                    value: String::new(),
                    target: LineTarget::Append,
                });
            }
            Action::OpenEditLine => {
                if let Some(position) = self.list.selected() {
                    if let Some(label) = self.filters.label_at(position) {
                        self.modals.push(Modal::LineInput {
                            title: "Edit Line".to_string(),
                            value: label.to_string(),
                            target: LineTarget::Edit { position },
                        });
                    }
                }
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.help_dialog.show_advanced = self.show_advanced;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {}

            // ─────────────────────────────────────────────────────────────────
            // Clipboard
            // ─────────────────────────────────────────────────────────────────
            Action::CopyFilters => match clipboard::copy(&self.filters.to_text()) {
                Ok(()) => self.toast("Filters copied to clipboard"),
                Err(e) => self.error = Some(format!("Copy failed: {:#}", e)),
            },
            Action::PasteFilters => match clipboard::paste() {
                Ok(text) => {
                    self.filters = FilterList::from_text(&text);
                    self.list.select_first(self.filters.len());
                    self.dirty = true;
                    self.toast("Filters pasted from clipboard");
                }
                Err(e) => self.error = Some(format!("Paste failed: {:#}", e)),
            },

            // ─────────────────────────────────────────────────────────────────
            // Persistence & Config
            // ─────────────────────────────────────────────────────────────────
            Action::SaveFilters => {
                self.jobs
                    .spawn_save(self.backend.clone(), self.filters.to_lines());
            }
            Action::ToggleAdvancedMode => {
                // The mirror is not touched here; it follows through the
                // subscription like any external change would.
                let value = !self.settings.get(ADVANCED_MODE);
                self.settings.set(ADVANCED_MODE, value);
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_view_layout(
            area,
            self.options.full_page,
            self.options.description.is_some(),
        );

        self.draw_header(frame, layout.header);
        self.list.draw(frame, layout.list, &self.filters)?;
        self.draw_status(frame, layout.status);
        self.draw_footer(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Helpers
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                self.options.title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                if self.dirty { "  [modified]" } else { "" },
                Style::default().fg(Color::Yellow),
            ),
        ])];
        if let Some(ref description) = self.options.description {
            lines.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let header = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(ref error) = self.error {
            Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else if let Some(ref toast) = self.toast {
            Line::from(Span::styled(
                format!(" {}", toast.message),
                Style::default().fg(Color::Green),
            ))
        } else if !self.loaded {
            Line::from(Span::styled(
                " Loading filters…",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(
                format!(
                    " {} rules · {}",
                    self.filters.len(),
                    self.backend.describe()
                ),
                Style::default().fg(Color::DarkGray),
            ))
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" i ", Style::default().fg(Color::Yellow)),
            Span::raw("Include  "),
            Span::styled(" x ", Style::default().fg(Color::Yellow)),
            Span::raw("Exclude  "),
            Span::styled(" e ", Style::default().fg(Color::Yellow)),
            Span::raw("Edit  "),
            Span::styled(" d ", Style::default().fg(Color::Yellow)),
            Span::raw("Delete  "),
            Span::styled(" ⇧↑↓ ", Style::default().fg(Color::Cyan)),
            Span::raw("Reorder  "),
        ];
        if self.show_advanced {
            spans.extend([
                Span::styled(" a ", Style::default().fg(Color::Magenta)),
                Span::raw("Line  "),
                Span::styled(" y ", Style::default().fg(Color::Magenta)),
                Span::raw("Copy  "),
                Span::styled(" p ", Style::default().fg(Color::Magenta)),
                Span::raw("Paste  "),
            ]);
        }
        spans.extend([
            Span::styled(" s ", Style::default().fg(Color::Green)),
            Span::raw("Save  "),
            Span::styled(" ? ", Style::default().fg(Color::Yellow)),
            Span::raw("Help  "),
            Span::styled(" q ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit"),
        ]);

        let footer = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::PathPicker => self.picker.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::LineInput { title, value, .. } => self.draw_line_input(frame, area, title, value),
        }
        Ok(())
    }

    fn draw_line_input(&self, frame: &mut Frame, area: Rect, title: &str, value: &str) {
        let popup_area = crate::components::centered_popup(area, 60, 9);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Filter line:",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("> {}_", value),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Confirm  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(format!(" {} ", title))
                    .title_style(
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterEntry;
    use crate::services::Config;
    use anyhow::anyhow;
    use std::sync::Mutex;
    use std::thread;

    struct FakeBackend {
        lines: Vec<String>,
        saved: Mutex<Option<Vec<String>>>,
        fail_load: bool,
    }

    impl FakeBackend {
        fn with_lines(lines: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                saved: Mutex::new(None),
                fail_load: false,
            })
        }
    }

    impl FilterBackend for FakeBackend {
        fn load(&self) -> Result<Vec<String>> {
            if self.fail_load {
                return Err(anyhow!("no such backend"));
            }
            Ok(self.lines.clone())
        }

        fn save(&self, lines: &[String]) -> Result<()> {
            *self.saved.lock().unwrap() = Some(lines.to_vec());
            Ok(())
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn options() -> ViewOptions {
        ViewOptions {
            title: "Sync Filters".to_string(),
            description: None,
            full_page: true,
        }
    }

    fn app_with(backend: Arc<FakeBackend>, settings: SettingsStore) -> App {
        let mut app = App::new(options(), backend, settings);
        app.init().unwrap();
        app
    }

    /// Tick until the initial load lands.
    fn wait_loaded(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !app.loaded {
            app.update(Action::Tick).unwrap();
            assert!(Instant::now() < deadline, "initial load never finished");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_initial_load_populates_store() {
        let backend = FakeBackend::with_lines(&["+ /a", "- /b"]);
        let mut app = app_with(backend, SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);

        assert_eq!(app.filters.to_lines(), vec!["+ /a", "- /b"]);
        assert!(!app.dirty);
        assert_eq!(app.list.selected(), Some(0));
    }

    #[test]
    fn test_failed_load_surfaces_error() {
        let backend = Arc::new(FakeBackend {
            lines: vec![],
            saved: Mutex::new(None),
            fail_load: true,
        });
        let mut app = App::new(options(), backend, SettingsStore::in_memory(Config::default()));
        app.init().unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while app.error.is_none() {
            app.update(Action::Tick).unwrap();
            assert!(Instant::now() < deadline, "load failure never surfaced");
            thread::sleep(Duration::from_millis(1));
        }
        assert!(app.filters.is_empty());
    }

    #[test]
    fn test_empty_load_then_append() {
        let backend = FakeBackend::with_lines(&[]);
        let mut app = app_with(backend, SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);
        assert!(app.filters.is_empty());

        app.update(Action::AppendLine("+ /x".to_string())).unwrap();
        assert_eq!(app.filters.to_lines(), vec!["+ /x"]);
        assert!(app.dirty);
    }

    #[test]
    fn test_remove_selected_renumbers() {
        let backend = FakeBackend::with_lines(&["a", "b", "c"]);
        let mut app = app_with(backend, SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);

        app.update(Action::NextItem).unwrap();
        app.update(Action::RemoveSelected).unwrap();

        assert_eq!(app.filters.to_lines(), vec!["a", "c"]);
        assert_eq!(app.list.selected(), Some(1));
    }

    #[test]
    fn test_commit_reorder_replaces_verbatim() {
        let backend = FakeBackend::with_lines(&["a", "b"]);
        let mut app = app_with(backend, SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);

        app.update(Action::CommitReorder(vec![
            FilterEntry {
                label: "b".to_string(),
                position: 0,
            },
            FilterEntry {
                label: "a".to_string(),
                position: 1,
            },
        ]))
        .unwrap();

        assert_eq!(app.filters.to_lines(), vec!["b", "a"]);
        assert!(app.dirty);
    }

    #[test]
    fn test_save_exports_in_position_order() {
        let backend = FakeBackend::with_lines(&["a", "b"]);
        let mut app = app_with(backend.clone(), SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);

        app.update(Action::MoveEntryDown).unwrap();
        app.update(Action::SaveFilters).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while app.dirty {
            app.update(Action::Tick).unwrap();
            assert!(Instant::now() < deadline, "save never completed");
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(
            backend.saved.lock().unwrap().as_deref(),
            Some(&["b".to_string(), "a".to_string()][..])
        );
    }

    #[test]
    fn test_advanced_mirror_follows_subscription() {
        let settings = SettingsStore::in_memory(Config::default());
        let backend = FakeBackend::with_lines(&[]);
        let mut app = app_with(backend, settings.clone());
        assert!(!app.show_advanced);

        settings.set(ADVANCED_MODE, true);
        app.update(Action::Tick).unwrap();
        assert!(app.show_advanced);

        settings.set(ADVANCED_MODE, false);
        app.update(Action::Tick).unwrap();
        assert!(!app.show_advanced);
    }

    #[test]
    fn test_drop_detaches_settings_listener() {
        let settings = SettingsStore::in_memory(Config::default());
        let backend = FakeBackend::with_lines(&[]);
        let app = app_with(backend, settings.clone());
        assert_eq!(settings.listener_count(), 1);

        drop(app);
        assert_eq!(settings.listener_count(), 0);
    }

    #[test]
    fn test_toggle_advanced_round_trips_through_store() {
        let settings = SettingsStore::in_memory(Config::default());
        let backend = FakeBackend::with_lines(&[]);
        let mut app = app_with(backend, settings.clone());

        app.update(Action::ToggleAdvancedMode).unwrap();
        // Mirror unchanged until the subscription delivers
        assert!(!app.show_advanced);

        app.update(Action::Tick).unwrap();
        assert!(app.show_advanced);
        assert!(settings.get(ADVANCED_MODE));
    }

    #[test]
    fn test_line_input_modal_flow() {
        let backend = FakeBackend::with_lines(&[]);
        let mut app = app_with(backend, SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);

        app.update(Action::OpenLineInput).unwrap();
        app.handle_key_event(KeyEvent::from(KeyCode::Char('h')))
            .unwrap();
        app.handle_key_event(KeyEvent::from(KeyCode::Char('i')))
            .unwrap();

        let action = app
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap()
            .expect("enter confirms the line");
        assert_eq!(action, Action::AppendLine("hi".to_string()));

        app.update(action).unwrap();
        assert_eq!(app.filters.to_lines(), vec!["hi"]);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_edit_line_keeps_position() {
        let backend = FakeBackend::with_lines(&["a", "b"]);
        let mut app = app_with(backend, SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);

        app.update(Action::NextItem).unwrap();
        app.update(Action::OpenEditLine).unwrap();
        assert!(matches!(
            app.modals.top(),
            Some(Modal::LineInput { value, .. }) if value == "b"
        ));

        app.update(Action::UpdateLine {
            position: 1,
            label: "edited".to_string(),
        })
        .unwrap();
        assert_eq!(app.filters.to_lines(), vec!["a", "edited"]);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_quit_confirms_only_when_dirty() {
        let backend = FakeBackend::with_lines(&[]);
        let mut app = app_with(backend, SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);

        app.update(Action::Quit).unwrap();
        assert!(app.should_quit);

        let backend = FakeBackend::with_lines(&[]);
        let mut app = app_with(backend, SettingsStore::in_memory(Config::default()));
        wait_loaded(&mut app);
        app.update(Action::AppendLine("+ /x".to_string())).unwrap();
        app.update(Action::Quit).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
    }

    #[test]
    fn test_advanced_keys_ignored_until_flag_set() {
        let settings = SettingsStore::in_memory(Config::default());
        let backend = FakeBackend::with_lines(&[]);
        let mut app = app_with(backend, settings.clone());
        wait_loaded(&mut app);

        let action = app
            .handle_key_event(KeyEvent::from(KeyCode::Char('a')))
            .unwrap();
        assert_eq!(action, None);

        settings.set(ADVANCED_MODE, true);
        app.update(Action::Tick).unwrap();
        let action = app
            .handle_key_event(KeyEvent::from(KeyCode::Char('a')))
            .unwrap();
        assert_eq!(action, Some(Action::OpenLineInput));
    }
}
