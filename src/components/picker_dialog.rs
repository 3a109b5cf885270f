//! Path picker dialog component
//!
//! Filesystem browser used to add include/exclude rules. Enter descends
//! into directories or confirms a file; Space confirms whatever is
//! highlighted (including a directory); '.' confirms the directory being
//! browsed. The confirmed path is appended to the filter list with the
//! mode's prefix.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Which kind of rule the picked path becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Include,
    Exclude,
}

impl PickerMode {
    pub fn prefix(&self) -> &'static str {
        match self {
            PickerMode::Include => "+",
            PickerMode::Exclude => "-",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            PickerMode::Include => " Add Include Rule ",
            PickerMode::Exclude => " Add Exclude Rule ",
        }
    }
}

#[derive(Debug, Clone)]
struct PickEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Path picker dialog
pub struct PathPickerDialog {
    mode: PickerMode,
    cwd: PathBuf,
    entries: Vec<PickEntry>,
    selected_index: usize,
    list_state: ListState,
    error: Option<String>,
}

impl Default for PathPickerDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl PathPickerDialog {
    pub fn new() -> Self {
        Self {
            mode: PickerMode::Include,
            cwd: PathBuf::from("/"),
            entries: Vec::new(),
            selected_index: 0,
            list_state: ListState::default(),
            error: None,
        }
    }

    /// Point the dialog at a directory and (re)list it.
    pub fn open(&mut self, mode: PickerMode, start: impl Into<PathBuf>) {
        self.mode = mode;
        self.cwd = start.into();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.entries.clear();
        self.error = None;
        self.selected_index = 0;
        self.list_state.select(Some(0));

        match fs::read_dir(&self.cwd) {
            Ok(dir) => {
                for item in dir.flatten() {
                    let name = item.file_name().to_string_lossy().to_string();
                    let is_dir = item.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    self.entries.push(PickEntry {
                        path: item.path(),
                        name,
                        is_dir,
                    });
                }
                // Directories first, then case-insensitive by name
                self.entries.sort_by(|a, b| {
                    b.is_dir
                        .cmp(&a.is_dir)
                        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                });
            }
            Err(e) => {
                self.error = Some(format!("Cannot list {}: {}", self.cwd.display(), e));
            }
        }
    }

    fn selected_entry(&self) -> Option<&PickEntry> {
        self.entries.get(self.selected_index)
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn ascend(&mut self) {
        if let Some(parent) = self.cwd.parent().map(Path::to_path_buf) {
            self.cwd = parent;
            self.refresh();
        }
    }

    fn confirm(&self, path: &Path) -> Action {
        Action::AppendLine(format!("{} {}", self.mode.prefix(), path.display()))
    }
}

impl Component for PathPickerDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                self.ascend();
                None
            }
            KeyCode::Enter => match self.selected_entry().cloned() {
                Some(entry) if entry.is_dir => {
                    self.cwd = entry.path;
                    self.refresh();
                    None
                }
                Some(entry) => Some(self.confirm(&entry.path)),
                None => None,
            },
            KeyCode::Char(' ') => self.selected_entry().map(|entry| self.confirm(&entry.path)),
            KeyCode::Char('.') => Some(self.confirm(&self.cwd.clone())),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 70u16.min(area.width.saturating_sub(4));
        let popup_height = 20u16.min(area.height.saturating_sub(2));
        let popup_area = centered_popup(area, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(popup_area);

        let header = Paragraph::new(Line::from(Span::styled(
            self.cwd.display().to_string(),
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.mode.title())
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        if let Some(ref error) = self.error {
            let message = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(message, chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .map(|entry| {
                    let (marker, style) = if entry.is_dir {
                        ("▸ ", Style::default().fg(Color::Cyan))
                    } else {
                        ("  ", Style::default().fg(Color::White))
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Cyan)),
                        Span::styled(entry.name.clone(), style),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Open/Pick  "),
            Span::styled(" Space ", Style::default().fg(Color::Yellow)),
            Span::raw("Pick  "),
            Span::styled(" . ", Style::default().fg(Color::Yellow)),
            Span::raw("Pick dir  "),
            Span::styled(" Bksp ", Style::default().fg(Color::Cyan)),
            Span::raw("Up  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn picker_in(dir: &Path) -> PathPickerDialog {
        let mut picker = PathPickerDialog::new();
        picker.open(PickerMode::Include, dir);
        picker
    }

    #[test]
    fn test_lists_directories_before_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("afile"), "").unwrap();
        fs::create_dir(dir.path().join("zdir")).unwrap();

        let picker = picker_in(dir.path());
        let names: Vec<&str> = picker.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zdir", "afile"]);
    }

    #[test]
    fn test_enter_on_file_confirms_with_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("saves.dat"), "").unwrap();

        let mut picker = picker_in(dir.path());
        let action = picker.handle_key_event(key(KeyCode::Enter)).unwrap();

        let expected = format!("+ {}", dir.path().join("saves.dat").display());
        assert_eq!(action, Some(Action::AppendLine(expected)));
    }

    #[test]
    fn test_enter_on_directory_descends() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("inner")).unwrap();
        fs::write(dir.path().join("inner/file"), "").unwrap();

        let mut picker = picker_in(dir.path());
        let action = picker.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(action, None);
        assert_eq!(picker.cwd, dir.path().join("inner"));
        assert_eq!(picker.entries.len(), 1);
    }

    #[test]
    fn test_space_confirms_directory_itself() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("inner")).unwrap();

        let mut picker = PathPickerDialog::new();
        picker.open(PickerMode::Exclude, dir.path());
        let action = picker.handle_key_event(key(KeyCode::Char(' '))).unwrap();

        let expected = format!("- {}", dir.path().join("inner").display());
        assert_eq!(action, Some(Action::AppendLine(expected)));
    }

    #[test]
    fn test_dot_confirms_current_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut picker = picker_in(dir.path());
        let action = picker.handle_key_event(key(KeyCode::Char('.'))).unwrap();

        let expected = format!("+ {}", dir.path().display());
        assert_eq!(action, Some(Action::AppendLine(expected)));
    }

    #[test]
    fn test_escape_cancels() {
        let dir = tempfile::tempdir().unwrap();
        let mut picker = picker_in(dir.path());
        let action = picker.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
    }

    #[test]
    fn test_unreadable_directory_sets_error() {
        let mut picker = PathPickerDialog::new();
        picker.open(PickerMode::Include, "/definitely/not/a/real/path");
        assert!(picker.error.is_some());
        assert!(picker.entries.is_empty());
    }
}
