//! Reorderable filter list component
//!
//! Owns selection state and the reorder gesture. Keyboard moves
//! (Shift+Up/Down) and mouse drags both produce a full replacement list
//! with freshly assigned positions; the app feeds that output to the
//! store verbatim. During a drag the component works on its own copy of
//! the entries, so the store only changes when the gesture commits on
//! release.

use crate::action::Action;
use crate::model::{FilterEntry, FilterList};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// In-flight drag gesture.
struct DragState {
    /// Working copy of the list, rearranged as the cursor moves
    entries: Vec<FilterEntry>,
    /// Slot the grabbed entry currently occupies
    index: usize,
    /// Slot the entry was grabbed from, to tell a click from a drag
    grabbed_from: usize,
}

/// The main filter rule list.
pub struct FilterListComponent {
    pub list_state: ListState,
    drag: Option<DragState>,
    /// Inner list area from the last draw, for mouse hit testing
    inner_area: Rect,
}

impl Default for FilterListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterListComponent {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            drag: None,
            inner_area: Rect::default(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select_first(&mut self, len: usize) {
        self.list_state.select(if len > 0 { Some(0) } else { None });
    }

    pub fn select_last(&mut self, len: usize) {
        self.list_state
            .select(if len > 0 { Some(len - 1) } else { None });
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(index) if index + 1 < len => index + 1,
            Some(index) => index,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(index) => index.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(prev));
    }

    /// Keep the selection valid after the list shrank or grew.
    pub fn clamp_selection(&mut self, len: usize) {
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(index) if index >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    /// Move the selected entry by `delta` slots, returning the full
    /// replacement list with dense positions. The selection follows the
    /// entry. Returns None when the move falls off either end.
    pub fn move_selected(
        &mut self,
        filters: &FilterList,
        delta: isize,
    ) -> Option<Vec<FilterEntry>> {
        let len = filters.len();
        let from = self.list_state.selected()?;
        if from >= len {
            return None;
        }
        let to = from as isize + delta;
        if to < 0 || to as usize >= len {
            return None;
        }
        let to = to as usize;

        let mut entries = filters.ordered();
        let entry = entries.remove(from);
        entries.insert(to, entry);
        renumber(&mut entries);

        self.list_state.select(Some(to));
        Some(entries)
    }

    /// Main-view keymap. `advanced` gates the bulk affordances the same
    /// way the advanced row of buttons is hidden in the page chrome.
    pub fn handle_key(&mut self, key: KeyEvent, advanced: bool) -> Result<Option<Action>> {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Action::OpenHelp),

            KeyCode::Up if shift => Some(Action::MoveEntryUp),
            KeyCode::Down if shift => Some(Action::MoveEntryDown),
            KeyCode::Char('K') => Some(Action::MoveEntryUp),
            KeyCode::Char('J') => Some(Action::MoveEntryDown),

            KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevItem),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NextItem),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::End | KeyCode::Char('G') => Some(Action::LastItem),

            KeyCode::Char('i') => Some(Action::OpenIncludePicker),
            KeyCode::Char('x') => Some(Action::OpenExcludePicker),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveSelected),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenEditLine),
            KeyCode::Char('s') => Some(Action::SaveFilters),
            KeyCode::Char('A') => Some(Action::ToggleAdvancedMode),

            KeyCode::Char('a') if advanced => Some(Action::OpenLineInput),
            KeyCode::Char('y') if advanced => Some(Action::CopyFilters),
            KeyCode::Char('p') if advanced => Some(Action::PasteFilters),

            _ => None,
        };
        Ok(action)
    }

    /// Mouse interaction: click selects, drag reorders, wheel scrolls.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, filters: &FilterList) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let slot = self.slot_at(mouse.column, mouse.row, filters.len())?;
                self.list_state.select(Some(slot));
                self.drag = Some(DragState {
                    entries: filters.ordered(),
                    index: slot,
                    grabbed_from: slot,
                });
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let len = self.drag.as_ref()?.entries.len();
                let target = self.clamped_slot(mouse.row, len)?;
                let drag = self.drag.as_mut()?;
                if target != drag.index {
                    let entry = drag.entries.remove(drag.index);
                    drag.entries.insert(target, entry);
                    drag.index = target;
                    renumber(&mut drag.entries);
                    self.list_state.select(Some(target));
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let mut drag = self.drag.take()?;
                if drag.index == drag.grabbed_from {
                    // Plain click, nothing to commit
                    return None;
                }
                renumber(&mut drag.entries);
                Some(Action::CommitReorder(drag.entries))
            }
            MouseEventKind::ScrollDown => Some(Action::NextItem),
            MouseEventKind::ScrollUp => Some(Action::PrevItem),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Slot under the cursor, only when the cursor is inside the list.
    fn slot_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let area = self.inner_area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let slot = self.list_state.offset() + (row - area.y) as usize;
        (slot < len).then_some(slot)
    }

    /// Slot for a drag target, clamped into the list so dragging past
    /// either edge pins to the first/last entry (and scrolls with it).
    fn clamped_slot(&self, row: u16, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let area = self.inner_area;
        if area.height == 0 {
            return None;
        }
        let row = row.clamp(area.y, area.y + area.height - 1);
        let slot = self.list_state.offset() + (row - area.y) as usize;
        Some(slot.min(len - 1))
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, filters: &FilterList) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Filter Rules ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        self.inner_area = block.inner(area);

        // While dragging, render the working copy so the grabbed entry
        // follows the cursor before the store is touched.
        let entries = match &self.drag {
            Some(drag) => drag.entries.clone(),
            None => filters.ordered(),
        };

        if entries.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No filter rules yet",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press 'i' to add an include rule or 'x' to add an exclude rule",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(empty, area);
            return Ok(());
        }

        let width = self.inner_area.width.saturating_sub(6) as usize;
        let dragging = self.drag.as_ref().map(|drag| drag.index);

        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| {
                let label_style = if Some(entry.position) == dragging {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if entry.label.starts_with("+ ") {
                    Style::default().fg(Color::Green)
                } else if entry.label.starts_with("- ") {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::White)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>3} ", entry.position),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(truncated(&entry.label, width), label_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
        Ok(())
    }
}

fn renumber(entries: &mut [FilterEntry]) {
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index;
    }
}

/// Cut a label down to the available cell width.
fn truncated(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_string();
    }
    let mut out = String::new();
    for ch in label.chars() {
        if out.width() + 1 >= width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}
