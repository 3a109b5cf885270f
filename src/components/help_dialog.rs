//! Help dialog component
//!
//! Keyboard reference overlay. The advanced section only appears while
//! advanced mode is enabled, matching the affordances of the main view.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Help dialog showing the keyboard reference
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
    /// Whether to include the advanced section
    pub show_advanced: bool,
}

fn binding<'a>(keys: &'a str, what: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {:<14}", keys),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(what),
    ])
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin / 2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin),
        );

        let mut lines = vec![
            section("Navigation"),
            binding("↑/k  ↓/j", "Select previous / next rule"),
            binding("Home/g End/G", "Jump to first / last rule"),
            Line::from(""),
            section("Editing"),
            binding("i", "Add include rule (pick a path)"),
            binding("x", "Add exclude rule (pick a path)"),
            binding("e/Enter", "Edit selected rule"),
            binding("d/Del", "Remove selected rule"),
            binding("Shift+↑/↓", "Move selected rule up / down"),
            binding("mouse drag", "Reorder rules"),
            Line::from(""),
        ];

        if self.show_advanced {
            lines.push(section("Advanced"));
            lines.push(binding("a", "Add arbitrary line"));
            lines.push(binding("y", "Copy whole filter to clipboard"));
            lines.push(binding("p", "Paste whole filter from clipboard"));
            lines.push(Line::from(""));
        }

        lines.push(section("General"));
        lines.push(binding("s", "Save filters"));
        lines.push(binding("A", "Toggle advanced mode"));
        lines.push(binding("?", "This help"));
        lines.push(binding("q/Esc", "Quit"));
        lines.push(binding("Ctrl+C", "Quit without confirmation"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Keyboard Reference ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);
        Ok(())
    }
}
