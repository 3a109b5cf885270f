//! Component trait - Interface for UI components
//!
//! A component owns its state, turns raw input events into Actions, and
//! renders itself into a frame. State changes happen in `update`, never
//! in the event handlers, so the event-to-action mapping stays pure
//! enough to test.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// The flow for every component is:
/// 1. `handle_key_event` / `handle_mouse_event` - map events to Actions
/// 2. `update` - apply an Action, optionally emitting a follow-up
/// 3. `draw` - render current state
pub trait Component {
    /// One-time setup after construction (subscriptions, initial load).
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key event to an Action without mutating shared state.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Map a mouse event to an Action.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Apply an Action. A returned Action is processed next, which lets
    /// one update chain into another (e.g. confirm closes its modal).
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`. Pure rendering; no state changes.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
