//! Action enum - All possible application actions
//!
//! Components convert raw key/mouse events into Actions; the App
//! processes Actions to mutate state. Keeping the two steps separate is
//! what makes the state transitions testable without a terminal.

use crate::model::FilterEntry;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for polling background work and expiring toasts
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit immediately, skipping any confirmation
    ForceQuit,
    /// Quit request; may open the unsaved-changes dialog
    Quit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Select the next rule in the list
    NextItem,
    /// Select the previous rule in the list
    PrevItem,
    /// Jump to the first rule
    FirstItem,
    /// Jump to the last rule
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Reordering
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the selected rule up one slot
    MoveEntryUp,
    /// Move the selected rule down one slot
    MoveEntryDown,
    /// Replace the whole list with the reorder widget's output
    CommitReorder(Vec<FilterEntry>),

    // ─────────────────────────────────────────────────────────────────────────
    // List Edits
    // ─────────────────────────────────────────────────────────────────────────
    /// Append a rule line at the end of the list
    AppendLine(String),
    /// Replace the label of the rule at a position
    UpdateLine { position: usize, label: String },
    /// Remove the selected rule
    RemoveSelected,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the path picker in include mode
    OpenIncludePicker,
    /// Open the path picker in exclude mode
    OpenExcludePicker,
    /// Open the arbitrary-line input
    OpenLineInput,
    /// Open the line input pre-filled with the selected rule
    OpenEditLine,
    /// Open the keyboard reference
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Navigate up in the current modal
    ModalUp,
    /// Navigate down in the current modal
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────────────────────
    /// Copy the whole filter list to the system clipboard
    CopyFilters,
    /// Replace the list with the system clipboard contents
    PasteFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence & Config
    // ─────────────────────────────────────────────────────────────────────────
    /// Hand the exported list to the save backend
    SaveFilters,
    /// Flip the advanced_mode configuration key
    ToggleAdvancedMode,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::Quit => write!(f, "Quit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::MoveEntryUp => write!(f, "MoveEntryUp"),
            Action::MoveEntryDown => write!(f, "MoveEntryDown"),
            Action::CommitReorder(entries) => write!(f, "CommitReorder({} entries)", entries.len()),
            Action::AppendLine(line) => write!(f, "AppendLine({})", line),
            Action::UpdateLine { position, label } => {
                write!(f, "UpdateLine({}, {})", position, label)
            }
            Action::RemoveSelected => write!(f, "RemoveSelected"),
            Action::OpenIncludePicker => write!(f, "OpenIncludePicker"),
            Action::OpenExcludePicker => write!(f, "OpenExcludePicker"),
            Action::OpenLineInput => write!(f, "OpenLineInput"),
            Action::OpenEditLine => write!(f, "OpenEditLine"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::CopyFilters => write!(f, "CopyFilters"),
            Action::PasteFilters => write!(f, "PasteFilters"),
            Action::SaveFilters => write!(f, "SaveFilters"),
            Action::ToggleAdvancedMode => write!(f, "ToggleAdvancedMode"),
        }
    }
}
