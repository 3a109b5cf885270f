//! UI Components
//!
//! Each component encapsulates its own state, event handling, and
//! rendering logic. Components communicate through Actions rather than
//! direct state mutation.

pub mod filter_list;
pub mod help_dialog;
pub mod layout;
pub mod picker_dialog;
pub mod quit_dialog;

pub use filter_list::FilterListComponent;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_view_layout, centered_popup, ViewLayout};
pub use picker_dialog::{PathPickerDialog, PickerMode};
pub use quit_dialog::QuitDialog;
