pub mod actions;
pub mod clipboard;
pub mod events;
pub mod handlers;
pub mod keymap;
pub mod schedule_time;
mod scroll;
mod ui_state;

pub use scroll::*;
pub use ui_state::*;
