mod account;
mod action;
mod api;
mod clipboard;
mod completion;
mod event;
mod field;
mod page;
mod post;
mod source;
mod textarea;
mod tone;
mod update;

pub use account::*;
pub use action::*;
pub use api::*;
pub use clipboard::*;
pub use completion::*;
pub use event::*;
pub use field::*;
pub use page::*;
pub use post::*;
pub use source::*;
pub use textarea::*;
pub use tone::*;
pub use update::*;
