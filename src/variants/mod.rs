//! Ready-made text dialogs.

mod message;
mod text;
mod text_entry;
mod yes_no;

pub use message::{Message, MessageDialog};
pub use text::TextBody;
pub use text_entry::{TextEntry, TextEntryDialog};
pub use yes_no::{YesNo, YesNoDialog};
