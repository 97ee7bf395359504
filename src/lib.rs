#![deny(rust_2018_idioms)]
//! Modal dialogs for terminal games.
//!
//! A dialog runs its own event loop ([`Dialog::show`]) and feeds each event
//! to handlers registered per category or per key, lowest priority number
//! first. Handlers answer with a [`Flow`]: keep going, stop here, or close the
//! dialog with a result.

pub mod dialog;
mod error;
pub mod event;
pub mod testing;
pub mod ui;
pub mod variants;
pub mod widgets;

pub use dialog::{
    Anchor, DEFAULT_PRIORITY, Dialog, DialogContent, DialogId, Dispatch, FadeMask, Flow, Handler,
    Placement,
};
pub use error::DialogError;
pub use event::{Category, DialogEvent, KeyId, KeyPress};
pub use ui::{DialogOptions, LabelCatalog, Ui};
pub use variants::{Message, MessageDialog, TextEntry, TextEntryDialog, YesNo, YesNoDialog};

pub mod prelude {
    pub use super::{
        Category, DEFAULT_PRIORITY, Dialog, DialogContent, DialogEvent, DialogOptions, Flow,
        Handler, KeyId, Message, TextEntry, Ui, YesNo,
    };
}
