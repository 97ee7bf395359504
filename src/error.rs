use thiserror::Error;

use crate::dialog::DialogId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("dialog {0} has a parent and cannot be the top-level dialog")]
    ParentedTopLevel(DialogId),
    /// The user asked to close the program. Every modal loop unwinds with it.
    #[error("quit requested")]
    Quit,
    #[error("no button label named '{0}' in the label catalog")]
    UnknownLabel(String),
}

impl DialogError {
    /// True when `err` is the fatal close request rather than a failure.
    pub fn is_quit(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<DialogError>(), Some(DialogError::Quit))
    }
}
