mod button;
mod text_field;

pub use button::{ExitButton, rebind_hotkey};
pub use text_field::TextField;
