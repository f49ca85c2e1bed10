mod field_input;
mod list;
mod text_input;

pub use field_input::FieldInput;
pub use list::{List, ListEvent, ListRow};
pub use text_input::{TextInput, TextInputEvent};
