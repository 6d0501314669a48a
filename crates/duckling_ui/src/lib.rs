pub mod handlers;
pub mod widgets;

pub use handlers::{
    TableNavigationHandler, handle_editor_input, handle_editor_paste,
    handle_text_input,
};
pub use widgets::*;
