pub mod buttons;
pub mod config_form;
pub mod hotkey;
pub mod hotkey_view;
pub mod modal;
pub mod results;
pub mod select;
pub mod sql_editor;
pub mod status_line;
pub mod table;
pub mod text_input;
pub mod top_bar_view;

pub use status_line::StatusLine;
