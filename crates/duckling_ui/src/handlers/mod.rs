pub mod key_event;
pub mod navigation;

pub use key_event::*;
pub use navigation::*;
