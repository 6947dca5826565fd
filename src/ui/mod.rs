mod browser_window;
mod input;
mod system;
mod viewport;
mod widgets;

pub use system::ui_system;
