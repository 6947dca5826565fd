mod app_state;
mod config;
mod types;

pub use app_state::ViewerState;
pub use config::{ViewerConfig, DEFAULT_PANEL_MARGIN};
