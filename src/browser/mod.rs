//! Interaction core of the cache browser: category selection, index navigation,
//! preview orientation and numeric search. Free of any UI toolkit.

mod category;
mod command;
mod controller;
mod input;
mod navigation;
mod orientation;
mod search;

pub use category::{Category, PreviewKind};
pub use command::{parse_command, ViewerCommand, DEFAULT_OPEN_COMMAND};
pub use controller::{BrowserController, BrowserSnapshot, ControllerSettings};
pub use input::{EventDisposition, Key, PointerPos, RefreshLevel, ViewFrame, ViewportBounds};
pub use navigation::AssetIndex;
pub use orientation::{
    Orientation, OrientationSettings, DEFAULT_SENSITIVITY, DEFAULT_ZOOM, DEFAULT_ZOOM_STEP,
    MAX_ZOOM, MIN_ZOOM,
};
