//! Host-agnostic event vocabulary for the browser controller.

/// Keys the browser reacts to. Hosts map their own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    /// A typed character
    Char(char),
    Other,
}

/// Whether a handler used an event. `PassThrough` leaves it for host shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Consumed,
    PassThrough,
}

impl EventDisposition {
    pub fn is_consumed(self) -> bool {
        self == EventDisposition::Consumed
    }
}

/// How much of the browser view must be rebuilt. Each level includes the ones below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RefreshLevel {
    /// Preview only (rotation, zoom)
    Viewport,
    /// Preview and caption (index changed)
    Content,
    /// Category tabs, preview and caption
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPos {
    pub x: i32,
    pub y: i32,
}

impl PointerPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// On-screen rectangle of the preview viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewportBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left/top edges are inside, right/bottom edges are not
    pub fn contains(&self, pos: PointerPos) -> bool {
        pos.x >= self.x
            && pos.y >= self.y
            && (pos.x as i64) < self.x as i64 + self.width as i64
            && (pos.y as i64) < self.y as i64 + self.height as i64
    }
}

/// What the host reported about the browser view on the latest tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewFrame {
    pub open: bool,
    pub viewport: Option<ViewportBounds>,
}

impl ViewFrame {
    /// Viewport bounds usable for hit-testing, if the view is open
    pub fn hit_target(&self) -> Option<ViewportBounds> {
        if self.open {
            self.viewport
        } else {
            None
        }
    }
}
