/// Rotation units in one full turn
pub const ANGLE_UNITS: i32 = 2048;

pub const DEFAULT_SENSITIVITY: i32 = 4;
pub const DEFAULT_ZOOM_STEP: i32 = 50;
pub const MIN_ZOOM: i32 = 250;
pub const MAX_ZOOM: i32 = 800;
pub const DEFAULT_ZOOM: i32 = 500;

/// Wrap any angle into `[0, ANGLE_UNITS)`
pub fn wrap_angle(angle: i64) -> i32 {
    angle.rem_euclid(ANGLE_UNITS as i64) as i32
}

/// Rotation and zoom applied to a 3D preview.
/// Larger zoom values draw the model further away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    /// Tilt, driven by vertical pointer motion
    pub rotation_x: i32,
    /// Spin, driven by horizontal pointer motion
    pub rotation_z: i32,
    pub zoom: i32,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            rotation_x: 0,
            rotation_z: 0,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Orientation {
    /// Rotation about X in radians
    pub fn pitch_radians(&self) -> f32 {
        units_to_radians(self.rotation_x)
    }

    /// Rotation about Z in radians
    pub fn yaw_radians(&self) -> f32 {
        units_to_radians(self.rotation_z)
    }
}

fn units_to_radians(units: i32) -> f32 {
    units as f32 * std::f32::consts::TAU / ANGLE_UNITS as f32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationSettings {
    /// Rotation units per pixel of pointer motion
    pub sensitivity: i32,
    /// Zoom change per wheel notch
    pub zoom_step: i32,
    pub min_zoom: i32,
    pub max_zoom: i32,
    pub default_zoom: i32,
}

impl Default for OrientationSettings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

impl OrientationSettings {
    /// Swap inverted bounds and pull the default zoom inside them
    pub fn normalized(self) -> Self {
        let (min_zoom, max_zoom) = if self.min_zoom <= self.max_zoom {
            (self.min_zoom, self.max_zoom)
        } else {
            (self.max_zoom, self.min_zoom)
        };
        Self {
            min_zoom,
            max_zoom,
            default_zoom: self.default_zoom.clamp(min_zoom, max_zoom),
            ..self
        }
    }
}

/// Tracks preview rotation (wrapped) and zoom (clamped)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationController {
    settings: OrientationSettings,
    orientation: Orientation,
}

impl Default for OrientationController {
    fn default() -> Self {
        Self::new(OrientationSettings::default())
    }
}

impl OrientationController {
    pub fn new(settings: OrientationSettings) -> Self {
        let settings = settings.normalized();
        Self {
            settings,
            orientation: Orientation {
                rotation_x: 0,
                rotation_z: 0,
                zoom: settings.default_zoom,
            },
        }
    }

    pub fn rotate(&mut self, delta_x: i32, delta_y: i32) {
        let k = self.settings.sensitivity as i64;
        let o = &mut self.orientation;
        o.rotation_z = wrap_angle(o.rotation_z as i64 + k * delta_x as i64);
        o.rotation_x = wrap_angle(o.rotation_x as i64 + k * delta_y as i64);
    }

    pub fn zoom(&mut self, delta_steps: i32) {
        let next = self.orientation.zoom as i64 + delta_steps as i64 * self.settings.zoom_step as i64;
        self.orientation.zoom =
            next.clamp(self.settings.min_zoom as i64, self.settings.max_zoom as i64) as i32;
    }

    pub fn snapshot(&self) -> Orientation {
        self.orientation
    }
}
