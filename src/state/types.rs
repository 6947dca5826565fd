/// Turns continuous scroll distance into whole wheel notches.
/// Scrolling toward the user (negative egui delta) gives positive notches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelAccumulator {
    remainder: f32,
}

impl WheelAccumulator {
    pub fn feed(&mut self, scroll_delta_y: f32, points_per_notch: f32) -> i32 {
        if scroll_delta_y == 0.0 || points_per_notch <= 0.0 {
            return 0;
        }
        self.remainder -= scroll_delta_y / points_per_notch;
        let notches = self.remainder.trunc();
        self.remainder -= notches;
        notches as i32
    }

    pub fn reset(&mut self) {
        self.remainder = 0.0;
    }
}
