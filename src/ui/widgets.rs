use bevy_egui::egui;

/// Highlight used for the selected category and the search field
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xff, 0x98, 0x1f);
pub const SELECTED_TAB: egui::Color32 = egui::Color32::from_rgb(0xff, 0x90, 0x40);

/// Get a scaled font size with minimum of 12
pub fn scaled_font(base_size: f32, scale: f32) -> f32 {
    (base_size.max(12.0) * scale).max(12.0)
}

/// Get a scaled margin/spacing value
pub fn scaled_margin(base_size: f32, scale: f32) -> f32 {
    base_size * scale
}

/// Category tab: a full-width text row, orange when selected
pub fn tab_button(
    ui: &mut egui::Ui,
    selected: bool,
    text: impl Into<String>,
    ui_scale: f32,
) -> egui::Response {
    let text = text.into();
    let text_color = if selected {
        SELECTED_TAB
    } else {
        egui::Color32::WHITE
    };

    let galley = ui.painter().layout_no_wrap(
        text,
        egui::FontId::proportional(scaled_font(14.0, ui_scale)),
        text_color,
    );

    let height = scaled_margin(28.0, ui_scale);
    let desired_size = egui::vec2(ui.available_width(), height);
    let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        if response.hovered() {
            ui.painter()
                .rect_filled(rect, 2.0, egui::Color32::from_white_alpha(12));
        }

        // Drop shadow, then the label centered on the row
        let origin = rect.center() - galley.size() / 2.0;
        ui.painter().galley_with_override_text_color(
            origin + egui::vec2(1.0, 1.0),
            galley.clone(),
            egui::Color32::BLACK,
        );
        ui.painter().galley(origin, galley, text_color);
    }

    response.on_hover_text("Select")
}

/// Rounded field background like an in-game search bar
pub fn field_frame(ui: &egui::Ui, rect: egui::Rect, active: bool) {
    let stroke = if active {
        egui::Stroke::new(1.5, ACCENT)
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(90))
    };
    ui.painter()
        .rect_filled(rect, 4.0, egui::Color32::from_rgb(40, 36, 30));
    ui.painter().rect_stroke(rect, 4.0, stroke);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_font_has_floor() {
        assert_eq!(scaled_font(8.0, 1.0), 12.0);
        assert_eq!(scaled_font(14.0, 2.0), 28.0);
        assert_eq!(scaled_font(14.0, 0.5), 12.0);
    }
}
