use bevy_egui::egui;

use crate::browser::Category;
use crate::projector::PLACEHOLDER_CAPTION;
use crate::state::{ViewerState, DEFAULT_PANEL_MARGIN};
use crate::ui::viewport::render_viewport;
use crate::ui::widgets::{field_frame, scaled_font, scaled_margin, tab_button, ACCENT};

const WINDOW_TITLE: &str = "Cache Viewer";
const TAB_COLUMN_WIDTH: f32 = 150.0;
const VIEWPORT_SIZE: egui::Vec2 = egui::vec2(420.0, 450.0);

/// Draw the browser window while it is open. Closing the window closes the browser.
pub fn render_browser_window(ctx: &egui::Context, state: &mut ViewerState) {
    if !state.controller.is_open() {
        state.viewport_rect = None;
        return;
    }

    let ui_scale = state.config.ui_scale;
    let mut open = true;
    let mut viewport_rect = None;

    egui::Window::new(WINDOW_TITLE)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_pos(egui::pos2(120.0, 80.0))
        .show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    ui.set_width(scaled_margin(TAB_COLUMN_WIDTH, ui_scale));
                    render_category_tabs(ui, state, ui_scale);
                });
                ui.separator();
                ui.vertical(|ui| {
                    render_search_bar(ui, state, ui_scale);
                    ui.add_space(scaled_margin(DEFAULT_PANEL_MARGIN, ui_scale));
                    let view = state.projector.view();
                    let parts_shown = state.projector.parts().shown().len();
                    let rect = render_viewport(ui, view, parts_shown, VIEWPORT_SIZE * ui_scale);
                    let dragging = state.controller.state().is_some_and(|s| s.is_dragging());
                    if dragging || ui.rect_contains_pointer(rect) {
                        ui.ctx().set_cursor_icon(if dragging {
                            egui::CursorIcon::Grabbing
                        } else {
                            egui::CursorIcon::Grab
                        });
                    }
                    viewport_rect = Some(rect);
                    ui.add_space(scaled_margin(DEFAULT_PANEL_MARGIN, ui_scale));
                    render_caption(ui, state, ui_scale);
                });
            });
        });

    state.viewport_rect = viewport_rect;
    if !open {
        state.close_browser();
    }
}

fn render_category_tabs(ui: &mut egui::Ui, state: &mut ViewerState, ui_scale: f32) {
    ui.label(
        egui::RichText::new(PLACEHOLDER_CAPTION)
            .size(scaled_font(13.0, ui_scale))
            .color(egui::Color32::GRAY),
    );
    let selected = state
        .controller
        .state()
        .map(|s| s.category())
        .unwrap_or_default();
    for category in Category::ALL {
        if tab_button(ui, category == selected, category.tab_label(), ui_scale).clicked() {
            state.controller.switch_category(category);
        }
    }
}

/// "<Category>: [value]" where clicking the value starts a numeric search
fn render_search_bar(ui: &mut egui::Ui, state: &mut ViewerState, ui_scale: f32) {
    let searching = state
        .controller
        .state()
        .is_some_and(|s| s.search_buffer().is_some());

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(state.controller.category_label())
                .color(ACCENT)
                .size(scaled_font(14.0, ui_scale)),
        );

        let field_size = egui::vec2(scaled_margin(200.0, ui_scale), scaled_margin(25.0, ui_scale));
        let (rect, response) = ui.allocate_exact_size(field_size, egui::Sense::click());
        field_frame(ui, rect, searching);

        let mut text = state.controller.value_text().to_string();
        if searching {
            text.push('|');
        }
        ui.painter().text(
            rect.left_center() + egui::vec2(scaled_margin(6.0, ui_scale), 0.0),
            egui::Align2::LEFT_CENTER,
            text,
            egui::FontId::proportional(scaled_font(14.0, ui_scale)),
            ACCENT,
        );

        if response.on_hover_text("Edit").clicked() {
            state.controller.activate_search();
        }
    });
}

fn render_caption(ui: &mut egui::Ui, state: &ViewerState, ui_scale: f32) {
    let caption = state
        .projector
        .view()
        .map(|v| v.caption.as_str())
        .unwrap_or(PLACEHOLDER_CAPTION);
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(caption)
                .color(egui::Color32::WHITE)
                .size(scaled_font(16.0, ui_scale)),
        );
    });
}
