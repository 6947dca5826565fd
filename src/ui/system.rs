use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::time::Duration;

use crate::browser::Category;
use crate::state::{ViewerState, DEFAULT_PANEL_MARGIN};
use crate::ui::browser_window::render_browser_window;
use crate::ui::input::{route_input, sync_view_frame};
use crate::ui::widgets::{scaled_font, scaled_margin};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

pub fn ui_system(mut contexts: EguiContexts, mut state: ResMut<ViewerState>) {
    let ctx = contexts.ctx_mut();
    let state = &mut *state;

    // Apply UI scale to global text styles
    let ui_scale = state.config.ui_scale;
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(scaled_font(20.0, ui_scale)),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::proportional(scaled_font(14.0, ui_scale)),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(scaled_font(14.0, ui_scale)),
    );
    ctx.set_style(style);

    handle_scale_shortcuts(ctx, state);

    // Input goes to the browser before any widget sees it
    sync_view_frame(state);
    route_input(ctx, state);
    state.apply_refresh();

    render_command_bar(ctx, state, ui_scale);

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(scaled_margin(DEFAULT_PANEL_MARGIN * 8.0, ui_scale));
            ui.heading(format!("Cache Viewer v{}", VERSION));
            ui.label(format!(
                "Type ::{} in the command bar to open the browser.",
                state.config.open_command
            ));
            let names: Vec<_> = Category::ALL.iter().map(|c| c.tab_label()).collect();
            ui.label(
                egui::RichText::new(format!("Categories: {}", names.join(", ")))
                    .color(egui::Color32::GRAY),
            );
        });
    });

    render_browser_window(ctx, state);

    // Tab clicks and search activation land during the widget pass
    state.apply_refresh();
}

/// Ctrl+Plus/Minus/0 change the UI scale and persist it.
/// Plus needs Shift on most layouts (Shift+=).
fn handle_scale_shortcuts(ctx: &egui::Context, state: &mut ViewerState) {
    let increase_pressed = ctx.input_mut(|i| {
        i.modifiers.command
            && (i.consume_key(egui::Modifiers::COMMAND, egui::Key::Plus)
                || i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Equals))
    });
    let decrease_pressed = ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Minus));
    let reset_pressed = ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Num0));

    let changed = (increase_pressed && state.config.step_ui_scale(1))
        | (decrease_pressed && state.config.step_ui_scale(-1))
        | (reset_pressed && state.config.reset_ui_scale());
    if changed {
        state.config.save();
    }
}

fn render_command_bar(ctx: &egui::Context, state: &mut ViewerState, ui_scale: f32) {
    egui::TopBottomPanel::bottom("command_bar")
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Command:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.command_line)
                        .hint_text("::cache")
                        .desired_width(scaled_margin(240.0, ui_scale)),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    // keep typing after a bad command; hand the keyboard to the browser otherwise
                    if !state.submit_command() {
                        response.request_focus();
                    }
                }

                let expired = state
                    .status_message
                    .as_ref()
                    .is_some_and(|(_, when)| when.elapsed() > STATUS_TIMEOUT);
                if expired {
                    state.status_message = None;
                }
                if let Some((message, _)) = &state.status_message {
                    ui.separator();
                    ui.label(egui::RichText::new(message).color(egui::Color32::YELLOW));
                }
            });
        });
}
