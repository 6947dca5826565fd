use bevy_egui::egui;

use crate::browser::{EventDisposition, Key, PointerPos, ViewFrame, ViewportBounds};
use crate::state::ViewerState;

/// Tell the controller what the view looked like last frame
pub fn sync_view_frame(state: &mut ViewerState) {
    let open = state.controller.is_open();
    let viewport = if open {
        state.viewport_rect.map(rect_to_bounds)
    } else {
        None
    };
    state.controller.sync_view(ViewFrame { open, viewport });
}

/// Feed this frame's raw egui input to the controller before any widget runs.
/// Events the controller consumes are removed so widgets never see them.
pub fn route_input(ctx: &egui::Context, state: &mut ViewerState) {
    if !state.controller.is_open() {
        return;
    }

    // a focused text field (the command bar) keeps the keyboard
    let route_keys = !ctx.wants_keyboard_input();
    let events = ctx.input(|i| i.events.clone());
    let consumed: Vec<bool> = events
        .iter()
        .map(|event| route_event(state, event, route_keys).is_consumed())
        .collect();

    let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
    let scroll_consumed = route_wheel(state, scroll_y);

    ctx.input_mut(|i| {
        let mut flags = consumed.iter();
        i.events.retain(|_| !flags.next().copied().unwrap_or(false));
        if scroll_consumed {
            i.raw_scroll_delta = egui::Vec2::ZERO;
            i.smooth_scroll_delta = egui::Vec2::ZERO;
        }
    });
}

fn route_event(state: &mut ViewerState, event: &egui::Event, route_keys: bool) -> EventDisposition {
    let controller = &mut state.controller;
    match event {
        egui::Event::Key {
            key, pressed: true, ..
        } if route_keys => controller.handle_key(map_key(*key)),
        egui::Event::Text(text) if route_keys => {
            let mut disposition = EventDisposition::PassThrough;
            for c in text.chars() {
                if controller.handle_key(Key::Char(c)).is_consumed() {
                    disposition = EventDisposition::Consumed;
                }
            }
            disposition
        }
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            if *pressed {
                controller.pointer_pressed(to_pointer(*pos))
            } else {
                controller.pointer_released()
            }
        }
        egui::Event::PointerMoved(pos) => controller.pointer_dragged(to_pointer(*pos)),
        egui::Event::PointerGone => controller.pointer_released(),
        _ => EventDisposition::PassThrough,
    }
}

/// Turn scroll distance into zoom notches. Returns whether the scroll was used.
fn route_wheel(state: &mut ViewerState, scroll_y: f32) -> bool {
    if scroll_y == 0.0 {
        return false;
    }
    // partial notches must not carry over from a scroll the browser ignored
    if state.controller.view_frame().hit_target().is_none() {
        state.wheel.reset();
        return false;
    }
    let notches = state.wheel.feed(scroll_y, state.config.points_per_notch());
    if notches != 0 {
        state.controller.wheel(notches);
    }
    true
}

pub fn map_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowLeft => Key::Left,
        egui::Key::ArrowRight => Key::Right,
        egui::Key::Enter => Key::Enter,
        egui::Key::Escape => Key::Escape,
        egui::Key::Backspace => Key::Backspace,
        _ => Key::Other,
    }
}

fn to_pointer(pos: egui::Pos2) -> PointerPos {
    PointerPos::new(pos.x.round() as i32, pos.y.round() as i32)
}

pub fn rect_to_bounds(rect: egui::Rect) -> ViewportBounds {
    let min = to_pointer(rect.min);
    let max = to_pointer(rect.max);
    ViewportBounds::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewerConfig;

    fn open_state() -> ViewerState {
        let mut state = ViewerState::with_config(ViewerConfig::default());
        state.open_browser();
        state.viewport_rect = Some(egui::Rect::from_min_size(
            egui::pos2(10.0, 10.0),
            egui::vec2(100.0, 100.0),
        ));
        sync_view_frame(&mut state);
        state
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(egui::Key::ArrowLeft), Key::Left);
        assert_eq!(map_key(egui::Key::Enter), Key::Enter);
        assert_eq!(map_key(egui::Key::A), Key::Other);
    }

    #[test]
    fn test_rect_to_bounds() {
        let rect = egui::Rect::from_min_max(egui::pos2(10.4, 20.6), egui::pos2(110.4, 70.6));
        assert_eq!(rect_to_bounds(rect), ViewportBounds::new(10, 21, 100, 50));
    }

    #[test]
    fn test_closed_browser_reports_no_viewport() {
        let mut state = ViewerState::with_config(ViewerConfig::default());
        state.viewport_rect = Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(5.0, 5.0)));
        sync_view_frame(&mut state);
        assert_eq!(state.controller.view_frame(), ViewFrame::default());
    }

    #[test]
    fn test_pointer_press_inside_viewport_starts_drag() {
        let mut state = open_state();
        let press = egui::Event::PointerButton {
            pos: egui::pos2(50.0, 50.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        };
        assert!(route_event(&mut state, &press, true).is_consumed());
        let moved = egui::Event::PointerMoved(egui::pos2(60.0, 50.0));
        assert!(route_event(&mut state, &moved, true).is_consumed());
        assert_eq!(
            state.controller.snapshot().map(|s| s.orientation.rotation_z),
            Some(40)
        );
    }

    #[test]
    fn test_text_events_feed_search() {
        let mut state = open_state();
        state.controller.activate_search();
        let text = egui::Event::Text("4x2".to_string());
        assert!(route_event(&mut state, &text, true).is_consumed());
        assert_eq!(state.controller.value_text(), "42");
        // keys are left alone while another widget has focus
        let text = egui::Event::Text("7".to_string());
        assert!(!route_event(&mut state, &text, false).is_consumed());
    }

    fn key_event(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn run_frame(ctx: &egui::Context, state: &mut ViewerState, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            sync_view_frame(state);
            route_input(ctx, state);
            state.apply_refresh();
        });
    }

    #[test]
    fn test_open_command_then_arrow_navigates() {
        let mut state = ViewerState::with_config(ViewerConfig::default());
        state.command_line = "::cache".to_string();
        assert!(state.submit_command());

        let ctx = egui::Context::default();
        run_frame(&ctx, &mut state, vec![key_event(egui::Key::ArrowRight)]);
        assert_eq!(state.controller.snapshot().map(|s| s.index), Some(1));
        assert_eq!(state.projector.view().map(|v| v.index), Some(1));
    }

    #[test]
    fn test_focused_text_field_keeps_keys() {
        let mut state = ViewerState::with_config(ViewerConfig::default());
        state.open_browser();

        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events: vec![key_event(egui::Key::ArrowRight)],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            ctx.memory_mut(|m| m.request_focus(egui::Id::new("command_bar")));
            sync_view_frame(&mut state);
            route_input(ctx, &mut state);
        });
        assert_eq!(state.controller.snapshot().map(|s| s.index), Some(0));
    }

    #[test]
    fn test_ignored_scroll_leaves_no_remainder() {
        let mut state = ViewerState::with_config(ViewerConfig::default());
        state.open_browser();
        // no viewport yet, so nothing to zoom
        sync_view_frame(&mut state);
        assert!(!route_wheel(&mut state, -30.0));

        state.viewport_rect = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(100.0, 100.0),
        ));
        sync_view_frame(&mut state);
        // half a notch on its own does nothing
        assert!(route_wheel(&mut state, -25.0));
        assert_eq!(
            state.controller.snapshot().map(|s| s.orientation.zoom),
            Some(crate::browser::DEFAULT_ZOOM)
        );
        assert!(route_wheel(&mut state, -25.0));
        assert_eq!(
            state.controller.snapshot().map(|s| s.orientation.zoom),
            Some(crate::browser::DEFAULT_ZOOM + 50)
        );
        assert!(!route_wheel(&mut state, 0.0));
    }
}
