use log::debug;

use super::category::Category;
use super::input::{EventDisposition, Key, PointerPos, RefreshLevel, ViewFrame};
use super::navigation::{AssetIndex, NavigationState};
use super::orientation::{Orientation, OrientationController, OrientationSettings};
use super::search::{SearchInputController, SearchOutcome};

/// Category selected whenever the browser opens
pub const DEFAULT_CATEGORY: Category = Category::Sprites;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerSettings {
    pub orientation: OrientationSettings,
    /// Negate horizontal drag motion before it reaches the rotation
    pub invert_horizontal_drag: bool,
}

/// Everything that lives for one open/close cycle of the browser
#[derive(Debug, Clone)]
pub struct BrowserState {
    category: Category,
    navigation: NavigationState,
    orientation: OrientationController,
    search: SearchInputController,
    /// Last pointer position while a drag is in progress
    drag: Option<PointerPos>,
}

impl BrowserState {
    fn new(settings: &ControllerSettings) -> Self {
        Self {
            category: DEFAULT_CATEGORY,
            navigation: NavigationState::new(),
            orientation: OrientationController::new(settings.orientation),
            search: SearchInputController::new(),
            drag: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn current_index(&self) -> AssetIndex {
        self.navigation.get_index(self.category)
    }

    #[cfg(test)]
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    #[cfg(test)]
    pub fn orientation(&self) -> Orientation {
        self.orientation.snapshot()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn search_buffer(&self) -> Option<&str> {
        self.search.buffer()
    }

    fn snapshot(&self) -> BrowserSnapshot {
        BrowserSnapshot {
            category: self.category,
            index: self.current_index(),
            orientation: self.orientation.snapshot(),
        }
    }
}

/// The inputs a view projection needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserSnapshot {
    pub category: Category,
    pub index: AssetIndex,
    pub orientation: Orientation,
}

/// Routes host input to navigation, orientation and search, and records
/// which parts of the view need rebuilding.
#[derive(Debug, Clone, Default)]
pub struct BrowserController {
    settings: ControllerSettings,
    state: Option<BrowserState>,
    frame: ViewFrame,
    pending_refresh: Option<RefreshLevel>,
    value_text: String,
    category_label: String,
}

impl BrowserController {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&BrowserState> {
        self.state.as_ref()
    }

    pub fn snapshot(&self) -> Option<BrowserSnapshot> {
        self.state.as_ref().map(BrowserState::snapshot)
    }

    /// Open the browser with fresh state. Returns false if it was already open.
    pub fn open(&mut self) -> bool {
        if self.state.is_some() {
            debug!("browser already open");
            return false;
        }
        let state = BrowserState::new(&self.settings);
        self.category_label = category_label(state.category);
        self.value_text = state.current_index().to_string();
        self.state = Some(state);
        self.request_refresh(RefreshLevel::Full);
        debug!("browser opened on {:?}", DEFAULT_CATEGORY);
        true
    }

    /// Drop all browser state, including navigation
    pub fn close(&mut self) {
        if self.state.take().is_some() {
            debug!("browser closed");
        }
        self.frame = ViewFrame::default();
        self.pending_refresh = None;
    }

    /// Record what the host reports for this tick. Routing reads this until the next call.
    pub fn sync_view(&mut self, frame: ViewFrame) {
        self.frame = frame;
    }

    pub fn view_frame(&self) -> ViewFrame {
        self.frame
    }

    /// Take the highest refresh level requested since the last call
    pub fn take_refresh(&mut self) -> Option<RefreshLevel> {
        self.pending_refresh.take()
    }

    /// Text for the index field: the current index, or the search buffer while editing
    pub fn value_text(&self) -> &str {
        &self.value_text
    }

    /// Caption in front of the index field, e.g. "Items:"
    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    pub fn switch_category(&mut self, category: Category) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.category = category;
        state.drag = None;
        state.search.cancel();
        self.category_label = category_label(category);
        self.value_text = state.current_index().to_string();
        debug!("switched to {:?} at index {}", category, state.current_index());
        self.request_refresh(RefreshLevel::Full);
    }

    /// Enter search mode (the index field was clicked)
    pub fn activate_search(&mut self) -> EventDisposition {
        let Some(state) = self.routable_state() else {
            return EventDisposition::PassThrough;
        };
        state.search.activate();
        self.value_text.clear();
        EventDisposition::Consumed
    }

    pub fn handle_key(&mut self, key: Key) -> EventDisposition {
        let Some(state) = self.routable_state() else {
            return EventDisposition::PassThrough;
        };

        if let Some(outcome) = state.search.handle_key(key) {
            match outcome {
                SearchOutcome::Editing => {
                    let text = state.search.buffer().unwrap_or_default().to_string();
                    self.value_text = text;
                }
                SearchOutcome::Committed(Some(value)) => {
                    let category = state.category;
                    state.navigation.set_index(category, value as i64);
                    self.value_text = state.current_index().to_string();
                    debug!("search jumped {:?} to {}", category, value);
                    self.request_refresh(RefreshLevel::Content);
                }
                SearchOutcome::Committed(None) | SearchOutcome::Cancelled => {
                    self.value_text = state.current_index().to_string();
                }
            }
            return EventDisposition::Consumed;
        }

        let delta = match key {
            Key::Left => -1,
            Key::Right => 1,
            _ => return EventDisposition::PassThrough,
        };
        let category = state.category;
        let index = state.navigation.step(category, delta);
        self.value_text = index.to_string();
        self.request_refresh(RefreshLevel::Content);
        EventDisposition::Consumed
    }

    pub fn pointer_pressed(&mut self, pos: PointerPos) -> EventDisposition {
        let Some(bounds) = self.frame.hit_target() else {
            return EventDisposition::PassThrough;
        };
        if !bounds.contains(pos) {
            return EventDisposition::PassThrough;
        }
        let Some(state) = self.state.as_mut() else {
            return EventDisposition::PassThrough;
        };
        state.drag = Some(pos);
        EventDisposition::Consumed
    }

    pub fn pointer_dragged(&mut self, pos: PointerPos) -> EventDisposition {
        let invert = self.settings.invert_horizontal_drag;
        let Some(state) = self.routable_state() else {
            return EventDisposition::PassThrough;
        };
        let Some(last) = state.drag else {
            return EventDisposition::PassThrough;
        };
        let dx = pos.x.saturating_sub(last.x);
        let dy = pos.y.saturating_sub(last.y);
        state.drag = Some(pos);
        state
            .orientation
            .rotate(if invert { dx.saturating_neg() } else { dx }, dy);
        self.request_refresh(RefreshLevel::Viewport);
        EventDisposition::Consumed
    }

    /// Always ends the drag; never consumes so the host still sees the release
    pub fn pointer_released(&mut self) -> EventDisposition {
        if let Some(state) = self.state.as_mut() {
            state.drag = None;
        }
        EventDisposition::PassThrough
    }

    /// Positive notches zoom out
    pub fn wheel(&mut self, notches: i32) -> EventDisposition {
        if notches == 0 || self.frame.hit_target().is_none() {
            return EventDisposition::PassThrough;
        }
        let Some(state) = self.state.as_mut() else {
            return EventDisposition::PassThrough;
        };
        state.orientation.zoom(notches);
        self.request_refresh(RefreshLevel::Viewport);
        EventDisposition::Consumed
    }

    fn routable_state(&mut self) -> Option<&mut BrowserState> {
        if self.frame.open {
            self.state.as_mut()
        } else {
            None
        }
    }

    fn request_refresh(&mut self, level: RefreshLevel) {
        self.pending_refresh = Some(self.pending_refresh.map_or(level, |p| p.max(level)));
    }
}

fn category_label(category: Category) -> String {
    format!("{}:", category.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::input::ViewportBounds;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn viewport() -> ViewportBounds {
        ViewportBounds::new(100, 100, 200, 200)
    }

    fn open_controller() -> BrowserController {
        let mut controller = BrowserController::default();
        assert!(controller.open());
        controller.sync_view(ViewFrame {
            open: true,
            viewport: Some(viewport()),
        });
        controller
    }

    fn press_keys(controller: &mut BrowserController, keys: &[Key]) {
        for key in keys {
            assert_eq!(controller.handle_key(*key), EventDisposition::Consumed);
        }
    }

    fn type_text(controller: &mut BrowserController, text: &str) {
        for c in text.chars() {
            assert_eq!(controller.handle_key(Key::Char(c)), EventDisposition::Consumed);
        }
    }

    fn index(controller: &BrowserController) -> AssetIndex {
        controller.state().map(BrowserState::current_index).unwrap_or_default()
    }

    #[test]
    fn test_open_defaults() {
        let mut controller = BrowserController::default();
        assert!(!controller.is_open());
        assert!(controller.open());
        assert!(!controller.open());

        let state = controller.state().unwrap();
        assert_eq!(state.category(), Category::Sprites);
        for category in Category::ALL {
            assert_eq!(state.navigation().get_index(category), 0);
        }
        assert_eq!(controller.category_label(), "Sprites:");
        assert_eq!(controller.value_text(), "0");
        assert_eq!(controller.take_refresh(), Some(RefreshLevel::Full));
        assert_eq!(controller.take_refresh(), None);
    }

    #[test]
    fn test_navigate_search_and_rotate_session() {
        let mut controller = open_controller();
        controller.switch_category(Category::Items);
        assert_eq!(index(&controller), 0);

        press_keys(&mut controller, &[Key::Right; 5]);
        assert_eq!(index(&controller), 5);

        assert_eq!(controller.activate_search(), EventDisposition::Consumed);
        type_text(&mut controller, "42");
        press_keys(&mut controller, &[Key::Enter]);
        assert_eq!(index(&controller), 42);

        press_keys(&mut controller, &[Key::Left]);
        assert_eq!(index(&controller), 41);
        assert_eq!(controller.value_text(), "41");
    }

    #[test]
    fn test_left_at_zero_stays_zero() {
        let mut controller = open_controller();
        press_keys(&mut controller, &[Key::Left, Key::Left]);
        assert_eq!(index(&controller), 0);
        assert_eq!(controller.value_text(), "0");
    }

    #[test]
    fn test_navigation_requests_content_refresh() {
        let mut controller = open_controller();
        controller.take_refresh();
        press_keys(&mut controller, &[Key::Right]);
        assert_eq!(controller.take_refresh(), Some(RefreshLevel::Content));
    }

    #[test]
    fn test_unhandled_keys_pass_through() {
        let mut controller = open_controller();
        assert_eq!(controller.handle_key(Key::Char('x')), EventDisposition::PassThrough);
        assert_eq!(controller.handle_key(Key::Enter), EventDisposition::PassThrough);
        assert_eq!(controller.handle_key(Key::Other), EventDisposition::PassThrough);
    }

    #[test]
    fn test_search_round_trip() {
        let mut controller = open_controller();
        controller.activate_search();
        assert_eq!(controller.value_text(), "");
        type_text(&mut controller, "1234");
        assert_eq!(controller.value_text(), "1234");
        controller.take_refresh();
        press_keys(&mut controller, &[Key::Enter]);
        assert_eq!(index(&controller), 1234);
        assert_eq!(controller.value_text(), "1234");
        assert_eq!(controller.take_refresh(), Some(RefreshLevel::Content));
        assert_eq!(controller.state().unwrap().search_buffer(), None);
    }

    #[test]
    fn test_search_escape_keeps_index() {
        let mut controller = open_controller();
        press_keys(&mut controller, &[Key::Right, Key::Right]);
        controller.activate_search();
        type_text(&mut controller, "987");
        controller.take_refresh();
        press_keys(&mut controller, &[Key::Escape]);
        assert_eq!(index(&controller), 2);
        assert_eq!(controller.value_text(), "2");
        assert_eq!(controller.take_refresh(), None);
    }

    #[test]
    fn test_search_filters_and_swallows_keys() {
        let mut controller = open_controller();
        controller.activate_search();
        type_text(&mut controller, "a1b2c3");
        assert_eq!(controller.value_text(), "123");
        // arrows edit nothing and do not navigate while searching
        press_keys(&mut controller, &[Key::Right, Key::Other, Key::Backspace]);
        assert_eq!(controller.value_text(), "12");
        assert_eq!(index(&controller), 0);
    }

    #[test]
    fn test_empty_commit_restores_value_text() {
        let mut controller = open_controller();
        press_keys(&mut controller, &[Key::Right; 3]);
        controller.activate_search();
        controller.take_refresh();
        press_keys(&mut controller, &[Key::Enter]);
        assert_eq!(index(&controller), 3);
        assert_eq!(controller.value_text(), "3");
        assert_eq!(controller.take_refresh(), None);
    }

    #[test]
    fn test_overflowing_search_falls_back() {
        let mut controller = open_controller();
        press_keys(&mut controller, &[Key::Right; 7]);
        controller.activate_search();
        type_text(&mut controller, "123456789012345");
        press_keys(&mut controller, &[Key::Enter]);
        assert_eq!(index(&controller), 7);
        assert_eq!(controller.value_text(), "7");
    }

    #[test]
    fn test_category_switch_preserves_each_index() {
        let mut controller = open_controller();
        press_keys(&mut controller, &[Key::Right; 4]);
        controller.switch_category(Category::Models);
        assert_eq!(index(&controller), 0);
        press_keys(&mut controller, &[Key::Right]);
        controller.switch_category(Category::Sprites);
        assert_eq!(index(&controller), 4);
        assert_eq!(controller.value_text(), "4");
        controller.switch_category(Category::Models);
        assert_eq!(index(&controller), 1);
        assert_eq!(controller.category_label(), "Models:");
    }

    #[test]
    fn test_category_switch_resets_transients() {
        let mut controller = open_controller();
        assert!(controller.pointer_pressed(PointerPos::new(150, 150)).is_consumed());
        controller.activate_search();
        type_text(&mut controller, "55");
        controller.take_refresh();

        controller.switch_category(Category::Npcs);
        let state = controller.state().unwrap();
        assert!(!state.is_dragging());
        assert_eq!(state.search_buffer(), None);
        assert_eq!(state.current_index(), 0);
        assert_eq!(controller.take_refresh(), Some(RefreshLevel::Full));

        // the abandoned search did not commit anywhere
        controller.switch_category(Category::Sprites);
        assert_eq!(index(&controller), 0);
    }

    #[test]
    fn test_orientation_survives_category_switch() {
        let mut controller = open_controller();
        controller.pointer_pressed(PointerPos::new(150, 150));
        controller.pointer_dragged(PointerPos::new(160, 150));
        controller.wheel(1);
        let before = controller.state().unwrap().orientation();
        controller.switch_category(Category::Chatheads);
        press_keys(&mut controller, &[Key::Right]);
        assert_eq!(controller.state().unwrap().orientation(), before);
    }

    #[test]
    fn test_drag_rotates() {
        let mut controller = open_controller();
        controller.take_refresh();
        assert!(controller.pointer_pressed(PointerPos::new(150, 150)).is_consumed());
        assert!(controller.pointer_dragged(PointerPos::new(160, 145)).is_consumed());
        let o = controller.state().unwrap().orientation();
        assert_eq!(o.rotation_z, 40);
        assert_eq!(o.rotation_x, 2048 - 20);
        assert_eq!(controller.take_refresh(), Some(RefreshLevel::Viewport));

        // deltas are measured from the last drag position
        controller.pointer_dragged(PointerPos::new(161, 145));
        assert_eq!(controller.state().unwrap().orientation().rotation_z, 44);

        assert_eq!(controller.pointer_released(), EventDisposition::PassThrough);
        assert!(!controller.state().unwrap().is_dragging());
        assert_eq!(
            controller.pointer_dragged(PointerPos::new(300, 300)),
            EventDisposition::PassThrough
        );
    }

    #[test]
    fn test_inverted_horizontal_drag() {
        let mut controller = BrowserController::new(ControllerSettings {
            invert_horizontal_drag: true,
            ..ControllerSettings::default()
        });
        controller.open();
        controller.sync_view(ViewFrame {
            open: true,
            viewport: Some(viewport()),
        });
        controller.pointer_pressed(PointerPos::new(150, 150));
        controller.pointer_dragged(PointerPos::new(151, 151));
        let o = controller.state().unwrap().orientation();
        assert_eq!(o.rotation_z, 2048 - 4);
        assert_eq!(o.rotation_x, 4);
    }

    #[test]
    fn test_press_outside_viewport_never_drags() {
        let mut controller = open_controller();
        let before = controller.state().unwrap().orientation();
        assert_eq!(
            controller.pointer_pressed(PointerPos::new(10, 10)),
            EventDisposition::PassThrough
        );
        assert_eq!(
            controller.pointer_dragged(PointerPos::new(40, 60)),
            EventDisposition::PassThrough
        );
        let state = controller.state().unwrap();
        assert!(!state.is_dragging());
        assert_eq!(state.orientation(), before);
    }

    #[test]
    fn test_press_without_bounds_is_ignored() {
        let mut controller = BrowserController::default();
        controller.open();
        controller.sync_view(ViewFrame {
            open: true,
            viewport: None,
        });
        assert_eq!(
            controller.pointer_pressed(PointerPos::new(150, 150)),
            EventDisposition::PassThrough
        );
        assert_eq!(controller.wheel(1), EventDisposition::PassThrough);
    }

    #[test]
    fn test_wheel_zooms_and_clamps() {
        let mut controller = open_controller();
        controller.take_refresh();
        assert!(controller.wheel(2).is_consumed());
        assert_eq!(controller.state().unwrap().orientation().zoom, 600);
        assert_eq!(controller.take_refresh(), Some(RefreshLevel::Viewport));
        controller.wheel(50);
        assert_eq!(controller.state().unwrap().orientation().zoom, 800);
        assert_eq!(controller.wheel(0), EventDisposition::PassThrough);
    }

    #[test]
    fn test_refresh_levels_merge_to_highest() {
        let mut controller = open_controller();
        controller.take_refresh();
        controller.wheel(1);
        controller.switch_category(Category::Models);
        controller.wheel(-1);
        assert_eq!(controller.take_refresh(), Some(RefreshLevel::Full));
        assert_eq!(controller.take_refresh(), None);
    }

    #[test]
    fn test_hidden_view_ignores_input() {
        let mut controller = BrowserController::default();
        controller.open();
        controller.sync_view(ViewFrame {
            open: false,
            viewport: Some(viewport()),
        });
        assert_eq!(controller.handle_key(Key::Right), EventDisposition::PassThrough);
        assert_eq!(controller.activate_search(), EventDisposition::PassThrough);
        assert_eq!(
            controller.pointer_pressed(PointerPos::new(150, 150)),
            EventDisposition::PassThrough
        );
        assert_eq!(controller.wheel(1), EventDisposition::PassThrough);
        assert_eq!(index(&controller), 0);
    }

    #[test]
    fn test_closed_controller_is_inert() {
        let mut controller = open_controller();
        press_keys(&mut controller, &[Key::Right; 3]);
        controller.close();
        assert!(!controller.is_open());
        assert_eq!(controller.take_refresh(), None);

        controller.sync_view(ViewFrame {
            open: true,
            viewport: Some(viewport()),
        });
        assert_eq!(controller.handle_key(Key::Right), EventDisposition::PassThrough);
        assert_eq!(controller.wheel(1), EventDisposition::PassThrough);
        assert_eq!(
            controller.pointer_pressed(PointerPos::new(150, 150)),
            EventDisposition::PassThrough
        );
        controller.switch_category(Category::Items);
        assert_eq!(controller.pointer_released(), EventDisposition::PassThrough);
        assert_eq!(controller.snapshot(), None);

        // reopening starts from scratch
        controller.open();
        assert_eq!(index(&controller), 0);
        assert_eq!(controller.state().unwrap().category(), Category::Sprites);
    }

    #[test]
    fn test_snapshot() {
        let mut controller = open_controller();
        controller.switch_category(Category::Npcs);
        press_keys(&mut controller, &[Key::Right; 2]);
        let snapshot = controller.snapshot().unwrap();
        assert_eq!(snapshot.category, Category::Npcs);
        assert_eq!(snapshot.index, 2);
        assert_eq!(snapshot.orientation, Orientation::default());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Key(Key),
        Search(String),
        Switch(Category),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => prop_oneof![Just(Key::Left), Just(Key::Right)].prop_map(Op::Key),
            1 => prop_oneof![Just(Key::Enter), Just(Key::Escape), Just(Key::Backspace)]
                .prop_map(Op::Key),
            2 => "[0-9a-z]{0,12}".prop_map(Op::Search),
            1 => prop::sample::select(Category::ALL.to_vec()).prop_map(Op::Switch),
        ]
    }

    proptest! {
        #[test]
        fn proptest_value_text_always_shows_a_valid_index(
            ops in prop::collection::vec(op_strategy(), 0..80)
        ) {
            let mut controller = open_controller();
            let mut seen: HashMap<Category, AssetIndex> = HashMap::new();
            for op in ops {
                match op {
                    Op::Key(key) => {
                        controller.handle_key(key);
                    }
                    Op::Search(text) => {
                        controller.activate_search();
                        type_text(&mut controller, &text);
                        controller.handle_key(Key::Enter);
                    }
                    Op::Switch(category) => controller.switch_category(category),
                }
                let state = controller.state().unwrap();
                let searching = state.search_buffer().is_some();
                if !searching {
                    let shown: AssetIndex = controller.value_text().parse().unwrap();
                    prop_assert_eq!(shown, state.current_index());
                }
                seen.insert(state.category(), state.current_index());
            }
            let state = controller.state().unwrap();
            for (category, index) in seen {
                prop_assert_eq!(state.navigation().get_index(category), index);
            }
        }
    }
}
