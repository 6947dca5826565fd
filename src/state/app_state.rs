use bevy::prelude::*;
use log::{debug, info};
use std::time::Instant;

use super::config::ViewerConfig;
use super::types::WheelAccumulator;
use crate::browser::{parse_command, BrowserController, ViewerCommand};
use crate::catalog::DemoCatalog;
use crate::projector::ViewProjector;

#[derive(Resource)]
pub struct ViewerState {
    pub config: ViewerConfig,
    pub controller: BrowserController,
    pub projector: ViewProjector,
    pub catalog: DemoCatalog,

    // Command bar input
    pub command_line: String,
    pub wheel: WheelAccumulator,

    /// Viewport rect drawn last frame, used for hit-testing on the next one
    pub viewport_rect: Option<bevy_egui::egui::Rect>,

    // Status message
    pub status_message: Option<(String, Instant)>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::load())
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        Self {
            controller: BrowserController::new(config.controller_settings()),
            config,
            projector: ViewProjector::new(),
            catalog: DemoCatalog::new(),
            command_line: String::new(),
            wheel: WheelAccumulator::default(),
            viewport_rect: None,
            status_message: None,
        }
    }

    /// Run whatever is typed in the command bar and clear it.
    /// Returns true when the browser was opened.
    pub fn submit_command(&mut self) -> bool {
        let line = std::mem::take(&mut self.command_line);
        if line.trim().is_empty() {
            return false;
        }
        match parse_command(&line, &self.config.open_command) {
            Some(ViewerCommand::OpenBrowser) => self.open_browser(),
            None => {
                self.set_status(format!("Unknown command: {}", line.trim()));
                false
            }
        }
    }

    pub fn open_browser(&mut self) -> bool {
        if !self.controller.open() {
            return false;
        }
        info!("cache viewer opened");
        self.apply_refresh();
        true
    }

    pub fn close_browser(&mut self) {
        self.controller.close();
        let shown = self.projector.clear();
        debug!("took down {} parts on close", shown.len());
        self.wheel.reset();
        self.viewport_rect = None;
        info!("cache viewer closed");
    }

    /// Rebuild the projected view if the controller asked for it
    pub fn apply_refresh(&mut self) {
        if let Some(level) = self.controller.take_refresh() {
            let snapshot = self.controller.snapshot();
            let stale = self.projector.apply(level, snapshot.as_ref(), &self.catalog);
            if !stale.is_empty() {
                debug!("took down {} stale parts", stale.len());
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }
}
