use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod browser;
mod catalog;
mod projector;
mod state;
mod ui;

use state::ViewerState;
use ui::ui_system;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cache Viewer".into(),
                resolution: (1280., 800.).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .init_resource::<ViewerState>()
        .add_systems(Startup, setup)
        .add_systems(Update, ui_system)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
