mod config;
mod game;
mod plugins;

use bevy::prelude::*;

use config::settings::Settings;
use plugins::{game_plugin::GamePlugin, ui_plugin::UiPlugin};

fn main() {
    let settings = Settings::load_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ring Brawl".into(),
                resolution: (1000u32, 560u32).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Time::<Fixed>::from_seconds(f64::from(settings.dt)))
        .insert_resource(settings)
        .add_plugins(GamePlugin)
        .add_plugins(UiPlugin)
        .run();
}
