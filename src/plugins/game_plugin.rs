use bevy::prelude::*;

use crate::config::settings::Settings;
use crate::game::{
    events::GameEvent,
    intent::{Command, Direction},
    match_controller::MatchController,
};

/// The running match. Owned by the ECS world, mutated only through the controller.
#[derive(Resource, Debug)]
pub struct ActiveMatch(pub MatchController);

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameEvent>();

        app.add_systems(Startup, setup_match);

        // One simulation tick per fixed step, then hand notifications to the ECS.
        app.add_systems(FixedUpdate, (advance_match, forward_events).chain());

        app.add_systems(
            Update,
            (read_fight_input, read_host_input, settings_reload_input).chain(),
        );
        app.add_systems(Update, log_game_events);
    }
}

// ── Startup ─────────────────────────────────────────────────────────

fn setup_match(mut commands: Commands, settings: Res<Settings>) {
    info!("Starting match at {}", settings.difficulty.display_name());
    commands.insert_resource(ActiveMatch(MatchController::new(settings.difficulty)));
}

// ── FixedUpdate ─────────────────────────────────────────────────────

fn advance_match(time: Res<Time>, active: Option<ResMut<ActiveMatch>>) {
    let Some(mut active) = active else { return; };
    active.0.tick(time.delta_secs());
}

fn forward_events(active: Option<ResMut<ActiveMatch>>, mut writer: MessageWriter<GameEvent>) {
    let Some(mut active) = active else { return; };
    for event in active.0.drain_events() {
        writer.write(event);
    }
}

// ── Input ───────────────────────────────────────────────────────────

const MOVE_KEYS: [(KeyCode, KeyCode, Direction); 4] = [
    (KeyCode::ArrowLeft, KeyCode::KeyA, Direction::Left),
    (KeyCode::ArrowRight, KeyCode::KeyD, Direction::Right),
    (KeyCode::ArrowUp, KeyCode::KeyW, Direction::Up),
    (KeyCode::ArrowDown, KeyCode::KeyS, Direction::Down),
];

/// Arrows/WASD move, B blocks, F punches, V kicks.
fn read_fight_input(keyboard: Res<ButtonInput<KeyCode>>, active: Option<ResMut<ActiveMatch>>) {
    let Some(mut active) = active else { return; };
    let controller = &mut active.0;

    for (arrow, letter, direction) in MOVE_KEYS {
        if keyboard.any_just_pressed([arrow, letter]) {
            controller.command_player(Command::Move(direction));
        }
        if keyboard.any_just_released([arrow, letter]) {
            controller.command_player(Command::StopMoving(direction));
        }
    }

    if keyboard.just_pressed(KeyCode::KeyB) {
        controller.command_player(Command::Block);
    }
    if keyboard.just_released(KeyCode::KeyB) {
        controller.command_player(Command::StopBlocking);
    }
    if keyboard.just_pressed(KeyCode::KeyF) {
        controller.command_player(Command::Punch);
    }
    if keyboard.just_pressed(KeyCode::KeyV) {
        controller.command_player(Command::Kick);
    }
}

/// Space confirms, P pauses, L cycles difficulty, K toggles effects.
fn read_host_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    active: Option<ResMut<ActiveMatch>>,
    mut settings: ResMut<Settings>,
) {
    let Some(mut active) = active else { return; };
    let controller = &mut active.0;

    if keyboard.just_pressed(KeyCode::Space) {
        controller.confirm();
    }
    if keyboard.just_pressed(KeyCode::KeyP) {
        controller.toggle_pause();
    }
    if keyboard.just_pressed(KeyCode::KeyL) {
        controller.cycle_difficulty();
        settings.difficulty = controller.difficulty();
        settings.save();
    }
    if keyboard.just_pressed(KeyCode::KeyK) {
        settings.show_effects = !settings.show_effects;
        info!("Effects {}", if settings.show_effects { "on" } else { "off" });
        settings.save();
    }
}

/// Reload settings with F5 and push them into the running match.
fn settings_reload_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<Settings>,
    mut fixed_time: ResMut<Time<Fixed>>,
    active: Option<ResMut<ActiveMatch>>,
) {
    if !keyboard.just_pressed(KeyCode::F5) {
        return;
    }
    settings.reload();
    fixed_time.set_timestep_seconds(f64::from(settings.dt));
    if let Some(mut active) = active {
        active.0.set_difficulty(settings.difficulty);
    }
}

// ── Notifications ───────────────────────────────────────────────────

/// Stand-in for the audio layer: every cue it would play is logged.
fn log_game_events(mut reader: MessageReader<GameEvent>) {
    for event in reader.read() {
        match event {
            GameEvent::Strike { attacker, blocked } => {
                let cue = if *blocked { "block" } else { "hit" };
                debug!("[Cue] {cue} ({attacker:?} attacking)");
            }
            GameEvent::FightStarted { round } => debug!("[Cue] fight (round {round})"),
            GameEvent::GameOver { player_won, .. } => {
                debug!("[Cue] {}", if *player_won { "victory" } else { "defeat" });
            }
            _ => {}
        }
    }
}
