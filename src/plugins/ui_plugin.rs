use bevy::camera::ScalingMode;
use bevy::prelude::*;

use crate::config::settings::Settings;
use crate::game::{
    arena::ring,
    effects::{Effect, SPLATTER_FRAME_COUNT},
    fighter::{Combatant, Fighter, MAX_LIFE, Stance},
    match_controller::{MatchController, MatchState},
    round::{MAX_ROUNDS, RoundBanner},
    types::Side,
};
use crate::plugins::game_plugin::ActiveMatch;

/// Screen pixels per world unit.
const PIXELS_PER_UNIT: f32 = 14.0;
const FIGHTER_SIZE: Vec2 = Vec2::new(5.0, 12.0);

const CLOCK_COLOR: Color = Color::WHITE;
const CLOCK_CRITICAL_COLOR: Color = Color::srgb(1.0, 0.25, 0.2);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_ui);
        app.add_systems(
            Update,
            (update_status_text, update_clock_text, update_banner_text, draw_arena),
        );
    }
}

#[derive(Component)]
struct StatusText;

#[derive(Component)]
struct ClockText;

#[derive(Component)]
struct BannerText;

fn setup_ui(mut commands: Commands) {
    let center = Vec2::new(
        (ring::RING_MIN_X + ring::RING_MAX_X) * 0.5,
        (ring::RING_MIN_Y + ring::RING_MAX_Y) * 0.5 + FIGHTER_SIZE.y * 0.5,
    );
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::WindowSize,
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_translation(center.extend(0.0)),
    ));

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                StatusText,
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                ClockText,
                Text::new(""),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(CLOCK_COLOR),
            ));
            parent.spawn((
                BannerText,
                Text::new(""),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.8, 0.2)),
            ));
        });
}

fn life_bar(fighter: &Fighter) -> String {
    let filled = ((fighter.life().0 / MAX_LIFE) * 20.0).round() as usize;
    format!("{:<9} [{:<20}] {:>3.0}", fighter.name, "#".repeat(filled), fighter.life().0)
}

fn status_line(controller: &MatchController) -> String {
    let state = match controller.state() {
        MatchState::Running => String::new(),
        MatchState::Paused => "PAUSED  (Space/P to resume)".to_string(),
        MatchState::GameOver => {
            let verdict = if controller.player_won() == Some(true) {
                "YOU WIN"
            } else {
                "YOU LOSE"
            };
            format!("{verdict}  (Space to play again)")
        }
    };
    format!(
        "{}\n{}\nRound {}/{}  Won {}  Lost {}  AI {}\n{}",
        life_bar(controller.player()),
        life_bar(controller.opponent()),
        controller.round().number(),
        MAX_ROUNDS,
        controller.rounds_won(),
        controller.rounds_lost(),
        controller.difficulty().display_name(),
        state,
    )
}

fn update_status_text(
    active: Option<Res<ActiveMatch>>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    let Some(active) = active else { return; };
    for mut text in &mut text_query {
        **text = status_line(&active.0);
    }
}

fn update_clock_text(
    active: Option<Res<ActiveMatch>>,
    mut text_query: Query<(&mut Text, &mut TextColor), With<ClockText>>,
) {
    let Some(active) = active else { return; };
    let round = active.0.round();
    for (mut text, mut color) in &mut text_query {
        **text = format!("{:02}", round.clock().ceil() as u32);
        color.0 = if round.is_clock_critical() {
            CLOCK_CRITICAL_COLOR
        } else {
            CLOCK_COLOR
        };
    }
}

fn update_banner_text(
    active: Option<Res<ActiveMatch>>,
    mut text_query: Query<&mut Text, With<BannerText>>,
) {
    let Some(active) = active else { return; };
    let round = active.0.round();
    let banner = match round.banner() {
        Some(RoundBanner::Round(n)) => format!("ROUND {n}"),
        Some(RoundBanner::Fight) => "FIGHT!".to_string(),
        Some(RoundBanner::KnockOut) => "K.O.".to_string(),
        Some(RoundBanner::TimeUp) => "TIME".to_string(),
        None => String::new(),
    };
    for mut text in &mut text_query {
        **text = banner.clone();
    }
}

fn fighter_color(side: Side, fighter: &Fighter) -> Color {
    match fighter.stance() {
        Stance::Blocking => Color::srgb(0.4, 0.8, 1.0),
        Stance::Attacking { .. } if fighter.is_attack_active() => Color::srgb(1.0, 0.9, 0.3),
        Stance::Lost => Color::srgb(0.35, 0.35, 0.35),
        _ => match side {
            Side::Player => Color::srgb(0.2, 0.6, 1.0),
            Side::Opponent => Color::srgb(1.0, 0.2, 0.2),
        },
    }
}

/// Placeholder drawing: ring outline, fighter boxes and effect markers.
fn draw_arena(mut gizmos: Gizmos, active: Option<Res<ActiveMatch>>, settings: Res<Settings>) {
    let Some(active) = active else { return; };
    let controller = &active.0;

    let (min_y, max_y) = (ring::RING_MIN_Y, ring::RING_MAX_Y);
    gizmos.linestrip_2d(
        [
            Vec2::new(ring::x_min(min_y), min_y),
            Vec2::new(ring::x_max(min_y), min_y),
            Vec2::new(ring::x_max(max_y), max_y),
            Vec2::new(ring::x_min(max_y), max_y),
            Vec2::new(ring::x_min(min_y), min_y),
        ],
        Color::srgb(0.5, 0.5, 0.6),
    );

    if settings.show_effects {
        for pool in controller.ground_pools().active() {
            let radius = 1.0 + f32::from(pool.variant()) * 0.5;
            gizmos.circle_2d(
                pool.position(),
                radius,
                Color::srgba(0.5, 0.0, 0.0, pool.alpha()),
            );
        }
    }

    for (side, fighter) in [
        (Side::Player, controller.player()),
        (Side::Opponent, controller.opponent()),
    ] {
        let feet = fighter.position();
        gizmos.rect_2d(
            feet + Vec2::new(0.0, FIGHTER_SIZE.y * 0.5),
            FIGHTER_SIZE,
            fighter_color(side, fighter),
        );

        if settings.show_effects {
            for splatter in controller.splatters(side).active() {
                let grow = (splatter.frame_index() + 1) as f32 / SPLATTER_FRAME_COUNT as f32;
                gizmos.circle_2d(splatter.position(), 0.5 + grow * 1.5, Color::srgb(0.8, 0.0, 0.0));
            }
        }
    }
}
