//! Scene setup: camera, floor, doors, spotlight and the HUD

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::{uv_to_world, DoorLink, HudText, OfficeGameResource, SCREEN_WIDTH};
use crate::office::{Exit, Position};

const FLOOR_COLOR: Color = Color::srgb(0.55, 0.45, 0.35);
const SPOTLIGHT_COLOR: Color = Color::srgba(1.0, 1.0, 0.7, 0.35);

/// System to setup the office scene
pub fn setup_scene(mut commands: Commands, game: Res<OfficeGameResource>) {
    let layout = &game.0.office().config().layout;

    commands.spawn(Camera2d);

    // First floor strip the candidates stand on
    commands.spawn((
        Sprite::from_color(FLOOR_COLOR, Vec2::new(SCREEN_WIDTH, 12.0)),
        Transform::from_translation(uv_to_world(
            Position::new(0.5, layout.person_start_y + 0.05),
            0.0,
        )),
    ));

    commands.spawn((
        Sprite::from_color(SPOTLIGHT_COLOR, Vec2::new(60.0, 90.0)),
        Transform::from_translation(uv_to_world(layout.spotlight(), 0.5)),
    ));

    for (exit, x) in [
        (Exit::Entry, layout.entry_door_x),
        (Exit::Rejection, layout.exit_door_x),
    ] {
        commands.spawn((
            DoorLink(exit),
            Sprite::from_color(door_color(exit, false), Vec2::new(50.0, 90.0)),
            Transform::from_translation(uv_to_world(
                Position::new(x, layout.person_start_y - 0.02),
                0.2,
            )),
        ));
    }

    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            spawn_hud_text(parent, HudText::Stage, 18.0, Color::srgb(0.2, 1.0, 0.2));
            spawn_hud_text(parent, HudText::Progress, 14.0, Color::srgb(0.9, 0.9, 0.9));
            spawn_hud_text(parent, HudText::Prompt, 14.0, Color::srgb(1.0, 1.0, 0.5));
            spawn_hud_text(parent, HudText::Resume, 14.0, Color::srgb(0.7, 0.8, 1.0));
        });
}

fn spawn_hud_text(parent: &mut ChildSpawnerCommands, kind: HudText, size: f32, color: Color) {
    parent.spawn((
        kind,
        Text::new(""),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    ));
}

/// Door tint, brighter while open
pub fn door_color(exit: Exit, open: bool) -> Color {
    match (exit, open) {
        (Exit::Entry, false) => Color::srgb(0.2, 0.5, 0.2),
        (Exit::Entry, true) => Color::srgb(0.4, 0.9, 0.4),
        (Exit::Rejection, false) => Color::srgb(0.5, 0.2, 0.2),
        (Exit::Rejection, true) => Color::srgb(0.9, 0.4, 0.4),
    }
}
