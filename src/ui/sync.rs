//! Systems for syncing Bevy entities with the office game state

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    uv_to_world, CandidateLink, CandidateMappings, DoorLink, HudText, OfficeGameResource,
};
use super::scene::door_color;
use crate::office::{CandidateId, PersonColor, StagePhase};

const PERSON_SIZE: Vec2 = Vec2::new(24.0, 56.0);

/// System to advance the game clock
pub fn tick_game(time: Res<Time>, mut game: ResMut<OfficeGameResource>) {
    let delta_ms = (time.delta_secs() * 1000.0).round() as u64;
    if let Err(e) = game.0.tick(delta_ms) {
        bevy::log::error!("Office game tick failed: {:#}", e);
    }
}

/// System to sync candidate sprites from game state
pub fn sync_candidates(
    mut commands: Commands,
    game: Res<OfficeGameResource>,
    mut mappings: ResMut<CandidateMappings>,
    mut candidate_query: Query<(Entity, &CandidateLink, &mut Transform)>,
) {
    let queue = game.0.office().queue();

    // Update existing candidates and track which ones are still drawn
    let mut drawn: HashSet<CandidateId> = HashSet::new();
    for (entity, link, mut transform) in candidate_query.iter_mut() {
        match queue.get(link.0).filter(|c| c.is_visible()) {
            Some(candidate) => {
                drawn.insert(link.0);
                transform.translation = uv_to_world(candidate.position, 1.0);
            }
            None => {
                commands.entity(entity).despawn();
                mappings.candidates.remove(&link.0);
            }
        }
    }

    for candidate in queue.visible() {
        if drawn.contains(&candidate.id) {
            continue;
        }
        let color = match candidate.color {
            PersonColor::Blue => Color::srgb(0.25, 0.45, 0.9),
            PersonColor::Yellow => Color::srgb(0.95, 0.8, 0.2),
        };
        let entity = commands
            .spawn((
                CandidateLink(candidate.id),
                Sprite::from_color(color, PERSON_SIZE),
                Transform::from_translation(uv_to_world(candidate.position, 1.0)),
            ))
            .id();
        mappings.candidates.insert(candidate.id, entity);
    }
}

/// System to tint doors while they are open
pub fn sync_doors(game: Res<OfficeGameResource>, mut door_query: Query<(&DoorLink, &mut Sprite)>) {
    for (link, mut sprite) in door_query.iter_mut() {
        let door = game.0.office().door(link.0);
        sprite.color = door_color(link.0, door.is_open());
    }
}

/// System to update the heads-up display
pub fn update_hud(game: Res<OfficeGameResource>, mut text_query: Query<(&HudText, &mut Text)>) {
    let office = game.0.office();

    for (kind, mut text) in text_query.iter_mut() {
        match kind {
            HudText::Stage => {
                **text = if game.0.is_finished() {
                    "All stages complete!".to_string()
                } else {
                    format!("{}", office.current_stage())
                };
            }
            HudText::Progress => {
                let timer = office
                    .task()
                    .and_then(|task| task.remaining_ms())
                    .map(|ms| format!(" | {:.0}s left", ms as f32 / 1000.0))
                    .unwrap_or_default();
                **text = format!(
                    "Hired: {} / {}{}",
                    office.taken_desks(),
                    office.stage_config().hiring_goal,
                    timer
                );
            }
            HudText::Prompt => {
                **text = match office.phase() {
                    StagePhase::Instructed => office
                        .instructions()
                        .map(|i| format!("{} [Enter]", i.content))
                        .unwrap_or_default(),
                    StagePhase::RetryPrompted => office
                        .retry_prompt()
                        .map(|p| format!("{} [Enter]", p.message))
                        .unwrap_or_default(),
                    StagePhase::Running => office.stage_config().task_description.clone(),
                    StagePhase::Idle | StagePhase::Completed => String::new(),
                };
            }
            HudText::Resume => {
                **text = office
                    .resume()
                    .map(|view| {
                        let scores: Vec<String> = view
                            .features
                            .iter()
                            .zip(&view.record.scores)
                            .map(|(feature, score)| format!("{}: {}", feature, score))
                            .collect();
                        format!("{} - {}", view.record.name, scores.join(", "))
                    })
                    .unwrap_or_default();
            }
        }
    }
}
