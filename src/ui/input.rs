//! Keyboard controls for the office

use bevy::prelude::*;

use super::components::OfficeGameResource;
use crate::office::StagePhase;

/// Map key presses onto game events
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut game: ResMut<OfficeGameResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
        return;
    }

    let game = &mut game.0;
    let result = if keyboard.just_pressed(KeyCode::Enter) {
        match game.office().phase() {
            StagePhase::Idle | StagePhase::Instructed => game.acknowledge_instructions(),
            StagePhase::RetryPrompted => game.acknowledge_retry(),
            _ => Ok(()),
        }
    } else if keyboard.just_pressed(KeyCode::Space) {
        let next = game.office().queue().in_line().first().map(|c| c.id);
        match next {
            Some(id) => game.spotlight(id),
            None => Ok(()),
        }
    } else if keyboard.just_pressed(KeyCode::KeyC) {
        match game.office().tray().occupant() {
            Some(id) => game.view_cv(id),
            None => Ok(()),
        }
    } else if keyboard.just_pressed(KeyCode::KeyA) {
        game.accept()
    } else if keyboard.just_pressed(KeyCode::KeyR) {
        game.reject()
    } else if keyboard.just_pressed(KeyCode::KeyB) {
        game.return_candidate()
    } else {
        Ok(())
    };

    if let Err(e) = result {
        bevy::log::warn!("Action failed: {:#}", e);
    }
}
