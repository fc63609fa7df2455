//! UI module that visualizes the office game using Bevy
//!
//! This module is purely for visualization - all game logic is in the `office` module.
//! The UI reads state from `OfficeGame` and draws it as flat 2D sprites.

mod components;
mod input;
mod scene;
mod sync;

use bevy::prelude::*;

pub use components::{CandidateMappings, OfficeGameResource};

use input::handle_input;
use scene::setup_scene;
use sync::{sync_candidates, sync_doors, tick_game, update_hud};

/// Plugin to register all UI systems
pub struct HiringSimUIPlugin;

impl Plugin for HiringSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OfficeGameResource>()
            .init_resource::<CandidateMappings>()
            .add_systems(Startup, setup_scene)
            .add_systems(FixedUpdate, tick_game)
            .add_systems(
                Update,
                (sync_candidates, sync_doors, update_hud, handle_input),
            );
    }
}
