//! Office doors that open while a candidate walks through them

use super::types::Exit;

/// Frames in the door sprite sheet
pub const DOOR_FRAMES: u32 = 6;
/// Time each sprite sheet frame stays on screen
pub const DOOR_FRAME_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorDirection {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub exit: Exit,
    /// Anchor in uv units
    pub x: f32,
    /// Sprite sheet frame, 0 = closed
    pub frame: u32,
    pub playing: Option<DoorDirection>,
    /// How many times the door has opened
    pub openings: usize,
    /// Time accumulated towards the next frame
    frame_elapsed_ms: u64,
}

impl Door {
    pub fn new(exit: Exit, x: f32) -> Self {
        Self {
            exit,
            x,
            frame: 0,
            playing: None,
            openings: 0,
            frame_elapsed_ms: 0,
        }
    }

    pub fn play_animation(&mut self, direction: DoorDirection) {
        if direction == DoorDirection::Forward {
            self.openings += 1;
        }
        self.playing = Some(direction);
        self.frame_elapsed_ms = 0;
    }

    /// Advance the animation by `delta_ms` of game time
    pub fn step(&mut self, delta_ms: u64) {
        if self.playing.is_none() {
            return;
        }
        self.frame_elapsed_ms += delta_ms;
        while self.playing.is_some() && self.frame_elapsed_ms >= DOOR_FRAME_MS {
            self.frame_elapsed_ms -= DOOR_FRAME_MS;
            self.advance_frame();
        }
        if self.playing.is_none() {
            self.frame_elapsed_ms = 0;
        }
    }

    fn advance_frame(&mut self) {
        match self.playing {
            Some(DoorDirection::Forward) => {
                if self.frame + 1 >= DOOR_FRAMES {
                    self.frame = DOOR_FRAMES - 1;
                    self.playing = None;
                } else {
                    self.frame += 1;
                }
            }
            Some(DoorDirection::Reverse) => {
                if self.frame == 0 {
                    self.playing = None;
                } else {
                    self.frame -= 1;
                }
            }
            None => {}
        }
    }

    pub fn is_open(&self) -> bool {
        self.frame > 0
    }

    /// Snap back to the closed frame
    pub fn reset(&mut self) {
        self.frame = 0;
        self.playing = None;
        self.frame_elapsed_ms = 0;
    }
}
