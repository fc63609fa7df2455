//! A scripted player used by headless runs and tests

use anyhow::Result;
use log::debug;

use super::game::OfficeGame;
use super::stage::StagePhase;

/// Hires anyone whose CV totals at least `accept_threshold`
#[derive(Debug, Clone, Copy)]
pub struct AutoPlayer {
    pub accept_threshold: u32,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self {
            accept_threshold: 20,
        }
    }
}

impl AutoPlayer {
    pub fn new(accept_threshold: u32) -> Self {
        Self { accept_threshold }
    }

    /// Take at most one action in the game
    pub fn act(&self, game: &mut OfficeGame) -> Result<()> {
        match game.office().phase() {
            StagePhase::Idle | StagePhase::Instructed => game.acknowledge_instructions(),
            StagePhase::RetryPrompted => game.acknowledge_retry(),
            StagePhase::Completed => Ok(()),
            StagePhase::Running => self.evaluate(game),
        }
    }

    fn evaluate(&self, game: &mut OfficeGame) -> Result<()> {
        if let Some(occupant) = game.office().tray().occupant() {
            // Wait until they have reached the spotlight
            if game.tweens().active_for(occupant).is_some() {
                return Ok(());
            }
            let score = game.office().records().get(occupant.0)?.total_score();
            debug!("Candidate {} scored {}", occupant, score);
            return if score >= self.accept_threshold {
                game.accept()
            } else {
                game.reject()
            };
        }

        let next = game
            .office()
            .queue()
            .in_line()
            .into_iter()
            .find(|person| game.tweens().active_for(person.id).is_none())
            .map(|person| person.id);
        match next {
            Some(id) => {
                game.view_cv(id)?;
                game.spotlight(id)
            }
            None => Ok(()),
        }
    }

    /// Play until every stage is done or `max_ticks` have passed
    ///
    /// Returns the number of ticks used.
    pub fn play(&self, game: &mut OfficeGame, delta_ms: u64, max_ticks: u32) -> Result<u32> {
        let mut ticks = 0;
        while !game.is_finished() && ticks < max_ticks {
            self.act(game)?;
            game.tick(delta_ms)?;
            ticks += 1;
        }
        Ok(ticks)
    }
}
