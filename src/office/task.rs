//! The stage task: hiring goal and optional countdown

#[derive(Debug, Clone, PartialEq)]
pub struct TaskTimer {
    pub hires: u32,
    pub content: String,
    duration_ms: Option<u64>,
    remaining_ms: Option<u64>,
    running: bool,
}

impl TaskTimer {
    pub fn new(hires: u32, duration_secs: Option<u32>, content: &str) -> Self {
        let duration_ms = duration_secs.map(|secs| u64::from(secs) * 1000);
        Self {
            hires,
            content: content.to_string(),
            duration_ms,
            remaining_ms: duration_ms,
            running: duration_ms.is_some(),
        }
    }

    pub fn shows_timer(&self) -> bool {
        self.duration_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.remaining_ms
    }

    /// Advance the countdown; returns true only on the tick it runs out
    pub fn tick(&mut self, delta_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        match self.remaining_ms.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(delta_ms);
                if *remaining == 0 {
                    self.running = false;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Stop the countdown until the stage is started again
    pub fn reset(&mut self) {
        self.remaining_ms = self.duration_ms;
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
