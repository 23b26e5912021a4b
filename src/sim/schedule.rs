//! Periodic spawn and speed-ramp timers
//!
//! Timers never touch the state directly. They are polled against the game
//! clock at the start of each frame and turned into `Command`s, which the
//! frame applies before it moves anything.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Maximum spawn firings per poll (prevents an obstacle burst after a long stall)
pub const MAX_CATCH_UP: u32 = 8;

/// A queued state mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Append one obstacle at a random column
    SpawnObstacle,
    /// Raise fall speed by the configured amount
    RampSpeed,
}

/// A fixed-period timer measured in game milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    pub period_ms: f64,
    /// Elapsed time at which the next firing is due
    pub next_due_ms: f64,
    /// Firings allowed per poll; the rest are skipped (None = fire all)
    pub max_catch_up: Option<u32>,
}

impl Interval {
    /// First firing one period after the start of the round; never skips
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: period_ms,
            max_catch_up: None,
        }
    }

    /// Like `new`, but at most `max` firings per poll
    pub fn bounded(period_ms: f64, max: u32) -> Self {
        Self {
            max_catch_up: Some(max),
            ..Self::new(period_ms)
        }
    }

    /// Collect due times up to `elapsed_ms`, advancing the timer
    pub fn due_times(&mut self, elapsed_ms: f64) -> Vec<f64> {
        let limit = self.max_catch_up.map_or(usize::MAX, |m| m as usize);
        let mut times = Vec::new();
        while self.next_due_ms <= elapsed_ms && times.len() < limit {
            times.push(self.next_due_ms);
            self.next_due_ms += self.period_ms;
        }
        // Drop firings that exceeded the catch-up budget
        if self.next_due_ms <= elapsed_ms {
            let skipped = ((elapsed_ms - self.next_due_ms) / self.period_ms).floor() + 1.0;
            log::debug!("Timer skipped {} firings after a stall", skipped);
            self.next_due_ms += skipped * self.period_ms;
        }
        times
    }
}

/// Owns the spawn and ramp timers plus externally pushed commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler {
    pub spawn: Interval,
    pub ramp: Interval,
    queue: VecDeque<Command>,
    cancelled: bool,
}

impl Scheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn: Interval::bounded(config.spawn_interval_ms, MAX_CATCH_UP),
            ramp: Interval::new(config.ramp_interval_ms),
            queue: VecDeque::new(),
            cancelled: false,
        }
    }

    /// Queue a command for the start of the next frame
    pub fn push(&mut self, command: Command) {
        if !self.cancelled {
            self.queue.push_back(command);
        }
    }

    /// Commands to apply this frame: pushed ones first, then due timers in
    /// due-time order (spawn before ramp on ties)
    pub fn drain(&mut self, elapsed_ms: f64) -> Vec<Command> {
        if self.cancelled {
            return Vec::new();
        }

        let mut due: Vec<(f64, Command)> = self
            .spawn
            .due_times(elapsed_ms)
            .into_iter()
            .map(|t| (t, Command::SpawnObstacle))
            .collect();
        due.extend(
            self.ramp
                .due_times(elapsed_ms)
                .into_iter()
                .map(|t| (t, Command::RampSpeed)),
        );
        // Stable sort keeps spawn ahead of ramp at equal times
        due.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut commands: Vec<Command> = self.queue.drain(..).collect();
        commands.extend(due.into_iter().map(|(_, c)| c));
        commands
    }

    /// Stop producing commands for good
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.queue.clear();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> Scheduler {
        Scheduler::new(&GameConfig::default())
    }

    #[test]
    fn test_nothing_due_before_first_period() {
        let mut s = scheduler();
        assert!(s.drain(0.0).is_empty());
        assert!(s.drain(599.0).is_empty());
        assert_eq!(s.drain(600.0), vec![Command::SpawnObstacle]);
        assert!(s.drain(600.0).is_empty());
    }

    #[test]
    fn test_merges_timers_in_due_order() {
        let mut s = scheduler();
        // Spawns at 600, 1200, 1800; ramp at 1700
        let commands = s.drain(1800.0);
        assert_eq!(
            commands,
            vec![
                Command::SpawnObstacle,
                Command::SpawnObstacle,
                Command::RampSpeed,
                Command::SpawnObstacle,
            ]
        );
    }

    #[test]
    fn test_pushed_commands_come_first() {
        let mut s = scheduler();
        s.push(Command::RampSpeed);
        assert_eq!(
            s.drain(600.0),
            vec![Command::RampSpeed, Command::SpawnObstacle]
        );
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let mut s = scheduler();
        let commands = s.drain(60_000.0);
        let spawns = commands
            .iter()
            .filter(|c| **c == Command::SpawnObstacle)
            .count();
        assert_eq!(spawns, MAX_CATCH_UP as usize);
        // Every ramp that came due still fires: 1700, 3400, ..., 59500
        let ramps = commands
            .iter()
            .filter(|c| **c == Command::RampSpeed)
            .count();
        assert_eq!(ramps, 35);
        // Timer resumes after the stall instead of replaying it
        assert!(s.spawn.next_due_ms > 60_000.0);
        assert!(s.drain(60_000.0).is_empty());
    }

    #[test]
    fn test_cancel_stops_everything() {
        let mut s = scheduler();
        s.push(Command::SpawnObstacle);
        s.cancel();
        s.push(Command::RampSpeed);
        assert!(s.is_cancelled());
        assert!(s.drain(10_000.0).is_empty());
    }
}
