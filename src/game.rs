//! Frame controller
//!
//! `Game` owns the one live `GameState` and runs the per-frame contract:
//! apply due timer commands, draw the scene, step the simulation, and on the
//! frame the round ends draw the final screen once and go quiet.

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::platform::{Clock, InputEvent, InputState};
use crate::renderer::{Hud, Surface, draw_game_over, draw_scene};
use crate::sim::{
    Arena, Command, EndReason, GameEvent, GameState, Scheduler, Spawner, TickInput, apply_command,
    autopilot, tick,
};

/// What the caller should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Still running; request another frame
    Continue,
    /// The round ended this frame and the final screen was drawn
    Ended,
    /// Nothing happened (already ended or stopped)
    Halted,
}

impl FrameOutcome {
    pub fn wants_next_frame(&self) -> bool {
        *self == FrameOutcome::Continue
    }
}

/// One round of the game bound to its surface and clock
pub struct Game<S, C> {
    state: GameState,
    scheduler: Scheduler,
    spawner: Spawner,
    input: InputState,
    surface: S,
    clock: C,
    start_ms: f64,
    stopped: bool,
}

impl<S: Surface, C: Clock> Game<S, C> {
    /// Start a round now; surface size is read once here
    pub fn new(config: GameConfig, surface: S, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let (width, height) = surface.size();
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::invalid(
                "surface",
                format!("size must be positive, got {}x{}", width, height),
            ));
        }

        let start_ms = clock.now_ms();
        let seed = config.seed.unwrap_or(start_ms as u64);
        let arena = Arena::new(width, height, &config);

        log::info!(
            "Round started: {}x{} surface, seed {}, {:.0}s",
            width,
            height,
            seed,
            config.duration_ms / 1000.0
        );

        Ok(Self {
            state: GameState::new(arena, &config),
            scheduler: Scheduler::new(&config),
            spawner: Spawner::new(seed),
            input: InputState::default(),
            surface,
            clock,
            start_ms,
            stopped: false,
        })
    }

    /// Run one frame
    pub fn frame(&mut self) -> FrameOutcome {
        if self.stopped || !self.state.is_running() {
            return FrameOutcome::Halted;
        }

        let elapsed_ms = (self.clock.now_ms() - self.start_ms).max(0.0);

        // Timer work lands before anything moves or draws
        for command in self.scheduler.drain(elapsed_ms) {
            if let Some(event) = apply_command(&mut self.state, &mut self.spawner, command) {
                log_event(&event);
            }
        }

        draw_scene(&mut self.surface, &self.state);

        let direction = if self.input.autopilot {
            autopilot::steer(&self.state)
        } else {
            self.input.direction
        };
        let events = tick(&mut self.state, &TickInput { direction }, elapsed_ms);
        for event in &events {
            log_event(event);
        }

        if self.state.is_running() {
            return FrameOutcome::Continue;
        }

        self.scheduler.cancel();
        draw_game_over(&mut self.surface, &self.state);
        log::info!(
            "Round over ({:?}): score {} after {:.1}s",
            self.state.end_reason,
            self.state.score,
            elapsed_ms / 1000.0
        );
        FrameOutcome::Ended
    }

    /// Halt the loop: no more commands, mutation or drawing
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.scheduler.cancel();
        self.state.end(EndReason::Stopped);
        log::info!("Game stopped at score {}", self.state.score);
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        let on = self.input.toggle_autopilot();
        log::info!("Autopilot: {}", on);
        on
    }

    /// Queue a command for the start of the next frame
    pub fn enqueue(&mut self, command: Command) {
        if !self.stopped && self.state.is_running() {
            self.scheduler.push(command);
        }
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::HazardHit { id } => log::info!("Hazard {} hit", id),
        GameEvent::TimeUp => log::info!("Time up"),
        other => log::debug!("{:?}", other),
    }
}
