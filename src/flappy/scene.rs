//! Scene lifecycle: setup, fixed-step advance, jump input and restarts.

use super::collision::{detect_contacts, handle_contact, ContactResponse};
use super::spawner::{PipeGeometry, PipeSpawner};
use super::types::{FrameOutcome, LoopState, RoundState, SceneTimer};
use crate::audio::SoundEffect;
use crate::core::config::{ConfigError, GameConfig};
use crate::core::constants::*;
use crate::level::TileLayer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Top-level game object. Owns the config, the background layer, the pipe
/// stream and the current round.
#[derive(Debug)]
pub struct FlappyScene {
    config: GameConfig,
    background: TileLayer,
    /// None for the prototype variant
    spawner: Option<PipeSpawner<StdRng>>,
    round: RoundState,
    /// Score shown while waiting for the next round to start
    last_score: u32,
    best_score: u32,
    rounds_played: u32,
    /// Pipe pairs that scrolled off the left edge, over the whole session
    pipes_cleared: u32,
    /// Real time not yet consumed by fixed steps
    accumulator: f64,
}

impl FlappyScene {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let spawner = if config.variant.has_pipes() {
            let rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let geometry = PipeGeometry {
                canvas_height: config.height(),
                spawn_x: config.pipe_spawn_x(),
                pipe_width: config.pipe_width,
                pipe_height: config.pipe_height,
                gap: config.pipe_gap,
            };
            Some(PipeSpawner::new(geometry, rng)?)
        } else {
            None
        };

        let background = TileLayer::background(config.viewport_width, config.viewport_height);
        let round = RoundState::new(&config, 0);

        let mut scene = Self {
            config,
            background,
            spawner,
            round,
            last_score: 0,
            best_score: 0,
            rounds_played: 0,
            pipes_cleared: 0,
            accumulator: 0.0,
        };
        scene.setup();
        Ok(scene)
    }

    /// Build a fresh round: duck at spawn, first pipe pair, pending sleep.
    pub fn setup(&mut self) {
        self.round = RoundState::new(&self.config, self.last_score);
        self.accumulator = 0.0;

        if let Some(spawner) = self.spawner.as_mut() {
            spawner.restart();
            if let Some(spec) = spawner.next() {
                self.round.add_pipe_pair(&spec, &self.config);
            }
            self.round.timers.schedule(SLEEP_DELAY_MS, SceneTimer::SleepLoop);
        }

        self.rounds_played += 1;
        info!(
            round = self.rounds_played,
            variant = ?self.config.variant,
            "Round set up"
        );
    }

    /// Feed `dt` seconds of real time; runs as many fixed steps as fit.
    pub fn advance(&mut self, dt: f64) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        self.accumulator += dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= FIXED_DT && steps < MAX_FRAME_STEPS {
            self.accumulator -= FIXED_DT;
            steps += 1;
            outcome.merge(self.step(FIXED_DT));
            if outcome.restarted {
                break;
            }
        }
        if steps == MAX_FRAME_STEPS {
            // Drop the backlog instead of spiralling after a stall.
            self.accumulator = 0.0;
        }
        outcome
    }

    /// One fixed step: physics (when awake), culling, contacts, then timers.
    pub fn step(&mut self, dt: f64) -> FrameOutcome {
        let mut outcome = FrameOutcome {
            steps: 1,
            ..FrameOutcome::default()
        };

        if self.round.loop_state == LoopState::Running {
            self.step_bodies(dt, &mut outcome);
            self.pipes_cleared += outcome.pipes_removed;

            for contact in detect_contacts(&self.round) {
                let response = match self.spawner.as_mut() {
                    Some(spawner) => handle_contact(
                        &mut self.round,
                        contact,
                        spawner,
                        &self.config,
                        &mut outcome,
                    ),
                    None => ContactResponse::Continue,
                };
                if response == ContactResponse::RestartRound {
                    self.restart();
                    outcome.restarted = true;
                    return outcome;
                }
            }
        }

        for timer in self.round.timers.advance(dt) {
            self.fire_timer(timer);
        }
        outcome
    }

    fn step_bodies(&mut self, dt: f64, outcome: &mut FrameOutcome) {
        let world = self.round.world;
        let round = &mut self.round;

        round.duck.body.step(dt, &world);
        round.duck.animation.advance(dt);

        for pair in &mut round.pipes {
            pair.top.step(dt, &world);
            pair.bottom.step(dt, &world);
        }
        for trigger in &mut round.triggers {
            trigger.body.step(dt, &world);
        }

        // A pair goes away together once its top pipe has left the screen.
        let before = round.pipes.len();
        round.pipes.retain(|pair| !pair.top.is_off_left());
        let removed = before - round.pipes.len();
        if removed > 0 {
            outcome.pipes_removed += removed as u32;
            debug!(removed, "Pipes left the screen");
        }
        round.triggers.retain(|trigger| !trigger.body.is_off_left());
    }

    fn fire_timer(&mut self, timer: SceneTimer) {
        match timer {
            SceneTimer::CancelJump => self.round.duck.body.acceleration_y = 0.0,
            SceneTimer::SleepLoop => {
                self.round.loop_state = LoopState::Sleeping;
                debug!("Loop asleep");
            }
            SceneTimer::WakeLoop => {
                self.round.loop_state = LoopState::Running;
                debug!("Loop awake");
            }
        }
    }

    /// Jump input: impulse, animation and the timer that cancels the impulse.
    /// The first jump of a scoring round also wakes the loop and zeroes the score.
    pub fn jump(&mut self) -> Vec<SoundEffect> {
        let mut sounds = Vec::new();
        let round = &mut self.round;

        round.duck.body.acceleration_y = JUMP_ACCELERATION_Y;
        round.duck.animation.play();
        round.timers.schedule(JUMP_CANCEL_DELAY_MS, SceneTimer::CancelJump);

        if round.awaiting_first_jump {
            round.awaiting_first_jump = false;
            round.timers.schedule(WAKE_DELAY_MS, SceneTimer::WakeLoop);
            round.set_score(0);
            info!(round = self.rounds_played, "Round started");
        }

        if !self.config.variant.has_pipes() {
            sounds.push(SoundEffect::Quack);
        }
        sounds
    }

    /// Tear down the round and set up a new one. Entities, score and pending
    /// timers are all dropped.
    pub fn restart(&mut self) {
        let score = self.round.score;
        self.last_score = score;
        self.best_score = self.best_score.max(score);
        info!(score, best = self.best_score, "Round over");
        self.setup();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.round
    }

    pub fn background(&self) -> &TileLayer {
        &self.background
    }

    pub fn best_score(&self) -> u32 {
        self.best_score.max(self.round.score)
    }

    pub fn last_score(&self) -> u32 {
        self.last_score
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn pipes_cleared(&self) -> u32 {
        self.pipes_cleared
    }

    /// Waiting on the player before the round gets going.
    pub fn is_ready_screen(&self) -> bool {
        self.round.awaiting_first_jump
    }
}
