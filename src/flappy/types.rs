//! Flappy Duck data structures.
//!
//! Everything that belongs to one round lives in `RoundState`, owned by the
//! scene and handed to the collision handler by `&mut`.

use super::spawner::PipePairSpec;
use crate::arcade::{Animation, AnimationPlayer, Body, TimerQueue, WorldBounds};
use crate::audio::SoundEffect;
use crate::core::config::GameConfig;
use crate::core::constants::*;

/// Whether the simulation is stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Physics frozen; timers still run so the wake timer can fire.
    Sleeping,
}

/// Fire-and-forget timer payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTimer {
    /// Drop the jump impulse.
    CancelJump,
    /// Freeze the loop until the first jump.
    SleepLoop,
    /// Resume after the first jump.
    WakeLoop,
}

/// The player.
#[derive(Debug, Clone)]
pub struct Duck {
    pub body: Body,
    pub animation: AnimationPlayer,
}

impl Duck {
    pub fn spawn(x: f64, y: f64) -> Self {
        let body = Body::new(x, y, DUCK_SIZE, DUCK_SIZE)
            .with_gravity_y(DUCK_GRAVITY_Y)
            .with_max_velocity(DUCK_MAX_VELOCITY_X, DUCK_MAX_VELOCITY_Y)
            .with_world_bounds();
        let animation = AnimationPlayer::new(Animation::from_range(
            "duckAnimation",
            DUCK_FIRST_FRAME,
            DUCK_LAST_FRAME,
            DUCK_FRAME_RATE,
            DUCK_ANIMATION_REPEAT,
        ));
        Self { body, animation }
    }
}

/// Top and bottom obstacles sharing one offset.
#[derive(Debug, Clone)]
pub struct PipePair {
    pub id: u64,
    pub offset: i64,
    pub top: Body,
    pub bottom: Body,
}

impl PipePair {
    pub fn from_spec(id: u64, spec: &PipePairSpec, config: &GameConfig) -> Self {
        let top = Body::new(spec.x, spec.top_y, config.pipe_width, config.pipe_height)
            .with_velocity_x(config.pipe_velocity_x)
            .immovable()
            .flipped_y();
        let bottom = Body::new(spec.x, spec.bottom_y, config.pipe_width, config.pipe_height)
            .with_velocity_x(config.pipe_velocity_x)
            .immovable();
        Self {
            id,
            offset: spec.offset,
            top,
            bottom,
        }
    }

    pub fn gap_top(&self) -> f64 {
        self.top.bounds().bottom
    }

    pub fn gap_bottom(&self) -> f64 {
        self.bottom.bounds().top
    }
}

/// Invisible full-height strip trailing a pipe pair.
#[derive(Debug, Clone)]
pub struct ScoreTrigger {
    pub id: u64,
    pub body: Body,
}

impl ScoreTrigger {
    pub fn from_spec(id: u64, spec: &PipePairSpec, config: &GameConfig) -> Self {
        let body = Body::new(
            spec.trigger_x,
            spec.trigger_y,
            SCORE_TRIGGER_WIDTH,
            spec.trigger_height,
        )
        .with_velocity_x(config.pipe_velocity_x);
        Self { id, body }
    }
}

/// Per-round state, rebuilt from scratch on every restart.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub duck: Duck,
    pub pipes: Vec<PipePair>,
    pub triggers: Vec<ScoreTrigger>,
    pub score: u32,
    /// Mirror of the score shown on screen
    pub score_text: String,
    pub loop_state: LoopState,
    /// One-shot first-jump handler still armed
    pub awaiting_first_jump: bool,
    pub timers: TimerQueue<SceneTimer>,
    pub world: WorldBounds,
    next_id: u64,
}

impl RoundState {
    /// Fresh round. `shown_score` is what the score text starts out showing.
    pub fn new(config: &GameConfig, shown_score: u32) -> Self {
        let (x, y) = config.duck_spawn();
        Self {
            duck: Duck::spawn(x, y),
            pipes: Vec::new(),
            triggers: Vec::new(),
            score: 0,
            score_text: shown_score.to_string(),
            loop_state: LoopState::Running,
            awaiting_first_jump: config.variant.has_pipes(),
            timers: TimerQueue::new(),
            world: WorldBounds::new(config.width(), config.height()),
            next_id: 0,
        }
    }

    pub fn is_sleeping(&self) -> bool {
        self.loop_state == LoopState::Sleeping
    }

    /// Add a pipe pair and its trigger. Returns the pair id.
    pub fn add_pipe_pair(&mut self, spec: &PipePairSpec, config: &GameConfig) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.pipes.push(PipePair::from_spec(id, spec, config));
        self.triggers.push(ScoreTrigger::from_spec(id, spec, config));
        id
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
        self.score_text = score.to_string();
    }
}

/// What happened during one call into the scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Sound cues to play, in order
    pub sounds: Vec<SoundEffect>,
    /// Physics steps taken
    pub steps: u32,
    /// Score triggers crossed
    pub points_scored: u32,
    /// Pipe pairs spawned by score triggers
    pub pipes_spawned: u32,
    /// Pipe pairs culled after leaving the screen
    pub pipes_removed: u32,
    /// The round ended in a collision and was restarted
    pub restarted: bool,
}

impl FrameOutcome {
    pub fn merge(&mut self, other: FrameOutcome) {
        self.sounds.extend(other.sounds);
        self.steps += other.steps;
        self.points_scored += other.points_scored;
        self.pipes_spawned += other.pipes_spawned;
        self.pipes_removed += other.pipes_removed;
        self.restarted |= other.restarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameVariant;

    #[test]
    fn test_new_round_defaults() {
        let config = GameConfig::default();
        let round = RoundState::new(&config, 7);
        assert_eq!(round.score, 0);
        assert_eq!(round.score_text, "7");
        assert!(round.pipes.is_empty());
        assert!(round.triggers.is_empty());
        assert!(round.awaiting_first_jump);
        assert_eq!(round.loop_state, LoopState::Running);
        assert_eq!((round.duck.body.x, round.duck.body.y), (400.0, 250.0));
    }

    #[test]
    fn test_prototype_round_has_no_first_jump_handler() {
        let config = GameConfig {
            variant: GameVariant::Prototype,
            ..GameConfig::default()
        };
        assert!(!RoundState::new(&config, 0).awaiting_first_jump);
    }

    #[test]
    fn test_pipe_pair_gap_matches_config() {
        let config = GameConfig::default();
        let spec = PipePairSpec {
            sequence: 0,
            offset: 20,
            x: 852.0,
            top_y: 20.0,
            bottom_y: 490.0,
            trigger_x: 878.0,
            trigger_y: 250.0,
            trigger_height: 500.0,
        };
        let pair = PipePair::from_spec(0, &spec, &config);
        assert_eq!(pair.gap_top(), 180.0);
        assert_eq!(pair.gap_bottom(), 330.0);
        assert!(pair.top.flip_y && pair.top.immovable && pair.bottom.immovable);
        assert_eq!(pair.top.velocity_x, -100.0);
    }

    #[test]
    fn test_add_pipe_pair_assigns_ids() {
        let config = GameConfig::default();
        let mut round = RoundState::new(&config, 0);
        let spec = PipePairSpec {
            sequence: 0,
            offset: 0,
            x: 852.0,
            top_y: 0.0,
            bottom_y: 470.0,
            trigger_x: 878.0,
            trigger_y: 250.0,
            trigger_height: 500.0,
        };
        assert_eq!(round.add_pipe_pair(&spec, &config), 0);
        assert_eq!(round.add_pipe_pair(&spec, &config), 1);
        assert_eq!(round.pipes.len(), 2);
        assert_eq!(round.triggers[1].id, 1);
        assert_eq!(round.triggers[0].body.height, 500.0);
    }

    #[test]
    fn test_set_score_mirrors_text() {
        let mut round = RoundState::new(&GameConfig::default(), 0);
        round.set_score(12);
        assert_eq!(round.score_text, "12");
    }
}
