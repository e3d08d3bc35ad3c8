//! Input handling for the game screen.
//!
//! Maps terminal key and mouse events to game inputs and runs the quit
//! confirmation before anything reaches the scene.

use crate::audio::SoundEffect;
use crate::flappy::FlappyScene;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Input actions for Flappy Duck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Jump (Space, Up, Enter or a pointer press).
    Jump,
    /// Quit (Esc or q), confirmed by pressing it twice.
    Quit,
    /// Quit without confirmation (Ctrl+C).
    ForceQuit,
    /// Any other key.
    Other,
}

pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let input = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => GameInput::ForceQuit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => GameInput::Jump,
        KeyCode::Esc | KeyCode::Char('q') => GameInput::Quit,
        _ => GameInput::Other,
    };
    Some(input)
}

pub fn map_mouse_event(mouse: MouseEvent) -> Option<GameInput> {
    match mouse.kind {
        MouseEventKind::Down(_) => Some(GameInput::Jump),
        _ => None,
    }
}

/// Result of handling an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Continue the game loop, playing any cues the input produced.
    Continue(Vec<SoundEffect>),
    /// Leave the game loop.
    Quit,
}

/// Front-end input state that lives outside the scene.
#[derive(Debug, Default)]
pub struct InputState {
    pub quit_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one input. A pending quit swallows the next non-quit input.
    pub fn process(&mut self, scene: &mut FlappyScene, input: GameInput) -> InputResult {
        match input {
            GameInput::ForceQuit => InputResult::Quit,
            GameInput::Quit => {
                if self.quit_pending {
                    InputResult::Quit
                } else {
                    self.quit_pending = true;
                    InputResult::Continue(Vec::new())
                }
            }
            GameInput::Jump => {
                if self.quit_pending {
                    self.quit_pending = false;
                    return InputResult::Continue(Vec::new());
                }
                InputResult::Continue(scene.jump())
            }
            GameInput::Other => {
                self.quit_pending = false;
                InputResult::Continue(Vec::new())
            }
        }
    }
}
