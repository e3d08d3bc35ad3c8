//! Messages browsers send over the WebSocket.
//!
//! `{"key": " "}`, `{"key": "Escape"}` or `{"pointer": "down"}`.

use crate::input::GameInput;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerAction {
    Down,
    Up,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WebInput {
    Key { key: String },
    Pointer { pointer: PointerAction },
}

impl WebInput {
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Key names follow the browser's `KeyboardEvent.key`.
    pub fn to_game_input(&self) -> Option<GameInput> {
        match self {
            WebInput::Key { key } => Some(match key.as_str() {
                " " | "Space" | "ArrowUp" | "Up" | "Enter" => GameInput::Jump,
                "Escape" | "q" => GameInput::Quit,
                _ => GameInput::Other,
            }),
            WebInput::Pointer {
                pointer: PointerAction::Down,
            } => Some(GameInput::Jump),
            WebInput::Pointer {
                pointer: PointerAction::Up,
            } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> Option<GameInput> {
        WebInput::parse(text).and_then(|msg| msg.to_game_input())
    }

    #[test]
    fn test_jump_messages() {
        assert_eq!(input(r#"{"key": " "}"#), Some(GameInput::Jump));
        assert_eq!(input(r#"{"key": "ArrowUp"}"#), Some(GameInput::Jump));
        assert_eq!(input(r#"{"pointer": "down"}"#), Some(GameInput::Jump));
    }

    #[test]
    fn test_quit_and_other_keys() {
        assert_eq!(input(r#"{"key": "Escape"}"#), Some(GameInput::Quit));
        assert_eq!(input(r#"{"key": "x"}"#), Some(GameInput::Other));
    }

    #[test]
    fn test_pointer_release_ignored() {
        assert_eq!(
            WebInput::parse(r#"{"pointer": "up"}"#),
            Some(WebInput::Pointer {
                pointer: PointerAction::Up
            })
        );
        assert_eq!(input(r#"{"pointer": "up"}"#), None);
    }

    #[test]
    fn test_malformed_messages() {
        assert_eq!(WebInput::parse("not json"), None);
        assert_eq!(WebInput::parse(r#"{"pointer": "sideways"}"#), None);
        assert_eq!(WebInput::parse(r#"{"mouse": 1}"#), None);
    }
}
