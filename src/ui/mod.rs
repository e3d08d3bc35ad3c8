pub mod flappy_scene;
pub mod game_common;

pub use flappy_scene::render_game;
