//! UI rendering for the Flappy Duck scene.

use crate::core::constants::{SCORE_TEXT_X, SCORE_TEXT_Y};
use crate::flappy::{FlappyScene, RoundState};
use crate::level::TileLayer;
use crate::ui::game_common::{
    fit_play_area, render_banner, render_info_panel_frame, render_quit_status_bar,
    render_status_bar, split_screen,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PIPE_COLOR: Color = Color::Rgb(83, 160, 47);
const PIPE_LIP_COLOR: Color = Color::Rgb(156, 230, 89);
const DUCK_COLOR: Color = Color::Rgb(250, 212, 60);
const SCORE_COLOR: Color = Color::Black;

/// Depth of the lighter band at the open end of each pipe, in world units.
const PIPE_LIP_DEPTH: f64 = 24.0;

/// Render the whole game screen.
pub fn render_game(frame: &mut Frame, area: Rect, scene: &FlappyScene, quit_pending: bool) {
    let title = format!(" {} ", scene.config().variant.name());
    let layout = split_screen(frame, area, &title, Color::Cyan);
    let config = scene.config();
    let play = fit_play_area(layout.field, config.width(), config.height());

    render_play_area(frame, play, scene);
    render_status_bar_content(frame, layout.status_bar, scene, quit_pending);
    render_info_panel(frame, layout.info_panel, scene);

    if scene.is_ready_screen() {
        render_ready_banner(frame, play, scene);
    }
}

/// Map a terminal cell to the world point at its center.
pub fn cell_to_world(area: Rect, col: u16, row: u16, world_w: f64, world_h: f64) -> (f64, f64) {
    let x = (col as f64 + 0.5) * world_w / area.width.max(1) as f64;
    let y = (row as f64 + 0.5) * world_h / area.height.max(1) as f64;
    (x, y)
}

/// Map a world point to the terminal cell containing it, if it is on screen.
pub fn world_to_cell(area: Rect, x: f64, y: f64, world_w: f64, world_h: f64) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 || x >= world_w || y >= world_h {
        return None;
    }
    let col = (x / world_w * area.width as f64) as u16;
    let row = (y / world_h * area.height as f64) as u16;
    Some((col.min(area.width.saturating_sub(1)), row.min(area.height.saturating_sub(1))))
}

/// Background for a tile index. Unknown tiles render blank.
pub fn tile_style(tile: u16, checker: bool) -> Style {
    let bg = match (tile, checker) {
        (104, false) => Color::Rgb(136, 192, 112),
        (104, true) => Color::Rgb(124, 180, 100),
        _ => Color::Reset,
    };
    Style::default().bg(bg)
}

fn duck_glyph(round: &RoundState) -> &'static str {
    let duck = &round.duck;
    if duck.animation.is_playing() {
        return match duck.animation.current_frame() % 2 {
            0 => "▲",
            _ => "►",
        };
    }
    if duck.body.velocity_y > 300.0 {
        "▼"
    } else {
        "►"
    }
}

/// What occupies a world point, ignoring the duck and the score text.
fn pipe_style_at(round: &RoundState, x: f64, y: f64) -> Option<Style> {
    for pair in &round.pipes {
        let top = pair.top.bounds();
        let bottom = pair.bottom.bounds();
        if top.contains_point(x, y) {
            let lip = top.bottom - y <= PIPE_LIP_DEPTH;
            return Some(pipe_style(lip));
        }
        if bottom.contains_point(x, y) {
            let lip = y - bottom.top <= PIPE_LIP_DEPTH;
            return Some(pipe_style(lip));
        }
    }
    None
}

fn pipe_style(lip: bool) -> Style {
    Style::default().fg(if lip { PIPE_LIP_COLOR } else { PIPE_COLOR })
}

fn background_style(background: &TileLayer, x: f64, y: f64) -> Style {
    match background.tile_at(x, y) {
        Some(tile) => {
            let (col, row) = background.cell_at(x, y);
            tile_style(tile, (col + row) % 2 == 1)
        }
        None => Style::default(),
    }
}

/// Render the play area: tile background, pipes, score text and duck.
fn render_play_area(frame: &mut Frame, area: Rect, scene: &FlappyScene) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let config = scene.config();
    let round = scene.round();
    let (world_w, world_h) = (config.width(), config.height());

    let duck_cell = world_to_cell(area, round.duck.body.x, round.duck.body.y, world_w, world_h);
    let score_cell = if config.variant.has_pipes() {
        world_to_cell(area, SCORE_TEXT_X, SCORE_TEXT_Y, world_w, world_h)
    } else {
        None
    };
    let score_chars: Vec<char> = round.score_text.chars().collect();

    let mut lines = Vec::with_capacity(area.height as usize);
    for row in 0..area.height {
        let mut spans = Vec::with_capacity(area.width as usize);
        for col in 0..area.width {
            let (x, y) = cell_to_world(area, col, row, world_w, world_h);
            let bg = background_style(scene.background(), x, y);

            if duck_cell == Some((col, row)) {
                spans.push(Span::styled(
                    duck_glyph(round),
                    bg.fg(DUCK_COLOR).add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            if let Some((score_col, score_row)) = score_cell {
                if row == score_row && col >= score_col {
                    if let Some(ch) = score_chars.get((col - score_col) as usize) {
                        spans.push(Span::styled(
                            ch.to_string(),
                            bg.fg(SCORE_COLOR).add_modifier(Modifier::BOLD),
                        ));
                        continue;
                    }
                }
            }

            match pipe_style_at(round, x, y) {
                Some(style) => spans.push(Span::styled("█", bg.patch(style))),
                None => spans.push(Span::styled(" ", bg)),
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the status bar at the bottom.
fn render_status_bar_content(frame: &mut Frame, area: Rect, scene: &FlappyScene, quit_pending: bool) {
    if render_quit_status_bar(frame, area, quit_pending) {
        return;
    }

    let controls = [("[Space/Click]", "Jump"), ("[Esc]", "Quit")];
    if scene.is_ready_screen() {
        render_status_bar(
            frame,
            area,
            "Press Space or click to start!",
            Color::Yellow,
            &controls,
        );
    } else if scene.config().variant.has_pipes() {
        render_status_bar(
            frame,
            area,
            &format!("Score: {}", scene.round().score),
            Color::Green,
            &controls,
        );
    } else {
        render_status_bar(frame, area, "Jump and fall", Color::Green, &controls);
    }
}

/// Render the info panel on the right.
fn render_info_panel(frame: &mut Frame, area: Rect, scene: &FlappyScene) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from("")];
    if scene.config().variant.has_pipes() {
        let round = scene.round();
        lines.push(Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(round.score.to_string(), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Best:  ", label),
            Span::styled(scene.best_score().to_string(), Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Round: ", label),
            Span::styled(scene.rounds_played().to_string(), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Pipes: ", label),
            Span::styled(round.pipes.len().to_string(), Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Cleared: ", label),
            Span::styled(scene.pipes_cleared().to_string(), value),
        ]));
    } else {
        lines.push(Line::from(Span::styled(" Prototype", value)));
        lines.push(Line::from(Span::styled(" No pipes, no score", label)));
    }

    let state = if scene.round().is_sleeping() {
        ("Paused", Color::Yellow)
    } else {
        ("Running", Color::Green)
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Loop:  ", label),
        Span::styled(state.0, Style::default().fg(state.1)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_ready_banner(frame: &mut Frame, area: Rect, scene: &FlappyScene) {
    let mut lines = vec!["Press Space or click to flap".to_string()];
    if scene.rounds_played() > 1 {
        lines.push(format!("Last score: {}", scene.last_score()));
    }
    render_banner(frame, area, Color::Yellow, "FLAPPY DUCK", &lines);
}
