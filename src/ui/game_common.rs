//! Screen frame around the play field: border, status bar, info panel, banners.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const INFO_PANEL_WIDTH: u16 = 22;
pub const STATUS_BAR_HEIGHT: u16 = 2;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Areas returned by `split_screen`.
pub struct ScreenLayout {
    /// Everything left of the info panel and above the status bar
    pub field: Rect,
    pub status_bar: Rect,
    pub info_panel: Rect,
}

/// Draw the titled outer border and split what is inside it.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [field]                       │  [info]     │
/// │                                 │             │
/// │ [status bar]                    │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn split_screen(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> ScreenLayout {
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [left, info_panel] = split2(
        inner,
        Direction::Horizontal,
        [Constraint::Min(0), Constraint::Length(INFO_PANEL_WIDTH)],
    );
    let [field, status_bar] = split2(
        left,
        Direction::Vertical,
        [Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)],
    );

    ScreenLayout {
        field,
        status_bar,
        info_panel,
    }
}

fn split2(area: Rect, direction: Direction, constraints: [Constraint; 2]) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    [chunks[0], chunks[1]]
}

/// Largest rectangle inside `field` showing a `world_w` x `world_h` world
/// undistorted, centered.
pub fn fit_play_area(field: Rect, world_w: f64, world_h: f64) -> Rect {
    if field.width == 0 || field.height == 0 || world_w <= 0.0 || world_h <= 0.0 {
        return Rect { width: 0, height: 0, ..field };
    }
    let cols_per_row = world_w / world_h * CELL_ASPECT;
    let mut width = field.width;
    let mut height = (width as f64 / cols_per_row).floor() as u16;
    if height > field.height {
        height = field.height;
        width = ((height as f64 * cols_per_row).floor() as u16).min(field.width);
    }
    Rect {
        x: field.x + (field.width - width) / 2,
        y: field.y + (field.height - height) / 2,
        width,
        height,
    }
}

/// Status message on the first line, `[key] action` hints on the second.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    let mut lines = vec![Line::from(Span::styled(
        status_text.to_string(),
        Style::default().fg(status_color),
    ))];

    let hints: Vec<Span> = controls
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i == 0 { "" } else { "  " };
            [
                Span::raw(gap),
                Span::styled(key.to_string(), Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    if !hints.is_empty() {
        lines.push(Line::from(hints));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Centered box over the play field. Only the box itself is cleared.
pub fn render_banner(frame: &mut Frame, area: Rect, color: Color, title: &str, lines: &[String]) {
    let text_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0) as u16;
    let banner_width = (text_width + 6).min(area.width);
    let banner_height = (lines.len() as u16 + 4).min(area.height);
    if banner_width < 4 || banner_height < 3 {
        return;
    }

    let banner_area = Rect {
        x: area.x + (area.width - banner_width) / 2,
        y: area.y + (area.height - banner_height) / 2,
        width: banner_width,
        height: banner_height,
    };
    frame.render_widget(Clear, banner_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(banner_area);
    frame.render_widget(block, banner_area);

    let mut text = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    text.extend(
        lines
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(Color::White)))),
    );
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

/// Bordered " Info " box. Returns the area inside it.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

pub const QUIT_STATUS_TEXT: &str = "Quit game?";
pub const QUIT_STATUS_COLOR: Color = Color::Red;
pub const QUIT_CONTROLS: &[(&str, &str)] = &[("[Esc]", "Confirm"), ("[Any]", "Cancel")];

/// Quit confirmation in place of the normal status. Returns `true` if drawn.
pub fn render_quit_status_bar(frame: &mut Frame, area: Rect, quit_pending: bool) -> bool {
    if quit_pending {
        render_status_bar(frame, area, QUIT_STATUS_TEXT, QUIT_STATUS_COLOR, QUIT_CONTROLS);
    }
    quit_pending
}
