//! Terminal rendering of the world, status bar, info panel and mouth preview.

use crate::ui::game_common::{create_game_layout, render_panel_frame, render_status_bar};
use mouthflap::geometry::{Point, Rect as WorldRect};
use mouthflap::{BirdSprite, FrameResult, RenderSnapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::canvas::{Canvas, Line as CanvasLine},
    widgets::Paragraph,
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 30;
const PREVIEW_HEIGHT: u16 = 9;

/// Render one snapshot.
pub fn render_game(
    frame: &mut Frame,
    area: Rect,
    snapshot: &RenderSnapshot,
    controls: &[(&str, &str)],
) {
    let border = if snapshot.is_dead {
        Color::Red
    } else {
        Color::Cyan
    };
    let layout = create_game_layout(
        frame,
        area,
        " Mouth Flap ",
        border,
        INFO_PANEL_WIDTH,
        PREVIEW_HEIGHT,
    );

    render_world(frame, layout.world, snapshot);
    render_status_bar(
        frame,
        layout.status_bar,
        &snapshot.status_lines,
        status_color(&snapshot.classification),
        controls,
    );
    render_info_panel(frame, layout.info_panel, snapshot);
    render_mouth_preview(frame, layout.mouth_preview, snapshot);
}

/// World pixel at the center of a display cell.
fn cell_to_world(col: u16, row: u16, area: Rect, snapshot: &RenderSnapshot) -> Point {
    let x = (f64::from(col) + 0.5) * f64::from(snapshot.world_width) / f64::from(area.width);
    let y = (f64::from(row) + 0.5) * f64::from(snapshot.world_height) / f64::from(area.height);
    Point::new(x as i32, y as i32)
}

/// Display cell holding a world pixel.
fn world_to_cell(p: Point, area: Rect, snapshot: &RenderSnapshot) -> (i32, i32) {
    let col = f64::from(p.x) * f64::from(area.width) / f64::from(snapshot.world_width);
    let row = f64::from(p.y) * f64::from(area.height) / f64::from(snapshot.world_height);
    (col.floor() as i32, row.floor() as i32)
}

fn render_world(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    if area.width == 0 || area.height == 0 || snapshot.world_width <= 0 || snapshot.world_height <= 0
    {
        return;
    }

    let (bird_col, bird_row) = world_to_cell(snapshot.bird_sprite_box.center(), area, snapshot);
    let bird_glyph = match snapshot.bird_sprite {
        BirdSprite::Idle => "►",
        BirdSprite::Flapping => "▲",
        BirdSprite::Dead => "✖",
    };
    let bird_color = if snapshot.is_dead {
        Color::Red
    } else {
        Color::Yellow
    };

    let walls: [WorldRect; 2] = [snapshot.upper_wall, snapshot.lower_wall];
    let mut lines = Vec::with_capacity(area.height as usize);

    for row in 0..area.height {
        let mut spans = Vec::with_capacity(area.width as usize);
        for col in 0..area.width {
            if i32::from(col) == bird_col && i32::from(row) == bird_row {
                spans.push(Span::styled(
                    bird_glyph,
                    Style::default().fg(bird_color).add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            let p = cell_to_world(col, row, area, snapshot);
            if walls.iter().any(|w| w.contains(p)) {
                spans.push(Span::styled("█", Style::default().fg(Color::Green)));
            } else {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn status_color(result: &FrameResult) -> Color {
    match result {
        FrameResult::NoFace | FrameResult::MultipleFaces(_) | FrameResult::NoReading => {
            Color::DarkGray
        }
        FrameResult::MouthClosed(_) => Color::Yellow,
        FrameResult::MouthOpen(_) => Color::Cyan,
        FrameResult::JumpTriggered(_) => Color::Green,
    }
}

fn labeled(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    let inner = render_panel_frame(frame, area, " Info ");
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let (state, state_color) = if snapshot.is_dead {
        ("DEAD", Color::Red)
    } else {
        ("Flying", Color::Green)
    };
    let mar = snapshot
        .mar()
        .map(|m| format!("{:.2}", m))
        .unwrap_or_else(|| "--".to_string());

    let lines = vec![
        Line::from(Span::styled(
            format!(" Score {}", snapshot.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        labeled("Bird", state.to_string(), state_color),
        labeled("MAR", mar, Color::Cyan),
        labeled("Closed", snapshot.closed_frames.to_string(), Color::Yellow),
        labeled("Jumps", snapshot.total_triggers.to_string(), Color::White),
        labeled("Tick", snapshot.tick.to_string(), Color::DarkGray),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Outline the outer and inner lip of the tracked mouth.
fn render_mouth_preview(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    let inner = render_panel_frame(frame, area, " Mouth ");
    let Some(points) = snapshot.mouth_points.as_ref().filter(|p| p.len() == 20) else {
        frame.render_widget(
            Paragraph::new(Span::styled(" no reading", Style::default().fg(Color::DarkGray))),
            inner,
        );
        return;
    };

    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
    let pad = 4.0;
    let color = if snapshot.classification.is_open() {
        Color::Green
    } else {
        Color::Yellow
    };

    // Canvas y grows upward, image y grows downward
    let segments: Vec<(Point, Point)> = [(0usize, 12usize), (12, 20)]
        .iter()
        .flat_map(|&(start, end)| {
            (start..end).map(move |i| {
                let next = if i + 1 == end { start } else { i + 1 };
                (points[i], points[next])
            })
        })
        .collect();

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([f64::from(min_x) - pad, f64::from(max_x) + pad])
        .y_bounds([-f64::from(max_y) - pad, -f64::from(min_y) + pad])
        .paint(move |ctx| {
            for (a, b) in &segments {
                ctx.draw(&CanvasLine {
                    x1: f64::from(a.x),
                    y1: -f64::from(a.y),
                    x2: f64::from(b.x),
                    y2: -f64::from(b.y),
                    color,
                });
            }
        });
    frame.render_widget(canvas, inner);
}
