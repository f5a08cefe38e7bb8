//! Layout and drawing: header, playfield, items, bins, resolution flash.

use crate::layout::TargetZone;
use crate::session::{Resolution, ResolutionKind, Session};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Logical units covered by one terminal cell.
pub const UNITS_PER_COL: f32 = 10.0;
pub const UNITS_PER_ROW: f32 = 20.0;

const HEADER_ROWS: u16 = 1;
const STATUS_ROWS: u16 = 1;
const FLASH_MS: u32 = 450;
/// How long the last resolution stays in the header.
const TOAST: std::time::Duration = std::time::Duration::from_secs(3);

/// Last resolution plus its flash, processed once per frame like any other tachyonfx effect.
#[derive(Default)]
pub struct Flash {
    last: Option<Resolution>,
    effect: Option<Effect>,
    process_time: Option<Instant>,
    finished: bool,
}

impl Flash {
    /// Replace the running flash with one for `r`.
    pub fn trigger(&mut self, r: Resolution) {
        self.last = Some(r);
        self.effect = None;
        self.process_time = None;
        self.finished = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drop the effect once it has run its course; the last resolution stays for the header.
    pub fn reap(&mut self) {
        if self.effect.as_ref().is_some_and(|e| e.done()) {
            self.effect = None;
            self.process_time = None;
            self.finished = true;
        }
    }
}

/// Inner playfield rect (inside the border) for the terminal area.
pub fn field_rect(area: Rect) -> Rect {
    let outer = Rect {
        x: area.x,
        y: area.y + HEADER_ROWS,
        width: area.width,
        height: area.height.saturating_sub(HEADER_ROWS + STATUS_ROWS),
    };
    Block::default().borders(Borders::ALL).inner(outer)
}

/// Logical field size for a playfield rect.
pub fn logical_size(field: Rect) -> (f32, f32) {
    (
        field.width as f32 * UNITS_PER_COL,
        field.height as f32 * UNITS_PER_ROW,
    )
}

/// Terminal cell → logical point at the cell's centre.
pub fn to_logical(field: Rect, col: u16, row: u16) -> (f32, f32) {
    (
        (col as f32 - field.x as f32 + 0.5) * UNITS_PER_COL,
        (row as f32 - field.y as f32 + 0.5) * UNITS_PER_ROW,
    )
}

/// Logical box → terminal rect clipped to the field; `None` when fully outside.
fn to_cells(field: Rect, x: f32, y: f32, w: f32, h: f32) -> Option<Rect> {
    let x0 = field.x as i32 + (x / UNITS_PER_COL).floor() as i32;
    let y0 = field.y as i32 + (y / UNITS_PER_ROW).floor() as i32;
    let x1 = x0 + (w / UNITS_PER_COL).round().max(1.0) as i32;
    let y1 = y0 + (h / UNITS_PER_ROW).round().max(1.0) as i32;
    let cx0 = x0.max(field.x as i32);
    let cy0 = y0.max(field.y as i32);
    let cx1 = x1.min(field.right() as i32);
    let cy1 = y1.min(field.bottom() as i32);
    if cx1 <= cx0 || cy1 <= cy0 {
        return None;
    }
    Some(Rect {
        x: cx0 as u16,
        y: cy0 as u16,
        width: (cx1 - cx0) as u16,
        height: (cy1 - cy0) as u16,
    })
}

fn zone_rect(field: Rect, zone: &TargetZone, session: &Session) -> Option<Rect> {
    let (_, h) = session.field_size();
    let band = session.config().band_height;
    to_cells(field, zone.left, h - band, zone.width(), band)
}

fn band_rect(field: Rect, session: &Session) -> Option<Rect> {
    let (w, h) = session.field_size();
    let band = session.config().band_height;
    to_cells(field, 0.0, h - band, w, band)
}

pub fn draw(frame: &mut Frame, session: &Session, theme: &Theme, flash: &mut Flash, now: Instant) {
    let area = frame.area();
    let field = field_rect(area);
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

    let toast = flash
        .last
        .as_ref()
        .filter(|r| now.saturating_duration_since(r.at) < TOAST);
    draw_header(frame, session, theme, toast, area);

    let border = Rect {
        x: field.x.saturating_sub(1),
        y: field.y.saturating_sub(1),
        width: field.width + 2,
        height: field.height + 2,
    }
    .intersection(area);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line)),
        border,
    );

    for zone in session.zones() {
        draw_zone(frame, session, theme, field, zone);
    }
    draw_items(frame, session, theme, field);
    draw_status(frame, session, theme, area);

    if session.is_paused() {
        draw_pause_overlay(frame, theme, field);
    }
    apply_flash(frame, session, theme, field, flash, now);
}

fn draw_header(
    frame: &mut Frame,
    session: &Session,
    theme: &Theme,
    last: Option<&Resolution>,
    area: Rect,
) {
    let row = Rect {
        height: HEADER_ROWS.min(area.height),
        ..area
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled(" Tri des déchets ", bold.fg(theme.title)),
        Span::styled(
            format!(" Score: {} ", session.score()),
            bold.fg(theme.main_fg),
        ),
        Span::styled(
            format!(
                " Items: {}/{} ",
                session.active_count(),
                session.config().max_active
            ),
            Style::default().fg(theme.main_fg),
        ),
    ];
    if let Some(r) = last {
        let (sign, color) = if r.delta >= 0 {
            ("+", theme.good)
        } else {
            ("", theme.bad)
        };
        let target = r.zone.map_or("sol", |z| z.category.label());
        spans.push(Span::styled(
            format!(" {sign}{} {} → {target} ", r.delta, r.name),
            Style::default().fg(color),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), row);
}

fn draw_status(frame: &mut Frame, session: &Session, theme: &Theme, area: Rect) {
    if area.height < HEADER_ROWS + STATUS_ROWS + 2 {
        return;
    }
    let row = Rect {
        y: area.bottom() - STATUS_ROWS,
        height: STATUS_ROWS,
        ..area
    };
    let held = session
        .active_items()
        .filter(|i| i.is_dragging())
        .map(|i| i.template.name)
        .collect::<Vec<_>>();
    let text = if held.is_empty() {
        " Drag items into bins   [R] Restart   [P] Pause   [Q] Quit".to_string()
    } else {
        format!(" Holding: {}", held.join(", "))
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(theme.main_fg)),
        row,
    );
}

fn draw_zone(frame: &mut Frame, session: &Session, theme: &Theme, field: Rect, zone: &TargetZone) {
    let Some(rect) = zone_rect(field, zone, session) else {
        return;
    };
    let color = theme.category_color(zone.category);
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::TOP)
        .border_style(Style::default().fg(color))
        .title(Line::from(zone.category.label()).alignment(Alignment::Center));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    frame.render_widget(
        Paragraph::new(zone.name)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(color)),
        inner,
    );
}

fn draw_items(frame: &mut Frame, session: &Session, theme: &Theme, field: Rect) {
    let cfg = session.config();
    for item in session.active_items() {
        let Some(rect) = to_cells(field, item.x, item.y, cfg.item_width, cfg.item_height) else {
            continue;
        };
        let mut style = Style::default()
            .fg(Color::Black)
            .bg(theme.category_color(item.category()));
        if item.is_dragging() {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        frame.render_widget(
            Paragraph::new(item.template.name)
                .wrap(Wrap { trim: true })
                .style(style),
            rect,
        );
    }
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, field: Rect) {
    let w = 20u16.min(field.width);
    let h = 3u16.min(field.height);
    let popup = Rect {
        x: field.x + field.width.saturating_sub(w) / 2,
        y: field.y + field.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    };
    frame.render_widget(
        Paragraph::new("PAUSE")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.title)),
            )
            .style(
                Style::default()
                    .fg(theme.title)
                    .bg(theme.bg)
                    .add_modifier(Modifier::BOLD),
            ),
        popup,
    );
}

/// Flash the bin (or the ground strip on a miss) that took the last resolution.
fn apply_flash(
    frame: &mut Frame,
    session: &Session,
    theme: &Theme,
    field: Rect,
    flash: &mut Flash,
    now: Instant,
) {
    if flash.finished {
        return;
    }
    let Some(r) = flash.last else {
        return;
    };
    let target = match r.zone {
        Some(zone) => zone_rect(field, &zone, session),
        None => band_rect(field, session),
    };
    let Some(target) = target else {
        return;
    };
    let delta = flash
        .process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    flash.process_time = Some(now);

    if flash.effect.is_none() {
        let color = if r.delta >= 0 { theme.good } else { theme.bad };
        let interpolation = match r.kind {
            ResolutionKind::Drag => Interpolation::QuadOut,
            ResolutionKind::Drop => Interpolation::Linear,
        };
        let effect = fx::fade_from(color, color, (FLASH_MS, interpolation)).with_area(target);
        flash.effect = Some(effect);
    }
    if let Some(effect) = flash.effect.as_mut() {
        frame.render_effect(effect, target, TfxDuration::from_millis(delta_ms));
    }
}
