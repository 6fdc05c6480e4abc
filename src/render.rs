//! Per-phase screens: start, menu, minigame, "NEXT!" banner and end.
//!
//! Each frame clears the click state and re-registers whatever it drew, so
//! input is always hit-tested against the latest layout.

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::audio::AudioBank;
use crate::config::OBJECTIVE_BANNER_MS;
use crate::flow::{Arcade, Phase};
use crate::input::{ClickState, RESTART_BUTTON, START_BUTTON};
use crate::menu::{layout_hitboxes, MenuState, MENU_COLUMNS};
use crate::minis::wobble_color;
use crate::registry::{record, Catalog};

const FOOTER: &str = "ABSURDIST MICRO-GAMES • No score. No failure. Only nonsense.";

/// Draw the whole screen for the current phase.
pub fn draw<A: AudioBank>(f: &mut Frame, arcade: &Arcade<A>, cs: &mut ClickState, now_ms: f64) {
    let size = f.area();
    cs.terminal_cols = size.width;
    cs.terminal_rows = size.height;
    cs.clear_targets();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    let elapsed = arcade.elapsed(now_ms);
    match arcade.phase() {
        Phase::Start => render_start(f, chunks[0], cs),
        Phase::Menu => {
            if let Some(menu) = arcade.menu() {
                render_menu(f, arcade.catalog(), menu, chunks[0], cs);
            }
        }
        Phase::Playing => render_playing(f, arcade, chunks[0], cs, elapsed),
        Phase::Transitioning => render_transition(f, chunks[0], elapsed),
        Phase::End => render_end(f, chunks[0], cs),
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        FOOTER,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[1]);
}

/// A `width` x `height` rect centred in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// A bordered, centred button that registers itself as a click target.
fn render_button(f: &mut Frame, area: Rect, label: &str, action_id: u16, cs: &mut ClickState) {
    let button = Paragraph::new(Line::from(Span::styled(
        label,
        Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .style(Style::default().bg(Color::Yellow))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Black)),
    );
    f.render_widget(button, area);
    cs.add_click_target(area, action_id);
}

fn render_start(f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Nonsense Games",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Sixteen micro-games. Six seconds each.",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    let title_area = Rect::new(inner.x, inner.y + inner.height / 4, inner.width, inner.height.min(3));
    f.render_widget(title, title_area.intersection(inner));

    let button = centered(inner, 22, 3);
    render_button(f, button, "Press to Start", START_BUTTON, cs);

    let hint_y = button.y + button.height + 1;
    if hint_y < inner.y + inner.height {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Press Enter to start",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        f.render_widget(hint, Rect::new(inner.x, hint_y, inner.width, 1));
    }
}

fn render_end(f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            "Thank You For Playing!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "You completed every micro-game. Nothing was achieved, which was the point.",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    let text_area = Rect::new(inner.x, inner.y + inner.height / 5, inner.width, inner.height.min(4));
    f.render_widget(text, text_area.intersection(inner));

    let button = centered(inner, 18, 3);
    render_button(f, button, "Start Over", RESTART_BUTTON, cs);
}

fn render_menu(f: &mut Frame, catalog: &Catalog, menu: &MenuState, area: Rect, cs: &mut ClickState) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Select A Micro-Game",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Click an option, or use ↑/↓ and Enter. Press TAB to return.",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, Rect::new(area.x, area.y, area.width, area.height.min(2)));

    let width = area.width.saturating_sub(4).min(90);
    let list_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height.min(3),
        width,
        area.height.saturating_sub(3),
    );
    let rows = catalog.len().div_ceil(MENU_COLUMNS) as u16;
    // Two-line items when there is room for them.
    let item_height = if list_area.height >= rows * 3 { 2 } else { 1 };
    let hitboxes = layout_hitboxes(list_area, catalog.len(), MENU_COLUMNS, item_height);

    for (i, rect) in hitboxes.iter().enumerate() {
        let Some(id) = catalog.get(i) else { continue };
        let name = record(id).map_or("?", |r| r.name);
        let style = if i == menu.selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if menu.hover == Some(i) {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 40))
        };
        let item = Paragraph::new(Line::from(format!(" ID {} — {}", id.get(), name))).style(style);
        f.render_widget(item, *rect);
    }
    cs.menu_items = hitboxes;
}

fn render_transition(f: &mut Frame, area: Rect, elapsed_ms: f64) {
    f.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);
    let banner = Paragraph::new(Line::from(Span::styled(
        "NEXT!",
        Style::default()
            .fg(wobble_color(elapsed_ms, 6.0))
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(banner, centered(area, area.width, 1));
}

fn render_playing<A: AudioBank>(
    f: &mut Frame,
    arcade: &Arcade<A>,
    area: Rect,
    cs: &mut ClickState,
    elapsed_ms: f64,
) {
    cs.play_area = area;
    // An unregistered id has no minigame; the area stays blank.
    if let Some(mini) = arcade.active() {
        mini.render(f, area, elapsed_ms);
    }

    let objective = arcade.current_record().map_or("", |r| r.objective);
    if elapsed_ms < OBJECTIVE_BANNER_MS && !objective.is_empty() {
        let width = (objective.chars().count() as u16 + 6).min(area.width);
        let banner_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + area.height / 6,
            width,
            area.height.min(3),
        )
        .intersection(area);
        let banner = Paragraph::new(Line::from(Span::styled(
            objective,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black)),
        );
        f.render_widget(Clear, banner_area);
        f.render_widget(banner, banner_area);
    }
}
