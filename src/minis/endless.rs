//! The Endless Loop: a shrinking button that jumps away every time it is hit.

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::Circle;
use ratzilla::ratatui::Frame;

use super::{field, lerp, print_centered, up, MiniCtx, MiniEvent, Minigame, Point};

const TARGET_CLICKS: u8 = 5;
/// Button diameter before any hits.
const BASE_SIZE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct EndlessLoop {
    clicks: u8,
    pos: Point,
    pointer: Option<Point>,
}

impl Default for EndlessLoop {
    fn default() -> Self {
        Self {
            clicks: 0,
            pos: Point::new(0.5, 0.5),
            pointer: None,
        }
    }
}

impl EndlessLoop {
    pub fn broken(&self) -> bool {
        self.clicks >= TARGET_CLICKS
    }

    fn progress(&self) -> f64 {
        self.clicks as f64 / TARGET_CLICKS as f64
    }

    /// Current diameter; shrinks to a fifth of the original.
    pub fn size(&self) -> f64 {
        BASE_SIZE * (1.0 - self.progress() * 0.8)
    }
}

impl Minigame for EndlessLoop {
    fn reset(&mut self, _ctx: &mut MiniCtx) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        match *event {
            MiniEvent::PointerMove(p) => {
                self.pointer = Some(p);
                true
            }
            MiniEvent::PointerDown(p) if !self.broken() && p.dist(self.pos) <= self.size() / 2.0 => {
                self.clicks += 1;
                let pad = self.size() / 2.0 + 0.01;
                self.pos = Point::new(
                    ctx.rng.random_range(pad..1.0 - pad),
                    ctx.rng.random_range(pad..1.0 - pad),
                );
                true
            }
            _ => false,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, _elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(255, 200, 200), |ctx| {
            let t = self.progress();
            let hover = self
                .pointer
                .is_some_and(|p| p.dist(self.pos) < self.size() / 2.0);
            let color = if hover {
                Color::Rgb(255, 255, 100)
            } else {
                Color::Rgb(lerp(255.0, 80.0, t) as u8, 80, lerp(80.0, 200.0, t) as u8)
            };
            ctx.draw(&Circle {
                x: self.pos.x,
                y: up(self.pos.y),
                radius: self.size() / 2.0,
                color,
            });
            let status = if self.broken() {
                "LOOP BROKEN! (briefly)".to_string()
            } else {
                format!("Clicks to Break: {}", TARGET_CLICKS - self.clicks)
            };
            print_centered(
                ctx,
                cols,
                0.18,
                status,
                Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            );
        });
        f.render_widget(canvas, area);
    }
}
