//! Space them: one press of Space puts grief and mayonnaise apart.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::{Circle, Line};
use ratzilla::ratatui::Frame;

use super::{field, print_centered, print_centered_at, up, MiniCtx, MiniEvent, Minigame, Point};
use crate::audio::Track;
use crate::input::Key;

const BONG_MS: f64 = 450.0;
const SIZE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Concepts {
    grief: Point,
    mayo: Point,
    bong_at_ms: Option<f64>,
}

impl Default for Concepts {
    fn default() -> Self {
        Self {
            grief: Point::new(0.45, 0.5),
            mayo: Point::new(0.55, 0.5),
            bong_at_ms: None,
        }
    }
}

impl Concepts {
    pub fn separated(&self) -> bool {
        self.bong_at_ms.is_some()
    }
}

impl Minigame for Concepts {
    fn reset(&mut self, _ctx: &mut MiniCtx) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        if *event != MiniEvent::Key(Key::Space) || self.separated() {
            return false;
        }
        self.bong_at_ms = Some(ctx.elapsed_ms);
        self.grief = Point::new(0.2, 0.5);
        self.mayo = Point::new(0.8, 0.5);
        ctx.audio.play_once(Track::BongGavel);
        true
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(70, 240, 90), |ctx| {
            ctx.draw(&Line::new(0.5, up(0.2), 0.5, up(0.8), Color::Black));

            // Spiky star for grief
            let (gx, gy) = (self.grief.x, up(self.grief.y));
            let spikes = 11;
            let vertex = |i: usize| {
                let a = std::f64::consts::PI * i as f64 / spikes as f64;
                let r = if i % 2 == 0 { SIZE } else { SIZE * 0.45 };
                (gx + a.cos() * r, gy + a.sin() * r)
            };
            for i in 0..spikes * 2 {
                let (x1, y1) = vertex(i);
                let (x2, y2) = vertex((i + 1) % (spikes * 2));
                ctx.draw(&Line::new(x1, y1, x2, y2, Color::Rgb(240, 40, 40)));
            }

            ctx.draw(&Circle {
                x: self.mayo.x,
                y: up(self.mayo.y),
                radius: SIZE * 0.9,
                color: Color::Rgb(255, 245, 120),
            });

            let label = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
            print_centered_at(ctx, cols, self.grief.x, self.grief.y - 0.14, "GRIEF", label);
            print_centered_at(ctx, cols, self.mayo.x, self.mayo.y + 0.14, "MAYONNAISE", label);
            print_centered(ctx, cols, 0.12, "Give them Space.", label);

            if self.bong_at_ms.is_some_and(|t| elapsed_ms - t < BONG_MS) {
                print_centered(
                    ctx,
                    cols,
                    0.35,
                    "BONG!",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                );
            }
        });
        f.render_widget(canvas, area);
    }
}
