//! The AI Face: freeze the glitching face before it becomes intelligent.

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::{Circle, Line, Rectangle};
use ratzilla::ratatui::Frame;

use super::{field, print_centered, up, wobble_color, MiniCtx, MiniEvent, Minigame, Point};
use crate::audio::Track;

/// Frozen faces pick one of these overlays; 0 is none.
pub const EXPRESSIONS: u8 = 6;

const CENTER: Point = Point::new(0.5, 0.45);
const FACE_R: f64 = 0.22;
const BUTTON: (f64, f64, f64, f64) = (0.325, 0.78, 0.35, 0.08);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Face {
    frozen: bool,
    expression: u8,
    hover: bool,
}

fn on_button(p: Point) -> bool {
    let (x, y, w, h) = BUTTON;
    p.x >= x && p.x <= x + w && p.y >= y && p.y <= y + h
}

impl Minigame for Face {
    fn reset(&mut self, _ctx: &mut MiniCtx) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &MiniEvent, ctx: &mut MiniCtx) -> bool {
        match *event {
            MiniEvent::PointerMove(p) => {
                self.hover = on_button(p);
                true
            }
            MiniEvent::PointerDown(p) if on_button(p) => {
                self.frozen = true;
                self.expression = ctx.rng.random_range(0..=EXPRESSIONS);
                ctx.audio.play_once(Track::ResetClick);
                log::debug!("face frozen with expression {}", self.expression);
                true
            }
            _ => false,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(60, 50, 180), |ctx| {
            let (cx, cy) = (CENTER.x, up(CENTER.y));
            let skin = if self.frozen {
                Color::Rgb(255, 240, 200)
            } else {
                wobble_color(elapsed_ms, 24.0)
            };
            ctx.draw(&Circle {
                x: cx,
                y: cy,
                radius: FACE_R * 0.6,
                color: skin,
            });
            ctx.layer();

            let t = elapsed_ms / 1000.0;
            let (dx, dy) = if self.frozen {
                (0.0, 0.0)
            } else {
                (0.01 * (t * 36.0).sin(), 0.01 * (t * 30.0).cos())
            };
            for side in [-1.0, 1.0] {
                ctx.draw(&Circle {
                    x: cx + side * (FACE_R * 0.25 + dx),
                    y: cy + FACE_R * 0.15 + side * dy,
                    radius: FACE_R * 0.08,
                    color: Color::Black,
                });
            }
            let mouth_y = cy - FACE_R * 0.2 - if self.frozen { 0.0 } else { 0.02 * (t * 18.0).sin() };
            ctx.draw(&Line::new(cx - FACE_R * 0.3, mouth_y, cx + FACE_R * 0.3, mouth_y, Color::Black));

            if self.frozen {
                let decoration = match self.expression {
                    1 => "▀▀▀ ▀▀▀",
                    2 => "@     @",
                    3 => "~~~",
                    4 => "*     *",
                    5 => "P",
                    6 => "\\     /",
                    _ => "",
                };
                if !decoration.is_empty() {
                    let y = if matches!(self.expression, 3 | 5) { 0.52 } else { 0.4 };
                    print_centered(ctx, cols, y, decoration, Style::default().fg(Color::Black));
                }
            }

            let (bx, by, bw, bh) = BUTTON;
            ctx.draw(&Rectangle {
                x: bx,
                y: up(by + bh),
                width: bw,
                height: bh,
                color: if self.hover {
                    Color::Rgb(255, 210, 60)
                } else {
                    Color::Rgb(255, 180, 40)
                },
            });
            print_centered(
                ctx,
                cols,
                by + bh / 2.0,
                "FREEZE!",
                Style::default().fg(Color::Rgb(255, 180, 40)).add_modifier(Modifier::BOLD),
            );
        });
        f.render_widget(canvas, area);
    }
}
