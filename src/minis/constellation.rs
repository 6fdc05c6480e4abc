//! Constellation: chain stars together; the meaning never arrives.

use rand::Rng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::widgets::canvas::{Circle, Line};
use ratzilla::ratatui::Frame;

use super::{field, print_centered, up, MiniCtx, MiniEvent, Minigame, Point};

const STARS: usize = 10;
const MARGIN: f64 = 0.12;
const HIT_RADIUS: f64 = 0.04;
const GRID_STEP: f64 = 0.08;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constellation {
    stars: Vec<Point>,
    links: Vec<(usize, usize)>,
    last: Option<usize>,
}

impl Constellation {
    /// Every star could be on one chain.
    pub fn complete(&self) -> bool {
        let needed = self.stars.len().saturating_sub(1);
        needed > 0 && self.links.len() >= needed
    }

    fn star_at(&self, p: Point) -> Option<usize> {
        self.stars.iter().position(|s| s.dist(p) <= HIT_RADIUS)
    }

    fn linked(&self, a: usize, b: usize) -> bool {
        self.links.iter().any(|&l| l == (a, b) || l == (b, a))
    }
}

impl Minigame for Constellation {
    fn reset(&mut self, ctx: &mut MiniCtx) {
        let stars = (0..STARS)
            .map(|_| {
                Point::new(
                    ctx.rng.random_range(MARGIN..1.0 - MARGIN),
                    ctx.rng.random_range(MARGIN..1.0 - MARGIN),
                )
            })
            .collect();
        *self = Self {
            stars,
            ..Self::default()
        };
    }

    fn handle_input(&mut self, event: &MiniEvent, _ctx: &mut MiniCtx) -> bool {
        let MiniEvent::PointerDown(p) = *event else {
            return false;
        };
        let Some(hit) = self.star_at(p) else {
            return false;
        };
        if let Some(prev) = self.last.filter(|&prev| prev != hit) {
            if !self.linked(prev, hit) {
                self.links.push((prev, hit));
            }
        }
        self.last = Some(hit);
        true
    }

    fn render(&self, f: &mut Frame, area: Rect, elapsed_ms: f64) {
        let cols = area.width;
        let canvas = field(Color::Rgb(5, 8, 24), |ctx| {
            let grid = Color::Rgb(30, 30, 60);
            let steps = (1.0 / GRID_STEP) as usize;
            for i in 0..=steps {
                let v = i as f64 * GRID_STEP;
                ctx.draw(&Line::new(v, 0.0, v, 1.0, grid));
                ctx.draw(&Line::new(0.0, v, 1.0, v, grid));
            }
            ctx.layer();

            for &(a, b) in &self.links {
                let (Some(a), Some(b)) = (self.stars.get(a), self.stars.get(b)) else {
                    continue;
                };
                ctx.draw(&Line::new(a.x, up(a.y), b.x, up(b.y), Color::Rgb(180, 220, 255)));
            }
            for (i, s) in self.stars.iter().enumerate() {
                let pulse = 1.0 + 0.35 * (elapsed_ms / 1000.0 * 4.8 + i as f64).sin();
                let glow = if self.last == Some(i) {
                    Color::Rgb(160, 210, 255)
                } else {
                    Color::Rgb(90, 130, 200)
                };
                ctx.draw(&Circle {
                    x: s.x,
                    y: up(s.y),
                    radius: 0.025 * pulse,
                    color: glow,
                });
                ctx.draw(&Circle {
                    x: s.x,
                    y: up(s.y),
                    radius: 0.008 * pulse,
                    color: Color::White,
                });
            }

            print_centered(
                ctx,
                cols,
                0.14,
                "CONSTELLATION OF DOUBT",
                Style::default().fg(Color::Rgb(240, 240, 240)).add_modifier(Modifier::BOLD),
            );
            print_centered(
                ctx,
                cols,
                0.22,
                "Click stars to draw a line of meaning. It will not help.",
                Style::default().fg(Color::Rgb(220, 220, 220)),
            );
            if self.complete() {
                print_centered(
                    ctx,
                    cols,
                    0.85,
                    "YOU HAVE CONNECTED EVERYTHING. IT IS STILL UNCLEAR.",
                    Style::default().fg(Color::Rgb(255, 230, 140)).add_modifier(Modifier::BOLD),
                );
            }
        });
        f.render_widget(canvas, area);
    }
}
